//! JASC/ATA code descriptions.
//!
//! The FAA publishes the code table as a PDF whose extracted text is a run of
//! "code on its own line, then one or more description lines". The table is
//! built once per process on first use and is read-only afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

pub const DEFAULT_TABLE_PATH: &str = "data/lookup/JASC Code Look-Up Table.pdf";
pub const TABLE_PATH_ENV: &str = "SDR_JASC_TABLE";

/// Descriptions are cut at the first period if it falls within this many chars.
const SENTENCE_LIMIT: usize = 120;

static CODE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]{4,5})\s*$").unwrap());

static TABLE: LazyLock<JascTable> = LazyLock::new(|| JascTable::load(&table_path()));

#[derive(Debug, Clone, Default)]
pub struct JascTable {
    codes: BTreeMap<String, String>,
}

impl JascTable {
    /// Parse extracted reference text.
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::default();
        let mut current: Option<&str> = None;
        let mut desc_parts: Vec<&str> = Vec::new();

        for line in text.lines() {
            if let Some(caps) = CODE_LINE_RE.captures(line) {
                if let Some(code) = current {
                    table.flush(code, &desc_parts);
                }
                current = caps.get(1).map(|m| m.as_str());
                desc_parts.clear();
            } else if current.is_some() {
                let stripped = line.trim();
                if !stripped.is_empty() {
                    desc_parts.push(stripped);
                }
            }
        }
        if let Some(code) = current {
            table.flush(code, &desc_parts);
        }

        table
    }

    /// Load from a PDF (text-extracted) or a plain text file. A missing or
    /// unreadable document gives an empty table.
    pub fn load(path: &Path) -> Self {
        if !path.is_file() {
            warn!("JASC table not found at {}, code lookups disabled", path.display());
            return Self::default();
        }

        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        let text = if is_pdf {
            pdf_extract::extract_text(path).map_err(|e| e.to_string())
        } else {
            std::fs::read(path)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .map_err(|e| e.to_string())
        };

        match text {
            Ok(text) => {
                let table = Self::from_text(&text);
                info!("Loaded {} JASC codes from {}", table.len(), path.display());
                table
            }
            Err(e) => {
                warn!("Failed to read JASC table {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn flush(&mut self, code: &str, desc_parts: &[&str]) {
        if desc_parts.is_empty() {
            return;
        }
        let mut full = desc_parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some(dot) = full.find('.') {
            if full[..dot].chars().count() < SENTENCE_LIMIT {
                full.truncate(dot + 1);
            }
        }
        if !full.is_empty() {
            self.codes.insert(code.to_string(), full);
        }
    }

    /// Exact entry for `code`, no fallback.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// Description for `code`, falling back to its chapter (`XX00`).
    pub fn lookup(&self, code: &str) -> Option<String> {
        let code = code.trim();
        if let Some(desc) = self.get(code) {
            return Some(desc.to_string());
        }
        if code.chars().count() < 2 {
            return None;
        }
        let chapter: String = code.chars().take(2).chain("00".chars()).collect();
        self.get(&chapter)
            .map(|desc| format!("{} (sub-code {})", desc, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reference document path: `$SDR_JASC_TABLE` or the bundled default.
pub fn table_path() -> PathBuf {
    std::env::var_os(TABLE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_PATH))
}

/// The process-wide table, built on first call.
pub fn table() -> &'static JascTable {
    &TABLE
}

pub fn lookup(code: &str) -> Option<String> {
    table().lookup(code)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> JascTable {
        JascTable::load(Path::new("tests/fixtures/jasc_table.txt"))
    }

    #[test]
    fn parses_fixture() {
        let t = fixture();
        assert_eq!(t.len(), 5);
        assert_eq!(t.get("1100"), Some("PLACARDS AND MARKINGS."));
        assert_eq!(t.get("3200"), Some("LANDING GEAR."));
        assert_eq!(t.get("3230"), Some("EXTENSION AND RETRACTION"));
        assert_eq!(t.get("7400"), Some("IGNITION SYSTEM."));
        assert_eq!(t.get("7414"), Some("MAGNETO/DISTRIBUTOR"));
        // Code with no description lines is skipped.
        assert_eq!(t.get("7500"), None);
    }

    #[test]
    fn exact_match_wins() {
        assert_eq!(fixture().lookup("7400").as_deref(), Some("IGNITION SYSTEM."));
        assert_eq!(fixture().lookup("  7414 ").as_deref(), Some("MAGNETO/DISTRIBUTOR"));
    }

    #[test]
    fn chapter_fallback() {
        assert_eq!(
            fixture().lookup("7403").as_deref(),
            Some("IGNITION SYSTEM. (sub-code 7403)")
        );
    }

    #[test]
    fn unknown_code() {
        assert_eq!(fixture().lookup("9999"), None);
        assert_eq!(fixture().lookup("9"), None);
        assert_eq!(fixture().lookup(""), None);
    }

    #[test]
    fn multiline_description_joined() {
        let t = JascTable::from_text("2100\nAIR   CONDITIONING\n  AND PRESSURIZATION\n2200\nAUTOFLIGHT\n");
        assert_eq!(t.get("2100"), Some("AIR CONDITIONING AND PRESSURIZATION"));
        assert_eq!(t.get("2200"), Some("AUTOFLIGHT"));
    }

    #[test]
    fn long_first_sentence_is_kept_whole() {
        let long = "X".repeat(SENTENCE_LIMIT + 5);
        let t = JascTable::from_text(&format!("5100\n{long}. Second sentence.\n"));
        assert_eq!(t.get("5100"), Some(format!("{long}. Second sentence.").as_str()));

        let short = "X".repeat(SENTENCE_LIMIT - 1);
        let t = JascTable::from_text(&format!("5100\n{short}. Second sentence.\n"));
        assert_eq!(t.get("5100"), Some(format!("{short}.").as_str()));
    }

    #[test]
    fn text_before_first_code_is_ignored() {
        let t = JascTable::from_text("JASC TABLE\nRevision 2\n0500\nTIME LIMITS\n");
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("0500"), Some("TIME LIMITS"));
    }

    #[test]
    fn missing_document_is_empty() {
        let t = JascTable::load(Path::new("tests/fixtures/missing.pdf"));
        assert!(t.is_empty());
        assert_eq!(t.lookup("7400"), None);
    }
}
