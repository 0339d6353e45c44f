pub mod codes;
pub mod equipment;
pub mod part;
pub mod submitter;

use regex::Regex;

use super::normalize::clean;
use super::sections;
use crate::db::SdrRecord;

/// Labels that only appear in a real report body; anything else is file
/// header/footer noise.
const ANCHORS: &[&str] = &["Submitter Information", "Unique Control"];

/// Build one record from a report block.
///
/// Returns `None` for blocks without a report anchor and for blocks where
/// every field came up empty.
pub fn parse_block(block: &str) -> Option<SdrRecord> {
    if !ANCHORS.iter().any(|anchor| block.contains(anchor)) {
        return None;
    }

    let mut record = SdrRecord::default();
    submitter::extract(block, &mut record);
    codes::extract(block, &mut record);
    equipment::extract(block, &mut record);
    record.description = sections::problem_description(block).and_then(clean);
    part::extract(block, &mut record);

    if record.is_empty() {
        return None;
    }
    Some(record)
}

/// First capture group of `re` in `text`, cleaned.
pub(crate) fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| clean(m.as_str()))
}

// ── Tests ──
