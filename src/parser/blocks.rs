use std::sync::LazyLock;

use regex::Regex;

static END_OF_REPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-+\s*End Of Report\s*-+").unwrap());

/// Split a raw SDR dump into one text span per report.
///
/// Spans are trimmed and empty ones dropped. Text after the last terminator
/// is kept as a final block.
pub fn split_reports(text: &str) -> Vec<&str> {
    END_OF_REPORT_RE
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminator() {
        let text = "first\n---------- End Of Report ----------\nsecond\n---- end of report ----\n";
        assert_eq!(split_reports(text), vec!["first", "second"]);
    }

    #[test]
    fn keeps_trailing_text() {
        let text = "first\n--End Of Report--\nsecond\n--End Of Report--\n  tail  ";
        assert_eq!(split_reports(text), vec!["first", "second", "tail"]);
    }

    #[test]
    fn drops_whitespace_only_spans() {
        let text = "\n\n--End Of Report--\n   \n--END OF REPORT--\nreal\n--End Of Report--\n\n";
        assert_eq!(split_reports(text), vec!["real"]);
    }

    #[test]
    fn empty_input() {
        assert!(split_reports("").is_empty());
        assert!(split_reports("------ End Of Report ------").is_empty());
    }

    #[test]
    fn no_terminator_is_one_block() {
        assert_eq!(split_reports("  just one report  "), vec!["just one report"]);
    }

    #[test]
    fn terminator_needs_dashes_on_both_sides() {
        let text = "says End Of Report in prose\nmore";
        assert_eq!(split_reports(text).len(), 1);
    }
}
