use std::sync::LazyLock;

use regex::Regex;

use super::capture;
use crate::db::SdrRecord;
use crate::parser::normalize::convert_date;

static CONTROL_NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(a\)\s*Unique Control #:\s*(\S+)").unwrap());
static DIFFICULTY_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(b\)\s*Difficulty Date:\s*([0-9/]+)").unwrap());
static REG_NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(c\)\s*Registration #\s*:\s*([A-Za-z0-9]+)").unwrap());
static SUBMITTER_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(d\)\s*Submitter Type\s*:\s*(.+?)(?:\s{2,}|$)").unwrap()
});

/// §1 Submitter Information.
pub fn extract(block: &str, record: &mut SdrRecord) {
    record.control_number = capture(&CONTROL_NUM_RE, block);
    record.difficulty_date = capture(&DIFFICULTY_DATE_RE, block).map(|d| convert_date(&d));
    record.tail_number = capture(&REG_NUM_RE, block);
    record.submitter = capture(&SUBMITTER_TYPE_RE, block);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitter_fields() {
        let block = "\
(a) Unique Control #: 2024FA0000123       (b) Difficulty Date: 3/4/2024
(c) Registration # : N739XW               (d) Submitter Type : Repair Station
";
        let mut r = SdrRecord::default();
        extract(block, &mut r);
        assert_eq!(r.control_number.as_deref(), Some("2024FA0000123"));
        assert_eq!(r.difficulty_date.as_deref(), Some("2024-03-04"));
        assert_eq!(r.tail_number.as_deref(), Some("N739XW"));
        assert_eq!(r.submitter.as_deref(), Some("Repair Station"));
    }

    #[test]
    fn submitter_type_at_end_of_line() {
        let block = "(d) Submitter Type : Operator\n(e) Operator Designator: ABCA";
        let mut r = SdrRecord::default();
        extract(block, &mut r);
        assert_eq!(r.submitter.as_deref(), Some("Operator"));
    }

    #[test]
    fn missing_labels_stay_absent() {
        let mut r = SdrRecord::default();
        extract("1. Submitter Information\n(b) Difficulty Date:\n", &mut r);
        assert!(r.is_empty());
    }
}
