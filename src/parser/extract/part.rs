use std::sync::LazyLock;

use regex::Regex;

use super::capture;
use crate::db::SdrRecord;
use crate::parser::sections::specific_part_section;

static PART_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(a\)\s*Part Name\s*:\s*(.+?)(?:\s*\(b\)|\s{2,}|$)").unwrap()
});
static PART_MFR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(b\)\s*Manufacturer'?s? Name\s*:\s*([^(\n]+?)(?:\s{2,}|\n|$)").unwrap()
});
static PART_NUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(c\)\s*Part Number\s*:\s*(.+?)(?:\s{2,}|\(d\)|$)").unwrap()
});
static PART_COND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(e\)\s*Part Condition:\s*(.+?)(?:\s{2,}|\(f\)|$)").unwrap()
});
static PART_LOC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(f\)\s*Part/Defect Location:\s*(.+?)(?:\s{2,}|$)").unwrap()
});

/// §5 Specific Part, matched only inside that section's slice.
pub fn extract(block: &str, record: &mut SdrRecord) {
    let section = specific_part_section(block);
    record.part_name = capture(&PART_NAME_RE, section);
    record.part_manufacturer = capture(&PART_MFR_RE, section);
    record.part_number = capture(&PART_NUM_RE, section);
    record.part_condition = capture(&PART_COND_RE, section);
    record.part_location = capture(&PART_LOC_RE, section);
}
