use std::sync::LazyLock;

use regex::Regex;

use super::capture;
use crate::db::SdrRecord;

static ATA_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(c\)\s*JASC/ATA Code\s*:\s*(\S+)").unwrap());
static STAGE_OP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(d\)\s*Stage of Operation\s*:\s*(.+?)(?:\s{2,}|$)").unwrap()
});
// Runs to the next lettered label on the same line, usually (g).
static NATURE_COND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(f\)\s*Nature of Condition\s*:\s*([^\n]*?)\s*(?:\([a-z]\)|$)").unwrap()
});
static PRECAUTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(g\)\s*Precautionary Procedures:\s*(.+?)(?:\s{2,}|$)").unwrap()
});

/// §2 Codes.
pub fn extract(block: &str, record: &mut SdrRecord) {
    record.jasc_code = capture(&ATA_CODE_RE, block);
    record.stage_of_operation = capture(&STAGE_OP_RE, block);
    record.nature_of_condition = capture(&NATURE_COND_RE, block);
    record.precautionary_procedure = capture(&PRECAUTION_RE, block);
}
