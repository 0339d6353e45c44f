/// Tokens the FAA export uses for "no value". Matched case-sensitively.
const PLACEHOLDERS: &[&str] = &["N/A", "n/a", "NONE", "none", "-", "--"];

/// Collapse whitespace runs and trim; `None` for empty or placeholder values.
pub fn clean(raw: &str) -> Option<String> {
    let value = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if value.is_empty() || PLACEHOLDERS.contains(&value.as_str()) {
        return None;
    }
    Some(value)
}

/// `MM/DD/YYYY` → `YYYY-MM-DD`.
///
/// Anything that isn't three numeric slash-separated parts is returned
/// unchanged, so a malformed date never costs us the rest of the record.
pub fn convert_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('/').collect();
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    match parts.as_slice() {
        [month, day, year] if numeric(month) && numeric(day) && numeric(year) => {
            format!("{}-{:0>2}-{:0>2}", year, month, day)
        }
        _ => raw.to_string(),
    }
}
