use std::sync::LazyLock;

use regex::Regex;

// Section bodies start after the dashed rule under the numbered header and
// run up to the next numbered header.
static PROBLEM_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)4\.\s*Problem Description.*?-{5,}\s*\n(.*?)\n\s*5\.\s*Specific Part").unwrap()
});
static SPECIFIC_PART_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)5\.\s*Specific Part.*?-{5,}\s*\n(.*?)\n\s*6\.\s*Component").unwrap()
});

/// Narrative text of §4, unnormalized.
pub fn problem_description(block: &str) -> Option<&str> {
    PROBLEM_DESCRIPTION_RE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Body of §5 "Specific Part", or `""` when the section can't be bounded.
///
/// Labels `(a)`..`(g)` repeat in §6 "Component", so part fields must only
/// ever be matched against this slice.
pub fn specific_part_section(block: &str) -> &str {
    SPECIFIC_PART_RE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}
