use std::collections::HashMap;

use crate::db::SdrRecord;

/// Headline numbers for a parsed batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub records: usize,
    pub with_tail: usize,
    pub with_control_number: usize,
    pub failed_parts: usize,
    pub excess_wear: usize,
    pub top_jasc: Vec<(String, usize)>,
    pub top_parts: Vec<(String, usize)>,
}

impl BatchSummary {
    pub fn without_tail(&self) -> usize {
        self.records - self.with_tail
    }
}

pub fn summarize(records: &[SdrRecord], top_n: usize) -> BatchSummary {
    let mut jasc: HashMap<&str, usize> = HashMap::new();
    let mut parts: HashMap<&str, usize> = HashMap::new();
    let mut summary = BatchSummary {
        records: records.len(),
        ..Default::default()
    };

    for r in records {
        if r.tail_number.is_some() {
            summary.with_tail += 1;
        }
        if r.control_number.is_some() {
            summary.with_control_number += 1;
        }
        if let Some(code) = r.jasc_code.as_deref() {
            *jasc.entry(code).or_default() += 1;
        }
        if let Some(part) = r.part_name.as_deref() {
            *parts.entry(part).or_default() += 1;
        }
        if let Some(cond) = r.part_condition.as_deref() {
            let cond = cond.to_uppercase();
            if cond.contains("FAIL") || cond.contains("CRACK") {
                summary.failed_parts += 1;
            }
            if cond.contains("EXCESS") && cond.contains("WEAR") {
                summary.excess_wear += 1;
            }
        }
    }

    summary.top_jasc = top(jasc, top_n);
    summary.top_parts = top(parts, top_n);
    summary
}

/// Highest counts first, ties broken alphabetically.
fn top(counts: HashMap<&str, usize>, n: usize) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(n);
    sorted
}
