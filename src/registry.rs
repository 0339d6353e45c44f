use std::collections::HashMap;

use crate::db::{AircraftRow, SdrRecord};

/// One aircraft row per distinct tail number in the batch.
///
/// Rows appear in first-seen order; when a tail number repeats, the last
/// report carrying it supplies make, model and engine.
pub fn aircraft_rows(records: &[SdrRecord]) -> Vec<AircraftRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<AircraftRow> = Vec::new();

    for r in records {
        let Some(tail) = r.tail_number.as_deref() else {
            continue;
        };
        let row = AircraftRow {
            tail_number: tail.to_string(),
            make: r.aircraft_make.clone(),
            model: r.aircraft_model.clone(),
            engine_type: r.engine_make.clone(),
        };
        match index.get(tail) {
            Some(&i) => rows[i] = row,
            None => {
                index.insert(tail, rows.len());
                rows.push(row);
            }
        }
    }

    rows
}

/// Collapse reports sharing a control number, keeping first-seen position
/// and the content of the last occurrence. Reports without one pass through.
pub fn unique_reports(records: &[SdrRecord]) -> Vec<SdrRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<SdrRecord> = Vec::with_capacity(records.len());

    for r in records {
        let Some(control) = r.control_number.as_deref() else {
            unique.push(r.clone());
            continue;
        };
        match index.get(control) {
            Some(&i) => unique[i] = r.clone(),
            None => {
                index.insert(control, unique.len());
                unique.push(r.clone());
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tail: Option<&str>, model: &str) -> SdrRecord {
        SdrRecord {
            tail_number: tail.map(String::from),
            aircraft_make: Some("CESSNA".into()),
            aircraft_model: Some(model.into()),
            engine_make: Some("LYCOMING".into()),
            ..Default::default()
        }
    }

    #[test]
    fn last_occurrence_wins() {
        let records = vec![
            record(Some("N739XW"), "172S"),
            record(Some("N4411P"), "PA28"),
            record(None, "IGNORED"),
            record(Some("N739XW"), "172SP"),
        ];
        let rows = aircraft_rows(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tail_number, "N739XW");
        assert_eq!(rows[0].model.as_deref(), Some("172SP"));
        assert_eq!(rows[0].engine_type.as_deref(), Some("LYCOMING"));
        assert_eq!(rows[1].tail_number, "N4411P");
    }

    #[test]
    fn last_occurrence_can_clear_fields() {
        let mut later = record(Some("N1"), "X");
        later.aircraft_make = None;
        let rows = aircraft_rows(&[record(Some("N1"), "X"), later]);
        assert_eq!(rows[0].make, None);
    }

    #[test]
    fn no_tails() {
        assert!(aircraft_rows(&[record(None, "X")]).is_empty());
    }

    fn report(control: Option<&str>, part: &str) -> SdrRecord {
        SdrRecord {
            control_number: control.map(String::from),
            part_name: Some(part.into()),
            ..Default::default()
        }
    }

    #[test]
    fn overlapping_exports_collapse_to_one_report() {
        let records = vec![
            report(Some("2024FA0000123"), "MAGNETO"),
            report(None, "SPRING"),
            report(Some("2024FA0000456"), "VALVE"),
            report(None, "SPRING"),
            report(Some("2024FA0000123"), "MAGNETO ASSY"),
        ];
        let unique = unique_reports(&records);
        assert_eq!(unique.len(), 4);
        assert_eq!(unique[0].control_number.as_deref(), Some("2024FA0000123"));
        assert_eq!(unique[0].part_name.as_deref(), Some("MAGNETO ASSY"));
        assert_eq!(unique[2].control_number.as_deref(), Some("2024FA0000456"));
        assert!(unique[3].control_number.is_none());
    }
}
