use std::sync::LazyLock;

use regex::Regex;

use crate::db::SdrRecord;
use crate::parser::normalize::clean;

// Fixed-column rows: | make | model | serial | total time |
static AIRCRAFT_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(a\)\s*Aircraft\s*\|([^|]*)\|([^|]*)\|([^|]*)\|([^|]*)\|").unwrap()
});
static ENGINE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(b\)\s*Engine\s*\|([^|]*)\|([^|]*)\|([^|]*)\|([^|]*)\|").unwrap()
});

/// §3 Equipment. A missing row leaves all of its columns absent.
pub fn extract(block: &str, record: &mut SdrRecord) {
    let [make, model, serial, total_time] = row(&AIRCRAFT_ROW_RE, block);
    record.aircraft_make = make;
    record.aircraft_model = model;
    record.aircraft_serial = serial;
    record.total_aircraft_time = total_time;

    let [make, model, _, _] = row(&ENGINE_ROW_RE, block);
    record.engine_make = make;
    record.engine_model = model;
}

fn row(re: &Regex, block: &str) -> [Option<String>; 4] {
    match re.captures(block) {
        Some(caps) => std::array::from_fn(|i| caps.get(i + 1).and_then(|m| clean(m.as_str()))),
        None => Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_rows() {
        let block = "\
                  |  Make      |  Model    |  Serial #     |  Total Time  |
(a) Aircraft      | CESSNA     | 172S      | 172S10234     | 4521.3       |
(b) Engine        | LYCOMING   | IO360L2A  | L-12345-51A   | N/A          |
";
        let mut r = SdrRecord::default();
        extract(block, &mut r);
        assert_eq!(r.aircraft_make.as_deref(), Some("CESSNA"));
        assert_eq!(r.aircraft_model.as_deref(), Some("172S"));
        assert_eq!(r.aircraft_serial.as_deref(), Some("172S10234"));
        assert_eq!(r.total_aircraft_time.as_deref(), Some("4521.3"));
        assert_eq!(r.engine_make.as_deref(), Some("LYCOMING"));
        assert_eq!(r.engine_model.as_deref(), Some("IO360L2A"));
    }

    #[test]
    fn missing_engine_row() {
        let block = "(a) Aircraft | PIPER | PA28-181 |  | 8800 |";
        let mut r = SdrRecord {
            engine_make: Some("stale".into()),
            ..Default::default()
        };
        extract(block, &mut r);
        assert_eq!(r.aircraft_make.as_deref(), Some("PIPER"));
        assert_eq!(r.aircraft_serial, None);
        assert_eq!(r.engine_make, None);
        assert_eq!(r.engine_model, None);
    }
}
