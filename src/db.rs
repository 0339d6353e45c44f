use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

pub const DB_PATH: &str = "data/sdr.sqlite";

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS aircraft_registry (
            tail_number  TEXT PRIMARY KEY,
            make         TEXT,
            model        TEXT,
            engine_type  TEXT,
            updated_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sdr_reports (
            id                      INTEGER PRIMARY KEY,
            report_key              TEXT NOT NULL UNIQUE,
            control_number          TEXT UNIQUE,
            difficulty_date         TEXT,
            tail_number             TEXT REFERENCES aircraft_registry(tail_number),
            submitter               TEXT,
            jasc_code               TEXT,
            stage_of_operation      TEXT,
            nature_of_condition     TEXT,
            precautionary_procedure TEXT,
            aircraft_make           TEXT,
            aircraft_model          TEXT,
            aircraft_serial         TEXT,
            total_aircraft_time     TEXT,
            engine_make             TEXT,
            engine_model            TEXT,
            description             TEXT,
            part_name               TEXT,
            part_manufacturer       TEXT,
            part_number             TEXT,
            part_condition          TEXT,
            part_location           TEXT,
            loaded_at               TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sdr_tail ON sdr_reports(tail_number);
        CREATE INDEX IF NOT EXISTS idx_sdr_jasc ON sdr_reports(jasc_code);
        ",
    )?;
    Ok(())
}

// ── Records ──

/// One parsed Service Difficulty Report. `None` means the field was not
/// found (serialized as `null`), never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdrRecord {
    pub control_number: Option<String>,
    pub difficulty_date: Option<String>,
    pub tail_number: Option<String>,
    pub submitter: Option<String>,
    pub jasc_code: Option<String>,
    pub stage_of_operation: Option<String>,
    pub nature_of_condition: Option<String>,
    pub precautionary_procedure: Option<String>,
    pub aircraft_make: Option<String>,
    pub aircraft_model: Option<String>,
    pub aircraft_serial: Option<String>,
    pub total_aircraft_time: Option<String>,
    pub engine_make: Option<String>,
    pub engine_model: Option<String>,
    pub description: Option<String>,
    pub part_name: Option<String>,
    pub part_manufacturer: Option<String>,
    pub part_number: Option<String>,
    pub part_condition: Option<String>,
    pub part_location: Option<String>,
}

impl SdrRecord {
    fn fields(&self) -> [&Option<String>; 20] {
        [
            &self.control_number,
            &self.difficulty_date,
            &self.tail_number,
            &self.submitter,
            &self.jasc_code,
            &self.stage_of_operation,
            &self.nature_of_condition,
            &self.precautionary_procedure,
            &self.aircraft_make,
            &self.aircraft_model,
            &self.aircraft_serial,
            &self.total_aircraft_time,
            &self.engine_make,
            &self.engine_model,
            &self.description,
            &self.part_name,
            &self.part_manufacturer,
            &self.part_number,
            &self.part_condition,
            &self.part_location,
        ]
    }

    /// Conflict key for storage: the control number, or for reports without
    /// one, the aircraft, date, code and narrative joined together.
    pub fn report_key(&self) -> String {
        if let Some(control) = &self.control_number {
            return control.clone();
        }
        let parts = [
            &self.tail_number,
            &self.difficulty_date,
            &self.jasc_code,
            &self.description,
        ];
        let joined: Vec<&str> = parts.iter().map(|f| f.as_deref().unwrap_or("")).collect();
        format!("~{}", joined.join("\u{1f}"))
    }

    /// True when no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|f| f.is_none())
    }
}

/// Row of the aircraft registry derived from a batch of reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftRow {
    pub tail_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub engine_type: Option<String>,
}

/// Merge aircraft rows on `tail_number`. Returns rows written.
pub fn upsert_aircraft(conn: &Connection, rows: &[AircraftRow]) -> Result<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO aircraft_registry (tail_number, make, model, engine_type, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(tail_number) DO UPDATE SET
                make = excluded.make,
                model = excluded.model,
                engine_type = excluded.engine_type,
                updated_at = excluded.updated_at",
        )?;
        for r in rows {
            count += stmt.execute(rusqlite::params![
                r.tail_number, r.make, r.model, r.engine_type, now,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Merge reports on [`SdrRecord::report_key`].
pub fn upsert_reports(conn: &Connection, records: &[SdrRecord]) -> Result<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO sdr_reports
             (report_key, control_number, difficulty_date, tail_number, submitter, jasc_code,
              stage_of_operation, nature_of_condition, precautionary_procedure,
              aircraft_make, aircraft_model, aircraft_serial, total_aircraft_time,
              engine_make, engine_model, description, part_name, part_manufacturer,
              part_number, part_condition, part_location, loaded_at)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21,?22)
             ON CONFLICT(report_key) DO UPDATE SET
                control_number = excluded.control_number,
                difficulty_date = excluded.difficulty_date,
                tail_number = excluded.tail_number,
                submitter = excluded.submitter,
                jasc_code = excluded.jasc_code,
                stage_of_operation = excluded.stage_of_operation,
                nature_of_condition = excluded.nature_of_condition,
                precautionary_procedure = excluded.precautionary_procedure,
                aircraft_make = excluded.aircraft_make,
                aircraft_model = excluded.aircraft_model,
                aircraft_serial = excluded.aircraft_serial,
                total_aircraft_time = excluded.total_aircraft_time,
                engine_make = excluded.engine_make,
                engine_model = excluded.engine_model,
                description = excluded.description,
                part_name = excluded.part_name,
                part_manufacturer = excluded.part_manufacturer,
                part_number = excluded.part_number,
                part_condition = excluded.part_condition,
                part_location = excluded.part_location,
                loaded_at = excluded.loaded_at",
        )?;
        for r in records {
            count += stmt.execute(rusqlite::params![
                r.report_key(), r.control_number, r.difficulty_date, r.tail_number, r.submitter, r.jasc_code,
                r.stage_of_operation, r.nature_of_condition, r.precautionary_procedure,
                r.aircraft_make, r.aircraft_model, r.aircraft_serial, r.total_aircraft_time,
                r.engine_make, r.engine_model, r.description, r.part_name, r.part_manufacturer,
                r.part_number, r.part_condition, r.part_location, now,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

// ── Stats ──

pub struct Stats {
    pub reports: usize,
    pub with_tail: usize,
    pub aircraft: usize,
    pub jasc_codes: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let reports: usize = conn.query_row("SELECT COUNT(*) FROM sdr_reports", [], |r| r.get(0))?;
    let with_tail: usize = conn.query_row(
        "SELECT COUNT(*) FROM sdr_reports WHERE tail_number IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let aircraft: usize =
        conn.query_row("SELECT COUNT(*) FROM aircraft_registry", [], |r| r.get(0))?;
    let jasc_codes: usize = conn.query_row(
        "SELECT COUNT(DISTINCT jasc_code) FROM sdr_reports",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        reports,
        with_tail,
        aircraft,
        jasc_codes,
    })
}
