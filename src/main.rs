mod db;
mod error;
mod jasc;
mod parser;
mod registry;
mod summary;
mod supabase;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use db::SdrRecord;

#[derive(Parser)]
#[command(name = "sdr_loader", about = "FAA Service Difficulty Report loader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse SDR exports and print a summary (no writes)
    Parse {
        /// SDR text exports
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print parsed records as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Parse SDR exports and upsert them into storage
    Load {
        /// SDR text exports
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Where to write
        #[arg(short, long, value_enum, default_value_t = Target::Sqlite)]
        target: Target,
        /// SQLite database (sqlite target only)
        #[arg(long = "db", default_value = db::DB_PATH)]
        db_path: PathBuf,
    },
    /// Look up a JASC/ATA code, or list the whole table
    Jasc {
        code: Option<String>,
    },
    /// Show counts from the local database
    Stats {
        #[arg(long = "db", default_value = db::DB_PATH)]
        db_path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Sqlite,
    Supabase,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { files, json } => {
            let records = parse_files(&files)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_summary(&records);
            }
            Ok(())
        }
        Commands::Load { files, target, db_path } => {
            let records = parse_files(&files)?;
            if records.is_empty() {
                println!("Nothing to load.");
                return Ok(());
            }
            let records = registry::unique_reports(&records);
            let written = match target {
                Target::Sqlite => load_sqlite(&db_path, &records)?,
                Target::Supabase => load_supabase(&records).await?,
            };
            println!("Done: {} row(s) written to sdr_reports.", written);
            Ok(())
        }
        Commands::Jasc { code } => {
            let table = jasc::table();
            if table.is_empty() {
                println!(
                    "JASC table unavailable: nothing loaded from {}",
                    jasc::table_path().display()
                );
                return Ok(());
            }
            match code {
                Some(code) => match table.lookup(&code) {
                    Some(desc) => println!("{} → {}", code, desc),
                    None => println!("Code {} not found ({} codes loaded)", code, table.len()),
                },
                None => {
                    println!(
                        "Loaded {} JASC codes from {}\n",
                        table.len(),
                        jasc::table_path().display()
                    );
                    for (code, desc) in table.iter() {
                        println!("  {:>5}  {}", code, desc);
                    }
                }
            }
            Ok(())
        }
        Commands::Stats { db_path } => {
            let conn = db::connect(&db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Reports:    {}", s.reports);
            println!("With tail:  {}", s.with_tail);
            println!("Aircraft:   {}", s.aircraft);
            println!("JASC codes: {}", s.jasc_codes);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Parse every input into one batch, in argument order.
fn parse_files(files: &[PathBuf]) -> anyhow::Result<Vec<SdrRecord>> {
    let parsed = parser::parse_sdr_files(files).context("parse stage failed")?;

    let mut records = Vec::new();
    for file in parsed {
        println!(
            "{}: {} block(s), {} record(s)",
            file.path.display(),
            file.blocks,
            file.records.len()
        );
        records.extend(file.records);
    }

    let with_tail = records.iter().filter(|r| r.tail_number.is_some()).count();
    println!(
        "Parsed {} record(s) from {} file(s); {} with a tail number, {} without.",
        records.len(),
        files.len(),
        with_tail,
        records.len() - with_tail
    );
    Ok(records)
}

fn load_sqlite(path: &Path, records: &[SdrRecord]) -> anyhow::Result<usize> {
    let conn = db::connect(path).with_context(|| format!("opening {}", path.display()))?;
    db::init_schema(&conn)?;

    let aircraft = registry::aircraft_rows(records);
    let reg_count = db::upsert_aircraft(&conn, &aircraft).context("aircraft_registry upsert failed")?;
    println!("aircraft_registry: upserted {} aircraft", reg_count);

    db::upsert_reports(&conn, records).context("sdr_reports upsert failed")
}

async fn load_supabase(records: &[SdrRecord]) -> anyhow::Result<usize> {
    let client = supabase::SupabaseClient::from_env().context("supabase configuration")?;
    let aircraft = registry::aircraft_rows(records);

    let pb = ProgressBar::new((aircraft.len() + records.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let reg_count = client
        .upsert("aircraft_registry", "tail_number", &aircraft, &pb)
        .await
        .context("aircraft_registry upsert failed")?;
    let written = client
        .upsert("sdr_reports", "control_number", records, &pb)
        .await
        .context("sdr_reports upsert failed")?;

    pb.finish_and_clear();
    println!("aircraft_registry: upserted {} aircraft", reg_count);
    Ok(written)
}

fn print_summary(records: &[SdrRecord]) {
    let s = summary::summarize(records, 10);
    println!(
        "{} with control number, {} without tail number, {} failed/cracked parts, {} excess wear.",
        s.with_control_number,
        s.without_tail(),
        s.failed_parts,
        s.excess_wear
    );

    if !s.top_jasc.is_empty() {
        println!("\n--- Top JASC codes ---");
        for (code, count) in &s.top_jasc {
            let desc = jasc::lookup(code).unwrap_or_else(|| "-".into());
            println!("  {:>5} {:>4}x  {}", code, count, truncate(&desc, 60));
        }
    }

    if !s.top_parts.is_empty() {
        println!("\n--- Top failing parts ---");
        for (part, count) in &s.top_parts {
            println!("  {:>4}x  {}", count, truncate(part, 60));
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
