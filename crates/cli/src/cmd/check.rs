//! Check command implementation.

use std::path::Path;

use fieldcheck_core::config::ConfigLoader;
use fieldcheck_core::record::{Record, RecordAccess, load_records, save_records, value_text};
use fieldcheck_core::rules::RecordReport;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::logging;
use crate::{CheckArgs, OutputFormat};

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    record: usize,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Check")]
    check: String,
    #[tabled(rename = "Result")]
    result: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Messages")]
    messages: String,
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    record: usize,
    valid: bool,
    report: &'a RecordReport,
    fields: &'a Record,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: CheckArgs) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&rc.logging);

    let mut batch = match load_records(&args.file) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error loading records: {}", e);
            std::process::exit(1);
        }
    };

    if rc.rules.is_empty() {
        tracing::warn!(profile = %rc.active_profile, "profile has no rules");
    }

    let reports: Vec<RecordReport> =
        batch.records.iter_mut().map(|record| rc.rules.apply(record)).collect();

    match args.output {
        OutputFormat::Table => print_table(&batch.records, &reports),
        OutputFormat::Json => print_json(&batch.records, &reports),
    }

    if args.write {
        if let Err(e) = save_records(&args.file, &batch) {
            eprintln!("Error writing records: {}", e);
            std::process::exit(1);
        }
        tracing::info!(path = %args.file.display(), "wrote normalized values");
    }

    if !reports.iter().all(RecordReport::is_valid) {
        std::process::exit(1);
    }
}

fn print_table(records: &[Record], reports: &[RecordReport]) {
    let rows: Vec<OutcomeRow> = records
        .iter()
        .zip(reports)
        .enumerate()
        .flat_map(|(i, (record, report))| {
            report.outcomes.iter().map(move |o| {
                let messages = if o.passed {
                    record.infos(&o.field).join("; ")
                } else {
                    record.errors(&o.field).join("; ")
                };
                OutcomeRow {
                    record: i + 1,
                    field: o.field.clone(),
                    check: o.check.clone(),
                    result: if o.passed { "ok" } else { "FAIL" },
                    value: record.get(&o.field).and_then(value_text).unwrap_or_default(),
                    messages,
                }
            })
        })
        .collect();

    if rows.is_empty() {
        println!("No rules applied.");
    } else {
        let table = Table::new(&rows).with(Style::rounded()).to_string();
        println!("{}", table);
    }

    let valid = reports.iter().filter(|r| r.is_valid()).count();
    println!("{} of {} records valid", valid, reports.len());
}

fn print_json(records: &[Record], reports: &[RecordReport]) {
    let output: Vec<RecordOutput<'_>> = records
        .iter()
        .zip(reports)
        .enumerate()
        .map(|(i, (record, report))| RecordOutput {
            record: i + 1,
            valid: report.is_valid(),
            report,
            fields: record,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}
