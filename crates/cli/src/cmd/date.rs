use std::path::Path;

use fieldcheck_core::config::{ConfigLoader, LoggingConfig};
use fieldcheck_core::dates::{self, DateCheck, DateCheckKind};
use fieldcheck_core::options::ValidationOptions;
use fieldcheck_core::record::{Record, RecordAccess, value_text};
use serde_json::Value;

use crate::DateArgs;
use crate::logging;

const FIELD: &str = "value";

pub fn run(config: Option<&Path>, profile: Option<&str>, args: DateArgs) {
    // The default config is optional here and only contributes logging
    // settings. An explicit --config must load.
    let log_cfg = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc.logging,
        Err(_) if config.is_none() => LoggingConfig::default(),
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&log_cfg);

    let kind = DateCheckKind::from(args.check);
    let operands: Vec<Value> = args.args.into_iter().map(Value::String).collect();
    let check = DateCheck::from_args(kind, &operands);

    let mut record = Record::from_pairs([(FIELD, Value::String(args.value.clone()))]);
    let ok = dates::evaluate_and_format(
        &mut record,
        FIELD,
        &check,
        args.format.as_deref(),
        &ValidationOptions::default(),
    );

    let rendered = record.get(FIELD).and_then(value_text).unwrap_or_default();
    println!("{} {} {}", if ok { "OK  " } else { "FAIL" }, kind, args.value);
    println!("value: {rendered}");
    for err in record.errors(FIELD) {
        println!("error: {err}");
    }

    if !ok {
        std::process::exit(1);
    }
}
