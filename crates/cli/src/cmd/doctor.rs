use fieldcheck_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

use crate::logging;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            logging::init(&rc.logging);
            tracing::debug!(profile = %rc.active_profile, "doctor");

            println!("OK   fieldcheck doctor");
            println!("path: {}", rc.source.display());
            println!("profile: {}", rc.active_profile);
            if let Some(desc) = &rc.description {
                println!("description: {desc}");
            }
            println!("rules: {}", rc.rules.len());
            for rule in rc.rules.iter() {
                println!("  - {}: {}", rule.field, rule.check.name());
            }
            println!("logging.level: {}", rc.logging.level);
            println!("logging.file_level: {}", rc.logging.file_level.as_deref().unwrap_or("-"));
            println!(
                "logging.file: {}",
                rc.logging.file.as_ref().map_or_else(|| "-".to_string(), |p| p.display().to_string())
            );
        }
        Err(e) => {
            println!("FAIL fieldcheck doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
