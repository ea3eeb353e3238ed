//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `sub_merge` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use sub_merge::initialization::init_logger_with;
use sub_merge::{run_merge, Config, MergeReport};

#[tokio::main]
async fn main() -> Result<()> {
    // SUBSCRIPTION_URLS, TTL, etc. may come from a .env file: current
    // directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_merge(config).await {
        Ok(report) => {
            // The merge summary itself is already in the log.
            println!("{}", saved_line(&report));
            Ok(())
        }
        Err(e) => {
            eprintln!("sub_merge error: {:#}", e);
            process::exit(1);
        }
    }
}

fn saved_line(report: &MergeReport) -> String {
    format!("Configuration saved in {}", report.output_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_saved_line_names_output_only() {
        let report = MergeReport {
            sources_total: 2,
            sources_loaded: 2,
            sites_merged: 5,
            sites_output: 3,
            probes_issued: 4,
            output_path: PathBuf::from("out/merged_config.b58"),
            json_bytes: 120,
            encoded_bytes: 164,
            elapsed_seconds: 1.5,
        };
        let line = saved_line(&report);
        assert_eq!(line, "Configuration saved in out/merged_config.b58");
        assert!(!line.contains("Merged"));
    }
}
