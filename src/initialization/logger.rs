//! Logger initialization.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};
use serde_json::json;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// HTTP stack targets that are chatty at debug level, with the most verbose
/// level let through for each.
const NOISY_TARGETS: &[(&str, LevelFilter)] = &[
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and `level` is then applied on top of it, so
/// `--log-level` always wins for this crate's own records. The HTTP stack is
/// capped regardless.
///
/// Plain lines look like `12:03:44.120  INFO select: Group 豆瓣 has 2 members`.
/// JSON lines carry `ts` (epoch millis), `level`, `module` and `msg`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug sub_merge --sources ./local.json
/// sub_merge --sources https://example.com/sub.txt --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (target, cap) in NOISY_TARGETS {
        builder.filter_module(target, (*cap).min(level));
    }
    builder.filter_module("sub_merge", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let stamp = chrono::Local::now().format("%H:%M:%S%.3f");
                writeln!(
                    buf,
                    "{} {}",
                    stamp.to_string().dimmed(),
                    plain_line(record.level(), record.target(), &record.args().to_string())
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)
}

/// Module path relative to the crate, e.g. `sub_merge::select::group` → `select::group`.
fn short_module(target: &str) -> &str {
    match target.strip_prefix("sub_merge::") {
        Some(rest) => rest,
        None => target,
    }
}

fn plain_line(level: Level, target: &str, msg: &str) -> String {
    let tag = format!("{:>5}", level);
    let tag = match level {
        Level::Error => tag.red().bold(),
        Level::Warn => tag.yellow(),
        Level::Info => tag.green(),
        Level::Debug => tag.blue(),
        Level::Trace => tag.purple(),
    };
    format!("{} {}: {}", tag, short_module(target).cyan(), msg)
}

fn json_line(ts: i64, level: Level, target: &str, msg: &str) -> String {
    json!({
        "ts": ts,
        "level": level.as_str(),
        "module": short_module(target),
        "msg": msg,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_short_module_strips_crate_prefix() {
        assert_eq!(short_module("sub_merge::select::group"), "select::group");
        assert_eq!(short_module("sub_merge"), "sub_merge");
        assert_eq!(short_module("reqwest::connect"), "reqwest::connect");
    }

    #[test]
    fn test_json_line_fields() {
        let line = json_line(
            1_700_000_000_123,
            Level::Info,
            "sub_merge::select",
            "  http://a.example/api - 42ms ✓",
        );
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["ts"], 1_700_000_000_123_i64);
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["module"], "select");
        assert_eq!(parsed["msg"], "  http://a.example/api - 42ms ✓");
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["ts", "level", "module", "msg"]);
    }

    #[test]
    fn test_json_line_escapes_quotes() {
        let line = json_line(0, Level::Warn, "sub_merge::source", "bad \"payload\"\n");
        assert!(!line.contains('\n'));
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], "bad \"payload\"\n");
    }

    // Color codes depend on a process-wide override, so only the uncolored
    // parts are checked.
    #[test]
    fn test_plain_line_layout() {
        let line = plain_line(Level::Info, "sub_merge::rank", "Ranked 3 sites");
        assert!(line.contains(" INFO"));
        assert!(line.contains("rank"));
        assert!(!line.contains("sub_merge::"));
        assert!(line.ends_with(": Ranked 3 sites"));

        let line = plain_line(Level::Error, "sub_merge", "boom");
        assert!(line.contains("ERROR"));
        assert!(line.ends_with(": boom"));
    }

    // env_logger can only be installed once per process; the second call
    // must report an error instead of panicking.
    #[test]
    fn test_second_init_reports_logger_error() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Warn, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }
}
