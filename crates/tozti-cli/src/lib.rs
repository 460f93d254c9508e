//! Shared helpers for the `tozti` binary.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Filter directive used when neither `RUST_LOG` nor `TOZTI_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Pick the log filter: `RUST_LOG`, then `TOZTI_LOG`, then [`DEFAULT_LOG_FILTER`].
pub fn log_filter(rust_log: Option<String>, tozti_log: Option<String>) -> String {
    rust_log
        .or(tozti_log)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
///
/// `TOZTI_LOG_FORMAT=json` switches to one JSON object per event.
pub fn init_tracing() {
    let directive = log_filter(
        std::env::var("RUST_LOG").ok(),
        std::env::var("TOZTI_LOG").ok(),
    );
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("TOZTI_LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Parse a JSON argument. `@path` reads the document from a file.
pub fn parse_json_arg(raw: &str) -> Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).context("Argument is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn log_filter_prefers_rust_log() {
        assert_eq!(
            log_filter(Some("debug".into()), Some("warn".into())),
            "debug"
        );
        assert_eq!(
            log_filter(None, Some("tozti_api_client=trace".into())),
            "tozti_api_client=trace"
        );
        assert_eq!(log_filter(None, None), "info");
    }

    #[test]
    fn log_filter_ignores_blank_values() {
        assert_eq!(log_filter(Some("  ".into()), None), "info");
    }

    #[test]
    fn parse_inline_json() {
        let value = parse_json_arg(r#"{"type":"core/folder","attributes":{}}"#).unwrap();
        assert_eq!(value["type"], json!("core/folder"));
        assert!(parse_json_arg("{not json").is_err());
    }

    #[test]
    fn parse_json_from_file() {
        let path = std::env::temp_dir().join(format!("tozti-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"data":{"attributes":{"name":"Docs"}}}"#).unwrap();

        let value = parse_json_arg(&format!("@{}", path.display())).unwrap();
        assert_eq!(value["data"]["attributes"]["name"], json!("Docs"));

        std::fs::remove_file(&path).unwrap();
        assert!(parse_json_arg(&format!("@{}", path.display())).is_err());
    }
}
