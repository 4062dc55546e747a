//! Application configuration.
//!
//! Every send parameter can come from the command line or from a YAML file.
//! The file is looked up at:
//! 1. `--config <FILE>`
//! 2. `$SES_SENDER_CONFIG` (environment variable)
//! 3. `~/.config/ses-sender/config.yaml` (Linux/macOS)
//!    `%APPDATA%\ses-sender\config.yaml` (Windows)
//!
//! Command-line values win over the file, the file wins over built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SenderError};
use crate::mail::ses::DEFAULT_REGION;
use crate::model::request::SendRequest;

/// Subject used when none is given.
pub const DEFAULT_SUBJECT: &str = "AWS SES Email";

/// Log file written next to where the tool is run.
pub const DEFAULT_LOG_FILE: &str = "sender.log";

/// Log level used when neither `-v` nor the config file set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of the YAML configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File to send.
    pub attachment: Option<PathBuf>,
    /// Sender address.
    pub sender_email: Option<String>,
    /// Recipients, as a YAML list or one comma-separated string.
    pub recipient_email: Option<Recipients>,
    /// Subject prefix.
    pub subject: Option<String>,
    /// Message body.
    pub msg: Option<String>,
    /// Compress before sending.
    pub compress: Option<bool>,
    /// AWS region for SES.
    pub region: Option<String>,
    /// Path of the log file.
    pub log_file: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: Option<String>,
}

/// Recipient list as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    List(Vec<String>),
    Line(String),
}

impl Recipients {
    /// Flatten to individual addresses, splitting on commas and dropping blanks.
    pub fn addresses(&self) -> Vec<String> {
        let split = |s: &String| -> Vec<String> {
            s.split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect()
        };
        match self {
            Self::List(items) => items.iter().flat_map(split).collect(),
            Self::Line(line) => split(line),
        }
    }
}

/// Values given on the command line. `None` / empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub attachment: Option<PathBuf>,
    pub sender_email: Option<String>,
    pub recipient_email: Vec<String>,
    pub subject: Option<String>,
    pub msg: Option<String>,
    pub compress: bool,
    pub region: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub request: SendRequest,
    pub region: String,
}

impl Config {
    /// Log file path, falling back to [`DEFAULT_LOG_FILE`].
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    /// Log level, falling back to [`DEFAULT_LOG_LEVEL`].
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Merge command-line values over this file and apply defaults.
    pub fn resolve(&self, cli: Overrides) -> Result<Settings> {
        let attachment = cli
            .attachment
            .or_else(|| self.attachment.clone())
            .ok_or(SenderError::MissingArgument("attachment"))?;
        let sender = cli
            .sender_email
            .or_else(|| self.sender_email.clone())
            .ok_or(SenderError::MissingArgument("sender_email"))?;
        let recipients = if cli.recipient_email.is_empty() {
            self.recipient_email
                .as_ref()
                .map(Recipients::addresses)
                .unwrap_or_default()
        } else {
            cli.recipient_email
        };
        let subject = cli
            .subject
            .or_else(|| self.subject.clone())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        let body = cli
            .msg
            .or_else(|| self.msg.clone())
            .unwrap_or_else(default_message);
        let compress = cli.compress || self.compress.unwrap_or(false);
        let region = cli
            .region
            .or_else(|| self.region.clone())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Settings {
            request: SendRequest::new(attachment, sender, recipients, subject, body, compress)?,
            region,
        })
    }
}

/// Default body, naming the machine the message was sent from.
pub fn default_message() -> String {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());
    format!("Message sent by ses-sender from host {host} using AWS SES.")
}

// ── Load ────────────────────────────────────────────────────────

/// Outcome of [`load_config`]: the configuration plus what happened while
/// finding it, reported once logging is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration came from, if any.
    pub source: Option<PathBuf>,
    /// Why an optional file was skipped in favour of defaults.
    pub fallback: Option<SenderError>,
}

impl LoadedConfig {
    fn defaults() -> Self {
        Self {
            config: Config::default(),
            source: None,
            fallback: None,
        }
    }

    /// Emit the log events describing how the configuration was loaded.
    pub fn report(&self) {
        if let Some(path) = &self.source {
            tracing::info!(path = %path.display(), "Loaded config");
        }
        if let Some(e) = &self.fallback {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
        }
    }
}

/// Load configuration.
///
/// An explicitly named file must exist and parse. A file found through the
/// environment variable or the standard location is optional: if it cannot
/// be read or parsed, defaults are used and the reason is kept in
/// [`LoadedConfig::fallback`].
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    load_from(explicit, config_file_path())
}

/// [`load_config`] with the implicit location supplied by the caller.
pub fn load_from(explicit: Option<&Path>, implicit: Option<PathBuf>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: Some(path.to_path_buf()),
            fallback: None,
        });
    }
    match implicit {
        Some(path) if path.exists() => match read_config(&path) {
            Ok(config) => Ok(LoadedConfig {
                config,
                source: Some(path),
                fallback: None,
            }),
            Err(e) => Ok(LoadedConfig {
                fallback: Some(e),
                ..LoadedConfig::defaults()
            }),
        },
        _ => Ok(LoadedConfig::defaults()),
    }
}

/// Read and parse one YAML file.
pub fn read_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| SenderError::io(path, e))?;
    parse_config(&contents).map_err(|reason| SenderError::Config {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse YAML text. An empty document is the default configuration.
pub fn parse_config(contents: &str) -> std::result::Result<Config, String> {
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(contents).map_err(|e| e.to_string())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("SES_SENDER_CONFIG") {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("ses-sender").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(attachment: &str, sender: &str, to: &[&str]) -> Overrides {
        Overrides {
            attachment: Some(PathBuf::from(attachment)),
            sender_email: Some(sender.to_string()),
            recipient_email: to.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let settings = Config::default()
            .resolve(cli("report.txt", "me@example.com", &["a@example.com"]))
            .unwrap();
        assert_eq!(settings.request.subject, DEFAULT_SUBJECT);
        assert!(settings.request.body.contains("using AWS SES"));
        assert!(!settings.request.compress);
        assert_eq!(settings.region, "us-east-1");
    }

    #[test]
    fn test_yaml_fills_missing_values() {
        let yaml = r#"
attachment: /data/report.txt
sender_email: me@example.com
recipient_email:
  - a@example.com
  - b@example.com
subject: Weekly
compress: true
region: eu-west-1
"#;
        let cfg = parse_config(yaml).unwrap();
        let settings = cfg.resolve(Overrides::default()).unwrap();
        assert_eq!(settings.request.attachment, PathBuf::from("/data/report.txt"));
        assert_eq!(
            settings.request.recipients,
            vec!["a@example.com", "b@example.com"]
        );
        assert_eq!(settings.request.subject, "Weekly");
        assert!(settings.request.compress);
        assert_eq!(settings.region, "eu-west-1");
    }

    #[test]
    fn test_cli_wins_over_yaml() {
        let cfg = parse_config("subject: From file\nrecipient_email: x@example.com\n").unwrap();
        let mut overrides = cli("r.txt", "me@example.com", &["cli@example.com"]);
        overrides.subject = Some("From CLI".into());
        let settings = cfg.resolve(overrides).unwrap();
        assert_eq!(settings.request.subject, "From CLI");
        assert_eq!(settings.request.recipients, vec!["cli@example.com"]);
    }

    #[test]
    fn test_recipient_line_is_split() {
        let cfg = parse_config("recipient_email: \"a@example.com, b@example.com,\"\n").unwrap();
        assert_eq!(
            cfg.recipient_email.unwrap().addresses(),
            vec!["a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn test_missing_required_values() {
        let err = Config::default().resolve(Overrides::default()).unwrap_err();
        assert!(matches!(err, SenderError::MissingArgument("attachment")));

        let err = Config::default()
            .resolve(cli("r.txt", "me@example.com", &[]))
            .unwrap_err();
        assert!(matches!(err, SenderError::MissingArgument("recipient_email")));
    }

    #[test]
    fn test_empty_and_invalid_yaml() {
        assert_eq!(parse_config("  \n").unwrap(), Config::default());
        assert!(parse_config("compress: [not, a, bool]").is_err());
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_config(Some(&tmp.path().join("missing.yaml"))).unwrap_err();
        assert!(matches!(err, SenderError::Io { .. }));
    }

    #[test]
    fn test_implicit_bad_file_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "compress: [not, a, bool]\n").unwrap();

        let loaded = load_from(None, Some(path)).unwrap();
        assert_eq!(loaded.config, Config::default());
        assert!(loaded.source.is_none());
        assert!(matches!(loaded.fallback, Some(SenderError::Config { .. })));
    }

    #[test]
    fn test_implicit_missing_file_is_silent() {
        let tmp = tempfile::tempdir().unwrap();
        let loaded = load_from(None, Some(tmp.path().join("absent.yaml"))).unwrap();
        assert!(loaded.source.is_none());
        assert!(loaded.fallback.is_none());
    }

    #[test]
    fn test_report_reaches_log_file() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("bad.yaml");
        std::fs::write(&bad, "compress: [not, a, bool]\n").unwrap();
        let good = tmp.path().join("good.yaml");
        std::fs::write(&good, "subject: Weekly\n").unwrap();

        let log = tmp.path().join("sender.log");
        let writer = crate::logging::file_writer(&log).unwrap();
        tracing::subscriber::with_default(crate::logging::subscriber("info", Some(writer)), || {
            load_from(None, Some(bad.clone())).unwrap().report();
            load_from(Some(&good), None).unwrap().report();
        });

        let text = std::fs::read_to_string(&log).unwrap();
        assert!(text.contains("WARN"), "{text}");
        assert!(text.contains("Failed to load config, using defaults"), "{text}");
        assert!(text.contains("bad.yaml"), "{text}");
        assert!(text.contains("Loaded config"), "{text}");
        assert!(text.contains("good.yaml"), "{text}");
    }

    #[test]
    fn test_log_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.log_file(), PathBuf::from("sender.log"));
        assert_eq!(cfg.log_level(), "info");
    }
}
