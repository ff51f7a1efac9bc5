//! TOML configuration for the quote add-on.
//!
//! # Responsibility
//! - Load storage, highlight, admin and logging settings.
//! - Validate values up front so command handling never sees bad config.
//!
//! # Invariants
//! - Every key is optional; missing keys fall back to [`QuoteDbConfig::default`].
//! - A loaded config always yields a valid [`TermStyle`].

use crate::format::{parse_irc_color, TermStyle};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILENAME: &str = "quotes.db";
const DEFAULT_COMMAND_PREFIX: &str = "!";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    InvalidValue {
        key: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::InvalidValue { key, message } => write!(f, "invalid config `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Add-on settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuoteDbConfig {
    /// Directory holding the database file.
    pub storage_dir: PathBuf,
    /// Database file name, relative to `storage_dir`.
    pub filename: String,
    /// Comma-separated highlight flags: bold, italic, underline, reverse.
    pub format: String,
    pub fg_color: Option<String>,
    pub bg_color: Option<String>,
    /// Callers allowed to run `qcmd`.
    pub admins: Vec<String>,
    pub command_prefix: String,
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for QuoteDbConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("."),
            filename: DEFAULT_DB_FILENAME.to_string(),
            format: String::new(),
            fg_color: None,
            bg_color: None,
            admins: Vec::new(),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            log_level: None,
            log_dir: None,
        }
    }
}

impl QuoteDbConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.filename.trim().is_empty() {
            return Err(invalid("filename", "must not be empty"));
        }
        if self.command_prefix.trim().is_empty() {
            return Err(invalid("command_prefix", "must not be empty"));
        }
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(invalid("log_dir", "must be an absolute path"));
            }
        }
        self.term_style()?;
        Ok(())
    }

    /// Full path of the quote database.
    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(&self.filename)
    }

    /// Highlight style derived from `format`, `fg_color` and `bg_color`.
    pub fn term_style(&self) -> Result<TermStyle, ConfigError> {
        let mut style = TermStyle::default();
        for flag in self.format.split(',').filter(|flag| !flag.trim().is_empty()) {
            if !style.set_flag(flag) {
                return Err(invalid("format", format!("unknown flag `{}`", flag.trim())));
            }
        }
        style.fg = parse_color("fg_color", self.fg_color.as_deref())?;
        style.bg = parse_color("bg_color", self.bg_color.as_deref())?;
        Ok(style)
    }

    pub fn is_admin(&self, caller: &str) -> bool {
        self.admins.iter().any(|admin| admin.eq_ignore_ascii_case(caller))
    }
}

fn parse_color(key: &'static str, value: Option<&str>) -> Result<Option<u8>, ConfigError> {
    match value {
        None => Ok(None),
        Some(value) => parse_irc_color(value)
            .map(Some)
            .ok_or_else(|| invalid(key, format!("unknown color `{value}`"))),
    }
}

fn invalid(key: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, QuoteDbConfig};
    use std::path::PathBuf;

    #[test]
    fn empty_config_uses_defaults() {
        let config = QuoteDbConfig::from_toml_str("").unwrap();
        assert_eq!(config, QuoteDbConfig::default());
        assert_eq!(config.db_path(), PathBuf::from("./quotes.db"));
        assert!(config.term_style().unwrap().is_plain());
    }

    #[test]
    fn parses_highlight_and_admins() {
        let config = QuoteDbConfig::from_toml_str(
            r#"
            storage_dir = "/var/lib/bot"
            filename = "q.db"
            format = "Bold, underline"
            fg_color = "red"
            bg_color = "1"
            admins = ["Syn"]
            "#,
        )
        .unwrap();

        let style = config.term_style().unwrap();
        assert!(style.bold && style.underline && !style.italic);
        assert_eq!(style.fg, Some(4));
        assert_eq!(style.bg, Some(1));
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/bot/q.db"));
        assert!(config.is_admin("syn"));
        assert!(!config.is_admin("ann"));
    }

    #[test]
    fn rejects_unknown_color_and_flag() {
        let err = QuoteDbConfig::from_toml_str("fg_color = \"mauve\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "fg_color", .. }));

        let err = QuoteDbConfig::from_toml_str("format = \"blink\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "format", .. }));
    }

    #[test]
    fn rejects_relative_log_dir_and_unknown_keys() {
        let err = QuoteDbConfig::from_toml_str("log_dir = \"logs\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "log_dir", .. }));

        let err = QuoteDbConfig::from_toml_str("api_key = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
