//! Quote configuration
//!
//! Inputs, log level and output format are taken from CLI flags first, then
//! from an optional TOML file, then from built-in defaults.

use pricing::PricingInputs;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Any subset of the six pricing inputs, in the units they are typed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputOverrides {
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    /// days
    pub expiry: Option<f64>,
    /// percent
    pub volatility: Option<f64>,
    /// percent
    pub rate: Option<f64>,
    /// percent
    pub dividend: Option<f64>,
}

impl InputOverrides {
    /// Field-wise `self`, falling back to `other`.
    pub fn or(self, other: InputOverrides) -> InputOverrides {
        InputOverrides {
            spot: self.spot.or(other.spot),
            strike: self.strike.or(other.strike),
            expiry: self.expiry.or(other.expiry),
            volatility: self.volatility.or(other.volatility),
            rate: self.rate.or(other.rate),
            dividend: self.dividend.or(other.dividend),
        }
    }

    pub fn resolve(&self, defaults: &PricingInputs) -> PricingInputs {
        PricingInputs::new(
            self.spot.unwrap_or(defaults.spot),
            self.strike.unwrap_or(defaults.strike),
            self.expiry.unwrap_or(defaults.expiry_days),
            self.volatility.unwrap_or(defaults.volatility_pct),
            self.rate.unwrap_or(defaults.risk_free_rate_pct),
            self.dividend.unwrap_or(defaults.dividend_pct),
        )
    }
}

/// Contents of the TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub inputs: InputOverrides,
    pub log_level: Option<LogLevel>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::FileError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents)
    }
}

/// Values given on the command line, unvalidated.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_file: Option<PathBuf>,
    pub inputs: InputOverrides,
    pub log_level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteConfig {
    pub inputs: PricingInputs,
    pub log_level: LogLevel,
    pub format: OutputFormat,
}

/// One year at the money: spot 100, strike 100, 20% vol, 5% rate, no dividend.
pub fn default_inputs() -> PricingInputs {
    PricingInputs::new(100.0, 100.0, 365.0, 20.0, 5.0, 0.0)
}

pub fn build_config(args: &CliArgs) -> Result<QuoteConfig, ConfigError> {
    let file = match &args.config_file {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    merge(args, file)
}

fn merge(args: &CliArgs, file: FileConfig) -> Result<QuoteConfig, ConfigError> {
    let inputs = args.inputs.or(file.inputs).resolve(&default_inputs());

    let log_level = match &args.log_level {
        Some(level) => level.parse()?,
        None => file.log_level.unwrap_or_default(),
    };
    let format = match &args.format {
        Some(format) => format.parse()?,
        None => file.format.unwrap_or_default(),
    };

    Ok(QuoteConfig {
        inputs,
        log_level,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file_or_flags() {
        let config = build_config(&CliArgs::default()).unwrap();
        assert_eq!(config.inputs, default_inputs());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn parses_file() {
        let file = FileConfig::parse(
            r#"
            log_level = "debug"
            format = "json"

            [inputs]
            spot = 120.0
            dividend = 8
            "#,
        )
        .unwrap();

        assert_eq!(file.log_level, Some(LogLevel::Debug));
        assert_eq!(file.format, Some(OutputFormat::Json));
        assert_eq!(file.inputs.spot, Some(120.0));
        assert_eq!(file.inputs.dividend, Some(8.0));
        assert_eq!(file.inputs.strike, None);
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        assert!(FileConfig::parse("colour = \"dark\"").is_err());
        assert!(FileConfig::parse("[inputs]\nvol = 20").is_err());
        assert!(matches!(
            FileConfig::parse("log_level = \"loud\""),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn flags_override_file_override_defaults() {
        let file = FileConfig::parse(
            r#"
            format = "json"
            [inputs]
            spot = 120.0
            strike = 110.0
            "#,
        )
        .unwrap();
        let args = CliArgs {
            inputs: InputOverrides {
                spot: Some(130.0),
                rate: Some(-0.5),
                ..Default::default()
            },
            format: Some("table".to_string()),
            ..Default::default()
        };

        let config = merge(&args, file).unwrap();
        assert_eq!(
            config.inputs,
            PricingInputs::new(130.0, 110.0, 365.0, 20.0, -0.5, 0.0)
        );
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn invalid_flag_values() {
        let args = CliArgs {
            log_level: Some("verbose".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_config(&args),
            Err(ConfigError::InvalidLogLevel(_))
        ));

        let args = CliArgs {
            format: Some("csv".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_config(&args),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"info\"\n[inputs]\nvolatility = 35").unwrap();

        let args = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.inputs.volatility_pct, 35.0);
    }

    #[test]
    fn missing_file() {
        let args = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/bsm-quote.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config(&args),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn case_insensitive_flags() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}
