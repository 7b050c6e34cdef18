use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    NoFile,
    BadToml,
    LogFile,
    Output,
    Base64,
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoFile => write!(f, "Could not read TOML file"),
            ConfigError::BadToml => write!(f, "Failed to parse TOML data"),
            ConfigError::LogFile => write!(f, "Could not create log file"),
            ConfigError::Output => write!(f, "Could not write output data"),
            ConfigError::Base64 => write!(f, "Could not base64 decode TOML data"),
        }
    }
}
