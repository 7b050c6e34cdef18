use crate::{error::ConfigError, structs::toml::Output};
use log::{error, LevelFilter};
use std::fs::{create_dir_all, File};

/// Map a TOML logging level to a `LevelFilter`. Unknown or missing levels default to `Warn`
pub(crate) fn log_level(level: Option<&str>) -> LevelFilter {
    let Some(log_level) = level else {
        return LevelFilter::Warn;
    };

    match log_level.to_lowercase().as_str() {
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    }
}

/// Create log output file and logging level based on TOML `Output` configuration
pub(crate) fn create_log_file(output: &Output) -> Result<(File, LevelFilter), ConfigError> {
    let directory = output.directory.as_deref().unwrap_or(".");
    let result = create_dir_all(directory);
    if let Err(err) = result {
        error!("[shelllink] Failed to create logging output directory for {directory}. Error: {err:?}");
        return Err(ConfigError::LogFile);
    }

    let path = format!("{directory}/{}.log", output.name);
    let output_result = File::create(&path);
    let log_file = match output_result {
        Ok(result) => result,
        Err(err) => {
            error!("[shelllink] Failed to create log file at {path}. Error: {err:?}");
            return Err(ConfigError::LogFile);
        }
    };

    Ok((log_file, log_level(output.logging.as_deref())))
}
