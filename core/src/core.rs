use crate::{
    error::ConfigError,
    filesystem::{
        files::{glob_paths, read_file},
        LinkFileSystem, LocalFileSystem,
    },
    shortcuts::{encode, error::LnkError, is_recognized, parse_shortcut, DecodeOptions, TextMode},
    structs::toml::{CreateOptions, Output, ShortcutToml},
    utils::{
        encoding::base64_decode_standard,
        logging::{create_log_file, log_level},
    },
};
use common::windows::{CustomIcon, HotKey, LinkInfo, ShortcutInfo};
use log::{error, info, warn};
use simplelog::{Config, SimpleLogger, WriteLogger};
use std::{fs::create_dir_all, str::from_utf8};

/// Parse a TOML collector file at provided path
pub fn parse_toml_file(path: &str) -> Result<(), ConfigError> {
    let buffer = match read_file(path) {
        Ok(result) => result,
        Err(err) => {
            error!("[shelllink] Could not read TOML file {path}: {err:?}");
            return Err(ConfigError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse already read TOML collector data. Creates and parses the listed `Shortcut` files
pub fn parse_toml_data(data: &[u8]) -> Result<(), ConfigError> {
    let collector = parse_collector(data)?;
    init_logging(&collector.output);

    let results = run_collector(&collector)?;
    output_results(&results, &collector.output)
}

/// Parse a base64 encoded TOML collector passed on the command line
pub fn parse_toml_base64(data: &str) -> Result<(), ConfigError> {
    let toml_data = base64_decode_standard(data)?;
    parse_toml_data(&toml_data)
}

/// Deserialize TOML collector data
pub fn parse_collector(data: &[u8]) -> Result<ShortcutToml, ConfigError> {
    let toml_results = toml::from_str(from_utf8(data).unwrap_or_default());
    match toml_results {
        Ok(results) => Ok(results),
        Err(err) => {
            error!("[shelllink] Failed to parse TOML data: {err:?}");
            Err(ConfigError::BadToml)
        }
    }
}

/**
 * Create every `[[create]]` entry then parse every `[[parse]]` entry
 * Failures of a single entry are logged and skipped
 */
pub fn run_collector(collector: &ShortcutToml) -> Result<Vec<ShortcutInfo>, ConfigError> {
    let fs = LocalFileSystem;
    for entry in &collector.create {
        let info = create_info(entry);
        match create_link_file(&entry.path, &info, &fs) {
            Ok(_) => info!("[shelllink] Created shortcut {}", entry.path),
            Err(err) => error!("[shelllink] Could not create shortcut {}: {err}", entry.path),
        }
    }

    let options = DecodeOptions {
        text_mode: text_mode(collector.output.text_mode.as_deref()),
    };
    let mut results = Vec::new();
    for entry in &collector.parse {
        match grab_lnk_glob(&entry.path, &options) {
            Ok(mut shortcuts) => results.append(&mut shortcuts),
            Err(err) => error!("[shelllink] Could not parse {}: {err}", entry.path),
        }
    }
    Ok(results)
}

/// Read and decode a `Shortcut` file
pub fn read_link_file<F: LinkFileSystem>(
    path: &str,
    fs: &F,
    options: &DecodeOptions,
) -> Result<ShortcutInfo, LnkError> {
    let data = fs.read_file(path)?;
    parse_shortcut(&data, options, path)
}

/// Encode `LinkInfo` and write it with a single call. Nothing is written if encoding fails
pub fn create_link_file<F: LinkFileSystem>(
    path: &str,
    info: &LinkInfo,
    fs: &F,
) -> Result<(), LnkError> {
    let data = encode(info, fs)?;
    fs.write_file(path, &data)?;
    Ok(())
}

/// Check if a file starts with the `Shortcut` header
pub fn is_link_file<F: LinkFileSystem>(path: &str, fs: &F) -> bool {
    match fs.read_file(path) {
        Ok(data) => is_recognized(&data),
        Err(_err) => false,
    }
}

/// Decode every `Shortcut` file matching a glob pattern. Files that fail to decode are skipped
pub fn grab_lnk_glob(pattern: &str, options: &DecodeOptions) -> Result<Vec<ShortcutInfo>, LnkError> {
    let paths = glob_paths(pattern)?;
    let fs = LocalFileSystem;

    let mut shortcuts = Vec::new();
    for path in paths {
        match read_link_file(&path, &fs, options) {
            Ok(result) => shortcuts.push(result),
            Err(err) => warn!("[shelllink] Skipping {path}: {err}"),
        }
    }
    Ok(shortcuts)
}

/// Map the TOML `text_mode` value. Anything but `unicode` keeps the legacy behavior
fn text_mode(mode: Option<&str>) -> TextMode {
    match mode.map(str::to_lowercase).as_deref() {
        Some("unicode") => TextMode::Unicode,
        _ => TextMode::Legacy,
    }
}

fn create_info(entry: &CreateOptions) -> LinkInfo {
    LinkInfo {
        target: entry.target.clone(),
        network_path: String::new(),
        description: entry.description.clone(),
        working_directory: entry.working_directory.clone(),
        arguments: entry.arguments.clone(),
        custom_icon: CustomIcon {
            filename: entry.icon_filename.clone(),
            index: entry.icon_index,
        },
        hot_key: HotKey::from_u16(entry.hot_key.unwrap_or_default()),
    }
}

/// Log to a file when an output directory is configured, otherwise to the terminal
fn init_logging(output: &Output) {
    if output.directory.is_some() {
        if let Ok((log_file, level)) = create_log_file(output) {
            let _ = WriteLogger::init(level, Config::default(), log_file);
            return;
        }
    }

    let _ = SimpleLogger::init(log_level(output.logging.as_deref()), Config::default());
}

/// Write parsed `Shortcut` data as JSON to `<directory>/<name>.json`
fn output_results(results: &[ShortcutInfo], output: &Output) -> Result<(), ConfigError> {
    let directory = output.directory.as_deref().unwrap_or(".");
    if let Err(err) = create_dir_all(directory) {
        error!("[shelllink] Could not create output directory {directory}: {err:?}");
        return Err(ConfigError::Output);
    }

    let serde_data = match serde_json::to_vec_pretty(results) {
        Ok(result) => result,
        Err(err) => {
            error!("[shelllink] Could not serialize shortcut data: {err:?}");
            return Err(ConfigError::Output);
        }
    };

    let path = format!("{directory}/{}.json", output.name);
    let fs = LocalFileSystem;
    if let Err(err) = fs.write_file(&path, &serde_data) {
        error!("[shelllink] Could not write output {path}: {err:?}");
        return Err(ConfigError::Output);
    }
    info!("[shelllink] Wrote {} shortcuts to {path}", results.len());
    Ok(())
}
