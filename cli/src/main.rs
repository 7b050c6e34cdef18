use clap::Parser;
use log::{info, LevelFilter};
use shelllink_core::{
    core::{grab_lnk_glob, parse_toml_base64, parse_toml_file, read_link_file},
    filesystem::{LinkFileSystem, LocalFileSystem},
    shortcuts::{dump, link_command, DecodeOptions, TextMode},
};
use simplelog::{Config, SimpleLogger};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML collector
    #[clap(short, long, value_parser)]
    toml: Option<String>,

    /// Base64 encoded TOML file
    #[clap(short, long, value_parser)]
    data: Option<String>,

    /// Shortcut file or glob pattern to parse as JSON
    #[clap(short, long, value_parser)]
    parse: Option<String>,

    /// Shortcut file to print as a readable trace
    #[clap(long, value_parser)]
    dump: Option<String>,

    /// Shortcut file to print the command line for
    #[clap(short, long, value_parser)]
    command: Option<String>,

    /// Decode full UTF16 strings instead of the legacy 8 bit truncation
    #[clap(short, long)]
    unicode: bool,
}

fn main() {
    let args = Args::parse();
    let options = DecodeOptions {
        text_mode: if args.unicode {
            TextMode::Unicode
        } else {
            TextMode::Legacy
        },
    };

    if let Some(toml) = args.toml {
        if !toml.is_empty() {
            match parse_toml_file(&toml) {
                Ok(_) => info!("[shelllink] Collection success"),
                Err(err) => println!("[shelllink] Failed to run TOML collector: {err}"),
            }
        }
    } else if let Some(data) = args.data {
        if !data.is_empty() {
            match parse_toml_base64(&data) {
                Ok(_) => info!("[shelllink] Collection success"),
                Err(err) => println!("[shelllink] Failed to run TOML collector: {err}"),
            }
        }
    } else if let Some(pattern) = args.parse {
        init_logger();
        let shortcuts = match grab_lnk_glob(&pattern, &options) {
            Ok(result) => result,
            Err(err) => {
                println!("[shelllink] Failed to parse {pattern}: {err}");
                return;
            }
        };
        match serde_json::to_string_pretty(&shortcuts) {
            Ok(result) => println!("{result}"),
            Err(err) => println!("[shelllink] Failed to serialize shortcuts: {err:?}"),
        }
    } else if let Some(path) = args.dump {
        init_logger();
        match LocalFileSystem.read_file(&path) {
            Ok(data) => println!("{}", dump(&data)),
            Err(err) => println!("[shelllink] Failed to read {path}: {err}"),
        }
    } else if let Some(path) = args.command {
        init_logger();
        match read_link_file(&path, &LocalFileSystem, &options) {
            Ok(result) => println!("{}", link_command(&result.link)),
            Err(err) => println!("[shelllink] Failed to read shortcut {path}: {err}"),
        }
    } else {
        println!("[shelllink] No TOML collector or shortcut path provided!");
    }
}

fn init_logger() {
    let _ = SimpleLogger::init(LevelFilter::Warn, Config::default());
}
