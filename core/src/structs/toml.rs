use serde::Deserialize;

/// TOML collector file. Lists `Shortcut` files to create and paths to parse
#[derive(Debug, Deserialize)]
pub struct ShortcutToml {
    pub output: Output,
    #[serde(default)]
    pub create: Vec<CreateOptions>,
    #[serde(default)]
    pub parse: Vec<ParseOptions>,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    /**Stem for the JSON output and log files */
    pub name: String,
    /**Output directory. Results and logs go to the terminal when missing */
    pub directory: Option<String>,
    pub logging: Option<String>,
    /**`legacy` or `unicode` */
    pub text_mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOptions {
    /**Where the new `Shortcut` file is written */
    pub path: String,
    pub target: String,
    #[serde(default)]
    pub arguments: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub working_directory: String,
    #[serde(default)]
    pub icon_filename: String,
    #[serde(default)]
    pub icon_index: i32,
    /**Key code in the low byte, modifiers in the high byte */
    pub hot_key: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct ParseOptions {
    /**File path or glob pattern */
    pub path: String,
}
