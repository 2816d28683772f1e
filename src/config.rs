use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "RANGECAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("rangecal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".rangecal.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first existing file of the default
/// locations. Falls back to the default config if none exists.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::new(
                ErrorKind::ConfigMissing,
                &path.display().to_string(),
            ));
        }
        return Config::from_path(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => Config::from_path(&location),
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorName {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    LightBlack,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    LightWhite,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub month_header_fg: Option<ColorName>,
    pub weekday_fg: Option<ColorName>,
    pub selected_bg: Option<ColorName>,
    pub between_bg: Option<ColorName>,
    pub disabled_fg: Option<ColorName>,
    pub focus_bg: Option<ColorName>,
    pub today_char: Option<char>,
    pub focus_char: Option<char>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            month_header_fg: Some(ColorName::Yellow),
            weekday_fg: Some(ColorName::Cyan),
            selected_bg: Some(ColorName::Blue),
            between_bg: Some(ColorName::LightBlack),
            disabled_fg: Some(ColorName::LightBlack),
            focus_bg: Some(ColorName::Magenta),
            today_char: Some('*'),
            focus_char: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redraw interval in milliseconds.
    tick_rate: u64,
    pub scrolloff: usize,
    pub output_format: String,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate: 500,
            scrolloff: 2,
            output_format: "%Y-%m-%d".to_owned(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Config> {
        log::info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate)
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config> {
        let config: Config = toml::from_str(s)?;

        if StrftimeItems::new(&config.output_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                &format!("invalid output_format '{}'", config.output_format),
            ));
        }

        Ok(config)
    }
}
