// SPDX-License-Identifier: MIT

//! Option storage consulted by the status composer: simple key to
//! scalar/string lookups loaded once from the config file.

use std::fs;
use std::path::{Path, PathBuf};

use crossterm::style::Color;
use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::screen::Style;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Options {
    pub status: bool,
    pub status_left: String,
    pub status_right: String,
    pub status_left_length: usize,
    pub status_right_length: usize,
    pub status_fg: String,
    pub status_bg: String,
    pub message_fg: String,
    pub message_bg: String,
    pub prompt_history_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            status: true,
            status_left: "#S".to_string(),
            status_right: "#H %H:%M %d-%b-%y".to_string(),
            status_left_length: 10,
            status_right_length: 40,
            status_fg: "black".to_string(),
            status_bg: "green".to_string(),
            message_fg: "black".to_string(),
            message_bg: "yellow".to_string(),
            prompt_history_limit: 100,
        }
    }
}

impl Options {
    pub(crate) fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::Config(err.to_string()))
    }

    fn config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".config").join("muxline").join("config.toml"))
    }

    pub(crate) fn status_style(&self) -> Style {
        Style {
            fg: color_from_name(&self.status_fg),
            bg: color_from_name(&self.status_bg),
            reversed: false,
        }
    }

    pub(crate) fn message_style(&self) -> Style {
        Style {
            fg: color_from_name(&self.message_fg),
            bg: color_from_name(&self.message_bg),
            reversed: false,
        }
    }
}

fn color_from_name(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.status);
        assert_eq!(options.status_left, "#S");
        assert_eq!(options.status_left_length, 10);
        assert_eq!(options.prompt_history_limit, 100);
    }

    #[test]
    fn test_parse_overrides() {
        let options = Options::parse(
            r#"
status_left = "[#S]"
status_right = ""
status_bg = "blue"
prompt_history_limit = 5
"#,
        )
        .unwrap();
        assert_eq!(options.status_left, "[#S]");
        assert_eq!(options.status_right, "");
        assert_eq!(options.status_style().bg, Color::DarkBlue);
        assert_eq!(options.prompt_history_limit, 5);
        // untouched keys keep their defaults
        assert_eq!(options.status_right_length, 40);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Options::parse("status_left = [").is_err());
    }

    #[test]
    fn test_unknown_color_falls_back() {
        assert_eq!(color_from_name("chartreuse"), Color::Reset);
    }
}
