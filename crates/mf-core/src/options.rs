//! Game mode configuration
//!
//! Reads the two process-wide mode flags from an rc-style file:
//!
//! ```text
//! # pick the game outright
//! OPTIONS=game:heretic
//! # or toggle the flags
//! OPTIONS=hexen,!heretic
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::game::GameMode;

/// Mode flags the rules resolver is driven by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFormatOptions {
    pub hexen: bool,
    pub heretic: bool,
}

/// Options parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

impl MapFormatOptions {
    pub fn for_game(game: GameMode) -> Self {
        Self {
            hexen: game.is_hexen(),
            heretic: game.is_heretic(),
        }
    }

    /// The game these flags select.
    pub fn game(&self) -> GameMode {
        GameMode::from_flags(self.hexen, self.heretic)
    }

    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        let options = Self::parse_config(&contents)?;
        debug!(path = %path.display(), game = %options.game(), "loaded map format options");
        Ok(options)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        match opt.strip_prefix('!') {
            Some(name) => self.set_bool_option(name, false),
            None => self.set_bool_option(opt, true),
        }
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "hexen" => self.hexen = value,
            "heretic" => self.heretic = value,
            "game" => return Err(OptionsError::MissingValue(name.to_string())),
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        match name {
            "game" => {
                let game = GameMode::from_str(value).map_err(|_| {
                    OptionsError::InvalidValue(name.to_string(), value.to_string())
                })?;
                *self = Self::for_game(game);
            }
            "hexen" | "heretic" => {
                let flag = match value.to_lowercase().as_str() {
                    "1" | "true" | "on" | "yes" => true,
                    "0" | "false" | "off" | "no" => false,
                    _ => {
                        return Err(OptionsError::InvalidValue(
                            name.to_string(),
                            value.to_string(),
                        ));
                    }
                };
                self.set_bool_option(name, flag)?;
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_config_string())
            .map_err(|e| OptionsError::IoError(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let flag = |name: &str, on: bool| {
            if on {
                name.to_string()
            } else {
                format!("!{name}")
            }
        };

        [
            "# map format options".to_string(),
            format!(
                "OPTIONS={},{}",
                flag("hexen", self.hexen),
                flag("heretic", self.heretic)
            ),
        ]
        .join("\n")
    }
}
