//! Game variant selection
//!
//! Which game is running is detected elsewhere (IWAD inspection, command line).
//! This module only gives that answer a closed type.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The game variant in play for the whole process.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Doom,
    Heretic,
    Hexen,
}

impl GameMode {
    /// Build a mode from the two process-wide flags.
    ///
    /// `hexen` takes precedence when both are set, matching the order in which
    /// the resolver tests them.
    pub const fn from_flags(hexen: bool, heretic: bool) -> Self {
        if hexen {
            GameMode::Hexen
        } else if heretic {
            GameMode::Heretic
        } else {
            GameMode::Doom
        }
    }

    pub const fn is_hexen(self) -> bool {
        matches!(self, GameMode::Hexen)
    }

    pub const fn is_heretic(self) -> bool {
        matches!(self, GameMode::Heretic)
    }

    /// Heretic and Hexen share Raven's engine lineage.
    pub const fn is_raven(self) -> bool {
        matches!(self, GameMode::Heretic | GameMode::Hexen)
    }
}
