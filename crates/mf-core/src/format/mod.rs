//! Map format resolution
//!
//! A [`MapFormat`] is the rule set for one level: which optional lumps the
//! level may use, how sector specials pack friction and pusher bits, which
//! behavior implementation backs each special hook, and how large the on-disk
//! thing and linedef records are. It is built whole by [`resolve`] and never
//! modified afterwards.

mod active;
pub mod behavior;
pub mod records;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::debug;

use crate::game::GameMode;
use crate::mobj::{MobjFlags2, MobjTable};

pub use active::ActiveFormat;
pub use behavior::{Flavor, LineCrossing, SpecialBehaviors, SpecialHandlers};
pub use records::RecordLayout;

/// Boom sector special bit enabling friction
pub const FRICTION_MASK: i32 = 0x100;
/// Boom sector special bit enabling push/pull effects
pub const PUSH_MASK: i32 = 0x200;
/// ZDoom sector special bit enabling friction
pub const ZDOOM_FRICTION_MASK: i32 = 0x800;
/// ZDoom sector special bit enabling push/pull effects
pub const ZDOOM_PUSH_MASK: i32 = 0x1000;

/// Sector specials above the low 5 bits are Boom generalized
const BOOM_GENERALIZED_MASK: i32 = !31;
/// Sector specials above the low byte are ZDoom generalized
const ZDOOM_GENERALIZED_MASK: i32 = !0xff;

/// Selects ZDoom-style specials on Hexen-format maps.
///
/// Needs per-map format detection: a single wad can mix vanilla and
/// Hexen-format maps, so the presence of a BEHAVIOR lump alone cannot decide
/// it for the whole process.
const ZDOOM_IN_HEXEN: bool = false;

/// The dialect a level's specials are written in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MapFamily {
    /// Doom / Boom line and sector specials
    #[default]
    Doom,
    /// Doom-format maps with Heretic's special set
    Heretic,
    /// Hexen-format maps carrying ZDoom specials (reserved, never resolved)
    ZDoomInHexen,
    /// Native Hexen maps
    Hexen,
}

impl MapFamily {
    /// Lines carry a special plus five arguments instead of a tag.
    pub const fn hexen_lines(self) -> bool {
        matches!(self, MapFamily::Hexen | MapFamily::ZDoomInHexen)
    }

    pub const fn zdoom(self) -> bool {
        matches!(self, MapFamily::ZDoomInHexen)
    }
}

bitflags! {
    /// Optional level features gated by the map format
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MapFeatures: u16 {
        const POLYOBJS = 0x0001;
        const ACS = 0x0002;
        const MAPINFO = 0x0004;
        const SNDSEQ = 0x0008;
        const SNDINFO = 0x0010;
        const ANIMDEFS = 0x0020;
        const DOUBLESKY = 0x0040;
        const MAP99 = 0x0080;
    }
}

// Manual serde for MapFeatures
impl Serialize for MapFeatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MapFeatures {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(MapFeatures::from_bits_truncate(bits))
    }
}

/// The rule set governing one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapFormat {
    pub family: MapFamily,

    /// Game the format was resolved for
    pub game: GameMode,

    pub features: MapFeatures,

    /// Sector special bits that enable friction (0 = not used)
    pub friction_mask: i32,

    /// Sector special bits that enable pushers (0 = not used)
    pub push_mask: i32,

    /// Sector special bits reserved for generalized effects (0 = none)
    pub generalized_mask: i32,

    pub behaviors: SpecialBehaviors,

    pub records: RecordLayout,
}

impl MapFormat {
    /// Vanilla/Boom maps, also used by Heretic.
    fn doom(game: GameMode) -> Self {
        let heretic = game.is_heretic();
        Self {
            family: if heretic {
                MapFamily::Heretic
            } else {
                MapFamily::Doom
            },
            game,
            features: MapFeatures::empty(),
            friction_mask: FRICTION_MASK,
            push_mask: PUSH_MASK,
            generalized_mask: if heretic { 0 } else { BOOM_GENERALIZED_MASK },
            behaviors: SpecialBehaviors {
                init_sector_special: Some(Flavor::Compatible),
                player_in_special_sector: Some(if heretic {
                    Flavor::Heretic
                } else {
                    Flavor::Compatible
                }),
                spawn_scroller: Some(Flavor::Compatible),
                spawn_friction: Some(Flavor::Compatible),
                spawn_pusher: Some(Flavor::Compatible),
                spawn_extra: Some(Flavor::Compatible),
                cross_special_line: Some(if heretic {
                    Flavor::Heretic
                } else {
                    Flavor::Compatible
                }),
            },
            records: RecordLayout::DOOM,
        }
    }

    /// Native Hexen maps.
    fn hexen(game: GameMode) -> Self {
        Self {
            family: MapFamily::Hexen,
            game,
            features: MapFeatures::all(),
            friction_mask: 0,
            push_mask: 0,
            generalized_mask: 0,
            behaviors: SpecialBehaviors {
                init_sector_special: None,
                player_in_special_sector: Some(Flavor::Hexen),
                spawn_scroller: None,
                spawn_friction: None,
                spawn_pusher: None,
                spawn_extra: None,
                cross_special_line: Some(Flavor::Hexen),
            },
            records: RecordLayout::HEXEN,
        }
    }

    /// Hexen-format maps with ZDoom specials.
    ///
    /// [`resolve`] never selects this format; it is reachable only once
    /// per-map format detection exists.
    pub fn zdoom_in_hexen(game: GameMode) -> Self {
        Self {
            family: MapFamily::ZDoomInHexen,
            game,
            features: MapFeatures::empty(),
            friction_mask: ZDOOM_FRICTION_MASK,
            push_mask: ZDOOM_PUSH_MASK,
            generalized_mask: ZDOOM_GENERALIZED_MASK,
            behaviors: SpecialBehaviors {
                init_sector_special: Some(Flavor::ZDoom),
                player_in_special_sector: Some(Flavor::ZDoom),
                spawn_scroller: Some(Flavor::ZDoom),
                spawn_friction: Some(Flavor::ZDoom),
                spawn_pusher: Some(Flavor::ZDoom),
                spawn_extra: Some(Flavor::ZDoom),
                cross_special_line: Some(Flavor::ZDoom),
            },
            records: RecordLayout::HEXEN,
        }
    }

    /// Lines use the Hexen special-plus-arguments layout.
    pub const fn hexen_lines(&self) -> bool {
        self.family.hexen_lines()
    }

    pub const fn zdoom(&self) -> bool {
        self.family.zdoom()
    }

    pub fn supports(&self, feature: MapFeatures) -> bool {
        self.features.contains(feature)
    }

    /// Sector special enables friction.
    pub const fn has_friction(&self, special: i32) -> bool {
        special & self.friction_mask != 0
    }

    /// Sector special enables a pusher.
    pub const fn has_pusher(&self, special: i32) -> bool {
        special & self.push_mask != 0
    }

    /// Sector special carries generalized bits.
    pub const fn is_generalized_sector(&self, special: i32) -> bool {
        special & self.generalized_mask != 0
    }

    fn check_invariants(&self) {
        debug_assert_eq!(self.family.hexen_lines(), self.records == RecordLayout::HEXEN);
        debug_assert!(
            !matches!(self.family, MapFamily::Heretic) || self.game.is_heretic(),
            "Heretic specials resolved for {}",
            self.game
        );
        debug_assert!(
            self.family.hexen_lines() || self.behaviors.spawn_scroller.is_some(),
            "Doom-format maps always spawn scrollers"
        );
    }
}

/// Pick the rule set for a level of `game`.
///
/// Pure: the same game always yields the same format.
pub fn resolve(game: GameMode) -> MapFormat {
    let format = if ZDOOM_IN_HEXEN {
        MapFormat::zdoom_in_hexen(game)
    } else if game.is_hexen() {
        MapFormat::hexen(game)
    } else {
        MapFormat::doom(game)
    };
    format.check_invariants();

    debug!(
        game = %game,
        family = %format.family,
        features = ?format.features,
        "resolved map format"
    );
    format
}

/// Resolve the rule set for a level and bring `mobjinfo` in line with it.
///
/// Called by the level loader once per level, before any special is read.
pub fn apply_map_format(game: GameMode, mobjinfo: &mut MobjTable) -> MapFormat {
    let format = resolve(game);
    migrate_mobj_info(&format, mobjinfo);
    format
}

/// Derive explicit crossing flags for types written without them.
///
/// Hexen-format lines only fire for things flagged MCROSS or PCROSS. Doom and
/// Heretic types never carried those flags, so they are inferred from
/// COUNTKILL and MISSILE. Flags are only added, never cleared, so running
/// this again is harmless. Returns whether anything was migrated.
pub fn migrate_mobj_info(format: &MapFormat, mobjinfo: &mut MobjTable) -> bool {
    if format.game.is_hexen() || !format.hexen_lines() {
        return false;
    }

    let mut derived = 0usize;
    for info in mobjinfo.iter_mut() {
        if info.counts_as_kill() {
            info.flags2 |= MobjFlags2::MCROSS;
            derived += 1;
        }

        if info.is_missile() {
            info.flags2 |= MobjFlags2::PCROSS;
            derived += 1;
        }
    }

    if !format.game.is_raven() {
        if let Some(info) = mobjinfo.skull().and_then(|ty| mobjinfo.get_mut(ty)) {
            info.flags2 |= MobjFlags2::MCROSS;
        }
        if let Some(info) = mobjinfo.player().and_then(|ty| mobjinfo.get_mut(ty)) {
            info.flags2 |= MobjFlags2::WINDTHRUST;
        }
    }

    debug!(family = %format.family, derived, "migrated mobj crossing flags");
    true
}
