//! mf-core: map format rules for Doom-engine levels
//!
//! Picks the rule set (sector specials, line crossing, scroller/friction/pusher
//! spawning, on-disk record layout) that governs a level, and classifies line
//! specials (doors, exits, teleporters) under that rule set.
//!
//! The crate holds no global state. A level loader calls
//! [`format::apply_map_format`] once per level, publishes the result through
//! [`format::ActiveFormat`], and every consumer reads from that snapshot.

pub mod error;
pub mod format;
pub mod game;
pub mod mobj;
pub mod options;
pub mod special;

pub use error::MapFormatError;
pub use format::{
    ActiveFormat, Flavor, LineCrossing, MapFamily, MapFeatures, MapFormat, RecordLayout,
    SpecialBehaviors, SpecialHandlers, apply_map_format, migrate_mobj_info, resolve,
};
pub use game::GameMode;
pub use mobj::{MobjFlags, MobjFlags2, MobjInfo, MobjTable, MobjType};
pub use options::{MapFormatOptions, OptionsError};
pub use special::{DoorType, door_type, is_exit_line, is_teleport_line};
