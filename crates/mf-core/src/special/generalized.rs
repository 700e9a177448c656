//! Boom generalized locked doors
//!
//! Line specials in `[GEN_LOCKED_BASE, GEN_DOOR_BASE)` pack a whole locked
//! door description into one integer:
//!
//! ```text
//!  bit  9     8..6    5     4..3    2..0
//!      nkeys  key    kind   speed  trigger
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub const GEN_LOCKED_BASE: i32 = 0x3800;
pub const GEN_DOOR_BASE: i32 = 0x3c00;

pub const LOCKED_NKEYS: i32 = 0x0200;
pub const LOCKED_KEY: i32 = 0x01c0;
pub const LOCKED_KIND: i32 = 0x0020;
pub const LOCKED_SPEED: i32 = 0x0018;
pub const LOCKED_TRIGGER: i32 = 0x0007;

pub const LOCKED_NKEYS_SHIFT: i32 = 9;
pub const LOCKED_KEY_SHIFT: i32 = 6;
pub const LOCKED_KIND_SHIFT: i32 = 5;
pub const LOCKED_SPEED_SHIFT: i32 = 3;

/// Key field value meaning any key opens the door
pub const KEY_ANY: u8 = 0;
/// Key field value meaning every key is needed
pub const KEY_ALL: u8 = 7;

/// How a generalized line is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Trigger {
    WalkOnce,
    WalkMany,
    SwitchOnce,
    SwitchMany,
    GunOnce,
    GunMany,
    PushOnce,
    PushMany,
}

impl Trigger {
    const fn from_bits(bits: i32) -> Self {
        match bits & LOCKED_TRIGGER {
            0 => Trigger::WalkOnce,
            1 => Trigger::WalkMany,
            2 => Trigger::SwitchOnce,
            3 => Trigger::SwitchMany,
            4 => Trigger::GunOnce,
            5 => Trigger::GunMany,
            6 => Trigger::PushOnce,
            _ => Trigger::PushMany,
        }
    }

    pub const fn repeatable(self) -> bool {
        matches!(
            self,
            Trigger::WalkMany | Trigger::SwitchMany | Trigger::GunMany | Trigger::PushMany
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum DoorSpeed {
    Slow,
    Normal,
    Fast,
    Turbo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum LockedKind {
    OpenWaitClose,
    OpenStay,
}

/// A decoded generalized locked door special
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockedDoor {
    pub trigger: Trigger,
    pub speed: DoorSpeed,
    pub kind: LockedKind,
    /// 0 = any key, 1..=6 = one key, 7 = all keys
    pub key: u8,
    /// Skull keys and keycards of the same color are interchangeable
    pub skull_is_card: bool,
}

impl LockedDoor {
    /// Decode `special` if it lies in the generalized locked door range.
    pub fn decode(special: i32) -> Option<Self> {
        if !is_locked_door(special) {
            return None;
        }
        let bits = special - GEN_LOCKED_BASE;

        Some(Self {
            trigger: Trigger::from_bits(bits),
            speed: match (bits & LOCKED_SPEED) >> LOCKED_SPEED_SHIFT {
                0 => DoorSpeed::Slow,
                1 => DoorSpeed::Normal,
                2 => DoorSpeed::Fast,
                _ => DoorSpeed::Turbo,
            },
            kind: if (bits & LOCKED_KIND) >> LOCKED_KIND_SHIFT == 0 {
                LockedKind::OpenWaitClose
            } else {
                LockedKind::OpenStay
            },
            key: locked_key(bits),
            skull_is_card: (bits & LOCKED_NKEYS) >> LOCKED_NKEYS_SHIFT != 0,
        })
    }

    /// Any one key, or every key, opens this door.
    pub const fn accepts_multiple_keys(&self) -> bool {
        matches!(self.key, KEY_ANY | KEY_ALL)
    }
}

pub const fn is_locked_door(special: i32) -> bool {
    GEN_LOCKED_BASE <= special && special < GEN_DOOR_BASE
}

/// Key field of a special already rebased to `GEN_LOCKED_BASE`.
pub(crate) const fn locked_key(bits: i32) -> u8 {
    ((bits & LOCKED_KEY) >> LOCKED_KEY_SHIFT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert!(!is_locked_door(GEN_LOCKED_BASE - 1));
        assert!(is_locked_door(GEN_LOCKED_BASE));
        assert!(is_locked_door(GEN_DOOR_BASE - 1));
        assert!(!is_locked_door(GEN_DOOR_BASE));
        assert!(LockedDoor::decode(26).is_none());
    }

    #[test]
    fn test_decode_fields() {
        // SR, fast, open-stay, key 3, skull == card
        let special = GEN_LOCKED_BASE
            | 3
            | (2 << LOCKED_SPEED_SHIFT)
            | (1 << LOCKED_KIND_SHIFT)
            | (3 << LOCKED_KEY_SHIFT)
            | (1 << LOCKED_NKEYS_SHIFT);
        let door = LockedDoor::decode(special).unwrap();
        assert_eq!(door.trigger, Trigger::SwitchMany);
        assert!(door.trigger.repeatable());
        assert_eq!(door.speed, DoorSpeed::Fast);
        assert_eq!(door.kind, LockedKind::OpenStay);
        assert_eq!(door.key, 3);
        assert!(door.skull_is_card);
        assert!(!door.accepts_multiple_keys());
    }

    #[test]
    fn test_lowest_special_is_plain_any_key_door() {
        let door = LockedDoor::decode(GEN_LOCKED_BASE).unwrap();
        assert_eq!(door.trigger, Trigger::WalkOnce);
        assert_eq!(door.speed, DoorSpeed::Slow);
        assert_eq!(door.kind, LockedKind::OpenWaitClose);
        assert_eq!(door.key, KEY_ANY);
        assert!(!door.skull_is_card);
        assert!(door.accepts_multiple_keys());
    }

    #[test]
    fn test_all_keys_door() {
        let door = LockedDoor::decode(GEN_LOCKED_BASE + (7 << LOCKED_KEY_SHIFT)).unwrap();
        assert_eq!(door.key, KEY_ALL);
        assert!(door.accepts_multiple_keys());
    }
}
