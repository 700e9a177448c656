//! Line special classification
//!
//! Automap colouring, boss death actions and use-line feedback need to know
//! whether a line is a locked door, an exit or a teleporter. What a special
//! number means depends on the map format, so every query takes the resolved
//! [`MapFormat`]. All queries are total: unknown specials classify as nothing.

pub mod generalized;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::format::MapFormat;
use generalized::{GEN_LOCKED_BASE, KEY_ALL, KEY_ANY, is_locked_door, locked_key};

/// Key colour a door asks for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DoorType {
    #[default]
    None,
    Red,
    Blue,
    Yellow,
    /// Any of the three keys, or all of them
    Multiple,
}

/// Highest special Heretic uses for doors
const HERETIC_MAX_DOOR_SPECIAL: i32 = 34;

/// Hexen Door_Locked and ACS_LockedExecute
const HEXEN_LOCKED_SPECIALS: [i32; 2] = [13, 83];

const BLUE_DOORS: [i32; 4] = [26, 32, 99, 133];
const YELLOW_DOORS: [i32; 4] = [27, 34, 136, 137];
const RED_DOORS: [i32; 4] = [28, 33, 134, 135];

/// Teleport_NewMap and Teleport_EndGame
const HEXEN_EXITS: [i32; 2] = [74, 75];
const DOOM_EXITS: [i32; 6] = [11, 52, 197, 51, 124, 198];

/// Teleport and Teleport_NoFog
const HEXEN_TELEPORTS: [i32; 2] = [70, 71];
const HERETIC_TELEPORTS: [i32; 1] = [39];
const DOOM_TELEPORTS: [i32; 4] = [39, 97, 125, 126];

/// Which key a door with `special` asks for.
///
/// Checks run in a fixed order and the first hit wins: Hexen-style lines,
/// Heretic's non-door range, the generalized locked range, then the literal
/// door specials.
pub fn door_type(format: &MapFormat, special: i32) -> DoorType {
    if format.hexen_lines() {
        // The key itself is an argument of the line, not part of the special
        return if HEXEN_LOCKED_SPECIALS.contains(&special) {
            DoorType::Multiple
        } else {
            DoorType::None
        };
    }

    if format.game.is_heretic() && special > HERETIC_MAX_DOOR_SPECIAL {
        return DoorType::None;
    }

    if is_locked_door(special) {
        return match locked_key(special - GEN_LOCKED_BASE) {
            KEY_ANY | KEY_ALL => DoorType::Multiple,
            key => match (key - 1) % 3 {
                0 => DoorType::Blue,
                1 => DoorType::Yellow,
                _ => DoorType::Red,
            },
        };
    }

    if BLUE_DOORS.contains(&special) {
        DoorType::Blue
    } else if YELLOW_DOORS.contains(&special) {
        DoorType::Yellow
    } else if RED_DOORS.contains(&special) {
        DoorType::Red
    } else {
        DoorType::None
    }
}

/// Line ends the level when activated.
pub fn is_exit_line(format: &MapFormat, special: i32) -> bool {
    if format.hexen_lines() {
        return HEXEN_EXITS.contains(&special);
    }

    DOOM_EXITS.contains(&special)
}

/// Line teleports whatever activates it.
pub fn is_teleport_line(format: &MapFormat, special: i32) -> bool {
    if format.hexen_lines() {
        return HEXEN_TELEPORTS.contains(&special);
    }

    if format.game.is_heretic() {
        return HERETIC_TELEPORTS.contains(&special);
    }

    DOOM_TELEPORTS.contains(&special)
}

impl MapFormat {
    pub fn door_type(&self, special: i32) -> DoorType {
        door_type(self, special)
    }

    pub fn is_exit_line(&self, special: i32) -> bool {
        is_exit_line(self, special)
    }

    pub fn is_teleport_line(&self, special: i32) -> bool {
        is_teleport_line(self, special)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::resolve;
    use crate::game::GameMode;
    use super::generalized::LOCKED_KEY_SHIFT;

    fn locked(key: i32) -> i32 {
        GEN_LOCKED_BASE + (key << LOCKED_KEY_SHIFT)
    }

    #[test]
    fn test_generalized_keys_cycle() {
        let doom = resolve(GameMode::Doom);
        assert_eq!(door_type(&doom, locked(0)), DoorType::Multiple);
        assert_eq!(door_type(&doom, locked(7)), DoorType::Multiple);
        assert_eq!(door_type(&doom, locked(1)), DoorType::Blue);
        assert_eq!(door_type(&doom, locked(2)), DoorType::Yellow);
        assert_eq!(door_type(&doom, locked(3)), DoorType::Red);
        assert_eq!(door_type(&doom, locked(4)), DoorType::Blue);
        assert_eq!(door_type(&doom, locked(5)), DoorType::Yellow);
        assert_eq!(door_type(&doom, locked(6)), DoorType::Red);
    }

    #[test]
    fn test_generalized_ignores_other_fields() {
        let doom = resolve(GameMode::Doom);
        // trigger, speed, kind and nkeys bits set
        let noise = 0x7 | 0x18 | 0x20 | 0x200;
        assert_eq!(door_type(&doom, locked(2) | noise), DoorType::Yellow);
        assert_eq!(door_type(&doom, locked(7) | noise), DoorType::Multiple);
    }

    #[test]
    fn test_literal_doors() {
        let doom = resolve(GameMode::Doom);
        assert_eq!(door_type(&doom, 26), DoorType::Blue);
        assert_eq!(door_type(&doom, 27), DoorType::Yellow);
        assert_eq!(door_type(&doom, 28), DoorType::Red);
        assert_eq!(door_type(&doom, 99), DoorType::Blue);
        assert_eq!(door_type(&doom, 134), DoorType::Red);
        assert_eq!(door_type(&doom, 137), DoorType::Yellow);
        assert_eq!(door_type(&doom, 999), DoorType::None);
        assert_eq!(door_type(&doom, 0), DoorType::None);
        assert_eq!(door_type(&doom, -26), DoorType::None);
    }

    #[test]
    fn test_heretic_high_specials_are_not_doors() {
        let heretic = resolve(GameMode::Heretic);
        assert_eq!(door_type(&heretic, 26), DoorType::Blue);
        assert_eq!(door_type(&heretic, 34), DoorType::Yellow);
        assert_eq!(door_type(&heretic, 99), DoorType::None);
        assert_eq!(door_type(&heretic, locked(1)), DoorType::None);
    }

    #[test]
    fn test_hexen_locked_specials() {
        let hexen = resolve(GameMode::Hexen);
        assert_eq!(door_type(&hexen, 13), DoorType::Multiple);
        assert_eq!(door_type(&hexen, 83), DoorType::Multiple);
        assert_eq!(door_type(&hexen, 26), DoorType::None);
        assert_eq!(door_type(&hexen, locked(1)), DoorType::None);
    }

    #[test]
    fn test_exit_lines() {
        let doom = resolve(GameMode::Doom);
        assert!(is_exit_line(&doom, 11));
        assert!(!is_exit_line(&doom, 12));
        for special in [51, 52, 124, 197, 198] {
            assert!(doom.is_exit_line(special));
        }

        let hexen = resolve(GameMode::Hexen);
        assert!(is_exit_line(&hexen, 74));
        assert!(is_exit_line(&hexen, 75));
        assert!(!is_exit_line(&hexen, 11));

        let heretic = resolve(GameMode::Heretic);
        assert!(is_exit_line(&heretic, 52));
    }

    #[test]
    fn test_teleport_lines() {
        let heretic = resolve(GameMode::Heretic);
        assert!(is_teleport_line(&heretic, 39));
        assert!(!is_teleport_line(&heretic, 97));

        let doom = resolve(GameMode::Doom);
        for special in [39, 97, 125, 126] {
            assert!(doom.is_teleport_line(special));
        }
        assert!(!doom.is_teleport_line(70));

        let hexen = resolve(GameMode::Hexen);
        assert!(is_teleport_line(&hexen, 70));
        assert!(is_teleport_line(&hexen, 71));
        assert!(!is_teleport_line(&hexen, 39));
    }

    #[test]
    fn test_method_forms_match() {
        let doom = resolve(GameMode::Doom);
        assert_eq!(doom.door_type(133), door_type(&doom, 133));
    }
}
