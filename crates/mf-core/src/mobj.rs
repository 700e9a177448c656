//! Map object type templates (info.h)
//!
//! Only the pieces the rules resolver touches live here: the per-type flag
//! words and a registry that remembers where the player and the lost soul sit.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Primary map object flags (MF_*)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MobjFlags: u32 {
        const SPECIAL = 0x00000001;
        const SOLID = 0x00000002;
        const SHOOTABLE = 0x00000004;
        const NOSECTOR = 0x00000008;
        const NOBLOCKMAP = 0x00000010;
        const AMBUSH = 0x00000020;
        const JUSTHIT = 0x00000040;
        const JUSTATTACKED = 0x00000080;
        const SPAWNCEILING = 0x00000100;
        const NOGRAVITY = 0x00000200;
        const DROPOFF = 0x00000400;
        const PICKUP = 0x00000800;
        const NOCLIP = 0x00001000;
        const SLIDE = 0x00002000;
        const FLOAT = 0x00004000;
        const TELEPORT = 0x00008000;
        const MISSILE = 0x00010000;
        const DROPPED = 0x00020000;
        const SHADOW = 0x00040000;
        const NOBLOOD = 0x00080000;
        const CORPSE = 0x00100000;
        const INFLOAT = 0x00200000;
        const COUNTKILL = 0x00400000;
        const COUNTITEM = 0x00800000;
        const SKULLFLY = 0x01000000;
        const NOTDMATCH = 0x02000000;
    }
}

bitflags! {
    /// Secondary map object flags (MF2_*), explicit in Hexen-format maps
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MobjFlags2: u32 {
        const LOGRAV = 0x00000001;
        const WINDTHRUST = 0x00000002;
        const FLOORBOUNCE = 0x00000004;
        const THRUGHOST = 0x00000008;
        const FLY = 0x00000010;
        const FOOTCLIP = 0x00000020;
        const SPAWNFLOAT = 0x00000040;
        const NOTELEPORT = 0x00000080;
        const RIP = 0x00000100;
        const PUSHABLE = 0x00000200;
        const SLIDE = 0x00000400;
        const ONMOBJ = 0x00000800;
        const PASSMOBJ = 0x00001000;
        const CANNOTPUSH = 0x00002000;
        const BOSS = 0x00008000;
        const FIREDAMAGE = 0x00010000;
        const NODMGTHRUST = 0x00020000;
        const TELESTOMP = 0x00040000;
        const FLOATBOB = 0x00080000;
        const DONTDRAW = 0x00100000;
        const IMPACT = 0x00200000;
        const PUSHWALL = 0x00400000;
        // Activates monster-crossing lines
        const MCROSS = 0x00800000;
        // Activates projectile-crossing lines
        const PCROSS = 0x01000000;
        const CANTLEAVEFLOORPIC = 0x02000000;
        const NONSHOOTABLE = 0x04000000;
        const INVULNERABLE = 0x08000000;
        const DORMANT = 0x10000000;
        const ICEDAMAGE = 0x20000000;
        const SEEKERMISSILE = 0x40000000;
        const REFLECTIVE = 0x80000000;
    }
}

// Manual serde for MobjFlags
impl Serialize for MobjFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MobjFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(MobjFlags::from_bits_truncate(bits))
    }
}

// Manual serde for MobjFlags2
impl Serialize for MobjFlags2 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MobjFlags2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(MobjFlags2::from_bits_truncate(bits))
    }
}

/// Index of a type in a [`MobjTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MobjType(pub usize);

/// Static data for one map object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobjInfo {
    /// Type name
    pub name: String,

    /// Editor number used in THINGS lumps (-1 = not placeable)
    pub doomednum: i32,

    pub flags: MobjFlags,
    pub flags2: MobjFlags2,
}

impl MobjInfo {
    pub fn new(name: &str, doomednum: i32, flags: MobjFlags) -> Self {
        Self {
            name: name.to_string(),
            doomednum,
            flags,
            flags2: MobjFlags2::empty(),
        }
    }

    pub fn with_flags2(mut self, flags2: MobjFlags2) -> Self {
        self.flags2 = flags2;
        self
    }

    pub fn counts_as_kill(&self) -> bool {
        self.flags.contains(MobjFlags::COUNTKILL)
    }

    pub fn is_missile(&self) -> bool {
        self.flags.contains(MobjFlags::MISSILE)
    }
}

/// Registry of every map object type the game knows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobjTable {
    types: Vec<MobjInfo>,
    player: Option<MobjType>,
    skull: Option<MobjType>,
}

impl MobjTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock Doom types the resolver cares about.
    pub fn doom() -> Self {
        use MobjFlags as F;

        let mut table = Self::new();
        let player = table.register(MobjInfo::new(
            "player",
            -1,
            F::SOLID | F::SHOOTABLE | F::DROPOFF | F::PICKUP | F::NOTDMATCH,
        ));
        table.set_player(player);

        let monster = F::SOLID | F::SHOOTABLE | F::COUNTKILL;
        table.register(MobjInfo::new("zombieman", 3004, monster));
        table.register(MobjInfo::new("shotgun guy", 9, monster));
        table.register(MobjInfo::new("imp", 3001, monster));
        table.register(MobjInfo::new("demon", 3002, monster));
        table.register(MobjInfo::new("cacodemon", 3005, monster | F::FLOAT | F::NOGRAVITY));
        table.register(MobjInfo::new("baron of hell", 3003, monster));
        // The lost soul never counted toward the kill total
        let skull = table.register(MobjInfo::new(
            "lost soul",
            3006,
            F::SOLID | F::SHOOTABLE | F::FLOAT | F::NOGRAVITY,
        ));
        table.set_skull(skull);

        let missile = F::NOBLOCKMAP | F::MISSILE | F::DROPOFF | F::NOGRAVITY;
        table.register(MobjInfo::new("imp fireball", -1, missile));
        table.register(MobjInfo::new("rocket", -1, missile));
        table.register(MobjInfo::new("plasma ball", -1, missile));

        table.register(MobjInfo::new("barrel", 2035, F::SOLID | F::SHOOTABLE | F::NOBLOOD));
        table.register(MobjInfo::new("medikit", 2012, F::SPECIAL));
        table
    }

    /// Append a type and return its index.
    pub fn register(&mut self, info: MobjInfo) -> MobjType {
        self.types.push(info);
        MobjType(self.types.len() - 1)
    }

    pub fn set_player(&mut self, ty: MobjType) {
        self.player = Some(ty);
    }

    pub fn set_skull(&mut self, ty: MobjType) {
        self.skull = Some(ty);
    }

    pub fn player(&self) -> Option<MobjType> {
        self.player
    }

    pub fn skull(&self) -> Option<MobjType> {
        self.skull
    }

    pub fn get(&self, ty: MobjType) -> Option<&MobjInfo> {
        self.types.get(ty.0)
    }

    pub fn get_mut(&mut self, ty: MobjType) -> Option<&mut MobjInfo> {
        self.types.get_mut(ty.0)
    }

    pub fn find(&self, name: &str) -> Option<MobjType> {
        self.types.iter().position(|info| info.name == name).map(MobjType)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MobjInfo> {
        self.types.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MobjInfo> {
        self.types.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doom_table_knows_player_and_skull() {
        let table = MobjTable::doom();
        let player = table.player().unwrap();
        let skull = table.skull().unwrap();
        assert_eq!(table.get(player).unwrap().name, "player");
        assert_eq!(table.get(skull).unwrap().doomednum, 3006);
        assert!(!table.get(skull).unwrap().counts_as_kill());
    }

    #[test]
    fn test_doom_table_starts_without_secondary_flags() {
        let table = MobjTable::doom();
        assert!(table.iter().all(|info| info.flags2.is_empty()));
    }

    #[test]
    fn test_find_by_name() {
        let table = MobjTable::doom();
        let imp = table.find("imp").unwrap();
        assert!(table.get(imp).unwrap().counts_as_kill());
        assert!(table.find("cyberdemon").is_none());
    }

    #[test]
    fn test_flags_serde_uses_bits() {
        let info = MobjInfo::new("rocket", -1, MobjFlags::MISSILE)
            .with_flags2(MobjFlags2::PCROSS | MobjFlags2::IMPACT);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(&format!("\"flags\":{}", MobjFlags::MISSILE.bits())));
        let back: MobjInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
