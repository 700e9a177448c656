//! Special behavior dispatch
//!
//! Each hook a level can trigger (sector setup, player standing in a sector,
//! scroller/friction/pusher/extra spawning, crossing a line) has one
//! implementation per dialect. The map format records which one applies as a
//! [`Flavor`], or `None` when the dialect has no such hook. The simulation
//! provides the implementations through [`SpecialHandlers`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::MapFormat;

/// Which dialect's implementation backs a hook
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Flavor {
    /// Doom / Boom / MBF behavior
    Compatible,
    Heretic,
    Hexen,
    ZDoom,
}

/// Behavior slot table for one map format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpecialBehaviors {
    pub init_sector_special: Option<Flavor>,
    pub player_in_special_sector: Option<Flavor>,
    pub spawn_scroller: Option<Flavor>,
    pub spawn_friction: Option<Flavor>,
    pub spawn_pusher: Option<Flavor>,
    pub spawn_extra: Option<Flavor>,
    pub cross_special_line: Option<Flavor>,
}

/// A thing crossing a special line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCrossing {
    pub line: usize,
    /// 0 = front side, 1 = back side
    pub side: usize,
    pub thing: usize,
    /// Triggered by a boss death action rather than movement
    pub boss_action: bool,
}

/// Implementations of the special hooks, supplied by the simulation.
///
/// Every method receives the flavor picked by the map format so one handler
/// type can serve every dialect. Methods are only called for flavors a map
/// format actually assigns to the slot.
pub trait SpecialHandlers {
    fn init_sector_special(&mut self, flavor: Flavor, sector: usize, index: usize);

    fn player_in_special_sector(&mut self, flavor: Flavor, player: usize, sector: usize);

    fn spawn_scroller(&mut self, flavor: Flavor, line: usize, index: usize);

    fn spawn_friction(&mut self, flavor: Flavor, line: usize);

    fn spawn_pusher(&mut self, flavor: Flavor, line: usize);

    fn spawn_extra(&mut self, flavor: Flavor, line: usize, index: usize);

    fn cross_special_line(&mut self, flavor: Flavor, crossing: LineCrossing);
}

impl MapFormat {
    /// Set up the special of sector `sector` (the `index`-th loaded).
    ///
    /// Returns false when the map format has no sector initializer.
    pub fn init_sector_special<H: SpecialHandlers + ?Sized>(
        &self,
        handlers: &mut H,
        sector: usize,
        index: usize,
    ) -> bool {
        match self.behaviors.init_sector_special {
            Some(flavor) => {
                handlers.init_sector_special(flavor, sector, index);
                true
            }
            None => false,
        }
    }

    pub fn player_in_special_sector<H: SpecialHandlers + ?Sized>(
        &self,
        handlers: &mut H,
        player: usize,
        sector: usize,
    ) -> bool {
        match self.behaviors.player_in_special_sector {
            Some(flavor) => {
                handlers.player_in_special_sector(flavor, player, sector);
                true
            }
            None => false,
        }
    }

    pub fn spawn_scroller<H: SpecialHandlers + ?Sized>(
        &self,
        handlers: &mut H,
        line: usize,
        index: usize,
    ) -> bool {
        match self.behaviors.spawn_scroller {
            Some(flavor) => {
                handlers.spawn_scroller(flavor, line, index);
                true
            }
            None => false,
        }
    }

    pub fn spawn_friction<H: SpecialHandlers + ?Sized>(&self, handlers: &mut H, line: usize) -> bool {
        match self.behaviors.spawn_friction {
            Some(flavor) => {
                handlers.spawn_friction(flavor, line);
                true
            }
            None => false,
        }
    }

    pub fn spawn_pusher<H: SpecialHandlers + ?Sized>(&self, handlers: &mut H, line: usize) -> bool {
        match self.behaviors.spawn_pusher {
            Some(flavor) => {
                handlers.spawn_pusher(flavor, line);
                true
            }
            None => false,
        }
    }

    pub fn spawn_extra<H: SpecialHandlers + ?Sized>(
        &self,
        handlers: &mut H,
        line: usize,
        index: usize,
    ) -> bool {
        match self.behaviors.spawn_extra {
            Some(flavor) => {
                handlers.spawn_extra(flavor, line, index);
                true
            }
            None => false,
        }
    }

    pub fn cross_special_line<H: SpecialHandlers + ?Sized>(
        &self,
        handlers: &mut H,
        crossing: LineCrossing,
    ) -> bool {
        match self.behaviors.cross_special_line {
            Some(flavor) => {
                handlers.cross_special_line(flavor, crossing);
                true
            }
            None => false,
        }
    }
}
