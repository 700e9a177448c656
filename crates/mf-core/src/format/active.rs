//! The published map format for the current level
//!
//! The loader builds a complete [`MapFormat`] off to the side and swaps it in
//! with [`ActiveFormat::publish`]. Readers take an `Arc` snapshot and never see
//! a half-built format.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::{MapFormat, apply_map_format};
use crate::game::GameMode;
use crate::mobj::MobjTable;

#[derive(Debug)]
pub struct ActiveFormat {
    current: RwLock<Arc<MapFormat>>,
}

impl ActiveFormat {
    pub fn new(format: MapFormat) -> Self {
        Self {
            current: RwLock::new(Arc::new(format)),
        }
    }

    /// Snapshot of the format in effect.
    pub fn current(&self) -> Arc<MapFormat> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the format in effect, returning the previous one.
    pub fn publish(&self, format: MapFormat) -> Arc<MapFormat> {
        let next = Arc::new(format);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!(family = %next.family, game = %next.game, "map format published");
        std::mem::replace(&mut *guard, next)
    }

    /// Level-load entry point: resolve, migrate `mobjinfo`, then publish.
    pub fn load_level(&self, game: GameMode, mobjinfo: &mut MobjTable) -> Arc<MapFormat> {
        let format = apply_map_format(game, mobjinfo);
        self.publish(format);
        self.current()
    }
}

impl Default for ActiveFormat {
    fn default() -> Self {
        Self::new(super::resolve(GameMode::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{MapFamily, resolve};

    #[test]
    fn test_default_is_doom() {
        let active = ActiveFormat::default();
        assert_eq!(active.current().family, MapFamily::Doom);
    }

    #[test]
    fn test_snapshot_survives_publish() {
        let active = ActiveFormat::new(resolve(GameMode::Doom));
        let before = active.current();
        let previous = active.publish(resolve(GameMode::Hexen));

        assert_eq!(before.family, MapFamily::Doom);
        assert_eq!(previous.family, MapFamily::Doom);
        assert_eq!(active.current().family, MapFamily::Hexen);
    }

    #[test]
    fn test_load_level_replaces_whole_format() {
        let active = ActiveFormat::default();
        let mut table = MobjTable::doom();

        let hexen = active.load_level(GameMode::Hexen, &mut table);
        assert_eq!(*hexen, resolve(GameMode::Hexen));

        let heretic = active.load_level(GameMode::Heretic, &mut table);
        assert_eq!(*heretic, resolve(GameMode::Heretic));
        assert_eq!(table, MobjTable::doom());
    }

    #[test]
    fn test_readers_on_other_threads() {
        let active = Arc::new(ActiveFormat::new(resolve(GameMode::Heretic)));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let active = Arc::clone(&active);
                std::thread::spawn(move || active.current().family)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), MapFamily::Heretic);
        }
    }
}
