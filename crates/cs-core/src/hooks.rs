//! Collaborators invoked while a creature is assembled.

use std::sync::Arc;

use crate::creature::Creature;
use crate::inventory::{GridPlacement, PlacementPolicy};

/// Post-load initializer, run right after the scalar columns are mapped
/// and before any derived value is computed.
pub trait CreatureInitializer: Send + Sync {
    fn apply_defaults(&self, creature: &mut Creature);
}

/// Initializer that leaves the creature untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl CreatureInitializer for NoDefaults {
    fn apply_defaults(&self, _creature: &mut Creature) {}
}

/// Everything the loader calls out to.
#[derive(Clone)]
pub struct LoadHooks {
    pub defaults: Arc<dyn CreatureInitializer>,
    pub placement: Arc<dyn PlacementPolicy>,
}

impl LoadHooks {
    pub fn new(
        defaults: Arc<dyn CreatureInitializer>,
        placement: Arc<dyn PlacementPolicy>,
    ) -> Self {
        Self {
            defaults,
            placement,
        }
    }
}

impl Default for LoadHooks {
    fn default() -> Self {
        Self {
            defaults: Arc::new(NoDefaults),
            placement: Arc::new(GridPlacement),
        }
    }
}

impl std::fmt::Debug for LoadHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadHooks").finish_non_exhaustive()
    }
}
