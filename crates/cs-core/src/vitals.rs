//! Life, mana and stamina.
//!
//! Storage never holds a current vital. It holds the base maximum, the food
//! modifier and the *delta* (`max - current`). Current values are rebuilt
//! from those after every load, once all modifiers are in place, so a
//! change to the maximum keeps the same amount "missing".

use serde::{Deserialize, Serialize};

/// One vital stat in its in-memory form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vital {
    /// Base maximum as stored.
    pub max_base: f32,
    /// Food modifier added on top of the base maximum.
    pub food_mod: f32,
    /// Current value. Derived on load, never stored directly.
    pub current: f32,
}

impl Vital {
    pub fn new(max_base: f32, food_mod: f32) -> Self {
        Self {
            max_base,
            food_mod,
            current: max_base + food_mod,
        }
    }

    /// Effective maximum.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max_base + self.food_mod
    }

    /// Value written to storage: how far below the maximum `current` is.
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.max() - self.current
    }

    /// Rebuild `current` from a stored delta against the current maximum.
    ///
    /// The result never drops below 0. A negative delta (an overfull vital)
    /// is kept, so every delta down to `-max` round-trips through
    /// [`Vital::delta`] modulo float rounding.
    pub fn restore(&mut self, delta: f32) {
        self.current = (self.max() - delta).max(0.0);
    }
}

/// The three vitals of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vitals {
    pub life: Vital,
    pub mana: Vital,
    pub stamina: Vital,
}

/// Stored deltas for all three vitals, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VitalDeltas {
    pub life: f32,
    pub mana: f32,
    pub stamina: f32,
}

impl Vitals {
    /// Recompute every current value from stored deltas.
    pub fn reconcile(&mut self, deltas: VitalDeltas) {
        self.life.restore(deltas.life);
        self.mana.restore(deltas.mana);
        self.stamina.restore(deltas.stamina);
    }

    /// Deltas to persist for the current in-memory state.
    #[must_use]
    pub fn deltas(&self) -> VitalDeltas {
        VitalDeltas {
            life: self.life.delta(),
            mana: self.mana.delta(),
            stamina: self.stamina.delta(),
        }
    }
}
