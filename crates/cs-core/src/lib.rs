//! cs-core: domain model, typed IDs, errors, configuration, and the pure
//! rules shared by the channel-server persistence layer.
//!
//! This crate has no storage dependency. It describes accounts, creatures
//! (characters, pets, partners) and everything they own, plus the
//! collaborator traits the loader calls into while assembling them.

pub mod account;
pub mod collections;
pub mod config;
pub mod creature;
pub mod error;
pub mod hooks;
pub mod ids;
pub mod inventory;
pub mod item;
pub mod privilege;
pub mod vitals;

// Re-export the most commonly used items at the crate root.
pub use account::Account;
pub use creature::{Creature, CreatureKind};
pub use error::{Error, Result};
pub use ids::*;
pub use item::Item;
