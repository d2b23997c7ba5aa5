//! A creature's inventory and the validating insert used while loading.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::item::{Item, Pocket};

/// Active weapon set selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponSet(pub u8);

impl WeaponSet {
    pub const FIRST: WeaponSet = WeaponSet(0);
    pub const SECOND: WeaponSet = WeaponSet(1);
}

/// Why an item could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("item {0} is already in the inventory")]
    DuplicateEntity(EntityId),
    #[error("pocket {0} is not a valid item pocket")]
    UnknownPocket(u8),
    #[error("slot ({x}, {y}) in pocket {pocket} is already occupied")]
    Occupied { pocket: u8, x: i32, y: i32 },
    #[error("position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },
}

/// Decides whether an item may be inserted into an inventory.
///
/// Slot rules depend on static item data the persistence layer does not
/// own, so the check is supplied by the caller.
pub trait PlacementPolicy: Send + Sync {
    fn check(&self, inventory: &Inventory, item: &Item) -> Result<(), PlacementError>;
}

/// Cell-based placement: one item per (pocket, x, y), known pockets only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPlacement;

impl PlacementPolicy for GridPlacement {
    fn check(&self, inventory: &Inventory, item: &Item) -> Result<(), PlacementError> {
        let info = &item.info;
        if inventory.contains(item.entity_id) {
            return Err(PlacementError::DuplicateEntity(item.entity_id));
        }
        if !info.pocket.is_known() {
            return Err(PlacementError::UnknownPocket(info.pocket.0));
        }
        if info.x < 0 || info.y < 0 {
            return Err(PlacementError::OutOfBounds {
                x: info.x,
                y: info.y,
            });
        }
        if inventory.item_at(info.pocket, info.x, info.y).is_some() {
            return Err(PlacementError::Occupied {
                pocket: info.pocket.0,
                x: info.x,
                y: info.y,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub weapon_set: WeaponSet,
    items: Vec<Item>,
}

impl Inventory {
    /// Insert `item` if `policy` accepts it, handing it back otherwise.
    pub fn init_add(
        &mut self,
        item: Item,
        policy: &dyn PlacementPolicy,
    ) -> Result<(), (Item, PlacementError)> {
        match policy.check(self, &item) {
            Ok(()) => {
                self.items.push(item);
                Ok(())
            }
            Err(e) => Err((item, e)),
        }
    }

    /// Insert without validation. Used by the live session, which has
    /// already placed the item.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove(&mut self, entity_id: EntityId) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.entity_id == entity_id)?;
        Some(self.items.remove(idx))
    }

    pub fn contains(&self, entity_id: EntityId) -> bool {
        self.items.iter().any(|i| i.entity_id == entity_id)
    }

    pub fn get(&self, entity_id: EntityId) -> Option<&Item> {
        self.items.iter().find(|i| i.entity_id == entity_id)
    }

    pub fn item_at(&self, pocket: Pocket, x: i32, y: i32) -> Option<&Item> {
        self.items
            .iter()
            .find(|i| i.info.pocket == pocket && i.info.x == x && i.info.y == y)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
