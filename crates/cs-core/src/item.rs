//! Items owned by a creature.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// Inventory pocket an item sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pocket(pub u8);

impl Pocket {
    pub const NONE: Pocket = Pocket(0);
    pub const CURSOR: Pocket = Pocket(1);
    pub const INVENTORY: Pocket = Pocket(2);
    pub const FACE: Pocket = Pocket(3);
    pub const HAIR: Pocket = Pocket(4);
    pub const ARMOR: Pocket = Pocket(5);
    pub const GLOVE: Pocket = Pocket(7);
    pub const SHOE: Pocket = Pocket(8);
    pub const HEAD: Pocket = Pocket(9);
    pub const ROBE: Pocket = Pocket(10);
    pub const RIGHT_HAND_1: Pocket = Pocket(11);
    pub const RIGHT_HAND_2: Pocket = Pocket(12);
    pub const LEFT_HAND_1: Pocket = Pocket(13);
    pub const LEFT_HAND_2: Pocket = Pocket(14);
    pub const MAGAZINE_1: Pocket = Pocket(15);
    pub const MAGAZINE_2: Pocket = Pocket(16);
    pub const ACCESSORY_1: Pocket = Pocket(17);
    pub const ACCESSORY_2: Pocket = Pocket(18);
    pub const TRADE: Pocket = Pocket(19);
    pub const TEMPORARY: Pocket = Pocket(20);

    /// True for pockets a stored item may legitimately occupy.
    #[must_use]
    pub fn is_known(self) -> bool {
        (Self::CURSOR.0..=Self::TEMPORARY.0).contains(&self.0) && self.0 != 6
    }
}

/// Placement, appearance and stack data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Template id in the static item table.
    pub item_id: i32,
    pub pocket: Pocket,
    pub x: i32,
    pub y: i32,
    pub color1: u32,
    pub color2: u32,
    pub color3: u32,
    pub amount: u16,
    pub state: u8,
}

/// Trade, durability and combat values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemOptions {
    pub price: i32,
    pub sell_price: i32,
    pub linked_pocket: u8,
    pub durability: i32,
    pub durability_max: i32,
    pub durability_original: i32,
    pub attack_min: u16,
    pub attack_max: u16,
    pub balance: u8,
    pub critical: u8,
    pub defense: i32,
    pub protection: i16,
    pub effective_range: i16,
    pub attack_speed: u8,
    /// Bonus experience.
    pub experience: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub entity_id: EntityId,
    pub info: ItemInfo,
    pub options: ItemOptions,
    /// Free-form extra data, persisted verbatim.
    pub extra: String,
}

impl Item {
    pub fn new(entity_id: EntityId, item_id: i32) -> Self {
        Self {
            entity_id,
            info: ItemInfo {
                item_id,
                amount: 1,
                ..ItemInfo::default()
            },
            options: ItemOptions::default(),
            extra: String::new(),
        }
    }

    /// Builder-style placement helper.
    #[must_use]
    pub fn at(mut self, pocket: Pocket, x: i32, y: i32) -> Self {
        self.info.pocket = pocket;
        self.info.x = x;
        self.info.y = y;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_defaults() {
        let item = Item::new(EntityId::from(1), 40001);
        assert_eq!(item.info.item_id, 40001);
        assert_eq!(item.info.amount, 1);
        assert_eq!(item.info.pocket, Pocket::NONE);
        assert!(item.extra.is_empty());
    }

    #[test]
    fn at_sets_placement() {
        let item = Item::new(EntityId::from(1), 2).at(Pocket::INVENTORY, 3, 4);
        assert_eq!(item.info.pocket, Pocket::INVENTORY);
        assert_eq!((item.info.x, item.info.y), (3, 4));
    }

    #[test]
    fn known_pockets() {
        assert!(Pocket::INVENTORY.is_known());
        assert!(Pocket::TEMPORARY.is_known());
        assert!(!Pocket::NONE.is_known());
        assert!(!Pocket(6).is_known());
        assert!(!Pocket(200).is_known());
    }
}
