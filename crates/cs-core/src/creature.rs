//! The creature aggregate: one character, pet or partner with everything
//! it owns.
//!
//! Field widths mirror the storage columns exactly. Combat and appearance
//! code downstream depends on these types, so nothing is widened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collections::{KeywordSet, SkillSet, TitleSet};
use crate::ids::{CreatureId, EntityId};
use crate::inventory::Inventory;
use crate::vitals::Vitals;

/// Which subtype table a creature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    Character,
    Pet,
    Partner,
}

impl CreatureKind {
    pub const ALL: [CreatureKind; 3] = [
        CreatureKind::Character,
        CreatureKind::Pet,
        CreatureKind::Partner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CreatureKind::Character => "character",
            CreatureKind::Pet => "pet",
            CreatureKind::Partner => "partner",
        }
    }

    /// Pets and partners share the account's pet list.
    pub fn is_pet_like(self) -> bool {
        !matches!(self, CreatureKind::Character)
    }
}

impl std::fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Appearance {
    pub skin_color: u8,
    pub eye_type: u8,
    pub eye_color: u8,
    pub mouth_type: u8,
    pub height: f32,
    pub weight: f32,
    pub upper: f32,
    pub lower: i32,
    pub color1: u32,
    pub color2: u32,
    pub color3: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub region: i32,
    pub x: i32,
    pub y: i32,
    pub direction: u8,
}

/// A core attribute: stored base plus food modifier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attribute {
    pub base: f32,
    pub food_mod: f32,
}

impl Attribute {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            food_mod: 0.0,
        }
    }

    pub fn total(&self) -> f32 {
        self.base + self.food_mod
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: Attribute,
    pub dexterity: Attribute,
    pub intelligence: Attribute,
    pub will: Attribute,
    pub luck: Attribute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub entity_id: EntityId,
    pub creature_id: CreatureId,
    pub kind: CreatureKind,

    // Set at creation; read but never rewritten by a save.
    pub name: String,
    pub server: String,
    pub race: i32,
    pub deletion_time: Option<DateTime<Utc>>,
    pub age: i16,

    pub appearance: Appearance,
    pub position: Position,
    pub vitals: Vitals,
    pub injuries: f32,
    pub hunger: f32,
    pub attributes: Attributes,

    pub level: i16,
    pub level_total: i32,
    pub exp: i64,
    pub ability_points: i16,

    pub inventory: Inventory,
    pub skills: SkillSet,
    pub titles: TitleSet,
    pub keywords: KeywordSet,

    /// Set by the owning session when this creature must be written on the
    /// next account save.
    #[serde(skip)]
    pub dirty: bool,
}

impl Creature {
    pub fn new(
        entity_id: EntityId,
        creature_id: CreatureId,
        kind: CreatureKind,
        name: impl Into<String>,
    ) -> Self {
        Self {
            entity_id,
            creature_id,
            kind,
            name: name.into(),
            server: String::new(),
            race: 0,
            deletion_time: None,
            age: 0,
            appearance: Appearance::default(),
            position: Position::default(),
            vitals: Vitals::default(),
            injuries: 0.0,
            hunger: 0.0,
            attributes: Attributes::default(),
            level: 1,
            level_total: 0,
            exp: 0,
            ability_points: 0,
            inventory: Inventory::default(),
            skills: SkillSet::default(),
            titles: TitleSet::default(),
            keywords: KeywordSet::default(),
            dirty: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True if the character is scheduled for deletion at `now`.
    pub fn is_deleted(&self, now: DateTime<Utc>) -> bool {
        self.deletion_time.is_some_and(|t| t <= now)
    }
}
