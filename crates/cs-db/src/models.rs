//! Row mappings between tables and domain types.
//!
//! Every column is read at its exact domain width; a stored value that
//! does not fit (say, 300 in a `u8` column) fails the read instead of being
//! truncated.

use chrono::{DateTime, Utc};
use cs_core::collections::{Skill, SkillRank, TitleState};
use cs_core::creature::{Appearance, Attribute, Attributes, Position};
use cs_core::inventory::WeaponSet;
use cs_core::item::{ItemInfo, ItemOptions, Pocket};
use cs_core::vitals::{Vital, VitalDeltas, Vitals};
use cs_core::{Account, AccountId, Creature, CreatureId, CreatureKind, EntityId, Item};
use rusqlite::types::Type;
use rusqlite::Row;

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

/// Parse an optional RFC 3339 timestamp from a text column.
fn parse_opt_time(row: &Row, col: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let s: Option<String> = row.get(col)?;
    match s {
        Some(v) => {
            let idx = row.as_ref().column_index(col)?;
            let t = DateTime::parse_from_rfc3339(&v)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))?;
            Ok(Some(t.with_timezone(&Utc)))
        }
        None => Ok(None),
    }
}

/// Format a timestamp for storage.
pub fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339()
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Build an account (without creatures) from a row selected as:
/// account_id, session_key, authority, last_login, ban_reason, ban_expiration
pub fn account_from_row(row: &Row) -> rusqlite::Result<Account> {
    let id: String = row.get("account_id")?;
    let mut account = Account::new(AccountId::new(id));
    account.session_key = row.get("session_key")?;
    account.authority = row.get("authority")?;
    account.last_login = parse_opt_time(row, "last_login")?;
    account.ban_reason = row.get("ban_reason")?;
    account.ban_expiration = parse_opt_time(row, "ban_expiration")?;
    Ok(account)
}

// ---------------------------------------------------------------------------
// Creature
// ---------------------------------------------------------------------------

/// The scalar part of a creature plus the stored values that are not part
/// of the domain model: vital deltas and the two selected-title slots.
#[derive(Debug, Clone)]
pub struct CreatureRow {
    pub creature: Creature,
    pub deltas: VitalDeltas,
    /// Selected title; 0 means none.
    pub title: u16,
    /// Selected option title; 0 means none.
    pub option_title: u16,
}

impl CreatureRow {
    /// Build from the ownership/creature join (see `queries::creatures`).
    pub fn from_row(row: &Row, kind: CreatureKind) -> rusqlite::Result<Self> {
        let mut c = Creature::new(
            EntityId::from(row.get::<_, i64>("entity_id")?),
            CreatureId::from(row.get::<_, i64>("creature_id")?),
            kind,
            row.get::<_, String>("name")?,
        );
        c.server = row.get("server")?;
        c.race = row.get("race")?;
        c.deletion_time = parse_opt_time(row, "deletion_time")?;
        c.age = row.get("age")?;

        c.appearance = Appearance {
            skin_color: row.get("skin_color")?,
            eye_type: row.get("eye_type")?,
            eye_color: row.get("eye_color")?,
            mouth_type: row.get("mouth_type")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            upper: row.get("upper")?,
            lower: row.get("lower")?,
            color1: row.get("color1")?,
            color2: row.get("color2")?,
            color3: row.get("color3")?,
        };
        c.position = Position {
            region: row.get("region")?,
            x: row.get("x")?,
            y: row.get("y")?,
            direction: row.get("direction")?,
        };
        c.inventory.weapon_set = WeaponSet(row.get("weapon_set")?);

        c.level = row.get("level")?;
        c.level_total = row.get("level_total")?;
        c.exp = row.get("exp")?;
        c.ability_points = row.get("ap")?;

        // Current values stay at max until the loader reconciles deltas.
        c.vitals = Vitals {
            life: Vital::new(row.get("life_max")?, row.get("life_food")?),
            mana: Vital::new(row.get("mana_max")?, row.get("mana_food")?),
            stamina: Vital::new(row.get("stamina_max")?, row.get("stamina_food")?),
        };
        c.injuries = row.get("injuries")?;
        c.hunger = row.get("hunger")?;

        c.attributes = Attributes {
            strength: Attribute {
                base: row.get("str_base")?,
                food_mod: row.get("str_food")?,
            },
            dexterity: Attribute {
                base: row.get("dex_base")?,
                food_mod: row.get("dex_food")?,
            },
            intelligence: Attribute {
                base: row.get("int_base")?,
                food_mod: row.get("int_food")?,
            },
            will: Attribute {
                base: row.get("will_base")?,
                food_mod: row.get("will_food")?,
            },
            luck: Attribute {
                base: row.get("luck_base")?,
                food_mod: row.get("luck_food")?,
            },
        };

        Ok(Self {
            creature: c,
            deltas: VitalDeltas {
                life: row.get("life_delta")?,
                mana: row.get("mana_delta")?,
                stamina: row.get("stamina_delta")?,
            },
            title: row.get("title")?,
            option_title: row.get("option_title")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

pub fn item_from_row(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        entity_id: EntityId::from(row.get::<_, i64>("entity_id")?),
        info: ItemInfo {
            item_id: row.get("item_id")?,
            pocket: Pocket(row.get("pocket")?),
            x: row.get("x")?,
            y: row.get("y")?,
            color1: row.get("color1")?,
            color2: row.get("color2")?,
            color3: row.get("color3")?,
            amount: row.get("amount")?,
            state: row.get("state")?,
        },
        options: ItemOptions {
            price: row.get("price")?,
            sell_price: row.get("sell_price")?,
            linked_pocket: row.get("linked_pocket")?,
            durability: row.get("durability")?,
            durability_max: row.get("durability_max")?,
            durability_original: row.get("durability_original")?,
            attack_min: row.get("attack_min")?,
            attack_max: row.get("attack_max")?,
            balance: row.get("balance")?,
            critical: row.get("critical")?,
            defense: row.get("defense")?,
            protection: row.get("protection")?,
            effective_range: row.get("effective_range")?,
            attack_speed: row.get("attack_speed")?,
            experience: row.get("experience")?,
        },
        extra: row.get("extra")?,
    })
}

// ---------------------------------------------------------------------------
// Skill / Title / Keyword
// ---------------------------------------------------------------------------

/// Build from a row selected as: skill_id, rank, exp
pub fn skill_from_row(row: &Row) -> rusqlite::Result<Skill> {
    Ok(Skill {
        id: row.get(0)?,
        rank: SkillRank(row.get(1)?),
        experience: row.get(2)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleRow {
    pub title_id: u16,
    pub usable: bool,
}

impl TitleRow {
    pub fn new(title_id: u16, state: TitleState) -> Self {
        Self {
            title_id,
            usable: state.is_usable(),
        }
    }

    pub fn state(&self) -> TitleState {
        TitleState::from_usable(self.usable)
    }

    /// Build from a row selected as: title_id, usable
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            title_id: row.get(0)?,
            usable: row.get(1)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRow(pub u16);

impl KeywordRow {
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self(row.get(0)?))
    }
}
