//! Per-creature child collections: items, skills, titles and keywords.
//!
//! Every collection is keyed by creature id and saved with replace-all
//! semantics: delete the creature's rows, insert the in-memory set, commit.
//! [`replace_children`] does both inside one transaction so no reader ever
//! sees the empty intermediate state.

use cs_core::collections::Skill;
use cs_core::{CreatureId, Error, Item, Result};
use rusqlite::{Connection, Row, Statement};

use crate::models::{item_from_row, skill_from_row, KeywordRow, TitleRow};

/// A row type stored in a per-creature child table.
pub trait ChildRow: Sized {
    /// Table name, for logging.
    const TABLE: &'static str;
    /// Select all rows for `?1 = creature_id`.
    const SELECT: &'static str;
    /// Delete all rows for `?1 = creature_id`.
    const DELETE: &'static str;
    /// Insert one row; parameter layout is up to [`ChildRow::insert`].
    const INSERT: &'static str;

    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    fn insert(&self, stmt: &mut Statement, creature_id: CreatureId) -> rusqlite::Result<usize>;
}

/// Read every row of `T` owned by `creature_id`.
pub fn load_children<T: ChildRow>(conn: &Connection, creature_id: CreatureId) -> Result<Vec<T>> {
    let mut stmt = conn.prepare_cached(T::SELECT).map_err(Error::database)?;
    let rows = stmt
        .query_map([creature_id.get()], T::from_row)
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;
    Ok(rows)
}

/// Atomically replace the stored set of `T` for `creature_id` with `rows`.
///
/// Runs in its own transaction; on error nothing is committed and the
/// previous set stays visible. Returns the number of rows inserted.
pub fn replace_children<'a, T, I>(conn: &Connection, creature_id: CreatureId, rows: I) -> Result<usize>
where
    T: ChildRow + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let tx = conn.unchecked_transaction().map_err(Error::database)?;

    tx.execute(T::DELETE, [creature_id.get()])
        .map_err(Error::database)?;

    let mut inserted = 0;
    {
        let mut stmt = tx.prepare_cached(T::INSERT).map_err(Error::database)?;
        for row in rows {
            row.insert(&mut stmt, creature_id).map_err(Error::database)?;
            inserted += 1;
        }
    }

    tx.commit().map_err(Error::database)?;
    tracing::debug!(table = T::TABLE, creature_id = %creature_id, rows = inserted, "Replaced child rows");
    Ok(inserted)
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

impl ChildRow for Item {
    const TABLE: &'static str = "items";
    const SELECT: &'static str = "SELECT entity_id, item_id, pocket, x, y, color1, color2, color3,
            price, sell_price, amount, linked_pocket, state,
            durability, durability_max, durability_original,
            attack_min, attack_max, balance, critical, defense, protection,
            effective_range, attack_speed, experience, extra
         FROM items WHERE creature_id = ?1 ORDER BY entity_id";
    const DELETE: &'static str = "DELETE FROM items WHERE creature_id = ?1";
    const INSERT: &'static str = "INSERT INTO items (entity_id, creature_id, item_id, pocket, x, y,
            color1, color2, color3, price, sell_price, amount, linked_pocket, state,
            durability, durability_max, durability_original,
            attack_min, attack_max, balance, critical, defense, protection,
            effective_range, attack_speed, experience, extra)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,
                 ?21,?22,?23,?24,?25,?26,?27)";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        item_from_row(row)
    }

    fn insert(&self, stmt: &mut Statement, creature_id: CreatureId) -> rusqlite::Result<usize> {
        // Session-local ids are left NULL so the store assigns a permanent one.
        let entity_id = (!self.entity_id.is_temporary_item()).then(|| self.entity_id.get());
        let info = &self.info;
        let opt = &self.options;
        stmt.execute(rusqlite::params![
            entity_id,
            creature_id.get(),
            info.item_id,
            info.pocket.0,
            info.x,
            info.y,
            info.color1,
            info.color2,
            info.color3,
            opt.price,
            opt.sell_price,
            info.amount,
            opt.linked_pocket,
            info.state,
            opt.durability,
            opt.durability_max,
            opt.durability_original,
            opt.attack_min,
            opt.attack_max,
            opt.balance,
            opt.critical,
            opt.defense,
            opt.protection,
            opt.effective_range,
            opt.attack_speed,
            opt.experience,
            self.extra,
        ])
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

impl ChildRow for Skill {
    const TABLE: &'static str = "skills";
    const SELECT: &'static str =
        "SELECT skill_id, rank, exp FROM skills WHERE creature_id = ?1 ORDER BY skill_id";
    const DELETE: &'static str = "DELETE FROM skills WHERE creature_id = ?1";
    const INSERT: &'static str =
        "INSERT INTO skills (creature_id, skill_id, rank, exp) VALUES (?1, ?2, ?3, ?4)";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        skill_from_row(row)
    }

    fn insert(&self, stmt: &mut Statement, creature_id: CreatureId) -> rusqlite::Result<usize> {
        stmt.execute(rusqlite::params![
            creature_id.get(),
            self.id,
            self.rank.0,
            self.experience
        ])
    }
}

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

impl ChildRow for TitleRow {
    const TABLE: &'static str = "titles";
    const SELECT: &'static str =
        "SELECT title_id, usable FROM titles WHERE creature_id = ?1 ORDER BY title_id";
    const DELETE: &'static str = "DELETE FROM titles WHERE creature_id = ?1";
    const INSERT: &'static str =
        "INSERT INTO titles (creature_id, title_id, usable) VALUES (?1, ?2, ?3)";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        TitleRow::from_row(row)
    }

    fn insert(&self, stmt: &mut Statement, creature_id: CreatureId) -> rusqlite::Result<usize> {
        stmt.execute(rusqlite::params![creature_id.get(), self.title_id, self.usable])
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

impl ChildRow for KeywordRow {
    const TABLE: &'static str = "keywords";
    const SELECT: &'static str =
        "SELECT keyword_id FROM keywords WHERE creature_id = ?1 ORDER BY keyword_id";
    const DELETE: &'static str = "DELETE FROM keywords WHERE creature_id = ?1";
    const INSERT: &'static str = "INSERT INTO keywords (creature_id, keyword_id) VALUES (?1, ?2)";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        KeywordRow::from_row(row)
    }

    fn insert(&self, stmt: &mut Statement, creature_id: CreatureId) -> rusqlite::Result<usize> {
        stmt.execute(rusqlite::params![creature_id.get(), self.0])
    }
}
