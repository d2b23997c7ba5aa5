//! Flushing a creature back to its rows.
//!
//! The scalar update and each child collection are separate commit units.
//! A failure partway leaves earlier units committed; later ones are not
//! attempted and the error goes to the caller.

use cs_core::{privilege, Creature, Error, Result};
use rusqlite::Connection;

use crate::models::{KeywordRow, TitleRow};
use crate::queries::children::replace_children;
use crate::queries::creatures;

/// Write `creature` over its existing rows.
///
/// The creature row must already exist; a missing row is reported as
/// [`Error::Internal`] and nothing else is written.
pub fn save_creature(conn: &Connection, creature: &Creature) -> Result<()> {
    if !creatures::update_creature(conn, creature)? {
        return Err(Error::Internal(format!(
            "creature row {} for entity {} does not exist",
            creature.creature_id, creature.entity_id
        )));
    }

    let id = creature.creature_id;
    replace_children(conn, id, creature.inventory.items())?;

    let keywords: Vec<KeywordRow> = creature.keywords.iter().map(KeywordRow).collect();
    replace_children(conn, id, &keywords)?;

    replace_children(conn, id, &persistent_titles(creature))?;

    replace_children(conn, id, creature.skills.iter())?;

    tracing::debug!(
        entity_id = %creature.entity_id,
        creature_id = %id,
        kind = %creature.kind,
        "Saved creature"
    );
    Ok(())
}

/// Titles to store: everything except the runtime-granted ones.
fn persistent_titles(creature: &Creature) -> Vec<TitleRow> {
    creature
        .titles
        .iter()
        .filter(|(id, _)| !privilege::is_reserved(*id))
        .map(|(id, state)| TitleRow::new(id, state))
        .collect()
}
