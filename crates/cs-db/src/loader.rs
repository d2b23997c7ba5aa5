//! Assembling a full creature from its rows.
//!
//! Order matters here:
//! 1. scalar columns, then the defaults hook;
//! 2. child collections (items go through the placement check);
//! 3. the baseline skill (always at Novice) and authority-granted titles;
//! 4. title selection, which needs the titles to be present;
//! 5. current vitals, last, once every maximum and modifier is final.

use cs_core::collections::{Skill, SkillRank, SKILL_GATHERING};
use cs_core::hooks::LoadHooks;
use cs_core::{privilege, Creature, CreatureKind, EntityId, Item, Result};
use rusqlite::Connection;

use crate::models::{CreatureRow, KeywordRow, TitleRow};
use crate::queries::children::load_children;
use crate::queries::creatures;

/// Load one creature with everything it owns.
///
/// Returns `Ok(None)` if the ownership row for `entity_id` in `kind`'s table
/// or its creature row is missing. `authority` is the owning account's
/// authority level and only drives privilege titles.
pub fn load_creature(
    conn: &Connection,
    hooks: &LoadHooks,
    kind: CreatureKind,
    entity_id: EntityId,
    authority: u8,
) -> Result<Option<Creature>> {
    let Some(row) = creatures::get_creature(conn, kind, entity_id)? else {
        return Ok(None);
    };
    let CreatureRow {
        mut creature,
        deltas,
        title,
        option_title,
    } = row;

    hooks.defaults.apply_defaults(&mut creature);

    load_items(conn, hooks, &mut creature)?;

    for KeywordRow(id) in load_children::<KeywordRow>(conn, creature.creature_id)? {
        creature.keywords.add(id);
    }

    // Reserved ids only ever come from authority, even if a row slipped in.
    for t in load_children::<TitleRow>(conn, creature.creature_id)? {
        if privilege::is_reserved(t.title_id) {
            tracing::warn!(
                entity_id = %creature.entity_id,
                title_id = t.title_id,
                "Ignoring stored reserved title"
            );
            continue;
        }
        creature.titles.add(t.title_id, t.state());
    }

    for skill in load_children::<Skill>(conn, creature.creature_id)? {
        creature.skills.add(skill);
    }
    creature
        .skills
        .add(Skill::new(SKILL_GATHERING, SkillRank::NOVICE));

    for (id, state) in privilege::granted_titles(authority) {
        creature.titles.add(id, state);
    }

    select_title(&mut creature, title, false);
    select_title(&mut creature, option_title, true);

    creature.vitals.reconcile(deltas);

    tracing::debug!(
        entity_id = %creature.entity_id,
        creature_id = %creature.creature_id,
        kind = %kind,
        items = creature.inventory.len(),
        skills = creature.skills.len(),
        titles = creature.titles.len(),
        "Loaded creature"
    );
    Ok(Some(creature))
}

/// Insert stored items through the placement policy. Rejected items are
/// logged and dropped; they never fail the load.
fn load_items(conn: &Connection, hooks: &LoadHooks, creature: &mut Creature) -> Result<()> {
    for item in load_children::<Item>(conn, creature.creature_id)? {
        if let Err((item, reason)) = creature.inventory.init_add(item, hooks.placement.as_ref()) {
            tracing::warn!(
                entity_id = %creature.entity_id,
                item_entity_id = %item.entity_id,
                item_id = item.info.item_id,
                error = %reason,
                "Unable to add item to inventory, dropping it"
            );
        }
    }
    Ok(())
}

/// Apply a stored selected-title slot. 0 means nothing is selected.
fn select_title(creature: &mut Creature, title_id: u16, option: bool) {
    if title_id == 0 {
        return;
    }
    if !creature.titles.change_title(title_id, option) {
        tracing::warn!(
            entity_id = %creature.entity_id,
            title_id,
            option,
            "Stored title selection is not a usable title, ignoring"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use cs_core::collections::TitleState;
    use cs_core::hooks::CreatureInitializer;
    use cs_core::inventory::GridPlacement;
    use std::sync::Arc;

    fn seed(conn: &Connection) {
        conn.execute_batch(
            "INSERT INTO accounts (account_id) VALUES ('alice');
             INSERT INTO creatures (creature_id, name, life_max, life_delta, mana_max,
                 mana_delta, stamina_max, stamina_delta, title, option_title)
             VALUES (1, 'Hero', 100.0, 25.0, 40.0, 0.0, 60.0, 60.0, 7, 8);
             INSERT INTO characters (entity_id, account_id, creature_id) VALUES (100, 'alice', 1);
             INSERT INTO titles (creature_id, title_id, usable) VALUES (1, 7, 1), (1, 8, 0);
             INSERT INTO keywords (creature_id, keyword_id) VALUES (1, 3);",
        )
        .unwrap();
    }

    fn load(conn: &Connection, hooks: &LoadHooks, authority: u8) -> Creature {
        load_creature(conn, hooks, CreatureKind::Character, EntityId::from(100), authority)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn missing_is_none() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let got = load_creature(
            &conn,
            &LoadHooks::default(),
            CreatureKind::Character,
            EntityId::from(1),
            0,
        )
        .unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn vitals_are_max_minus_delta() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let c = load(&conn, &LoadHooks::default(), 0);
        assert_eq!(c.vitals.life.current, 75.0);
        assert_eq!(c.vitals.mana.current, 40.0);
        assert_eq!(c.vitals.stamina.current, 0.0);
    }

    #[test]
    fn selection_needs_usable_title() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let c = load(&conn, &LoadHooks::default(), 0);
        assert_eq!(c.titles.selected(), Some(7));
        // Title 8 is only known, so the option slot stays empty.
        assert_eq!(c.titles.selected_option(), None);
        assert_eq!(c.titles.state(8), Some(TitleState::Known));
        assert!(c.keywords.contains(3));
    }

    #[test]
    fn baseline_skill_is_added() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let c = load(&conn, &LoadHooks::default(), 0);
        assert_eq!(c.skills.len(), 1);
        assert_eq!(c.skills.get(SKILL_GATHERING).unwrap().rank, SkillRank::NOVICE);
    }

    #[test]
    fn baseline_skill_overrides_stored_rank() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        conn.execute(
            "INSERT INTO skills (creature_id, skill_id, rank, exp) VALUES (1, ?1, 15, 10)",
            [SKILL_GATHERING],
        )
        .unwrap();
        let c = load(&conn, &LoadHooks::default(), 0);
        assert_eq!(c.skills.len(), 1);
        assert_eq!(c.skills.get(SKILL_GATHERING).unwrap().rank, SkillRank::NOVICE);
    }

    #[test]
    fn stored_reserved_titles_are_ignored() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        conn.execute_batch(
            "INSERT INTO titles (creature_id, title_id, usable) VALUES (1, 60002, 1), (1, 60000, 1);",
        )
        .unwrap();

        let c = load(&conn, &LoadHooks::default(), 0);
        assert!(!c.titles.contains(privilege::TITLE_DEV_DOG));
        assert!(!c.titles.contains(privilege::TITLE_GM));
        assert_eq!(c.titles.len(), 2);

        let gm = load(&conn, &LoadHooks::default(), 50);
        assert_eq!(gm.titles.state(privilege::TITLE_GM), Some(TitleState::Usable));
        assert!(!gm.titles.contains(privilege::TITLE_DEV_DOG));
    }

    #[test]
    fn privilege_titles_follow_authority() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let hooks = LoadHooks::default();
        assert_eq!(load(&conn, &hooks, 10).titles.len(), 2);
        let gm = load(&conn, &hooks, 50);
        assert_eq!(gm.titles.len(), 3);
        assert_eq!(gm.titles.state(privilege::TITLE_GM), Some(TitleState::Usable));
        assert_eq!(load(&conn, &hooks, 99).titles.len(), 5);
    }

    struct FoodBuff;

    impl CreatureInitializer for FoodBuff {
        fn apply_defaults(&self, creature: &mut Creature) {
            creature.vitals.life.food_mod = 20.0;
        }
    }

    #[test]
    fn vitals_use_modifiers_set_by_defaults() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let hooks = LoadHooks::new(Arc::new(FoodBuff), Arc::new(GridPlacement));
        let c = load(&conn, &hooks, 0);
        assert_eq!(c.vitals.life.max(), 120.0);
        assert_eq!(c.vitals.life.current, 95.0);
    }

    #[test]
    fn rejected_item_is_dropped() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        conn.execute_batch(
            "INSERT INTO items (entity_id, creature_id, item_id, pocket, x, y) VALUES
                (1, 1, 100, 2, 0, 0),
                (2, 1, 101, 2, 0, 0),
                (3, 1, 102, 2, 1, 0);",
        )
        .unwrap();
        let c = load(&conn, &LoadHooks::default(), 0);
        assert_eq!(c.inventory.len(), 2);
        assert!(c.inventory.contains(EntityId::from(1)));
        assert!(!c.inventory.contains(EntityId::from(2)));
        assert!(c.inventory.contains(EntityId::from(3)));
    }
}
