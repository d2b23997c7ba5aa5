//! The shared `creatures` row and its join with the ownership tables.

use cs_core::{Creature, CreatureKind, EntityId, Error, Result};
use rusqlite::Connection;

use crate::models::CreatureRow;

/// Ownership/creature join for one subtype table.
macro_rules! creature_select {
    ($table:literal) => {
        concat!(
            "SELECT o.entity_id, cr.creature_id, cr.name, cr.server, cr.race, cr.deletion_time,
                cr.skin_color, cr.eye_type, cr.eye_color, cr.mouth_type,
                cr.height, cr.weight, cr.upper, cr.lower, cr.color1, cr.color2, cr.color3,
                cr.region, cr.x, cr.y, cr.direction, cr.weapon_set,
                cr.level, cr.level_total, cr.exp, cr.ap, cr.age,
                cr.life_max, cr.mana_max, cr.stamina_max,
                cr.life_food, cr.mana_food, cr.stamina_food,
                cr.life_delta, cr.mana_delta, cr.stamina_delta,
                cr.injuries, cr.hunger,
                cr.str_base, cr.dex_base, cr.int_base, cr.will_base, cr.luck_base,
                cr.str_food, cr.dex_food, cr.int_food, cr.will_food, cr.luck_food,
                cr.title, cr.option_title
             FROM ",
            $table,
            " AS o INNER JOIN creatures AS cr ON o.creature_id = cr.creature_id
             WHERE o.entity_id = ?1"
        )
    };
}

const SELECT_CHARACTER: &str = creature_select!("characters");
const SELECT_PET: &str = creature_select!("pets");
const SELECT_PARTNER: &str = creature_select!("partners");

fn select_sql(kind: CreatureKind) -> &'static str {
    match kind {
        CreatureKind::Character => SELECT_CHARACTER,
        CreatureKind::Pet => SELECT_PET,
        CreatureKind::Partner => SELECT_PARTNER,
    }
}

/// Load the scalar part of a creature. Returns `None` if either the
/// ownership row or the creature row is missing.
pub fn get_creature(
    conn: &Connection,
    kind: CreatureKind,
    entity_id: EntityId,
) -> Result<Option<CreatureRow>> {
    let result = conn.query_row(select_sql(kind), [entity_id.get()], |row| {
        CreatureRow::from_row(row, kind)
    });
    match result {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e)),
    }
}

/// Write every mutable scalar of `creature` to its existing creature row.
///
/// Vitals are stored as deltas. Creation-time fields (name, server, race,
/// colours, age) are left alone, and no row is ever inserted. Returns false
/// if the creature row does not exist.
pub fn update_creature(conn: &Connection, creature: &Creature) -> Result<bool> {
    let deltas = creature.vitals.deltas();
    let vitals = &creature.vitals;
    let attrs = &creature.attributes;
    let app = &creature.appearance;
    let pos = &creature.position;

    let n = conn
        .execute(
            "UPDATE creatures SET
                height = :height, weight = :weight, upper = :upper, lower = :lower,
                region = :region, x = :x, y = :y, direction = :direction,
                life_delta = :life_delta, life_max = :life_max, life_food = :life_food,
                mana_delta = :mana_delta, mana_max = :mana_max, mana_food = :mana_food,
                stamina_delta = :stamina_delta, stamina_max = :stamina_max,
                stamina_food = :stamina_food,
                injuries = :injuries, hunger = :hunger,
                level = :level, level_total = :level_total, exp = :exp, ap = :ap,
                str_base = :str_base, dex_base = :dex_base, int_base = :int_base,
                will_base = :will_base, luck_base = :luck_base,
                str_food = :str_food, dex_food = :dex_food, int_food = :int_food,
                will_food = :will_food, luck_food = :luck_food,
                weapon_set = :weapon_set,
                title = :title, option_title = :option_title
             WHERE creature_id = :creature_id",
            rusqlite::named_params! {
                ":height": app.height,
                ":weight": app.weight,
                ":upper": app.upper,
                ":lower": app.lower,
                ":region": pos.region,
                ":x": pos.x,
                ":y": pos.y,
                ":direction": pos.direction,
                ":life_delta": deltas.life,
                ":life_max": vitals.life.max_base,
                ":life_food": vitals.life.food_mod,
                ":mana_delta": deltas.mana,
                ":mana_max": vitals.mana.max_base,
                ":mana_food": vitals.mana.food_mod,
                ":stamina_delta": deltas.stamina,
                ":stamina_max": vitals.stamina.max_base,
                ":stamina_food": vitals.stamina.food_mod,
                ":injuries": creature.injuries,
                ":hunger": creature.hunger,
                ":level": creature.level,
                ":level_total": creature.level_total,
                ":exp": creature.exp,
                ":ap": creature.ability_points,
                ":str_base": attrs.strength.base,
                ":dex_base": attrs.dexterity.base,
                ":int_base": attrs.intelligence.base,
                ":will_base": attrs.will.base,
                ":luck_base": attrs.luck.base,
                ":str_food": attrs.strength.food_mod,
                ":dex_food": attrs.dexterity.food_mod,
                ":int_food": attrs.intelligence.food_mod,
                ":will_food": attrs.will.food_mod,
                ":luck_food": attrs.luck.food_mod,
                ":weapon_set": creature.inventory.weapon_set.0,
                ":title": creature.titles.selected().unwrap_or(0),
                ":option_title": creature.titles.selected_option().unwrap_or(0),
                ":creature_id": creature.creature_id.get(),
            },
        )
        .map_err(Error::database)?;
    Ok(n > 0)
}
