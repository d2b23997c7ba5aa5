//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB and an
//! [`AccountRepository`] over it, plus helpers that seed the rows a
//! character-creation flow would normally write.

#![allow(dead_code)]

use cs_core::hooks::LoadHooks;
use cs_core::{CreatureId, CreatureKind, EntityId};
use cs_db::pool::{init_memory_pool, DbPool, PooledConnection};
use cs_db::AccountRepository;

/// Test harness wrapping a repository backed by an in-memory database.
pub struct TestHarness {
    pub db: DbPool,
    pub repo: AccountRepository,
}

impl TestHarness {
    /// Create a new harness with default load hooks.
    pub fn new() -> Self {
        Self::with_hooks(LoadHooks::default())
    }

    pub fn with_hooks(hooks: LoadHooks) -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let repo = AccountRepository::new(db.clone(), hooks);
        Self { db, repo }
    }

    pub fn conn(&self) -> PooledConnection {
        self.db.get().expect("failed to get connection")
    }

    pub fn create_account(&self, id: &str, authority: u8) {
        self.conn()
            .execute(
                "INSERT INTO accounts (account_id, session_key, authority) VALUES (?1, ?2, ?3)",
                rusqlite::params![id, 0x1234_5678_i64, authority],
            )
            .unwrap();
    }

    /// Insert a creature row with non-trivial stats and link it to the
    /// account through `kind`'s ownership table.
    pub fn create_creature(
        &self,
        account: &str,
        kind: CreatureKind,
        entity_id: i64,
        name: &str,
    ) -> CreatureId {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO creatures (name, server, race, skin_color, eye_type, eye_color,
                mouth_type, height, weight, upper, lower, color1, color2, color3,
                region, x, y, direction, weapon_set, level, level_total, exp, ap, age,
                life_max, mana_max, stamina_max, life_food, mana_food, stamina_food,
                life_delta, mana_delta, stamina_delta, injuries, hunger,
                str_base, dex_base, int_base, will_base, luck_base,
                str_food, dex_food, int_food, will_food, luck_food)
             VALUES (?1, 'Nao', 10002, 15, 3, 47, 2, 1.1, 0.9, 1.05, 1, 2155905152, 8421504, 255,
                1, 12999, 38321, 211, 1, 27, 310, 123456789012, 12, 17,
                93.3, 41.7, 58.1, 2.5, 0.0, 1.25,
                12.7, 0.0, 8.3, 1.5, 20.0,
                32.0, 28.5, 19.0, 24.0, 7.5,
                0.5, 0.0, 0.0, 1.0, 0.0)",
            [name],
        )
        .unwrap();
        let creature_id = CreatureId::from(conn.last_insert_rowid());
        link(&conn, kind, entity_id, account, creature_id);
        creature_id
    }

    /// Insert an ownership row pointing at a creature that does not exist.
    pub fn create_dangling(&self, account: &str, kind: CreatureKind, entity_id: i64) {
        let conn = self.conn();
        conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        link(&conn, kind, entity_id, account, CreatureId::from(9_999_999));
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    }

    pub fn add_item(&self, creature: CreatureId, entity_id: i64, item_id: i32, pocket: u8, x: i32, y: i32) {
        self.conn()
            .execute(
                "INSERT INTO items (entity_id, creature_id, item_id, pocket, x, y, color1,
                    durability, durability_max, durability_original, attack_min, attack_max,
                    extra)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 16777215, 9000, 10000, 10000, 3, 9, '')",
                rusqlite::params![entity_id, creature.get(), item_id, pocket, x, y],
            )
            .unwrap();
    }

    pub fn add_skill(&self, creature: CreatureId, skill_id: u16, rank: u8, exp: i32) {
        self.conn()
            .execute(
                "INSERT INTO skills (creature_id, skill_id, rank, exp) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![creature.get(), skill_id, rank, exp],
            )
            .unwrap();
    }

    pub fn add_title(&self, creature: CreatureId, title_id: u16, usable: bool) {
        self.conn()
            .execute(
                "INSERT INTO titles (creature_id, title_id, usable) VALUES (?1, ?2, ?3)",
                rusqlite::params![creature.get(), title_id, usable],
            )
            .unwrap();
    }

    pub fn add_keyword(&self, creature: CreatureId, keyword_id: u16) {
        self.conn()
            .execute(
                "INSERT INTO keywords (creature_id, keyword_id) VALUES (?1, ?2)",
                rusqlite::params![creature.get(), keyword_id],
            )
            .unwrap();
    }

    pub fn set_selected_titles(&self, creature: CreatureId, title: u16, option_title: u16) {
        self.conn()
            .execute(
                "UPDATE creatures SET title = ?1, option_title = ?2 WHERE creature_id = ?3",
                rusqlite::params![title, option_title, creature.get()],
            )
            .unwrap();
    }

    /// Run a single-value query.
    pub fn scalar<T: rusqlite::types::FromSql>(&self, sql: &str) -> T {
        self.conn().query_row(sql, [], |r| r.get(0)).unwrap()
    }

    pub fn load_character(&self, entity_id: i64, authority: u8) -> cs_core::Creature {
        self.repo
            .load_creature(CreatureKind::Character, EntityId::from(entity_id), authority)
            .unwrap()
            .expect("character should exist")
    }
}

fn link(
    conn: &rusqlite::Connection,
    kind: CreatureKind,
    entity_id: i64,
    account: &str,
    creature_id: CreatureId,
) {
    let sql = match kind {
        CreatureKind::Character => {
            "INSERT INTO characters (entity_id, account_id, creature_id) VALUES (?1, ?2, ?3)"
        }
        CreatureKind::Pet => "INSERT INTO pets (entity_id, account_id, creature_id) VALUES (?1, ?2, ?3)",
        CreatureKind::Partner => {
            "INSERT INTO partners (entity_id, account_id, creature_id) VALUES (?1, ?2, ?3)"
        }
    };
    conn.execute(sql, rusqlite::params![entity_id, account, creature_id.get()])
        .unwrap();
}

/// Float comparison for values that went through a delta round trip.
pub fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "{a} != {b}");
}
