//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use cs_core::{Error, Result};
use rusqlite::Connection;

/// V1: initial schema -- accounts, the shared creature table, the three
/// ownership tables and the per-creature child collections.
const V1_INITIAL: &str = r#"
-- Accounts
CREATE TABLE accounts (
    account_id     TEXT PRIMARY KEY,
    session_key    INTEGER NOT NULL DEFAULT 0,
    authority      INTEGER NOT NULL DEFAULT 0,
    last_login     TEXT,
    ban_reason     TEXT,
    ban_expiration TEXT
);

-- Shared creature row joined by characters, pets and partners
CREATE TABLE creatures (
    creature_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    server         TEXT NOT NULL DEFAULT '',
    race           INTEGER NOT NULL DEFAULT 0,
    deletion_time  TEXT,
    skin_color     INTEGER NOT NULL DEFAULT 0,
    eye_type       INTEGER NOT NULL DEFAULT 0,
    eye_color      INTEGER NOT NULL DEFAULT 0,
    mouth_type     INTEGER NOT NULL DEFAULT 0,
    height         REAL NOT NULL DEFAULT 1.0,
    weight         REAL NOT NULL DEFAULT 1.0,
    upper          REAL NOT NULL DEFAULT 1.0,
    lower          INTEGER NOT NULL DEFAULT 1,
    color1         INTEGER NOT NULL DEFAULT 0,
    color2         INTEGER NOT NULL DEFAULT 0,
    color3         INTEGER NOT NULL DEFAULT 0,
    region         INTEGER NOT NULL DEFAULT 0,
    x              INTEGER NOT NULL DEFAULT 0,
    y              INTEGER NOT NULL DEFAULT 0,
    direction      INTEGER NOT NULL DEFAULT 0,
    weapon_set     INTEGER NOT NULL DEFAULT 0,
    level          INTEGER NOT NULL DEFAULT 1,
    level_total    INTEGER NOT NULL DEFAULT 0,
    exp            INTEGER NOT NULL DEFAULT 0,
    ap             INTEGER NOT NULL DEFAULT 0,
    age            INTEGER NOT NULL DEFAULT 10,
    life_max       REAL NOT NULL DEFAULT 10.0,
    mana_max       REAL NOT NULL DEFAULT 10.0,
    stamina_max    REAL NOT NULL DEFAULT 10.0,
    life_food      REAL NOT NULL DEFAULT 0.0,
    mana_food      REAL NOT NULL DEFAULT 0.0,
    stamina_food   REAL NOT NULL DEFAULT 0.0,
    life_delta     REAL NOT NULL DEFAULT 0.0,
    mana_delta     REAL NOT NULL DEFAULT 0.0,
    stamina_delta  REAL NOT NULL DEFAULT 0.0,
    injuries       REAL NOT NULL DEFAULT 0.0,
    hunger         REAL NOT NULL DEFAULT 0.0,
    str_base       REAL NOT NULL DEFAULT 10.0,
    dex_base       REAL NOT NULL DEFAULT 10.0,
    int_base       REAL NOT NULL DEFAULT 10.0,
    will_base      REAL NOT NULL DEFAULT 10.0,
    luck_base      REAL NOT NULL DEFAULT 10.0,
    str_food       REAL NOT NULL DEFAULT 0.0,
    dex_food       REAL NOT NULL DEFAULT 0.0,
    int_food       REAL NOT NULL DEFAULT 0.0,
    will_food      REAL NOT NULL DEFAULT 0.0,
    luck_food      REAL NOT NULL DEFAULT 0.0,
    title          INTEGER NOT NULL DEFAULT 0,
    option_title   INTEGER NOT NULL DEFAULT 0
);

-- Ownership: each creature row belongs to exactly one of these
CREATE TABLE characters (
    entity_id   INTEGER PRIMARY KEY,
    account_id  TEXT NOT NULL REFERENCES accounts(account_id) ON DELETE CASCADE,
    creature_id INTEGER NOT NULL UNIQUE REFERENCES creatures(creature_id) ON DELETE CASCADE
);

CREATE TABLE pets (
    entity_id   INTEGER PRIMARY KEY,
    account_id  TEXT NOT NULL REFERENCES accounts(account_id) ON DELETE CASCADE,
    creature_id INTEGER NOT NULL UNIQUE REFERENCES creatures(creature_id) ON DELETE CASCADE
);

CREATE TABLE partners (
    entity_id   INTEGER PRIMARY KEY,
    account_id  TEXT NOT NULL REFERENCES accounts(account_id) ON DELETE CASCADE,
    creature_id INTEGER NOT NULL UNIQUE REFERENCES creatures(creature_id) ON DELETE CASCADE
);

-- Child collections, replaced wholesale on save
CREATE TABLE items (
    entity_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    creature_id         INTEGER NOT NULL REFERENCES creatures(creature_id) ON DELETE CASCADE,
    item_id             INTEGER NOT NULL,
    pocket              INTEGER NOT NULL,
    x                   INTEGER NOT NULL DEFAULT 0,
    y                   INTEGER NOT NULL DEFAULT 0,
    color1              INTEGER NOT NULL DEFAULT 0,
    color2              INTEGER NOT NULL DEFAULT 0,
    color3              INTEGER NOT NULL DEFAULT 0,
    price               INTEGER NOT NULL DEFAULT 0,
    sell_price          INTEGER NOT NULL DEFAULT 0,
    amount              INTEGER NOT NULL DEFAULT 1,
    linked_pocket       INTEGER NOT NULL DEFAULT 0,
    state               INTEGER NOT NULL DEFAULT 0,
    durability          INTEGER NOT NULL DEFAULT 0,
    durability_max      INTEGER NOT NULL DEFAULT 0,
    durability_original INTEGER NOT NULL DEFAULT 0,
    attack_min          INTEGER NOT NULL DEFAULT 0,
    attack_max          INTEGER NOT NULL DEFAULT 0,
    balance             INTEGER NOT NULL DEFAULT 0,
    critical            INTEGER NOT NULL DEFAULT 0,
    defense             INTEGER NOT NULL DEFAULT 0,
    protection          INTEGER NOT NULL DEFAULT 0,
    effective_range     INTEGER NOT NULL DEFAULT 0,
    attack_speed        INTEGER NOT NULL DEFAULT 0,
    experience          INTEGER NOT NULL DEFAULT 0,
    extra               TEXT NOT NULL DEFAULT ''
);

CREATE TABLE keywords (
    creature_id INTEGER NOT NULL REFERENCES creatures(creature_id) ON DELETE CASCADE,
    keyword_id  INTEGER NOT NULL,
    PRIMARY KEY (creature_id, keyword_id)
);

CREATE TABLE titles (
    creature_id INTEGER NOT NULL REFERENCES creatures(creature_id) ON DELETE CASCADE,
    title_id    INTEGER NOT NULL,
    usable      INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (creature_id, title_id)
);

CREATE TABLE skills (
    creature_id INTEGER NOT NULL REFERENCES creatures(creature_id) ON DELETE CASCADE,
    skill_id    INTEGER NOT NULL,
    rank        INTEGER NOT NULL DEFAULT 0,
    exp         INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (creature_id, skill_id)
);
"#;

/// V2: lookup indexes for the per-account and per-creature queries.
const V2_INDEXES: &str = r#"
CREATE INDEX idx_characters_account ON characters(account_id);
CREATE INDEX idx_pets_account       ON pets(account_id);
CREATE INDEX idx_partners_account   ON partners(account_id);
CREATE INDEX idx_items_creature     ON items(creature_id);
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_INITIAL), (2, V2_INDEXES)];

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(Error::database)?;

    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(Error::database)?;

        if already {
            continue;
        }

        let tx = conn.unchecked_transaction().map_err(Error::database)?;

        tx.execute_batch(sql)
            .map_err(|e| Error::database(format!("Migration V{version} failed: {e}")))?;

        tx.execute("INSERT INTO schema_migrations (version) VALUES (?1)", [version])
            .map_err(Error::database)?;

        tx.commit().map_err(Error::database)?;
        tracing::info!(version, "Applied migration");
    }

    Ok(())
}

/// Highest applied migration version, or 0 on an empty database.
pub fn current_version(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(Error::database)
}
