//! Account row reads and updates.

use cs_core::{Account, AccountId, CreatureKind, EntityId, Error, Result};
use rusqlite::Connection;

use crate::models::{account_from_row, format_time};

/// Get an account row by id. Owned creatures are not loaded.
pub fn get_account(conn: &Connection, id: &AccountId) -> Result<Option<Account>> {
    let result = conn.query_row(
        "SELECT account_id, session_key, authority, last_login, ban_reason, ban_expiration
         FROM accounts WHERE account_id = ?1",
        [id.as_str()],
        account_from_row,
    );
    match result {
        Ok(a) => Ok(Some(a)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e)),
    }
}

/// Entity ids of every creature of `kind` owned by the account.
pub fn list_owned(conn: &Connection, id: &AccountId, kind: CreatureKind) -> Result<Vec<EntityId>> {
    let sql = match kind {
        CreatureKind::Character => {
            "SELECT entity_id FROM characters WHERE account_id = ?1 ORDER BY entity_id"
        }
        CreatureKind::Pet => "SELECT entity_id FROM pets WHERE account_id = ?1 ORDER BY entity_id",
        CreatureKind::Partner => {
            "SELECT entity_id FROM partners WHERE account_id = ?1 ORDER BY entity_id"
        }
    };
    let mut stmt = conn.prepare(sql).map_err(Error::database)?;
    let rows = stmt
        .query_map([id.as_str()], |row| row.get::<_, i64>(0).map(EntityId::from))
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;
    Ok(rows)
}

/// Update the mutable account fields. The id and session key are never
/// written. Returns false if no such account exists.
pub fn update_account(conn: &Connection, account: &Account) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE accounts SET authority = ?1, last_login = ?2, ban_reason = ?3,
                ban_expiration = ?4
             WHERE account_id = ?5",
            rusqlite::params![
                account.authority,
                account.last_login.as_ref().map(format_time),
                account.ban_reason,
                account.ban_expiration.as_ref().map(format_time),
                account.id.as_str(),
            ],
        )
        .map_err(Error::database)?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use chrono::{TimeZone, Utc};

    fn seed(conn: &Connection) {
        conn.execute_batch(
            "INSERT INTO accounts (account_id, session_key, authority) VALUES ('alice', 77, 1);
             INSERT INTO creatures (creature_id, name) VALUES (1, 'A'), (2, 'B'), (3, 'C');
             INSERT INTO characters (entity_id, account_id, creature_id) VALUES (20, 'alice', 2), (10, 'alice', 1);
             INSERT INTO partners (entity_id, account_id, creature_id) VALUES (30, 'alice', 3);",
        )
        .unwrap();
    }

    #[test]
    fn get_missing_is_none() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        assert!(get_account(&conn, &AccountId::new("nobody")).unwrap().is_none());
    }

    #[test]
    fn get_maps_fields() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let acc = get_account(&conn, &AccountId::new("alice")).unwrap().unwrap();
        assert_eq!(acc.session_key, 77);
        assert_eq!(acc.authority, 1);
        assert!(acc.last_login.is_none());
        assert!(acc.characters.is_empty());
    }

    #[test]
    fn list_owned_per_kind() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let id = AccountId::new("alice");
        assert_eq!(
            list_owned(&conn, &id, CreatureKind::Character).unwrap(),
            vec![EntityId::from(10), EntityId::from(20)]
        );
        assert!(list_owned(&conn, &id, CreatureKind::Pet).unwrap().is_empty());
        assert_eq!(
            list_owned(&conn, &id, CreatureKind::Partner).unwrap(),
            vec![EntityId::from(30)]
        );
    }

    #[test]
    fn update_leaves_session_key() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        seed(&conn);
        let id = AccountId::new("alice");
        let mut acc = get_account(&conn, &id).unwrap().unwrap();
        acc.session_key = 12345;
        acc.authority = 50;
        acc.last_login = Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        acc.ban_reason = Some("botting".into());
        assert!(update_account(&conn, &acc).unwrap());

        let back = get_account(&conn, &id).unwrap().unwrap();
        assert_eq!(back.session_key, 77);
        assert_eq!(back.authority, 50);
        assert_eq!(back.last_login, acc.last_login);
        assert_eq!(back.ban_reason.as_deref(), Some("botting"));
    }

    #[test]
    fn update_missing_returns_false() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        assert!(!update_account(&conn, &Account::new("ghost")).unwrap());
    }
}
