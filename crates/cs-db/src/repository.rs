//! Account-level load and save.

use cs_core::hooks::LoadHooks;
use cs_core::{Account, AccountId, Creature, CreatureKind, EntityId, Error, Result};

use crate::pool::{get_conn, DbPool};
use crate::queries::accounts;
use crate::{loader, saver};

/// Loads and saves accounts together with their characters, pets and
/// partners.
///
/// Each logical operation checks out its own pooled connection: one for
/// the account rows, one per creature load, one per creature save. No
/// connection is held across a whole account save.
#[derive(Clone)]
pub struct AccountRepository {
    pool: DbPool,
    hooks: LoadHooks,
}

impl std::fmt::Debug for AccountRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("AccountRepository")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish_non_exhaustive()
    }
}

impl AccountRepository {
    pub fn new(pool: DbPool, hooks: LoadHooks) -> Self {
        Self { pool, hooks }
    }

    /// Repository with no-op defaults and grid item placement.
    pub fn with_default_hooks(pool: DbPool) -> Self {
        Self::new(pool, LoadHooks::default())
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Load an account with every creature it owns, or `None` if there is
    /// no such account.
    ///
    /// Owned rows whose creature is missing or has rows that do not map are
    /// skipped; one broken creature never fails the whole account. Other
    /// store errors still propagate.
    pub fn load_account(&self, id: &AccountId) -> Result<Option<Account>> {
        let (mut account, owned) = {
            let conn = get_conn(&self.pool)?;
            let Some(account) = accounts::get_account(&conn, id)? else {
                return Ok(None);
            };
            let mut owned = Vec::new();
            for kind in CreatureKind::ALL {
                for entity_id in accounts::list_owned(&conn, id, kind)? {
                    owned.push((kind, entity_id));
                }
            }
            (account, owned)
        };

        for (kind, entity_id) in owned {
            let creature = match self.load_creature(kind, entity_id, account.authority) {
                Ok(Some(creature)) => creature,
                Ok(None) => {
                    tracing::warn!(
                        account_id = %id,
                        entity_id = %entity_id,
                        kind = %kind,
                        "Owned creature not found, skipping"
                    );
                    continue;
                }
                Err(e) if is_row_mapping_error(&e) => {
                    tracing::warn!(
                        account_id = %id,
                        entity_id = %entity_id,
                        kind = %kind,
                        error = %e,
                        "Owned creature has unreadable rows, skipping"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            if kind.is_pet_like() {
                account.pets.push(creature);
            } else {
                account.characters.push(creature);
            }
        }

        tracing::info!(
            account_id = %id,
            characters = account.characters.len(),
            pets = account.pets.len(),
            "Loaded account"
        );
        Ok(Some(account))
    }

    /// Load a single creature on its own connection.
    pub fn load_creature(
        &self,
        kind: CreatureKind,
        entity_id: EntityId,
        authority: u8,
    ) -> Result<Option<Creature>> {
        let conn = get_conn(&self.pool)?;
        loader::load_creature(&conn, &self.hooks, kind, entity_id, authority)
    }

    /// Save the mutable account fields, then every creature flagged dirty.
    ///
    /// Creatures without the flag are not touched at all.
    pub fn save_account(&self, account: &Account) -> Result<()> {
        {
            let conn = get_conn(&self.pool)?;
            if !accounts::update_account(&conn, account)? {
                tracing::warn!(account_id = %account.id, "Account row missing on save");
            }
        }

        let mut saved = 0usize;
        for creature in account.creatures().filter(|c| c.dirty) {
            self.save_creature(creature)?;
            saved += 1;
        }

        tracing::info!(account_id = %account.id, saved, "Saved account");
        Ok(())
    }

    /// Save a single creature on its own connection.
    pub fn save_creature(&self, creature: &Creature) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        saver::save_creature(&conn, creature)
    }
}

/// True if `err` comes from a stored value that does not fit its column
/// type, as opposed to a connection or constraint failure.
fn is_row_mapping_error(err: &Error) -> bool {
    let Error::Database { source } = err else {
        return false;
    };
    matches!(
        source.downcast_ref::<rusqlite::Error>(),
        Some(
            rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::IntegralValueOutOfRange(..)
                | rusqlite::Error::InvalidColumnType(..)
        )
    )
}
