//! Accounts and the creatures they own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::ids::AccountId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Never rewritten by a save.
    pub id: AccountId,
    /// Set once at login by the login server; never rewritten by a save.
    pub session_key: i64,
    pub authority: u8,
    pub last_login: Option<DateTime<Utc>>,
    pub ban_reason: Option<String>,
    pub ban_expiration: Option<DateTime<Utc>>,

    pub characters: Vec<Creature>,
    /// Pets and partners.
    pub pets: Vec<Creature>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            session_key: 0,
            authority: 0,
            last_login: None,
            ban_reason: None,
            ban_expiration: None,
            characters: Vec::new(),
            pets: Vec::new(),
        }
    }

    /// True while a ban is in effect at `now`.
    pub fn is_banned(&self, now: DateTime<Utc>) -> bool {
        self.ban_expiration.is_some_and(|until| until > now)
    }

    /// All owned creatures, characters first.
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.characters.iter().chain(self.pets.iter())
    }

    pub fn creatures_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.characters.iter_mut().chain(self.pets.iter_mut())
    }
}
