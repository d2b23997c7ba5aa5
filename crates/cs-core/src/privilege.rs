//! Titles derived from account authority.
//!
//! Privilege titles are granted on every load from the account's authority
//! level and are never written back. The guild title is in the same boat:
//! it is handed out at runtime and must not reach storage.

use crate::collections::TitleState;

/// Authority level at which the GM title is granted.
pub const GM_AUTHORITY: u8 = 50;
/// Authority level at which the developer titles are granted.
pub const DEV_AUTHORITY: u8 = 99;

/// GM title.
pub const TITLE_GM: u16 = 60000;
/// First developer title.
pub const TITLE_DEV_CAT: u16 = 60001;
/// Second developer title.
pub const TITLE_DEV_DOG: u16 = 60002;
/// Guild title, assigned by the guild system at runtime.
pub const TITLE_GUILD: u16 = 50000;

/// Title ids that must never be persisted.
pub const RESERVED_TITLES: [u16; 4] = [TITLE_GM, TITLE_DEV_CAT, TITLE_DEV_DOG, TITLE_GUILD];

/// Titles granted purely by authority, all usable.
pub fn granted_titles(authority: u8) -> Vec<(u16, TitleState)> {
    let mut titles = Vec::new();
    if authority >= GM_AUTHORITY {
        titles.push((TITLE_GM, TitleState::Usable));
    }
    if authority >= DEV_AUTHORITY {
        titles.push((TITLE_DEV_CAT, TitleState::Usable));
        titles.push((TITLE_DEV_DOG, TitleState::Usable));
    }
    titles
}

/// True if `title_id` is computed at runtime and must be stripped on save.
#[must_use]
pub fn is_reserved(title_id: u16) -> bool {
    RESERVED_TITLES.contains(&title_id)
}
