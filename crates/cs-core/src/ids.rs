//! Typed ID wrappers providing compile-time safety for entity identifiers.
//!
//! Entity and creature IDs are both 64-bit integers in storage, so mixing
//! them up is easy. Each gets its own newtype; `AccountId` wraps the
//! account's login name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a newtype ID wrapper over `i64`.
///
/// The macro produces a struct with:
/// - `from_raw()` and `get()` converting to and from the raw storage value
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`, `Serialize`, `Deserialize`
/// - `Display` and `FromStr` delegating to the inner integer
/// - `From<i64>` and `Into<i64>` conversions
macro_rules! typed_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                /// Wrap a raw storage value.
                #[must_use]
                pub const fn from_raw(raw: i64) -> Self {
                    Self(raw)
                }

                /// Return the raw storage value.
                #[must_use]
                pub const fn get(self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:#018x}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    match s.strip_prefix("0x") {
                        Some(hex) => i64::from_str_radix(hex, 16).map(Self),
                        None => s.parse().map(Self),
                    }
                }
            }

            impl From<i64> for $name {
                fn from(raw: i64) -> Self {
                    Self(raw)
                }
            }

            impl From<$name> for i64 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

typed_id! {
    /// Globally unique identifier of a live entity (character, pet, item).
    EntityId,
    /// Identifier of the shared `creatures` row joined by every creature subtype.
    CreatureId,
}

impl EntityId {
    /// First entity id of the temporary item range.
    ///
    /// Items created in memory during a session get ids from this range;
    /// they are replaced by store-assigned ids on save.
    pub const TMP_ITEMS: EntityId = EntityId::from_raw(0x0050_F000_0000_0000);

    /// True if this id is a session-local item id that must not be persisted.
    #[must_use]
    pub const fn is_temporary_item(self) -> bool {
        self.0 >= Self::TMP_ITEMS.0
    }
}

/// Account identifier (the login name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
