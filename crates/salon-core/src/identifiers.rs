//! Core identifier types used across the Salon client
//!
//! Each identifier is an opaque string handle carrying a leading sigil
//! (`!` room, `#` alias, `@` user, `+` group, `$` event). `FromStr`
//! checks the sigil and nothing more: these are UI-layer handles, not a
//! protocol grammar.

use crate::errors::SalonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! string_identifier {
    ($(#[$doc:meta])* $name:ident, $sigil:literal, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier string without validating it.
            ///
            /// The caller is responsible for providing a well-formed id;
            /// use `FromStr` when the string comes from outside.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The sigil this identifier kind carries
            pub const fn sigil() -> char {
                $sigil
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = SalonError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.len() > 1 && s.starts_with($sigil) {
                    Ok(Self(s.to_string()))
                } else {
                    Err(SalonError::invalid(format!(
                        concat!("not a ", $label, " ('{}' sigil expected): {}"),
                        $sigil, s
                    )))
                }
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_identifier! {
    /// Room identifier
    ///
    /// Uniquely names a room for the lifetime of the session. Rooms are
    /// handed out by the client SDK; `generate` exists for bridge
    /// implementations that mint local rooms.
    RoomId, '!', "room id"
}

string_identifier! {
    /// Human-readable room alias, resolvable to a [`RoomId`] through the
    /// client bridge (suspending, may fail).
    RoomAlias, '#', "room alias"
}

string_identifier! {
    /// Chat-account identifier for a user
    UserId, '@', "user id"
}

string_identifier! {
    /// Identifier of a room grouping ("community"); names the set of
    /// rooms a grid view shows.
    GroupId, '+', "group id"
}

string_identifier! {
    /// Identifier of a single event within a room
    EventId, '$', "event id"
}

impl RoomId {
    /// Mint a fresh local room id
    pub fn generate() -> Self {
        Self(format!("!{}", Uuid::new_v4().simple()))
    }
}

impl EventId {
    /// Mint a fresh local event id
    pub fn generate() -> Self {
        Self(format!("${}", Uuid::new_v4().simple()))
    }
}
