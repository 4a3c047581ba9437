//! Invitee address model
//!
//! An address is the string a user types into an invite dialog. It is
//! either a chat-account identifier (leading `@`, same form as
//! [`UserId`]) or a third-party contact identifier (an email address)
//! that the room-creation collaborator resolves on its side.

use crate::identifiers::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of an invitee address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    /// Chat-account identifier (`@user:server`)
    Account,
    /// Third-party contact identifier (email)
    Email,
}

impl AddressKind {
    /// Short label for logging and picker filtering
    pub fn label(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Email => "email",
        }
    }
}

/// A classified invitee address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    kind: AddressKind,
    raw: String,
}

impl Address {
    /// Classify a raw address string.
    ///
    /// Returns `None` when the string is neither an account identifier
    /// nor a plausible email; the address picker uses this to reject
    /// entries before the invite flow ever sees them.
    pub fn classify(raw: &str) -> Option<Self> {
        let kind = if raw.len() > 1 && raw.starts_with('@') {
            AddressKind::Account
        } else if is_email_like(raw) {
            AddressKind::Email
        } else {
            return None;
        };
        Some(Self {
            kind,
            raw: raw.to_string(),
        })
    }

    /// Build an account address from an already-typed user id
    pub fn from_user_id(user_id: &UserId) -> Self {
        Self {
            kind: AddressKind::Account,
            raw: user_id.as_str().to_string(),
        }
    }

    /// The address kind
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// The raw address string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The account identifier, when this is an account address
    pub fn user_id(&self) -> Option<UserId> {
        match self.kind {
            AddressKind::Account => Some(UserId::new(self.raw.clone())),
            AddressKind::Email => None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A single `@` with a non-empty local part and a dotted domain.
fn is_email_like(raw: &str) -> bool {
    let mut parts = raw.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}
