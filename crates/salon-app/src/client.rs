//! # ClientBridge: Abstract Chat-Client Operations
//!
//! This module defines the [`ClientBridge`] trait, which abstracts the
//! chat-client SDK operations the application core consumes (alias
//! resolution, room creation, invites, the direct-message and group
//! indexes). Keeping the SDK behind a trait keeps `salon-app` a pure
//! application core; frontends hand in whatever implementation their
//! SDK provides.

use async_trait::async_trait;
use salon_core::{Address, GroupId, RoomAlias, RoomId, SalonError, UserId};
use std::sync::Arc;

/// The current user's own membership in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Membership {
    /// Not a member
    #[default]
    None,
    /// Invited but not joined
    Invited,
    /// Joined
    Joined,
}

/// Configuration for creating a room.
///
/// A room is either a plain room or a direct chat seeded with exactly
/// one invitee: an account identifier or a third-party address the SDK
/// resolves on its side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRoomConfig {
    /// Room display name, if any
    pub name: Option<String>,
    /// Seed the room as a direct chat with this user
    pub direct_user: Option<UserId>,
    /// Seed the room as a direct chat keyed by this third-party address
    pub direct_third_party: Option<Address>,
    /// Allow guest access to the created room
    pub guests_can_join: bool,
}

impl CreateRoomConfig {
    /// A direct chat with an account identifier
    pub fn direct_to_user(user_id: UserId) -> Self {
        Self {
            direct_user: Some(user_id),
            ..Self::default()
        }
    }

    /// A direct chat keyed by a third-party address
    pub fn direct_to_third_party(address: Address) -> Self {
        Self {
            direct_third_party: Some(address),
            ..Self::default()
        }
    }

    /// Whether this configuration creates a direct chat
    pub fn is_direct(&self) -> bool {
        self.direct_user.is_some() || self.direct_third_party.is_some()
    }
}

/// Abstract chat-client operations.
///
/// Methods that hit the network are async and may fail; the index and
/// membership queries read the SDK's local state and are synchronous.
#[async_trait]
pub trait ClientBridge: Send + Sync {
    /// The user of the current client session, if logged in
    fn session_user(&self) -> Option<UserId>;

    /// Resolve a room alias to a room id
    async fn resolve_alias(&self, alias: &RoomAlias) -> Result<RoomId, SalonError>;

    /// The current user's own membership in the given room
    fn membership(&self, room_id: &RoomId) -> Membership;

    /// Create a room
    async fn create_room(&self, config: CreateRoomConfig) -> Result<RoomId, SalonError>;

    /// Invite a single address to a room
    async fn invite(&self, room_id: &RoomId, address: &Address) -> Result<(), SalonError>;

    /// Known direct-message rooms with the given user
    fn direct_rooms(&self, user_id: &UserId) -> Vec<RoomId>;

    /// Member rooms of the given group, in the group's order
    fn group_rooms(&self, group_id: &GroupId) -> Vec<RoomId>;
}

/// Shared handle to a client bridge
pub type BoxedClientBridge = Arc<dyn ClientBridge>;
