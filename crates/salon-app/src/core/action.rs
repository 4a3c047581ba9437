//! # Actions: UI Events as Data
//!
//! Every UI event in the client is a named action carrying a payload,
//! published on a [`Dispatcher`](crate::dispatch::Dispatcher) and matched
//! exhaustively by whichever store it concerns. One enum variant per
//! action name; each variant carries only its relevant fields.

use salon_core::{EventId, GroupId, RoomAlias, RoomId, SalonError, UserId};
use serde::{Deserialize, Serialize};

/// Out-of-band metadata for a room the current user has not joined yet,
/// carried alongside navigation so an invite preview can render without
/// a room object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OobRoomData {
    /// Room display name, if known
    pub name: Option<String>,
    /// Room avatar URL, if known
    pub avatar_url: Option<String>,
    /// Display name of whoever invited the current user
    pub inviter_name: Option<String>,
}

/// A lightweight event value, the payload of forward/reply/send actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEvent {
    /// Event identifier, when the event already exists in a room
    pub event_id: Option<EventId>,
    /// Room the event originated in, if any
    pub room_id: Option<RoomId>,
    /// Event type string
    pub event_type: String,
    /// Event content
    pub content: serde_json::Value,
}

impl RoomEvent {
    /// Create an event value with the given type and content
    pub fn new(event_type: impl Into<String>, content: serde_json::Value) -> Self {
        Self {
            event_id: None,
            room_id: None,
            event_type: event_type.into(),
            content,
        }
    }

    /// Set the originating room
    #[must_use]
    pub fn with_room(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Set the event identifier
    #[must_use]
    pub fn with_event_id(mut self, event_id: EventId) -> Self {
        self.event_id = Some(event_id);
        self
    }
}

/// Payload of a `view_room` action.
///
/// Either `room_id` or `room_alias` must be set. An alias-only payload is
/// resolved asynchronously by the open-rooms store and re-dispatched with
/// the resolved id, carrying every other field through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRoomPayload {
    /// Target room id, when known
    pub room_id: Option<RoomId>,
    /// Target room alias, when the room was addressed by alias
    pub room_alias: Option<RoomAlias>,
    /// Event to scroll to after the room is shown
    pub event_id: Option<EventId>,
    /// Whether to highlight that event
    pub highlighted: bool,
    /// Join the room as part of viewing it
    pub auto_join: bool,
    /// Out-of-band metadata for not-yet-joined rooms
    pub oob_data: Option<OobRoomData>,
}

impl ViewRoomPayload {
    /// Payload addressing a room by id
    pub fn for_room(room_id: RoomId) -> Self {
        Self {
            room_id: Some(room_id),
            ..Self::default()
        }
    }

    /// Payload addressing a room by alias
    pub fn for_alias(room_alias: RoomAlias) -> Self {
        Self {
            room_alias: Some(room_alias),
            ..Self::default()
        }
    }

    /// Attach the id an alias resolved to, keeping all carried metadata
    #[must_use]
    pub fn with_resolved_id(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }
}

/// A named UI action.
///
/// Actions flow through the shared dispatcher into the open-rooms store,
/// which either handles them itself or forwards them into the private
/// dispatcher of the room view entry that currently deserves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Show a room, addressed by id or alias
    ViewRoom(ViewRoomPayload),

    /// A room could not be loaded (alias resolution or peek failure)
    ViewRoomError {
        /// Room id that failed, if known
        room_id: Option<RoomId>,
        /// Room alias that failed, if the room was addressed by alias
        room_alias: Option<RoomAlias>,
        /// The underlying failure
        error: SalonError,
    },

    /// Leave room views for the groups overview
    ViewMyGroups,

    /// Leave room views for a single group's page
    ViewGroup {
        /// Group to show
        group_id: GroupId,
    },

    /// Show every room of a group side by side
    ViewGroupGrid {
        /// Group whose member rooms fill the grid
        group_id: GroupId,
    },

    /// Remember an event to be forwarded into the next viewed room
    ForwardEvent {
        /// The event to forward
        event: RoomEvent,
    },

    /// Send an event to a room
    SendEvent {
        /// Destination room
        room_id: RoomId,
        /// The event to send
        event: RoomEvent,
    },

    /// The user initiated joining a room
    WillJoin {
        /// Room being joined
        room_id: RoomId,
    },

    /// The user abandoned a join in progress
    CancelJoin {
        /// Room whose join was abandoned
        room_id: RoomId,
    },

    /// Join a room
    JoinRoom {
        /// Room to join
        room_id: RoomId,
    },

    /// A join failed
    JoinRoomError {
        /// Room whose join failed
        room_id: RoomId,
        /// The underlying failure
        error: SalonError,
    },

    /// The client session ended
    OnLoggedOut,

    /// Begin (or clear) composing a reply to an event
    ReplyToEvent {
        /// Event being replied to; `None` clears the reply state
        event: Option<RoomEvent>,
    },

    /// Open the settings view for the current room
    OpenRoomSettings {
        /// Settings tab to open on, if any
        initial_tab: Option<String>,
    },

    /// Close any open settings view
    CloseSettings,

    /// Start a fresh direct chat with a user
    StartChat {
        /// The user to chat with
        user_id: UserId,
    },
}

impl Action {
    /// The wire-style action name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewRoom(_) => "view_room",
            Self::ViewRoomError { .. } => "view_room_error",
            Self::ViewMyGroups => "view_my_groups",
            Self::ViewGroup { .. } => "view_group",
            Self::ViewGroupGrid { .. } => "view_group_grid",
            Self::ForwardEvent { .. } => "forward_event",
            Self::SendEvent { .. } => "send_event",
            Self::WillJoin { .. } => "will_join",
            Self::CancelJoin { .. } => "cancel_join",
            Self::JoinRoom { .. } => "join_room",
            Self::JoinRoomError { .. } => "join_room_error",
            Self::OnLoggedOut => "on_logged_out",
            Self::ReplyToEvent { .. } => "reply_to_event",
            Self::OpenRoomSettings { .. } => "open_room_settings",
            Self::CloseSettings => "close_settings",
            Self::StartChat { .. } => "start_chat",
        }
    }
}
