//! Modal presentation contract
//!
//! The application core never draws dialogs; it hands a
//! [`ModalPresenter`] the shape to show and consumes the outcome. Three
//! shapes cover everything the invite workflow needs: a titled error
//! report, a two-outcome chooser over existing direct-message rooms,
//! and an address picker with kind filtering.

use async_trait::async_trait;
use salon_core::{Address, AddressKind, RoomId, UserId};

/// A titled, described error dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Dialog title
    pub title: String,
    /// Dialog body text
    pub description: String,
}

impl ErrorReport {
    /// Create an error report
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Prompt offering to reuse an existing direct-message room with a user
/// or to start a fresh one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRoomPrompt {
    /// The user the chat is with
    pub user_id: UserId,
    /// Existing direct-message rooms the current user is joined to
    pub rooms: Vec<RoomId>,
}

/// Outcome of the direct-room chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectRoomChoice {
    /// Reuse this existing room
    Existing(RoomId),
    /// Start a fresh direct chat
    NewChat,
}

/// Prompt for the address picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPickerPrompt {
    /// Dialog title
    pub title: String,
    /// Dialog body text
    pub description: String,
    /// Confirm button label
    pub button_label: String,
    /// Address kinds the picker accepts
    pub allowed_kinds: Vec<AddressKind>,
    /// The room being invited into, when inviting into an existing room
    pub room_id: Option<RoomId>,
}

/// Display of modal dialogs.
///
/// Interactive shapes resolve when the user answers; `None` means the
/// dialog was dismissed or declined, which callers treat as an expected
/// no-op.
#[async_trait]
pub trait ModalPresenter: Send + Sync {
    /// Show a titled error report
    fn error_report(&self, report: ErrorReport);

    /// Offer reuse of an existing direct-message room or a fresh chat
    async fn choose_direct_room(&self, prompt: DirectRoomPrompt) -> Option<DirectRoomChoice>;

    /// Collect invitee addresses, filtered to the allowed kinds
    async fn pick_addresses(&self, prompt: AddressPickerPrompt) -> Option<Vec<Address>>;
}
