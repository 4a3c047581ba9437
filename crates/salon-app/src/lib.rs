//! # Salon App
//!
//! Portable headless application core for the Salon chat client. Two
//! components live here, loosely coupled through the shared action
//! dispatcher:
//!
//! - the **invite workflow** ([`workflows::invite`]), which resolves what
//!   a set of invitee addresses means (reuse a direct chat, create one,
//!   or create-and-invite) and surfaces partial failures through the
//!   modal presenter;
//! - the **open-rooms store** ([`stores::open_rooms`]), which owns the
//!   room view sub-stores currently on screen and routes dispatched
//!   actions to the right one.
//!
//! Everything effectful reaches the outside world through the
//! [`client::ClientBridge`] and [`dialogs::ModalPresenter`] traits; the
//! crate itself has no networking, storage or UI toolkit dependencies.

pub mod client;
pub mod config;
pub mod core;
pub mod dialogs;
pub mod dispatch;
pub mod i18n;
pub mod services;
pub mod stores;
pub mod views;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{BoxedClientBridge, ClientBridge, CreateRoomConfig, Membership};
pub use config::AppConfig;
pub use self::core::{Action, OobRoomData, RoomEvent, ViewRoomPayload};
pub use dialogs::{
    AddressPickerPrompt, DirectRoomChoice, DirectRoomPrompt, ErrorReport, ModalPresenter,
};
pub use dispatch::{DispatchToken, Dispatcher};
pub use i18n::MessageCatalog;
pub use services::AppServices;
pub use stores::open_rooms::{OpenRoomsStore, OpenRoomsSummary, RoomViewEntry};
pub use views::room::{RoomViewState, RoomViewStore};
pub use workflows::invite::{InviteOutcome, InviteResults, MultiInviter};
