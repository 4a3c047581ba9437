//! Core action types shared by every store

pub mod action;

pub use action::{Action, OobRoomData, RoomEvent, ViewRoomPayload};
