//! Routing stores
//!
//! The open-rooms store is the single place that decides which room view
//! sub-store currently deserves a dispatched action.

pub mod open_rooms;

pub use open_rooms::{OpenRoomsStore, OpenRoomsSummary, RoomViewEntry};

#[cfg(test)]
mod tests;
