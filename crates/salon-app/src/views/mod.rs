//! # View State Module
//!
//! Per-room view state and the store that owns it. State types are plain
//! serde-friendly structs so they can be snapshotted for debugging and
//! observed through `futures-signals`.

pub mod room;

pub use room::{RoomViewState, RoomViewStore};
