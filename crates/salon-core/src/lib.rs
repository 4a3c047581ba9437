//! # Salon Core
//!
//! Interface layer for the Salon chat client: the identifier newtypes,
//! invitee address model, and unified error type shared by every other
//! crate. This crate is pure data: no async, no I/O, no app state.

pub mod address;
pub mod errors;
pub mod identifiers;

pub use address::{Address, AddressKind};
pub use errors::SalonError;
pub use identifiers::{EventId, GroupId, RoomAlias, RoomId, UserId};
