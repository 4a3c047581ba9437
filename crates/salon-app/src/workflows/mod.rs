//! Workflows - Portable Business Logic
//!
//! Operations that should behave identically across frontends. Each
//! workflow is a set of free async functions over [`AppServices`].

pub mod invite;
