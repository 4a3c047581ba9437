//! Application configuration

use serde::{Deserialize, Serialize};

/// Room-creation and viewing defaults consumed by the invite workflow.
///
/// Constructed by the embedding frontend and carried in
/// [`AppServices`](crate::services::AppServices).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dispatch a `view_room` for rooms the invite flow creates
    pub view_created_rooms: bool,
    /// Allow guest access to rooms the invite flow creates
    pub guests_can_join: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view_created_rooms: true,
            guests_can_join: false,
        }
    }
}
