use serde::{Deserialize, Serialize};

use crate::core::models::content::ContentItem;
use crate::core::models::user::User;

/// Shared admin credential. Stored as a bcrypt hash; an empty hash means the
/// credential has not been seeded yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    #[serde(default)]
    pub password_hash: String,
}

/// The entire persisted dataset: one JSON document holding every collection.
/// Each operation loads the whole document, mutates it in memory, and writes
/// the whole document back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub content: Vec<ContentItem>,
    #[serde(default)]
    pub admin: AdminSettings,
}
