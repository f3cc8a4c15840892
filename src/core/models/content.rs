use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::errors::PortalError;

/// Kind of curated study material. Serialized as lowercase `"book"` /
/// `"video"` to match the wire format and the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Book,
    Video,
}

impl ContentKind {
    /// Parses user-supplied input, rejecting anything outside the enum.
    pub fn parse(value: &str) -> Result<Self, PortalError> {
        match value {
            "book" => Ok(ContentKind::Book),
            "video" => Ok(ContentKind::Video),
            other => Err(PortalError::InvalidContentType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Book => "book",
            ContentKind::Video => "video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curated study item (book link or video link) tagged with the exam it
/// prepares for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub exam: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a content item, before an id and timestamp are
/// assigned. Produced by the API layer and the page seeder.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub kind: ContentKind,
    pub exam: String,
    pub url: String,
}

impl ContentItem {
    pub fn from_new(new: NewContent) -> Self {
        ContentItem {
            id: Uuid::new_v4(),
            title: new.title,
            kind: new.kind,
            exam: new.exam,
            url: new.url,
            created_at: Utc::now(),
        }
    }
}
