pub mod content;
pub mod document;
pub mod user;

pub use content::{ContentItem, ContentKind, NewContent};
pub use document::{AdminSettings, PortalDocument};
pub use user::User;
