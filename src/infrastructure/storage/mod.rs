use async_trait::async_trait;

use crate::core::errors::PortalError;
use crate::core::models::PortalDocument;

/// Document-level persistence seam. The whole dataset travels as one
/// `PortalDocument`; implementations decide where it lives. The service
/// serializes its load-modify-save cycles, so `save` may assume the caller
/// holds the write lock.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn load(&self) -> Result<PortalDocument, PortalError>;
    async fn save(&self, doc: &PortalDocument) -> Result<(), PortalError>;
}

pub mod in_memory;
pub mod json_file;
