use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::errors::PortalError;
use crate::core::models::PortalDocument;
use crate::infrastructure::storage::Storage;

/// Test fake: the document lives under a mutex instead of on disk.
pub struct InMemoryStorage {
    doc: Mutex<PortalDocument>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            doc: Mutex::new(PortalDocument::default()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn load(&self) -> Result<PortalDocument, PortalError> {
        Ok(self.doc.lock().await.clone())
    }

    async fn save(&self, doc: &PortalDocument) -> Result<(), PortalError> {
        *self.doc.lock().await = doc.clone();
        Ok(())
    }
}
