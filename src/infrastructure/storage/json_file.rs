use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, warn};

use crate::core::errors::PortalError;
use crate::core::models::PortalDocument;
use crate::infrastructure::storage::Storage;

/// Flat-file store: the entire document as one JSON file, rewritten in full
/// on every save. A missing file is a fresh install and loads as the empty
/// default. A file that exists but fails to parse is renamed aside to a
/// timestamped `.corrupt-*` sidecar before the default is returned, so a bad
/// deploy never silently discards the only copy of the data.
///
/// Writes are whole-file overwrites with no cross-process locking; two
/// processes pointed at the same file will last-write-win each other.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    fn quarantine_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".corrupt-{}", Utc::now().timestamp()));
        PathBuf::from(name)
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn load(&self) -> Result<PortalDocument, PortalError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(PortalDocument::default());
            }
            Err(err) => return Err(PortalError::Storage(err.to_string())),
        };

        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(err) => {
                let quarantine = self.quarantine_path();
                warn!(
                    path = %self.path.display(),
                    quarantine = %quarantine.display(),
                    %err,
                    "data file is malformed; moving it aside and starting empty"
                );
                if let Err(rename_err) = fs::rename(&self.path, &quarantine).await {
                    error!(%rename_err, "failed to quarantine malformed data file");
                }
                Ok(PortalDocument::default())
            }
        }
    }

    async fn save(&self, doc: &PortalDocument) -> Result<(), PortalError> {
        let raw =
            serde_json::to_string_pretty(doc).map_err(|err| PortalError::Storage(err.to_string()))?;
        fs::write(&self.path, raw)
            .await
            .map_err(|err| PortalError::Storage(err.to_string()))
    }
}
