pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::PortalError;
pub use crate::core::services::PortalService;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;
pub use crate::infrastructure::storage::json_file::JsonFileStorage;

#[cfg(test)]
mod tests; // Include integration tests
