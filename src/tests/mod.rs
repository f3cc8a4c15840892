mod content_tests;
mod user_tests;

use crate::core::services::{ContentFields, PortalService};
use crate::infrastructure::storage::in_memory::InMemoryStorage;

// Minimum bcrypt cost keeps the hashing out of the test runtime.
const TEST_BCRYPT_COST: u32 = 4;

pub fn create_test_service() -> PortalService<InMemoryStorage> {
    PortalService::with_bcrypt_cost(InMemoryStorage::new(), TEST_BCRYPT_COST)
}

pub fn content_fields(title: &str, kind: &str, exam: &str, url: &str) -> ContentFields {
    ContentFields {
        title: title.to_string(),
        kind: kind.to_string(),
        exam: exam.to_string(),
        url: url.to_string(),
    }
}
