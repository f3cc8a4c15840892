pub mod errors;
pub mod models;
pub mod query;
pub mod seed;
pub mod services;
