//! Database module
//!
//! This module handles database connections and session storage

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabasePool, DatabaseConfig, create_pool, run_migrations, health_check};
pub use memory::InMemorySessionStore;
pub use repositories::SessionRepository;
pub use service::DatabaseService;
pub use store::SessionStore;
