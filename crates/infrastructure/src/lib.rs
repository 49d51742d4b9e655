//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod config_content_type_registry;
mod in_memory_change_log_repository;
mod in_memory_content_repository;
mod in_memory_system_log_repository;
mod postgres_change_log_repository;
mod postgres_content_repository;
mod postgres_system_log_repository;

pub use config_content_type_registry::ConfigContentTypeRegistry;
pub use in_memory_change_log_repository::InMemoryChangeLogRepository;
pub use in_memory_content_repository::InMemoryContentRepository;
pub use in_memory_system_log_repository::InMemorySystemLogRepository;
pub use postgres_change_log_repository::PostgresChangeLogRepository;
pub use postgres_content_repository::PostgresContentRepository;
pub use postgres_system_log_repository::PostgresSystemLogRepository;
