// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory_user_repository;
pub mod postgres_user_repository;

pub use memory_user_repository::MemoryUserRepository;
pub use postgres_user_repository::PostgresUserRepository;
