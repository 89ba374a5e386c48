//! Infrastructure adapters for the authorization ports.

#![forbid(unsafe_code)]

mod in_memory_authorization_repository;
mod postgres_authorization_repository;

pub use in_memory_authorization_repository::InMemoryAuthorizationRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
