//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_users_query;
mod user_repository;

pub use admin_users_query::AdminUsersQuery;
#[cfg(test)]
pub use admin_users_query::MockAdminUsersQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UnconfiguredUserRepository, UserPersistenceError, UserRepository};
