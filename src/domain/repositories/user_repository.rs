use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, User},
};

#[async_trait]
pub trait UserRepository {
    /// Point-in-time existence check used by the duplicate-email rule.
    /// Concurrent registrations can both pass it; the unique index on
    /// the email column is the real guarantee.
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;
}
