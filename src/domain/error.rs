use thiserror::Error;

use crate::domain::forms::register_form::FieldErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Password hashing failed")]
    PasswordHash,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
