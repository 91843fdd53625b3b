use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

use crate::domain::models::credential::HashedPassword;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(Uuid);
impl UserId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// A persisted user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
}

impl User {
    pub fn new(
        id: Uuid,
        username: String,
        first_name: String,
        last_name: String,
        email: String,
    ) -> Self {
        Self {
            id: UserId::from_uuid(id),
            username,
            first_name,
            last_name,
            email,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn first_name(&self) -> &str {
        &self.first_name
    }
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A validated, normalized field set ready for account creation.
///
/// Only built from a form that passed every rule; the password
/// confirmation field is consumed during validation and never
/// reaches this type.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: HashedPassword,
}
