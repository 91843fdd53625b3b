use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, User},
    repositories::user_repository::UserRepository,
};
use crate::entity::users;

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(user.is_some())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now().fixed_offset();
        let user_model = users::ActiveModel {
            id: Set(id),
            username: Set(new_user.username.clone()),
            first_name: Set(new_user.first_name.clone()),
            last_name: Set(new_user.last_name.clone()),
            email: Set(new_user.email.clone()),
            password_hash: Set(new_user.password_hash.as_str().to_string()),
            created_at: Set(now),
        };
        let insert_result = users::Entity::insert(user_model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(User::new(
            insert_result.last_insert_id,
            new_user.username,
            new_user.first_name,
            new_user.last_name,
            new_user.email,
        ))
    }
}
