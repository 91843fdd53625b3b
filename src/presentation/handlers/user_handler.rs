use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        error::DomainError,
        forms::register_form::{FIELD_METADATA, FieldErrors, RegisterForm},
        models::user::User,
        repositories::user_repository::UserRepository,
        services::password_service::PasswordHasher,
    },
    usecase::register_user_usecase::RegisterUserUsecase,
};

// Response

/// json for a successfully created account
#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserInfo,
}

#[derive(Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id().as_uuid().to_string(),
            username: user.username().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// json body of a 400: field name to ordered list of messages
#[derive(Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: FieldErrors,
}

/* Router Function and Handler Function */

// User Router

/// function return Router object
/// Suppose to be nested by main router

pub fn create_user_router<
    R: UserRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_service: RegisterUserUsecase<R, P>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/register", post(register::<R, P>))
        .route("/register/schema", get(register_schema))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<R: UserRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterUserUsecase<R, P>>,
}

// handler function

/// handler function for register
async fn register<R: UserRepository + Send + Sync, P: PasswordHasher + Send + Sync>(
    State(state): State<AppState<R, P>>,
    Json(payload): Json<RegisterForm>,
) -> impl IntoResponse {
    match state.register_service.register(payload).await {
        Ok(user) => {
            let response = RegisterResponse { user: user.into() };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(DomainError::Validation(errors)) => {
            let response = ValidationErrorResponse { errors };
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "registration failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json("Registration failed")).into_response()
        }
    }
}

/// handler function for the form schema: labels, placeholders and
/// help texts the client renders next to each field
async fn register_schema() -> impl IntoResponse {
    Json(FIELD_METADATA)
}
