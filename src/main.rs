mod config;
mod domain;
mod entity;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;

use crate::{
    config::AppConfig,
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, user_repository::PostgresUserRepository,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::register_user_usecase::RegisterUserUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        language_code = %config.i18n.language_code,
        time_zone = %config.i18n.time_zone,
        use_i18n = config.i18n.use_i18n,
        use_tz = config.i18n.use_tz,
        locale_paths = ?config.i18n.locale_paths,
        "locale settings loaded"
    );

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    let user_repository = PostgresUserRepository::new(db);
    let password_hasher = Argon2PasswordHasher::new();
    let register_service = RegisterUserUsecase::new(user_repository, password_hasher);

    let app = Router::new()
        .route("/", get(|| async { "authors-api" }))
        .nest("/api", create_user_router(register_service));

    tracing::info!(addr = %config.bind_addr, "listening");
    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use rstest::*;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{
        domain::{
            error::{DomainError, RepositoryError},
            forms::register_form::{
                MSG_EMAIL_IN_USE, MSG_FIRST_NAME_REQUIRED, MSG_PASSWORD_MISMATCH,
                MSG_PASSWORD_WEAK, MSG_USERNAME_MAX_LENGTH, MSG_USERNAME_MIN_LENGTH,
                MSG_USERNAME_REQUIRED, RegisterForm,
            },
            models::{
                credential::HashedPassword,
                user::{NewUser, User},
            },
            repositories::user_repository::UserRepository,
            services::password_service::PasswordHasher,
        },
        presentation::handlers::user_handler::{
            RegisterResponse, ValidationErrorResponse, create_user_router,
        },
        usecase::register_user_usecase::RegisterUserUsecase,
    };

    const TEST_ID: &str = "00000000-0000-0000-0000-000000000001";
    const TAKEN_EMAIL: &str = "inuse@example.com";

    // mock repository interface
    #[derive(Clone)]
    struct MockUserRepository;

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
            Ok(email == TAKEN_EMAIL)
        }

        async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
            if new_user.username == "unlucky" {
                Err(RepositoryError::DatabaseError("insert failed".to_string()))
            } else {
                Ok(User::new(
                    Uuid::parse_str(TEST_ID).unwrap(),
                    new_user.username,
                    new_user.first_name,
                    new_user.last_name,
                    new_user.email,
                ))
            }
        }
    }

    #[derive(Clone)]
    struct MockPasswordHasher;

    impl PasswordHasher for MockPasswordHasher {
        fn hash(&self, _plain_password: &str) -> Result<HashedPassword, DomainError> {
            Ok(HashedPassword::new("mock_hash".to_string()))
        }
    }

    #[fixture]
    fn test_app() -> Router {
        let register_service = RegisterUserUsecase::new(MockUserRepository, MockPasswordHasher);

        // setup router: sync settings of main.app
        Router::new().nest("/api", create_user_router(register_service))
    }

    fn valid_payload() -> RegisterForm {
        RegisterForm {
            username: "johndoe".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "Abcdef12".to_string(),
            password2: "Abcdef12".to_string(),
        }
    }

    /// # Description
    ///
    /// This function is general register handler
    /// Call this function from test case for register
    async fn register(app: Router, form: &RegisterForm) -> Response {
        let body = serde_json::to_string(form).unwrap();
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn field_errors(response: Response) -> ValidationErrorResponse {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_positive(test_app: Router) {
        let response = register(test_app, &valid_payload()).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let register_response: RegisterResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(TEST_ID, register_response.user.id);
        assert_eq!("johndoe", register_response.user.username);
        assert_eq!("John", register_response.user.first_name);
        assert_eq!("Doe", register_response.user.last_name);
        assert_eq!("john@example.com", register_response.user.email);

        // neither the password nor its confirmation leaves the service
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let user = value["user"].as_object().unwrap();
        assert!(!user.contains_key("password"));
        assert!(!user.contains_key("password2"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_empty_first_name_negative(test_app: Router) {
        let mut form = valid_payload();
        form.first_name = String::new();

        let response = register(test_app, &form).await;

        let errors = field_errors(response).await.errors;
        assert_eq!(
            errors.get("first_name"),
            Some(&[MSG_FIRST_NAME_REQUIRED.to_string()][..])
        );
        assert_eq!(errors.fields().count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_short_username_negative(test_app: Router) {
        let mut form = valid_payload();
        form.username = "joe".to_string();

        let response = register(test_app, &form).await;

        let errors = field_errors(response).await.errors;
        assert_eq!(
            errors.get("username"),
            Some(&[MSG_USERNAME_MIN_LENGTH.to_string()][..])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_long_username_negative(test_app: Router) {
        let mut form = valid_payload();
        form.username = "j".repeat(151);

        let response = register(test_app, &form).await;

        let errors = field_errors(response).await.errors;
        assert_eq!(
            errors.get("username"),
            Some(&[MSG_USERNAME_MAX_LENGTH.to_string()][..])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_password_mismatch_negative(test_app: Router) {
        let mut form = valid_payload();
        form.password2 = "Abcdef13".to_string();

        let response = register(test_app, &form).await;

        let errors = field_errors(response).await.errors;
        assert_eq!(
            errors.get("password"),
            Some(&[MSG_PASSWORD_MISMATCH.to_string()][..])
        );
        assert!(errors.get("password2").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_weak_password_negative(test_app: Router) {
        let mut form = valid_payload();
        form.password = "alllowercase1".to_string();
        form.password2 = "alllowercase1".to_string();

        let response = register(test_app, &form).await;

        let errors = field_errors(response).await.errors;
        assert_eq!(
            errors.get("password"),
            Some(&[MSG_PASSWORD_WEAK.to_string(), MSG_PASSWORD_MISMATCH.to_string()][..])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_duplicated_email_negative(test_app: Router) {
        let mut form = valid_payload();
        form.email = TAKEN_EMAIL.to_string();

        let response = register(test_app, &form).await;

        let errors = field_errors(response).await.errors;
        assert_eq!(
            errors.get("email"),
            Some(&[MSG_EMAIL_IN_USE.to_string()][..])
        );
        assert_eq!(errors.fields().count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_duplicated_email_joins_other_errors(test_app: Router) {
        let mut form = valid_payload();
        form.email = TAKEN_EMAIL.to_string();
        form.first_name = String::new();

        let response = register(test_app, &form).await;

        let errors = field_errors(response).await.errors;
        assert_eq!(
            errors.get("email"),
            Some(&[MSG_EMAIL_IN_USE.to_string()][..])
        );
        assert_eq!(
            errors.get("first_name"),
            Some(&[MSG_FIRST_NAME_REQUIRED.to_string()][..])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_empty_form_reports_every_field(test_app: Router) {
        let response = register(test_app, &RegisterForm::default()).await;

        let errors = field_errors(response).await.errors;
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(
            fields,
            ["email", "first_name", "last_name", "password", "password2", "username"]
        );
        assert_eq!(
            errors.get("username"),
            Some(&[MSG_USERNAME_REQUIRED.to_string()][..])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_repository_failure_negative(test_app: Router) {
        let mut form = valid_payload();
        form.username = "unlucky".to_string();

        let response = register(test_app, &form).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_schema(test_app: Router) {
        let response = test_app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/register/schema")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let fields = value.as_array().unwrap();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0]["name"], "first_name");
        assert_eq!(fields[0]["placeholder"], "Ex.: John");
        assert_eq!(fields[2]["label"], "Username");
    }
}
