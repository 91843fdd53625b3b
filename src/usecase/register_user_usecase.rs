use crate::domain::{
    error::DomainError,
    forms::register_form::{FieldErrors, MSG_EMAIL_IN_USE, RegisterForm},
    models::user::{NewUser, User},
    repositories::user_repository::UserRepository,
    services::password_service::PasswordHasher,
};

pub struct RegisterUserUsecase<R: UserRepository, P: PasswordHasher> {
    user_repository: R,
    password_hasher: P,
}

impl<R: UserRepository, P: PasswordHasher> RegisterUserUsecase<R, P> {
    pub fn new(user_repository: R, password_hasher: P) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Validate the submitted form and create the account.
    ///
    /// The local field rules run first; the duplicate-email lookup is
    /// merged into the same error map whenever the email on its own is
    /// well formed, so a taken address is reported alongside other
    /// field failures in a single response.
    pub async fn register(&self, form: RegisterForm) -> Result<User, DomainError>
    where
        R: Send + Sync,
        P: Send + Sync,
    {
        let valid = match form.validate() {
            Ok(valid) => valid,
            Err(mut errors) => {
                if form.email_is_well_formed()
                    && self.user_repository.email_exists(form.trimmed_email()).await?
                {
                    errors.add("email", MSG_EMAIL_IN_USE);
                }
                tracing::info!(fields = ?errors.fields().collect::<Vec<_>>(), "registration rejected");
                return Err(DomainError::Validation(errors));
            }
        };

        if self.user_repository.email_exists(&valid.email).await? {
            let mut errors = FieldErrors::new();
            errors.add("email", MSG_EMAIL_IN_USE);
            tracing::info!("registration rejected: e-mail already in use");
            return Err(DomainError::Validation(errors));
        }

        let password_hash = self.password_hasher.hash(&valid.password)?;

        let user = self
            .user_repository
            .create_user(NewUser {
                username: valid.username,
                first_name: valid.first_name,
                last_name: valid.last_name,
                email: valid.email,
                password_hash,
            })
            .await?;

        tracing::info!(username = %user.username(), "user registered");

        Ok(user)
    }
}
