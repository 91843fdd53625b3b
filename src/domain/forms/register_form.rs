use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::domain::services::password_service::strong_password;

pub const USERNAME_MIN_LENGTH: usize = 4;
pub const USERNAME_MAX_LENGTH: usize = 150;

pub const MSG_USERNAME_REQUIRED: &str = "This field must not be empty";
pub const MSG_USERNAME_MIN_LENGTH: &str = "Username must have at least 4 characters";
pub const MSG_USERNAME_MAX_LENGTH: &str = "Username must have less than 150 characters";
pub const MSG_FIRST_NAME_REQUIRED: &str = "Write your first name";
pub const MSG_LAST_NAME_REQUIRED: &str = "Write your last name";
pub const MSG_EMAIL_REQUIRED: &str = "E-mail is required";
pub const MSG_EMAIL_INVALID: &str = "Enter a valid email address.";
pub const MSG_EMAIL_IN_USE: &str = "User e-mail is already in use";
pub const MSG_PASSWORD_REQUIRED: &str = "Password must not be empty";
pub const MSG_PASSWORD_WEAK: &str = "Password must have at least one uppercase letter, \
     one lowercase letter and one number. The length should be at least 8 characters.";
pub const MSG_PASSWORD2_REQUIRED: &str = "Please, repeat your password";
pub const MSG_PASSWORD_MISMATCH: &str = "Password and password2 must be equal";

/// Field-scoped validation failures: an ordered mapping from field
/// name to the list of messages attached to that field.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Raw registration input as submitted by the client.
///
/// Missing fields deserialize to the empty string so that the
/// required-field rules report them instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: String,
}

/// The form after every rule passed: trimmed fields, confirmation
/// consumed.
#[derive(Debug, Clone)]
pub struct ValidForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Run every local rule and the cross-field password check.
    ///
    /// Each field is validated independently; errors accumulate
    /// instead of short-circuiting on the first failure. The
    /// duplicate-email rule needs a store read and is applied by the
    /// register use case on top of this result.
    pub fn validate(&self) -> Result<ValidForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", MSG_USERNAME_REQUIRED);
        } else {
            let length = username.chars().count();
            if length < USERNAME_MIN_LENGTH {
                errors.add("username", MSG_USERNAME_MIN_LENGTH);
            }
            if length > USERNAME_MAX_LENGTH {
                errors.add("username", MSG_USERNAME_MAX_LENGTH);
            }
        }

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            errors.add("first_name", MSG_FIRST_NAME_REQUIRED);
        }

        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            errors.add("last_name", MSG_LAST_NAME_REQUIRED);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", MSG_EMAIL_REQUIRED);
        } else if !email.validate_email() {
            errors.add("email", MSG_EMAIL_INVALID);
        }

        let password_clean = if self.password.is_empty() {
            errors.add("password", MSG_PASSWORD_REQUIRED);
            None
        } else if !strong_password(&self.password) {
            errors.add("password", MSG_PASSWORD_WEAK);
            None
        } else {
            Some(self.password.as_str())
        };

        let password2_clean = if self.password2.is_empty() {
            errors.add("password2", MSG_PASSWORD2_REQUIRED);
            None
        } else {
            Some(self.password2.as_str())
        };

        // Cross-field check over the cleaned values, run last. A
        // field that failed its own rule compares as missing, so a
        // weak password still mismatches a present confirmation. The
        // error lands on password, not password2.
        if password_clean != password2_clean {
            errors.add("password", MSG_PASSWORD_MISMATCH);
        }

        if errors.is_empty() {
            Ok(ValidForm {
                username: username.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }

    /// Whether the email field passed its own rules, deciding if the
    /// uniqueness lookup should run at all.
    pub fn email_is_well_formed(&self) -> bool {
        let email = self.email.trim();
        !email.is_empty() && email.validate_email()
    }

    pub fn trimmed_email(&self) -> &str {
        self.email.trim()
    }
}

/// Presentation metadata for one form field. Display-only: labels,
/// placeholders and help texts have no bearing on validation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldMeta {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub help_text: &'static str,
}

pub const FIELD_METADATA: [FieldMeta; 6] = [
    FieldMeta {
        name: "first_name",
        label: "First name",
        placeholder: "Ex.: John",
        help_text: "",
    },
    FieldMeta {
        name: "last_name",
        label: "Last name",
        placeholder: "Ex.: Doe",
        help_text: "",
    },
    FieldMeta {
        name: "username",
        label: "Username",
        placeholder: "Your username",
        help_text: "Username must have letters, numbers or one of those @/./+/-/_. \
             The length should be between 4 and 150 characteres.",
    },
    FieldMeta {
        name: "email",
        label: "E-mail",
        placeholder: "Your e-mail",
        help_text: "The e-mail must be valid.",
    },
    FieldMeta {
        name: "password",
        label: "Password",
        placeholder: "Type your password",
        help_text: "Password must have at least one uppercase letter, \
             one lowercase letter and one number. The length should be \
             at least 8 characters.",
    },
    FieldMeta {
        name: "password2",
        label: "Password2",
        placeholder: "Repeat your password",
        help_text: "",
    },
];
