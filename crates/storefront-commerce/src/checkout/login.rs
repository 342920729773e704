//! Mock login.
//!
//! There is no account backend; a login only produces a session that the
//! checkout flow requires before delivery details can be captured.

use crate::error::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Minimum password length accepted by the login form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Email used by the mock Google sign-in when none is supplied.
pub const GUEST_EMAIL: &str = "guest@gmail.com";

/// Email and password as typed into the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the email looks like `x@y.z` and the password is long enough.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !looks_like_email(&self.email) {
            return Err(CommerceError::InvalidCredentials(
                "please enter a valid email".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CommerceError::InvalidCredentials(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// How the shopper signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginProvider {
    Password,
    Google,
}

/// A signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub provider: LoginProvider,
    pub signed_in_at: DateTime<Utc>,
}

/// Accepts any well-formed credentials.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    validate: bool,
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MockAuthenticator {
    /// With `validate` off every login succeeds.
    pub fn new(validate: bool) -> Self {
        Self { validate }
    }

    pub fn log_in(&self, credentials: &Credentials) -> Result<Session, CommerceError> {
        if self.validate {
            credentials.validate()?;
        }
        info!(email = %credentials.email, "signed in");
        Ok(Session {
            email: credentials.email.trim().to_string(),
            provider: LoginProvider::Password,
            signed_in_at: Utc::now(),
        })
    }

    pub fn log_in_with_google(&self, email: Option<&str>) -> Session {
        let email = email.unwrap_or(GUEST_EMAIL).to_string();
        info!(email = %email, "signed in with google");
        Session {
            email,
            provider: LoginProvider::Google,
            signed_in_at: Utc::now(),
        }
    }
}

/// Something `@` something `.` something, with no whitespace.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let no_space = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);
    if !no_space(local) {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => no_space(&domain[..dot]) && no_space(&domain[dot + 1..]),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last@shop.example.pk"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("a b@c.d"));
        assert!(!looks_like_email("@c.d"));
        assert!(!looks_like_email("a@.d"));
    }

    #[test]
    fn test_credentials_validate() {
        assert!(Credentials::new("a@b.co", "secret").validate().is_ok());
        assert!(matches!(
            Credentials::new("a@b.co", "short").validate(),
            Err(CommerceError::InvalidCredentials(_))
        ));
        assert!(Credentials::new("nope", "secret1").validate().is_err());
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let auth = MockAuthenticator::new(false);
        let session = auth.log_in(&Credentials::new("", "")).unwrap();
        assert_eq!(session.provider, LoginProvider::Password);

        assert!(MockAuthenticator::default()
            .log_in(&Credentials::new("", ""))
            .is_err());
    }

    #[test]
    fn test_google_defaults_to_guest() {
        let session = MockAuthenticator::default().log_in_with_google(None);
        assert_eq!(session.email, GUEST_EMAIL);
        assert_eq!(session.provider, LoginProvider::Google);
    }
}
