//! Email + password login.

use tracing::{info, warn};

use crate::backend::AuthBackend;
use crate::error::{FlowError, Result};
use crate::notify::Notifier;
use crate::validation::check_login;
use vax_client::Credentials;

pub const LOGIN_SUCCEEDED: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Invalid email or password";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Validate the form and log in. Returns the message shown on success.
///
/// The session cookie ends up in the backend client's cookie store.
pub async fn login<B, N>(backend: &B, notifier: &N, form: &LoginForm) -> Result<String>
where
    B: AuthBackend + ?Sized,
    N: Notifier + ?Sized,
{
    check_login(&form.email, &form.password).into_result()?;

    let credentials = form.credentials();
    match backend.login(&credentials).await {
        Ok(message) => {
            let message = message.unwrap_or_else(|| LOGIN_SUCCEEDED.to_string());
            info!(email = %credentials.email, "Logged in");
            notifier.success(&message);
            Ok(message)
        }
        Err(e) => {
            warn!(email = %credentials.email, error = %e, "Login rejected");
            let message = e.user_message().unwrap_or(LOGIN_FAILED).to_string();
            notifier.error(&message);
            Err(FlowError::Rejected(message))
        }
    }
}
