//! `/auth/*` endpoints.

use tracing::debug;

use crate::types::{
    AccountSummary, Credentials, EmailChange, EmailChangeVerification, EmailVerification,
};
use crate::{ApiClient, Result};

impl ApiClient {
    /// `POST /auth/login`. Returns the backend's greeting, if any.
    ///
    /// On success the session cookie is kept by the client's cookie store.
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<String>> {
        debug!(email = %credentials.email, "Logging in");
        self.send_for_message(self.post("/auth/login").json(credentials))
            .await
    }

    /// `POST /auth/register`. A success means an OTP was emailed to the address.
    pub async fn register(&self, credentials: &Credentials) -> Result<()> {
        debug!(email = %credentials.email, "Registering account");
        self.send_for_message(self.post("/auth/register").json(credentials))
            .await?;
        Ok(())
    }

    /// `POST /auth/verify-email` with the code from the registration email.
    pub async fn verify_email(&self, email: &str, otp: u32) -> Result<()> {
        debug!(email, "Verifying email");
        let body = EmailVerification {
            email: email.to_string(),
            otp,
        };
        self.send_for_message(self.post("/auth/verify-email").json(&body))
            .await?;
        Ok(())
    }

    /// `PUT /auth/update-email`. Sends an OTP to the new address.
    pub async fn request_email_change(&self, new_email: &str) -> Result<Option<String>> {
        debug!(new_email, "Requesting email change");
        let body = EmailChange {
            new_email: new_email.to_string(),
        };
        self.send_for_message(self.put("/auth/update-email").json(&body))
            .await
    }

    /// `POST /auth/verify-update-otp`. Completes an email change.
    pub async fn verify_email_change(&self, new_email: &str, otp: u32) -> Result<()> {
        debug!(new_email, "Confirming email change");
        let body = EmailChangeVerification {
            new_email: new_email.to_string(),
            otp,
        };
        self.send_for_message(self.post("/auth/verify-update-otp").json(&body))
            .await?;
        Ok(())
    }

    /// `GET /auth/by-email/{email}`.
    pub async fn find_account(&self, email: &str) -> Result<AccountSummary> {
        let path = format!("/auth/by-email/{}", urlencoding::encode(email));
        self.send_json(self.get(&path)).await
    }
}
