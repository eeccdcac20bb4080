// Backend seams for the flows.
//
// The flows only need a handful of calls; these traits keep them testable
// without a server. `ApiClient` implements both.

use async_trait::async_trait;
use vax_client::{ApiClient, Credentials, Vaccine};

/// What the user submits on the register step.
pub type RegistrationAttempt = Credentials;

// =============================================================================
// Auth Backend
// =============================================================================

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Create the account and email an OTP to it.
    async fn register(&self, attempt: &RegistrationAttempt) -> vax_client::Result<()>;

    /// Confirm the registration OTP.
    async fn verify_email(&self, email: &str, otp: u32) -> vax_client::Result<()>;

    async fn login(&self, credentials: &Credentials) -> vax_client::Result<Option<String>>;

    /// Email an OTP to a new address for the logged-in account.
    async fn request_email_change(&self, new_email: &str) -> vax_client::Result<Option<String>>;

    /// Confirm the email-change OTP.
    async fn verify_email_change(&self, new_email: &str, otp: u32) -> vax_client::Result<()>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn register(&self, attempt: &RegistrationAttempt) -> vax_client::Result<()> {
        ApiClient::register(self, attempt).await
    }

    async fn verify_email(&self, email: &str, otp: u32) -> vax_client::Result<()> {
        ApiClient::verify_email(self, email, otp).await
    }

    async fn login(&self, credentials: &Credentials) -> vax_client::Result<Option<String>> {
        ApiClient::login(self, credentials).await
    }

    async fn request_email_change(&self, new_email: &str) -> vax_client::Result<Option<String>> {
        ApiClient::request_email_change(self, new_email).await
    }

    async fn verify_email_change(&self, new_email: &str, otp: u32) -> vax_client::Result<()> {
        ApiClient::verify_email_change(self, new_email, otp).await
    }
}

// =============================================================================
// Vaccine Directory
// =============================================================================

#[async_trait]
pub trait VaccineDirectory: Send + Sync {
    /// Vaccines the given doctor administers.
    async fn vaccines_for_doctor(&self, doctor_id: i64) -> vax_client::Result<Vec<Vaccine>>;
}

#[async_trait]
impl VaccineDirectory for ApiClient {
    async fn vaccines_for_doctor(&self, doctor_id: i64) -> vax_client::Result<Vec<Vaccine>> {
        ApiClient::vaccines_for_doctor(self, doctor_id).await
    }
}
