//! UI-agnostic flows for the vaccination admin console.
//!
//! Each flow splits into a pure state machine ([`Machine`]) that decides what
//! happens next and a controller that carries out those decisions against a
//! backend and reports outcomes to a [`Notifier`].
//!
//! # Example
//!
//! ```rust,ignore
//! use vax_client::ApiClient;
//! use vax_flows::{FlowConfig, RegistrationFlow, TracingNotifier};
//!
//! let client = ApiClient::new("http://localhost:8080")?;
//! let mut flow = RegistrationFlow::new(client, TracingNotifier, FlowConfig::default());
//!
//! flow.open();
//! flow.set_email("nurse@clinic.org");
//! flow.set_password("secret1");
//! flow.submit_register().await?;      // now verifying, countdown at 3:00
//!
//! flow.input_otp("48-29-13");         // stored as "482913"
//! flow.submit_verify().await?;        // closes, resets after 500ms
//! ```

pub mod backend;
pub mod booking;
pub mod config;
pub mod countdown;
pub mod email_change;
pub mod error;
pub mod login;
pub mod machine;
pub mod notify;
pub mod registration;
pub mod testing;
pub mod validation;

pub use backend::{AuthBackend, RegistrationAttempt, VaccineDirectory};
pub use booking::{BookingForm, VaccineFilter, TIME_SLOTS};
pub use config::FlowConfig;
pub use countdown::{format_remaining, Countdown};
pub use email_change::{EmailChangeFlow, EmailChangeStep};
pub use error::{FieldErrors, FlowError, Result};
pub use login::{login, LoginForm};
pub use machine::Machine;
pub use notify::{Notifier, TracingNotifier};
pub use registration::{Phase, RegistrationFlow, RegistrationMachine, VerificationChallenge};
pub use validation::{mask_email, OtpCode};
