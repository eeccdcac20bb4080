//! Email change for a logged-in account: request → confirm → completed.
//!
//! Same shape as registration without the countdown. Once completed the
//! session is stale and the host is expected to log the user out.

use tracing::{debug, info, warn};

use crate::backend::AuthBackend;
use crate::error::{FieldErrors, FlowError, Result};
use crate::machine::Machine;
use crate::notify::Notifier;
use crate::validation::{is_valid_email, OtpCode, EMAIL_FIELD, INVALID_EMAIL};

pub const CHANGE_OTP_SENT: &str = "OTP sent successfully";
pub const CHANGE_OTP_FAILED: &str = "Failed to send OTP";
pub const EMAIL_UPDATED: &str = "Email updated successfully! Please login again.";
pub const INVALID_OTP: &str = "Invalid OTP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailChangeStep {
    Request,
    Confirm { new_email: String, otp: OtpCode },
    Completed,
}

impl EmailChangeStep {
    pub fn name(&self) -> &'static str {
        match self {
            EmailChangeStep::Request => "request",
            EmailChangeStep::Confirm { .. } => "confirm",
            EmailChangeStep::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub enum EmailChangeEvent {
    RequestSubmitted { new_email: String },
    OtpSent { new_email: String },
    OtpEdited(String),
    ConfirmSubmitted,
    EmailChanged,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailChangeCommand {
    SendRequest { new_email: String },
    SendConfirmation { new_email: String, otp: u32 },
}

#[derive(Debug, Clone)]
pub struct EmailChangeMachine {
    step: EmailChangeStep,
}

impl Default for EmailChangeMachine {
    fn default() -> Self {
        Self {
            step: EmailChangeStep::Request,
        }
    }
}

impl EmailChangeMachine {
    pub fn step(&self) -> &EmailChangeStep {
        &self.step
    }
}

impl Machine for EmailChangeMachine {
    type Event = EmailChangeEvent;
    type Command = EmailChangeCommand;

    fn decide(&mut self, event: &EmailChangeEvent) -> Option<EmailChangeCommand> {
        match event {
            EmailChangeEvent::RequestSubmitted { new_email } => match self.step {
                EmailChangeStep::Request => Some(EmailChangeCommand::SendRequest {
                    new_email: new_email.clone(),
                }),
                _ => None,
            },
            EmailChangeEvent::OtpSent { new_email } => {
                if self.step == EmailChangeStep::Request {
                    self.step = EmailChangeStep::Confirm {
                        new_email: new_email.clone(),
                        otp: OtpCode::new(),
                    };
                }
                None
            }
            EmailChangeEvent::OtpEdited(raw) => {
                if let EmailChangeStep::Confirm { otp, .. } = &mut self.step {
                    otp.set(raw);
                }
                None
            }
            EmailChangeEvent::ConfirmSubmitted => match &self.step {
                EmailChangeStep::Confirm { new_email, otp } => {
                    otp.to_number()
                        .map(|otp| EmailChangeCommand::SendConfirmation {
                            new_email: new_email.clone(),
                            otp,
                        })
                }
                _ => None,
            },
            EmailChangeEvent::EmailChanged => {
                if matches!(self.step, EmailChangeStep::Confirm { .. }) {
                    self.step = EmailChangeStep::Completed;
                }
                None
            }
            EmailChangeEvent::Cancelled => {
                if matches!(self.step, EmailChangeStep::Confirm { .. }) {
                    self.step = EmailChangeStep::Request;
                }
                None
            }
        }
    }
}

/// Email change controller.
pub struct EmailChangeFlow<B, N> {
    backend: B,
    notifier: N,
    machine: EmailChangeMachine,
    new_email: String,
    field_errors: FieldErrors,
    error: Option<String>,
}

impl<B: AuthBackend, N: Notifier> EmailChangeFlow<B, N> {
    pub fn new(backend: B, notifier: N) -> Self {
        Self {
            backend,
            notifier,
            machine: EmailChangeMachine::default(),
            new_email: String::new(),
            field_errors: FieldErrors::new(),
            error: None,
        }
    }

    pub fn step(&self) -> &EmailChangeStep {
        self.machine.step()
    }

    pub fn is_completed(&self) -> bool {
        *self.machine.step() == EmailChangeStep::Completed
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Address the code was sent to, while confirming.
    pub fn pending_email(&self) -> Option<&str> {
        match self.machine.step() {
            EmailChangeStep::Confirm { new_email, .. } => Some(new_email),
            _ => None,
        }
    }

    pub fn otp(&self) -> Option<&str> {
        match self.machine.step() {
            EmailChangeStep::Confirm { otp, .. } => Some(otp.as_str()),
            _ => None,
        }
    }

    pub fn set_new_email(&mut self, email: impl Into<String>) {
        self.new_email = email.into();
    }

    pub fn input_otp(&mut self, raw: &str) {
        self.machine
            .decide(&EmailChangeEvent::OtpEdited(raw.to_string()));
    }

    /// Back to the request step. Nothing is sent.
    pub fn cancel(&mut self) {
        debug!("Email change cancelled");
        self.machine.decide(&EmailChangeEvent::Cancelled);
        self.field_errors.clear();
        self.error = None;
    }

    /// Ask the backend to email a code to the new address.
    ///
    /// Returns the message shown to the user.
    pub async fn submit_request(&mut self) -> Result<String> {
        self.ensure_step("request", "request")?;

        let new_email = self.new_email.trim().to_string();
        let mut errors = FieldErrors::new();
        if !is_valid_email(&new_email) {
            errors.insert(EMAIL_FIELD, INVALID_EMAIL);
        }
        self.field_errors = errors.clone();
        errors.into_result()?;
        self.error = None;

        let Some(EmailChangeCommand::SendRequest { new_email }) = self
            .machine
            .decide(&EmailChangeEvent::RequestSubmitted { new_email })
        else {
            return Err(self.wrong_step("request"));
        };

        match self.backend.request_email_change(&new_email).await {
            Ok(message) => {
                let message = message.unwrap_or_else(|| CHANGE_OTP_SENT.to_string());
                info!(new_email = %new_email, "Email change OTP sent");
                self.notifier.success(&message);
                self.machine
                    .decide(&EmailChangeEvent::OtpSent { new_email });
                Ok(message)
            }
            Err(e) => {
                warn!(new_email = %new_email, error = %e, "Email change request rejected");
                let message = e.user_message().unwrap_or(CHANGE_OTP_FAILED).to_string();
                Err(self.reject(message))
            }
        }
    }

    /// Confirm the new address with the emailed code.
    pub async fn submit_confirmation(&mut self) -> Result<()> {
        self.ensure_step("confirm", "confirm")?;

        let otp_errors = match self.machine.step() {
            EmailChangeStep::Confirm { otp, .. } => otp.check(),
            _ => FieldErrors::new(),
        };
        self.field_errors = otp_errors.clone();
        otp_errors.into_result()?;
        self.error = None;

        let Some(EmailChangeCommand::SendConfirmation { new_email, otp }) =
            self.machine.decide(&EmailChangeEvent::ConfirmSubmitted)
        else {
            return Err(self.wrong_step("confirm"));
        };

        match self.backend.verify_email_change(&new_email, otp).await {
            Ok(()) => {
                info!(new_email = %new_email, "Email changed");
                self.notifier.success(EMAIL_UPDATED);
                self.machine.decide(&EmailChangeEvent::EmailChanged);
                Ok(())
            }
            Err(e) => {
                warn!(new_email = %new_email, error = %e, "Email change confirmation rejected");
                let message = e.user_message().unwrap_or(INVALID_OTP).to_string();
                Err(self.reject(message))
            }
        }
    }

    fn reject(&mut self, message: String) -> FlowError {
        self.notifier.error(&message);
        self.error = Some(message.clone());
        FlowError::Rejected(message)
    }

    fn ensure_step(&self, action: &'static str, step: &str) -> Result<()> {
        if self.machine.step().name() == step {
            Ok(())
        } else {
            Err(self.wrong_step(action))
        }
    }

    fn wrong_step(&self, action: &'static str) -> FlowError {
        FlowError::WrongPhase {
            action,
            phase: self.machine.step().name(),
        }
    }
}
