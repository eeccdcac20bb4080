//! OTP-gated registration: register → verify.
//!
//! [`RegistrationMachine`] holds the phase and decides what to do next;
//! [`RegistrationFlow`] owns the machine, the form inputs and the countdown,
//! and executes the machine's commands against an [`AuthBackend`].
//!
//! ```text
//!            submit_register (ok)
//!  Register ─────────────────────► Verify { email, otp, countdown }
//!     ▲                               │
//!     │  go_back / close              │ submit_verify (ok)
//!     ├───────────────────────────────┤   stop countdown, close surface,
//!     │                               │   wait reset_delay, clear inputs
//!     └───────────────────────────────┘
//! ```
//!
//! A verified challenge is discarded before the reset delay starts, so a
//! cancelled `submit_verify` can only leave uncleared inputs behind.
//!
//! Failures never change the phase; they set [`RegistrationFlow::error`] and
//! go to the notifier.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::backend::{AuthBackend, RegistrationAttempt};
use crate::config::FlowConfig;
use crate::countdown::{format_remaining, Countdown};
use crate::error::{FieldErrors, FlowError, Result};
use crate::machine::Machine;
use crate::notify::Notifier;
use crate::validation::{check_registration, OtpCode, OTP_FIELD};

pub const OTP_SENT: &str = "OTP sent successfully!";
pub const EMAIL_VERIFIED: &str = "Email verified successfully!";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const VERIFICATION_FAILED: &str = "Verification failed.";

// =============================================================================
// State
// =============================================================================

/// Current step of the flow. The challenge only exists while verifying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Register,
    Verify(VerificationChallenge),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Register => "register",
            Phase::Verify(_) => "verify",
        }
    }

    pub fn is_verify(&self) -> bool {
        matches!(self, Phase::Verify(_))
    }
}

/// The pending email verification.
///
/// Remaining time lives in the flow's [`Countdown`], which is started and
/// stopped together with this challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationChallenge {
    pub email: String,
    pub otp: OtpCode,
    pub expires_in_secs: u32,
}

/// Register-step inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn attempt(&self) -> RegistrationAttempt {
        RegistrationAttempt {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

// =============================================================================
// Machine
// =============================================================================

#[derive(Debug, Clone)]
pub enum RegistrationEvent {
    /// Validated register input was submitted.
    RegisterSubmitted(RegistrationAttempt),
    /// Backend accepted the registration and emailed a code.
    OtpSent { email: String },
    /// OTP field edited; carries the raw field contents.
    OtpEdited(String),
    VerifySubmitted,
    EmailVerified,
    WentBack,
    SurfaceClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationCommand {
    SendRegistration(RegistrationAttempt),
    StartCountdown { seconds: u32 },
    SendVerification { email: String, otp: u32 },
    /// Verify already left; stop the countdown, close, clear inputs later.
    ScheduleReset,
    StopCountdown,
}

/// Pure phase logic for the registration flow.
#[derive(Debug, Clone)]
pub struct RegistrationMachine {
    phase: Phase,
    otp_ttl_secs: u32,
}

impl RegistrationMachine {
    pub fn new(otp_ttl_secs: u32) -> Self {
        Self {
            phase: Phase::Register,
            otp_ttl_secs,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    fn leave_verify(&mut self) -> Option<RegistrationCommand> {
        match self.phase {
            Phase::Verify(_) => {
                self.phase = Phase::Register;
                Some(RegistrationCommand::StopCountdown)
            }
            Phase::Register => None,
        }
    }
}

impl Machine for RegistrationMachine {
    type Event = RegistrationEvent;
    type Command = RegistrationCommand;

    fn decide(&mut self, event: &RegistrationEvent) -> Option<RegistrationCommand> {
        match event {
            RegistrationEvent::RegisterSubmitted(attempt) => match self.phase {
                Phase::Register => Some(RegistrationCommand::SendRegistration(attempt.clone())),
                Phase::Verify(_) => None,
            },
            RegistrationEvent::OtpSent { email } => match self.phase {
                Phase::Register => {
                    self.phase = Phase::Verify(VerificationChallenge {
                        email: email.clone(),
                        otp: OtpCode::new(),
                        expires_in_secs: self.otp_ttl_secs,
                    });
                    Some(RegistrationCommand::StartCountdown {
                        seconds: self.otp_ttl_secs,
                    })
                }
                Phase::Verify(_) => None,
            },
            RegistrationEvent::OtpEdited(raw) => {
                if let Phase::Verify(challenge) = &mut self.phase {
                    challenge.otp.set(raw);
                }
                None
            }
            RegistrationEvent::VerifySubmitted => match &self.phase {
                Phase::Verify(challenge) => challenge.otp.to_number().map(|otp| {
                    RegistrationCommand::SendVerification {
                        email: challenge.email.clone(),
                        otp,
                    }
                }),
                Phase::Register => None,
            },
            RegistrationEvent::EmailVerified => match self.phase {
                Phase::Verify(_) => {
                    self.phase = Phase::Register;
                    Some(RegistrationCommand::ScheduleReset)
                }
                Phase::Register => None,
            },
            RegistrationEvent::WentBack | RegistrationEvent::SurfaceClosed => self.leave_verify(),
        }
    }
}

// =============================================================================
// Flow
// =============================================================================

/// Registration flow controller.
///
/// Submissions take `&mut self`, so a second submit cannot start while one is
/// in flight.
pub struct RegistrationFlow<B, N> {
    backend: B,
    notifier: N,
    config: FlowConfig,
    machine: RegistrationMachine,
    countdown: Option<Countdown>,
    form: RegistrationForm,
    field_errors: FieldErrors,
    error: Option<String>,
    open: bool,
}

impl<B: AuthBackend, N: Notifier> RegistrationFlow<B, N> {
    pub fn new(backend: B, notifier: N, config: FlowConfig) -> Self {
        let machine = RegistrationMachine::new(config.otp_ttl_secs);
        Self {
            backend,
            notifier,
            config,
            machine,
            countdown: None,
            form: RegistrationForm::default(),
            field_errors: FieldErrors::new(),
            error: None,
            open: false,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> &Phase {
        self.machine.phase()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Flow-level message from the last rejected submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn challenge(&self) -> Option<&VerificationChallenge> {
        match self.machine.phase() {
            Phase::Verify(challenge) => Some(challenge),
            Phase::Register => None,
        }
    }

    /// Email the code was sent to, while verifying.
    pub fn verification_email(&self) -> Option<&str> {
        self.challenge().map(|c| c.email.as_str())
    }

    /// Current OTP field contents, while verifying.
    pub fn otp(&self) -> Option<&str> {
        self.challenge().map(|c| c.otp.as_str())
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    /// `m:ss remaining` text. Gone once the countdown hits zero.
    pub fn countdown_display(&self) -> Option<String> {
        self.remaining_seconds()
            .filter(|secs| *secs > 0)
            .map(format_remaining)
    }

    pub fn subscribe_countdown(&self) -> Option<watch::Receiver<u32>> {
        self.countdown.as_ref().map(Countdown::subscribe)
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the hosting surface. A pending verification is discarded.
    pub fn close(&mut self) {
        self.open = false;
        let cmd = self.machine.decide(&RegistrationEvent::SurfaceClosed);
        self.apply(cmd);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    /// Replace the OTP field contents; non-digits are dropped.
    pub fn input_otp(&mut self, raw: &str) {
        let cmd = self
            .machine
            .decide(&RegistrationEvent::OtpEdited(raw.to_string()));
        self.apply(cmd);
    }

    /// Return to the register step without contacting the backend.
    pub fn go_back(&mut self) {
        if !self.machine.phase().is_verify() {
            return;
        }
        debug!("Going back to register step");
        let cmd = self.machine.decide(&RegistrationEvent::WentBack);
        self.apply(cmd);
        self.field_errors.remove(OTP_FIELD);
        self.error = None;
    }

    // -------------------------------------------------------------------------
    // Submissions
    // -------------------------------------------------------------------------

    /// Submit the register step.
    ///
    /// On success the flow is in `verify` with a fresh countdown.
    pub async fn submit_register(&mut self) -> Result<()> {
        self.ensure_phase("register", false)?;

        self.field_errors = check_registration(&self.form.email, &self.form.password);
        self.field_errors.clone().into_result()?;
        self.error = None;

        let attempt = self.form.attempt();
        let Some(RegistrationCommand::SendRegistration(attempt)) = self
            .machine
            .decide(&RegistrationEvent::RegisterSubmitted(attempt))
        else {
            return Err(self.wrong_phase("register"));
        };

        match self.backend.register(&attempt).await {
            Ok(()) => {
                info!(email = %attempt.email, "Registration accepted, OTP sent");
                self.notifier.success(OTP_SENT);
                let cmd = self.machine.decide(&RegistrationEvent::OtpSent {
                    email: attempt.email,
                });
                self.apply(cmd);
                Ok(())
            }
            Err(e) => {
                warn!(email = %attempt.email, error = %e, "Registration rejected");
                let message = e.user_message().unwrap_or(REGISTRATION_FAILED);
                Err(self.reject(message.to_string()))
            }
        }
    }

    /// Submit the verify step.
    ///
    /// On success the flow is back in `register` with the countdown stopped
    /// and the surface closed; after the configured delay the inputs are
    /// cleared.
    pub async fn submit_verify(&mut self) -> Result<()> {
        self.ensure_phase("verify", true)?;

        let otp_errors = self
            .challenge()
            .map(|c| c.otp.check())
            .unwrap_or_default();
        self.field_errors = otp_errors.clone();
        otp_errors.into_result()?;
        self.error = None;

        let Some(RegistrationCommand::SendVerification { email, otp }) =
            self.machine.decide(&RegistrationEvent::VerifySubmitted)
        else {
            return Err(self.wrong_phase("verify"));
        };

        match self.backend.verify_email(&email, otp).await {
            Ok(()) => {
                info!(email = %email, "Email verified");
                self.notifier.success(EMAIL_VERIFIED);
                if let Some(RegistrationCommand::ScheduleReset) =
                    self.machine.decide(&RegistrationEvent::EmailVerified)
                {
                    self.stop_countdown();
                    self.open = false;
                    self.clear_after_delay().await;
                }
                Ok(())
            }
            Err(e) => {
                warn!(email = %email, error = %e, "Verification rejected");
                let message = e.user_message().unwrap_or(VERIFICATION_FAILED);
                Err(self.reject(message.to_string()))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Command execution
    // -------------------------------------------------------------------------

    /// Execute the countdown commands.
    fn apply(&mut self, cmd: Option<RegistrationCommand>) {
        match cmd {
            Some(RegistrationCommand::StartCountdown { seconds }) => {
                debug!(seconds, "Starting OTP countdown");
                self.countdown = Some(Countdown::start(seconds, self.config.tick));
            }
            Some(RegistrationCommand::StopCountdown) => self.stop_countdown(),
            // Carried out by the submission that decided them.
            Some(
                RegistrationCommand::SendRegistration(_)
                | RegistrationCommand::SendVerification { .. }
                | RegistrationCommand::ScheduleReset,
            ) => {}
            None => {}
        }
    }

    fn stop_countdown(&mut self) {
        if self.countdown.take().is_some() {
            debug!("OTP countdown stopped");
        }
    }

    async fn clear_after_delay(&mut self) {
        tokio::time::sleep(self.config.reset_delay).await;

        self.form.clear();
        self.field_errors.clear();
        self.error = None;
        debug!("Registration flow reset");
    }

    fn reject(&mut self, message: String) -> FlowError {
        self.notifier.error(&message);
        self.error = Some(message.clone());
        FlowError::Rejected(message)
    }

    fn ensure_phase(&self, action: &'static str, verify: bool) -> Result<()> {
        if self.machine.phase().is_verify() == verify {
            Ok(())
        } else {
            Err(self.wrong_phase(action))
        }
    }

    fn wrong_phase(&self, action: &'static str) -> FlowError {
        FlowError::WrongPhase {
            action,
            phase: self.machine.phase().name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt() -> RegistrationAttempt {
        RegistrationAttempt {
            email: "a@b.com".into(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn test_machine_starts_in_register() {
        let machine = RegistrationMachine::new(180);
        assert_eq!(machine.phase(), &Phase::Register);
    }

    #[test]
    fn test_machine_register_then_otp_sent_enters_verify() {
        let mut machine = RegistrationMachine::new(180);

        let cmd = machine.decide(&RegistrationEvent::RegisterSubmitted(attempt()));
        assert_eq!(cmd, Some(RegistrationCommand::SendRegistration(attempt())));
        assert_eq!(machine.phase(), &Phase::Register);

        let cmd = machine.decide(&RegistrationEvent::OtpSent {
            email: "a@b.com".into(),
        });
        assert_eq!(cmd, Some(RegistrationCommand::StartCountdown { seconds: 180 }));

        let Phase::Verify(challenge) = machine.phase() else {
            panic!("expected verify phase");
        };
        assert_eq!(challenge.email, "a@b.com");
        assert!(challenge.otp.is_empty());
        assert_eq!(challenge.expires_in_secs, 180);
    }

    #[test]
    fn test_machine_email_verified_leaves_verify_before_reset() {
        let mut machine = RegistrationMachine::new(180);
        machine.decide(&RegistrationEvent::OtpSent {
            email: "a@b.com".into(),
        });

        assert_eq!(
            machine.decide(&RegistrationEvent::EmailVerified),
            Some(RegistrationCommand::ScheduleReset)
        );
        assert_eq!(machine.phase(), &Phase::Register);

        // A late duplicate does not schedule a second reset.
        assert_eq!(machine.decide(&RegistrationEvent::EmailVerified), None);
    }

    #[test]
    fn test_machine_verify_needs_full_code() {
        let mut machine = RegistrationMachine::new(180);
        machine.decide(&RegistrationEvent::OtpSent {
            email: "a@b.com".into(),
        });

        machine.decide(&RegistrationEvent::OtpEdited("12a3".into()));
        assert_eq!(machine.decide(&RegistrationEvent::VerifySubmitted), None);

        machine.decide(&RegistrationEvent::OtpEdited("654321".into()));
        assert_eq!(
            machine.decide(&RegistrationEvent::VerifySubmitted),
            Some(RegistrationCommand::SendVerification {
                email: "a@b.com".into(),
                otp: 654321,
            })
        );
    }

    #[test]
    fn test_machine_exits_verify_with_stop_countdown() {
        for exit in [RegistrationEvent::WentBack, RegistrationEvent::SurfaceClosed] {
            let mut machine = RegistrationMachine::new(180);
            machine.decide(&RegistrationEvent::OtpSent {
                email: "a@b.com".into(),
            });

            assert_eq!(
                machine.decide(&exit),
                Some(RegistrationCommand::StopCountdown)
            );
            assert_eq!(machine.phase(), &Phase::Register);

            // Leaving again is a no-op.
            assert_eq!(machine.decide(&exit), None);
        }
    }

    #[test]
    fn test_machine_ignores_verify_events_in_register() {
        let mut machine = RegistrationMachine::new(180);
        assert_eq!(machine.decide(&RegistrationEvent::VerifySubmitted), None);
        assert_eq!(machine.decide(&RegistrationEvent::EmailVerified), None);
        assert_eq!(
            machine.decide(&RegistrationEvent::OtpEdited("123456".into())),
            None
        );
        assert_eq!(machine.phase(), &Phase::Register);
    }
}
