// In-memory backend and notifier for exercising the flows without a server.
//
// Both are cheap to clone and share state across clones, so a test can hand
// one to a flow by value and keep another to inspect afterwards.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vax_client::{ApiError, Credentials, Vaccine};

use crate::backend::{AuthBackend, RegistrationAttempt, VaccineDirectory};
use crate::notify::Notifier;

// =============================================================================
// Scripted Backend
// =============================================================================

/// A call the backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Register { email: String, password: String },
    VerifyEmail { email: String, otp: u32 },
    Login { email: String },
    RequestEmailChange { new_email: String },
    VerifyEmailChange { new_email: String, otp: u32 },
    VaccinesForDoctor { doctor_id: i64 },
}

#[derive(Debug, Clone)]
struct Rejection {
    status: u16,
    message: Option<String>,
}

impl Rejection {
    fn to_error(&self) -> ApiError {
        ApiError::Api {
            status: self.status,
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<BackendCall>,
    accepted_otp: u32,
    wrong_otp: Option<Rejection>,
    register: Option<Rejection>,
    login: Option<Rejection>,
    email_change: Option<Rejection>,
    login_message: Option<String>,
    email_change_message: Option<String>,
    vaccines: HashMap<i64, Vec<Vaccine>>,
    failing_doctors: HashSet<i64>,
}

/// Backend that accepts everything unless told otherwise.
///
/// The only OTP it accepts is [`ScriptedBackend::DEFAULT_OTP`] unless changed
/// with [`accept_otp`](Self::accept_otp); any other code is rejected with a
/// 400 and no message.
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    script: Arc<Mutex<Script>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBackend {
    pub const DEFAULT_OTP: u32 = 123456;

    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                accepted_otp: Self::DEFAULT_OTP,
                wrong_otp: Some(Rejection {
                    status: 400,
                    message: None,
                }),
                ..Script::default()
            })),
        }
    }

    pub fn accept_otp(self, otp: u32) -> Self {
        self.script.lock().unwrap().accepted_otp = otp;
        self
    }

    /// Message returned with a wrong OTP.
    pub fn with_wrong_otp_message(self, message: &str) -> Self {
        self.script.lock().unwrap().wrong_otp = Some(Rejection {
            status: 400,
            message: Some(message.to_string()),
        });
        self
    }

    pub fn reject_register(self, status: u16, message: Option<&str>) -> Self {
        self.script.lock().unwrap().register = Some(Rejection {
            status,
            message: message.map(str::to_string),
        });
        self
    }

    pub fn reject_login(self, status: u16, message: Option<&str>) -> Self {
        self.script.lock().unwrap().login = Some(Rejection {
            status,
            message: message.map(str::to_string),
        });
        self
    }

    pub fn reject_email_change(self, status: u16, message: Option<&str>) -> Self {
        self.script.lock().unwrap().email_change = Some(Rejection {
            status,
            message: message.map(str::to_string),
        });
        self
    }

    pub fn with_login_message(self, message: &str) -> Self {
        self.script.lock().unwrap().login_message = Some(message.to_string());
        self
    }

    pub fn with_email_change_message(self, message: &str) -> Self {
        self.script.lock().unwrap().email_change_message = Some(message.to_string());
        self
    }

    pub fn with_vaccines(self, doctor_id: i64, vaccines: Vec<Vaccine>) -> Self {
        self.script.lock().unwrap().vaccines.insert(doctor_id, vaccines);
        self
    }

    /// Make vaccine lookups for this doctor fail with a 500.
    pub fn failing_doctor(self, doctor_id: i64) -> Self {
        self.script.lock().unwrap().failing_doctors.insert(doctor_id);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().calls.len()
    }

    fn record(&self, call: BackendCall) {
        self.script.lock().unwrap().calls.push(call);
    }

    fn check_otp(&self, otp: u32) -> vax_client::Result<()> {
        let script = self.script.lock().unwrap();
        if otp == script.accepted_otp {
            return Ok(());
        }
        Err(script
            .wrong_otp
            .as_ref()
            .map(Rejection::to_error)
            .unwrap_or_else(|| ApiError::rejected(400, "Invalid OTP")))
    }

    fn rejection(&self, pick: impl FnOnce(&Script) -> &Option<Rejection>) -> vax_client::Result<()> {
        let script = self.script.lock().unwrap();
        match pick(&script) {
            Some(rejection) => Err(rejection.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthBackend for ScriptedBackend {
    async fn register(&self, attempt: &RegistrationAttempt) -> vax_client::Result<()> {
        self.record(BackendCall::Register {
            email: attempt.email.clone(),
            password: attempt.password.clone(),
        });
        self.rejection(|s| &s.register)
    }

    async fn verify_email(&self, email: &str, otp: u32) -> vax_client::Result<()> {
        self.record(BackendCall::VerifyEmail {
            email: email.to_string(),
            otp,
        });
        self.check_otp(otp)
    }

    async fn login(&self, credentials: &Credentials) -> vax_client::Result<Option<String>> {
        self.record(BackendCall::Login {
            email: credentials.email.clone(),
        });
        self.rejection(|s| &s.login)?;
        Ok(self.script.lock().unwrap().login_message.clone())
    }

    async fn request_email_change(&self, new_email: &str) -> vax_client::Result<Option<String>> {
        self.record(BackendCall::RequestEmailChange {
            new_email: new_email.to_string(),
        });
        self.rejection(|s| &s.email_change)?;
        Ok(self.script.lock().unwrap().email_change_message.clone())
    }

    async fn verify_email_change(&self, new_email: &str, otp: u32) -> vax_client::Result<()> {
        self.record(BackendCall::VerifyEmailChange {
            new_email: new_email.to_string(),
            otp,
        });
        self.check_otp(otp)
    }
}

#[async_trait]
impl VaccineDirectory for ScriptedBackend {
    async fn vaccines_for_doctor(&self, doctor_id: i64) -> vax_client::Result<Vec<Vaccine>> {
        self.record(BackendCall::VaccinesForDoctor { doctor_id });
        let script = self.script.lock().unwrap();
        if script.failing_doctors.contains(&doctor_id) {
            return Err(ApiError::rejected(500, "Internal Server Error"));
        }
        Ok(script.vaccines.get(&doctor_id).cloned().unwrap_or_default())
    }
}

/// Minimal vaccine record for tests.
pub fn vaccine(id: i64, name: &str) -> Vaccine {
    Vaccine {
        id,
        vaccine_name: name.to_string(),
        manufacturer: None,
        doses_required: None,
        age_range: None,
        status: None,
    }
}

// =============================================================================
// Recording Notifier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Notifier that keeps every notice.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(m) => Some(m),
                Notice::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Error(message.to_string()));
    }
}
