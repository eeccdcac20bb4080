use std::time::Duration;

/// Seconds an emailed OTP is advertised as valid.
pub const DEFAULT_OTP_TTL_SECS: u32 = 180;

/// Pause between a successful verification and the form reset, so a closing
/// transition can finish rendering first.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(500);

/// Timing knobs for the OTP flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Countdown start value, in ticks.
    pub otp_ttl_secs: u32,
    /// Countdown tick period.
    pub tick: Duration,
    pub reset_delay: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            otp_ttl_secs: DEFAULT_OTP_TTL_SECS,
            tick: Duration::from_secs(1),
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl FlowConfig {
    pub fn with_otp_ttl_secs(mut self, secs: u32) -> Self {
        self.otp_ttl_secs = secs;
        self
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }
}
