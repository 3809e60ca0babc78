use serde::Deserialize;

/// Per command timeouts, all in milliseconds.
///
/// Every field falls back to its default when missing from a deserialized config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gap between received bytes after which a reply is considered complete
    pub idle_timeout: u32,
    /// Wait for the `> ` SMS data prompt
    pub prompt_timeout: u32,
    pub at_timeout: u32,
    pub setup_timeout: u32,
    /// Identification strings (`+CGMI`, `+CGMM`, `+CGMR`, `+CGSN`)
    pub info_timeout: u32,
    pub signal_timeout: u32,
    pub clock_timeout: u32,
    pub sms_send_timeout: u32,
    pub sms_read_timeout: u32,
    pub sms_delete_timeout: u32,
    pub call_timeout: u32,
    pub ussd_timeout: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            idle_timeout: 20,
            // > 2048 * 10 / 115200
            prompt_timeout: 100,
            at_timeout: 10,
            setup_timeout: 10_000,
            info_timeout: 100,
            signal_timeout: 15,
            clock_timeout: 10,
            sms_send_timeout: 60_000,
            sms_read_timeout: 5_000,
            sms_delete_timeout: 5_000,
            call_timeout: 20_000,
            ussd_timeout: 10_000,
        }
    }
}

impl Config {
    pub fn with_idle_timeout(mut self, ms: u32) -> Self {
        self.idle_timeout = ms;
        self
    }

    pub fn with_prompt_timeout(mut self, ms: u32) -> Self {
        self.prompt_timeout = ms;
        self
    }

    pub fn with_at_timeout(mut self, ms: u32) -> Self {
        self.at_timeout = ms;
        self
    }

    pub fn with_sms_send_timeout(mut self, ms: u32) -> Self {
        self.sms_send_timeout = ms;
        self
    }

    pub fn with_call_timeout(mut self, ms: u32) -> Self {
        self.call_timeout = ms;
        self
    }

    pub fn with_ussd_timeout(mut self, ms: u32) -> Self {
        self.ussd_timeout = ms;
        self
    }
}
