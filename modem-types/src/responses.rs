//! Parameter lists of command replies, after the `+CMD: ` prefix.

use super::*;
use alloc::string::String;

// +CSQ: 15,2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawSignalQuality {
    pub rssi: u8,
    pub ber: u8,
}

// +CMGR: "REC READ","2B3938393132","","23/06/15,10:30:00+08"
/// Text mode `+CMGR` header. Fields are still in the active character set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageHeader {
    pub stat: String,
    pub oa: String,
    #[serde(default)]
    pub alpha: Option<String>,
    #[serde(default)]
    pub scts: Option<String>,
}

impl MessageHeader {
    /// Service centre timestamp. When the modem leaves out `<alpha>` the timestamp is
    /// the third field.
    pub fn timestamp(&self) -> Option<&str> {
        self.scts.as_deref().or(self.alpha.as_deref())
    }
}

// +CUSD: 0,"Balance: 10",15
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UssdResponse {
    pub n: u8,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub dcs: Option<u8>,
}
