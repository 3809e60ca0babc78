//! Parameter lists of unsolicited lines, after the `+URC: ` prefix.

use super::*;
use alloc::string::String;

// +CMTI: "SM",3
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewMessageIndication {
    pub storage: String,
    pub index: u8,
}

// +CREG: 1,"1A2B","3C4D"
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Registration {
    pub stat: u8,
    #[serde(default)]
    pub lac: Option<String>,
    #[serde(default)]
    pub ci: Option<String>,
}

// +CFUN: 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Functionality {
    pub fun: u8,
}

// *PSUTTZ: 2024,11,20,20,4,48,"+4",0
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    pub time_zone: String,
    pub dst: u8,
}

// DST: 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DaylightSavingTime {
    pub dst: u8,
}
