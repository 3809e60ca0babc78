#![no_std]

use core::fmt;
use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

extern crate alloc;

mod datetime;
pub mod hex;
mod responses;
mod signal;
mod sms;
mod urc;

pub use datetime::DateTime;
pub use responses::{MessageHeader, RawSignalQuality, UssdResponse};
pub use signal::{SignalQuality, RSSI_NOT_DETECTABLE};
pub use sms::{DeleteFlag, ReadMode, Sms, SmsStatus, MAX_NUMBER_LEN, MAX_SMS_LEN};
pub use urc::{DaylightSavingTime, Functionality, LocalTimestamp, NewMessageIndication, Registration};
