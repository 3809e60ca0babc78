use super::*;

pub const MAX_SMS_LEN: usize = 160;
pub const MAX_NUMBER_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SmsStatus {
    ReceivedUnread,
    ReceivedRead,
    StoredUnsent,
    StoredSent,
}

impl SmsStatus {
    pub fn from_at(stat: &str) -> Option<Self> {
        match stat {
            "REC UNREAD" => Some(Self::ReceivedUnread),
            "REC READ" => Some(Self::ReceivedRead),
            "STO UNSENT" => Some(Self::StoredUnsent),
            "STO SENT" => Some(Self::StoredSent),
            _ => None,
        }
    }

    pub fn as_at(&self) -> &'static str {
        match self {
            Self::ReceivedUnread => "REC UNREAD",
            Self::ReceivedRead => "REC READ",
            Self::StoredUnsent => "STO UNSENT",
            Self::StoredSent => "STO SENT",
        }
    }
}

/// `+CMGR` mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ReadMode {
    /// Received unread messages become read
    #[default]
    Normal = 0,
    NoChange = 1,
}

/// `+CMGD` delete flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum DeleteFlag {
    /// Only the message at the given index
    #[default]
    Single = 0,
    Read = 1,
    ReadSent = 2,
    ReadSentUnsent = 3,
    All = 4,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sms {
    pub status: SmsStatus,
    pub sender: String<MAX_NUMBER_LEN>,
    pub timestamp: DateTime,
    pub text: Vec<u8, MAX_SMS_LEN>,
}
