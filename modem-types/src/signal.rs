use super::*;

/// `+CSQ` rssi value reported when the signal is not known or not detectable.
pub const RSSI_NOT_DETECTABLE: i8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignalQuality {
    /// Received signal strength in dBm, or [`RSSI_NOT_DETECTABLE`].
    pub rssi: i8,
    /// Raw bit error rate class as reported by the modem (0-7, 99 unknown).
    pub ber: u8,
}

impl SignalQuality {
    /// Converts the raw `+CSQ: <rssi>,<ber>` pair.
    ///
    /// rssi 0 is -115 dBm or less, 1 is -111 dBm, 2..=30 step 2 dBm from -110 and
    /// 31 is -52 dBm or greater. 99 is kept as is, other values are rejected.
    pub fn from_raw(rssi: u8, ber: u8) -> Option<Self> {
        let rssi = match rssi {
            0 => -115,
            1 => -111,
            2..=31 => (rssi as i8 - 2) * 2 - 110,
            99 => RSSI_NOT_DETECTABLE,
            _ => return None,
        };
        Some(Self { rssi, ber })
    }

    pub fn rssi_dbm(&self) -> Option<i8> {
        (self.rssi != RSSI_NOT_DETECTABLE).then_some(self.rssi)
    }
}
