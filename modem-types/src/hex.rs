//! Uppercase hex text as used by the `+CSCS="HEX"` character set.

use super::*;
use alloc::string::String;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    OddLength,
    /// Not an uppercase hex digit, holds the byte offset.
    InvalidDigit(usize),
    /// Decoded data does not fit the output capacity.
    Overflow,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddLength => f.write_str("odd number of hex digits"),
            Self::InvalidDigit(at) => write!(f, "invalid hex digit at {at}"),
            Self::Overflow => f.write_str("decoded data too long"),
        }
    }
}

/// Two uppercase digits per byte.
pub fn encode_upper(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push(DIGITS[usize::from(byte >> 4)] as char);
        out.push(DIGITS[usize::from(byte & 0x0F)] as char);
    }
    out
}

/// Strict inverse of [`encode_upper`]: lowercase digits are rejected.
pub fn decode_upper<const N: usize>(text: &str) -> Result<Vec<u8, N>, DecodeError> {
    let text = text.as_bytes();
    if text.len() % 2 != 0 {
        return Err(DecodeError::OddLength);
    }

    let mut out = Vec::new();
    for (i, pair) in text.chunks_exact(2).enumerate() {
        let high = nibble(pair[0]).ok_or(DecodeError::InvalidDigit(i * 2))?;
        let low = nibble(pair[1]).ok_or(DecodeError::InvalidDigit(i * 2 + 1))?;
        out.push(high << 4 | low)
            .map_err(|_| DecodeError::Overflow)?;
    }
    Ok(out)
}

fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
