use modem_types::{
    hex, DateTime, DeleteFlag, MessageHeader, ReadMode, Sms, SmsStatus, MAX_NUMBER_LEN,
    MAX_SMS_LEN,
};

use super::*;
use crate::{
    at::{self, CommandType, DEFAULT_ARG_LEN},
    Error,
};

// "REC UNREAD","<40 hex>","","yy/MM/dd,hh:mm:ss+zz" plus a 320 byte body
const CMGR_RESPONSE_LEN: usize = 512;

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    /// Sends a text message and returns its message reference.
    ///
    /// `number` is digits with an optional leading `+`, at most 20 characters. `text` is
    /// sent as is in the `HEX` character set. When the modem does not offer the `> `
    /// prompt, entry is cancelled with ESC and the prompt failure is returned.
    pub fn send_sms(&mut self, number: &str, text: &[u8]) -> Result<u8> {
        if !is_phone_number(number) || text.len() > MAX_SMS_LEN {
            return Err(Error::InvalidParam);
        }

        let args = at::build_args::<DEFAULT_ARG_LEN>(format_args!("\"{}\"", number))?;
        let prompt = self.single_token::<DEFAULT_RESPONSE_LEN>(
            self.config.prompt_timeout,
            CommandType::Write,
            "+CMGS",
            &args,
            "> ",
        );
        if let Err(e) = prompt {
            log::warn!("MODEM no SMS prompt: {}", e);
            if let Err(esc) = self.send_raw(&[at::ESC]) {
                log::error!("MODEM could not cancel SMS entry: {}", esc);
            }
            return Err(e);
        }

        let mut payload = hex::encode_upper(text);
        payload.push(char::from(at::CTRL_Z));

        self.first_last_token::<DEFAULT_RESPONSE_LEN, _>(
            2,
            self.config.sms_send_timeout,
            CommandType::Bare,
            "+CMGS",
            &payload,
            |tokens| tokens[0].trim().parse().map_err(|_| Error::WrongFormat),
        )
    }

    pub fn read_sms(&mut self, index: u8, mode: ReadMode) -> Result<Sms> {
        let args = at::build_args::<DEFAULT_ARG_LEN>(format_args!("{},{}", index, mode as u8))?;
        self.first_last_token::<CMGR_RESPONSE_LEN, _>(
            3,
            self.config.sms_read_timeout,
            CommandType::Write,
            "+CMGR",
            &args,
            |tokens| parse_cmgr(tokens[0], tokens[1]),
        )
    }

    pub fn delete_sms(&mut self, index: u8, flag: DeleteFlag) -> Result<()> {
        let args = at::build_args::<DEFAULT_ARG_LEN>(format_args!("{},{}", index, flag as u8))?;
        self.tokens::<DEFAULT_RESPONSE_LEN>(
            self.config.sms_delete_timeout,
            CommandType::Write,
            "+CMGD",
            &args,
        )
    }
}

/// Digits with an optional leading `+`, at most 20 characters including the `+`.
pub(crate) fn is_phone_number(number: &str) -> bool {
    let digits = number.strip_prefix('+').unwrap_or(number);
    !digits.is_empty()
        && number.len() <= MAX_NUMBER_LEN
        && digits.bytes().all(|b| b.is_ascii_digit())
}

// +CMGR: <stat>,<oa>[,<alpha>],<scts>[,...]
// <hex body>
fn parse_cmgr(header: &str, body: &str) -> Result<Sms> {
    if body.len() % 2 != 0 {
        return Err(Error::Unknown);
    }
    let text = hex::decode_upper::<MAX_SMS_LEN>(body).map_err(|e| match e {
        hex::DecodeError::Overflow => Error::BufferFull,
        _ => Error::WrongFormat,
    })?;

    let header: MessageHeader = at::from_params(header)?;
    let status = SmsStatus::from_at(&header.stat).ok_or(Error::WrongFormat)?;
    let sender = parse_sender(&header.oa)?;
    let timestamp = header
        .timestamp()
        .and_then(DateTime::parse)
        .ok_or(Error::WrongFormat)?;

    Ok(Sms {
        status,
        sender,
        timestamp,
        text,
    })
}

fn parse_sender(encoded: &str) -> Result<heapless::String<MAX_NUMBER_LEN>> {
    let bytes = hex::decode_upper::<MAX_NUMBER_LEN>(encoded).map_err(|_| Error::WrongFormat)?;
    let number = core::str::from_utf8(&bytes).map_err(|_| Error::WrongFormat)?;
    if !is_phone_number(number) {
        return Err(Error::WrongFormat);
    }
    heapless::String::try_from(number).map_err(|_| Error::WrongFormat)
}
