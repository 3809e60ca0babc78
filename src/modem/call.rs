use alloc::string::String;
use modem_types::UssdResponse;

use super::*;
use crate::{
    at::{self, CommandType, DEFAULT_ARG_LEN},
    Error,
};

const USSD_RESPONSE_LEN: usize = 256;

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    pub fn answer_call(&mut self) -> Result<()> {
        self.tokens::<DEFAULT_RESPONSE_LEN>(
            self.config.call_timeout,
            CommandType::Execute,
            "A",
            "",
        )
    }

    /// Starts a voice call.
    pub fn dial(&mut self, number: &str) -> Result<()> {
        if !is_dial_string(number) {
            return Err(Error::InvalidParam);
        }

        let args = at::build_args::<DEFAULT_ARG_LEN>(format_args!("{};", number))?;
        self.tokens::<DEFAULT_RESPONSE_LEN>(
            self.config.call_timeout,
            CommandType::Execute,
            "D",
            &args,
        )
    }

    pub fn hang_up(&mut self) -> Result<()> {
        self.tokens::<DEFAULT_RESPONSE_LEN>(
            self.config.call_timeout,
            CommandType::Execute,
            "H",
            "",
        )
    }

    /// Runs a USSD request such as `*140#` and returns the network's reply text in the
    /// active character set.
    ///
    /// The session is closed afterwards with `AT+CUSD=2`. Failing to close it is only
    /// logged.
    pub fn send_ussd(&mut self, code: &str) -> Result<String> {
        if !is_dial_string(code) {
            return Err(Error::InvalidParam);
        }

        let args = at::build_args::<DEFAULT_ARG_LEN>(format_args!("1,\"{}\"", code))?;
        let reply = self.delayed_response::<USSD_RESPONSE_LEN, _>(
            self.config.at_timeout,
            self.config.ussd_timeout,
            CommandType::Write,
            "+CUSD",
            &args,
            parse_cusd,
        );

        if let Err(e) = self.tokens::<DEFAULT_RESPONSE_LEN>(
            self.config.at_timeout,
            CommandType::Write,
            "+CUSD",
            "2",
        ) {
            log::warn!("MODEM could not close USSD session: {}", e);
        }

        reply
    }
}

/// Up to 20 of `0-9 + * #`.
fn is_dial_string(number: &str) -> bool {
    !number.is_empty()
        && number.len() <= modem_types::MAX_NUMBER_LEN
        && number
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'*' | b'#'))
}

// +CUSD: <n>[,<str>[,<dcs>]]
fn parse_cusd(line: &str) -> Result<String> {
    let params = line.strip_prefix("+CUSD: ").ok_or(Error::WrongFormat)?;
    let reply: UssdResponse = at::from_params(params)?;
    reply.text.ok_or(Error::WrongFormat)
}
