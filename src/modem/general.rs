use modem_types::{DateTime, RawSignalQuality, SignalQuality};

use super::*;
use crate::{
    at::{self, CommandType, DEFAULT_ARG_LEN},
    Error,
};

/// Identification strings longer than this are truncated
pub const INFO_LEN: usize = 48;
const INFO_RESPONSE_LEN: usize = 64;
const CLOCK_RESPONSE_LEN: usize = 48;

pub(super) const SETUP: &str = concat!(
    "E0;",
    "+IPR=115200;",
    "+CLTS=1;",
    "+CMGF=1;",
    "+CSCS=\"HEX\";",
    "+SLEDS=1,50,450;",
    "+SLEDS=2,400,3100;",
    "+SLEDS=3,100,100;",
    "+CREG=2;",
    "&W"
);
// Room for the echoed command line ahead of OK, echo is only off once this has run
const SETUP_RESPONSE_LEN: usize = SETUP.len() + 16;

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    /// Brings the modem to the state every other method expects and stores it as the
    /// power up profile.
    ///
    /// Echo off, fixed 115200 baud, network time updates, text mode SMS in the `HEX`
    /// character set, netlight timing and registration URCs with location.
    pub fn setup(&mut self) -> Result<()> {
        log::info!("MODEM setup");
        self.tokens::<SETUP_RESPONSE_LEN>(
            self.config.setup_timeout,
            CommandType::Execute,
            SETUP,
            "",
        )
    }

    /// Liveness check, `AT` must be answered with a lone `OK`.
    pub fn at(&mut self) -> Result<()> {
        self.single_token::<DEFAULT_RESPONSE_LEN>(
            self.config.at_timeout,
            CommandType::Execute,
            "",
            "",
            "OK",
        )
    }

    pub fn get_brand(&mut self) -> Result<heapless::String<INFO_LEN>> {
        self.info("+CGMI")
    }

    pub fn get_model(&mut self) -> Result<heapless::String<INFO_LEN>> {
        self.info("+CGMM")
    }

    pub fn get_revision(&mut self) -> Result<heapless::String<INFO_LEN>> {
        self.info("+CGMR")
    }

    pub fn get_imei(&mut self) -> Result<heapless::String<INFO_LEN>> {
        self.info("+CGSN")
    }

    fn info(&mut self, cmd: &str) -> Result<heapless::String<INFO_LEN>> {
        self.str_token::<INFO_RESPONSE_LEN, INFO_LEN>(
            self.config.info_timeout,
            CommandType::Execute,
            cmd,
            "",
        )
    }

    pub fn get_signal_quality(&mut self) -> Result<SignalQuality> {
        self.first_last_token::<DEFAULT_RESPONSE_LEN, _>(
            2,
            self.config.signal_timeout,
            CommandType::Execute,
            "+CSQ",
            "",
            |tokens| parse_csq(tokens[0]),
        )
    }

    /// Sets the RTC. The zone is in quarter hours.
    pub fn set_clock(&mut self, time: &DateTime) -> Result<()> {
        if !time.is_valid() {
            return Err(Error::InvalidParam);
        }

        let args = at::build_args::<DEFAULT_ARG_LEN>(format_args!("\"{}\"", time))?;
        self.tokens::<DEFAULT_RESPONSE_LEN>(
            self.config.clock_timeout,
            CommandType::Write,
            "+CCLK",
            &args,
        )
    }

    pub fn get_clock(&mut self) -> Result<DateTime> {
        self.first_last_token::<CLOCK_RESPONSE_LEN, _>(
            2,
            self.config.clock_timeout,
            CommandType::Read,
            "+CCLK",
            "",
            |tokens| DateTime::parse(tokens[0]).ok_or(Error::WrongFormat),
        )
    }
}

// +CSQ: <rssi>,<ber>
fn parse_csq(params: &str) -> Result<SignalQuality> {
    let raw: RawSignalQuality = at::from_params(params)?;
    SignalQuality::from_raw(raw.rssi, raw.ber).ok_or(Error::WrongFormat)
}
