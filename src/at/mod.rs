//! AT command framing.
//!
//! ```text
//! "AT" <cmd> ["=" | "?" | "=?"] [<args>] "\r"    Test/Read/Execute/Write
//! <args>                                         Bare
//! ```

pub mod tokenizer;

pub use tokenizer::{tokenize, tokenize_with, SEPARATOR};

use crate::{Error, Result};
use core::fmt::{self, Write as _};
use serde::de::DeserializeOwned;

/// Ends SMS payload entry
pub const CTRL_Z: u8 = 0x1A;
/// Aborts SMS payload entry
pub const ESC: u8 = 0x1B;

pub const DEFAULT_ARG_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// `AT<cmd>=?`
    Test,
    /// `AT<cmd>?`
    Read,
    /// `AT<cmd><args>`
    Execute,
    /// `AT<cmd>=<args>`, or `AT<cmd>` when args are empty
    Write,
    /// `<args>` only, no prefix and no terminator. With empty args nothing is sent and
    /// only the reply is read.
    Bare,
}

impl CommandType {
    /// Wire pieces of a command in send order, empty pieces skipped.
    pub fn frame<'a>(self, cmd: &'a str, args: &'a str) -> impl Iterator<Item = &'a [u8]> + 'a {
        let (prefix, cmd, end) = match self {
            CommandType::Bare => ("", "", ""),
            _ => ("AT", cmd, "\r"),
        };
        let (op, args) = match self {
            CommandType::Test => ("=?", ""),
            CommandType::Read => ("?", ""),
            CommandType::Execute | CommandType::Bare => ("", args),
            CommandType::Write if args.is_empty() => ("", ""),
            CommandType::Write => ("=", args),
        };

        [prefix, cmd, op, args, end]
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .map(str::as_bytes)
    }
}

/// Formats command arguments into a fixed capacity string.
///
/// Output that does not fit is [`Error::InvalidParam`].
///
/// ```
/// let args = sim800x::at::build_args::<8>(format_args!("{},{}", 3, 0)).unwrap();
/// assert_eq!(args, "3,0");
/// ```
pub fn build_args<const N: usize>(args: fmt::Arguments<'_>) -> Result<heapless::String<N>> {
    let mut out = heapless::String::new();
    out.write_fmt(args).map_err(|_| Error::InvalidParam)?;
    Ok(out)
}

/// Deserializes the parameter list of a reply or URC, i.e. the text after `+CMD: `.
///
/// ```
/// # #[derive(serde::Deserialize)]
/// # struct Csq { rssi: u8, ber: u8 }
/// let csq: Csq = sim800x::at::from_params("15,2").unwrap();
/// assert_eq!((csq.rssi, csq.ber), (15, 2));
/// ```
pub fn from_params<T: DeserializeOwned>(params: &str) -> Result<T> {
    serde_at::from_slice(params.trim().as_bytes()).map_err(|e| {
        log::debug!("MODEM could not parse parameters {:?}: {:?}", params, e);
        Error::WrongFormat
    })
}
