/// Failure of a single command exchange.
///
/// Transport level: [`Error::Uart`], [`Error::Timeout`], [`Error::BufferFull`],
/// [`Error::Abort`]. Protocol level: [`Error::WrongFormat`], [`Error::ModemError`],
/// [`Error::Fail`], [`Error::Unknown`]. Caller misuse: [`Error::InvalidParam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter")]
    InvalidParam,
    #[error("serial transport error")]
    Uart,
    #[error("timed out waiting for the modem")]
    Timeout,
    #[error("reply does not match the expected format")]
    WrongFormat,
    #[error("modem replied ERROR")]
    ModemError,
    #[error("modem accepted the command but it failed")]
    Fail,
    #[error("receive buffer full")]
    BufferFull,
    #[error("aborted")]
    Abort,
    #[error("unrecognized reply")]
    Unknown,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

impl From<embedded_io::ErrorKind> for Error {
    fn from(kind: embedded_io::ErrorKind) -> Self {
        use embedded_io::ErrorKind;
        match kind {
            ErrorKind::TimedOut => Error::Timeout,
            ErrorKind::Interrupted => Error::Abort,
            ErrorKind::OutOfMemory => Error::BufferFull,
            _ => Error::Uart,
        }
    }
}
