use alloc::string::String;

use super::*;
use crate::{
    at::{tokenize, SEPARATOR},
    Error,
};

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    /// Sends a command and hands the reply text to `op` together with the URC queue and
    /// the capture time.
    fn exchange<const LEN: usize, R>(
        &mut self,
        timeout: u32,
        ty: CommandType,
        cmd: &str,
        args: &str,
        op: impl FnOnce(&mut UrcQueue, u32, &str) -> Result<R>,
    ) -> Result<R> {
        let mut buffer = [0u8; LEN];
        let len = self.command(timeout, ty, cmd, args, &mut buffer)?;
        let timestamp = self.clock.now_ms();

        match core::str::from_utf8(&buffer[..len]) {
            Ok(text) => op(&mut self.urcs, timestamp, text),
            Err(_) => {
                log::warn!("MODEM reply to AT{} is not valid UTF-8", cmd);
                let text = String::from_utf8_lossy(&buffer[..len]);
                self.urcs.push(&text, timestamp);
                Err(Error::WrongFormat)
            }
        }
    }

    /// Classifies already tokenized reply lines, see [`standard`].
    pub fn standard(&mut self, tokens: &[&str]) -> Result<()> {
        let timestamp = self.clock.now_ms();
        standard(&mut self.urcs, timestamp, tokens)
    }

    /// Reply is classified by [`standard`].
    pub fn tokens<const LEN: usize>(
        &mut self,
        timeout: u32,
        ty: CommandType,
        cmd: &str,
        args: &str,
    ) -> Result<()> {
        self.exchange::<LEN, _>(timeout, ty, cmd, args, |urcs, timestamp, text| {
            standard(urcs, timestamp, &tokenize(text, SEPARATOR, true))
        })
    }

    /// Reply must be exactly one line equal to `expected`.
    ///
    /// An unterminated last line counts, so prompts like `> ` can be matched.
    pub fn single_token<const LEN: usize>(
        &mut self,
        timeout: u32,
        ty: CommandType,
        cmd: &str,
        args: &str,
        expected: &str,
    ) -> Result<()> {
        self.exchange::<LEN, _>(timeout, ty, cmd, args, |urcs, timestamp, text| {
            let tokens = tokenize(text, SEPARATOR, false);
            match tokens.as_slice() {
                [token] if *token == expected => Ok(()),
                _ => Err(mismatch(urcs, timestamp, &tokens)),
            }
        })
    }

    /// Reply must be exactly `expected` lines, the first starting with `<cmd>: ` and,
    /// for more than one line, the last being `OK`.
    ///
    /// `op` gets every line but the trailing `OK`, with the prefix removed from the
    /// first one.
    pub fn first_last_token<const LEN: usize, R>(
        &mut self,
        expected: usize,
        timeout: u32,
        ty: CommandType,
        cmd: &str,
        args: &str,
        op: impl FnOnce(&[&str]) -> Result<R>,
    ) -> Result<R> {
        if expected == 0 {
            return Err(Error::InvalidParam);
        }

        self.exchange::<LEN, _>(timeout, ty, cmd, args, |urcs, timestamp, text| {
            let mut tokens = tokenize(text, SEPARATOR, true);
            if tokens.len() != expected {
                return Err(mismatch(urcs, timestamp, &tokens));
            }

            let first = tokens[0]
                .strip_prefix(cmd)
                .and_then(|rest| rest.strip_prefix(": "));
            let ends_ok = expected == 1 || tokens[expected - 1] == "OK";

            match first {
                Some(first) if ends_ok => {
                    tokens[0] = first;
                    if expected > 1 {
                        tokens.pop();
                    }
                    op(&tokens)
                }
                _ => {
                    log::warn!("MODEM unexpected {} reply, queued as URC", cmd);
                    urcs.extend(tokens.iter().copied(), timestamp);
                    Err(Error::Unknown)
                }
            }
        })
    }

    /// For commands acknowledged with `OK` whose result line arrives later.
    ///
    /// If the result is not already part of the first reply, a second read waits up to
    /// `delayed_timeout` for it without sending anything. A result containing `ERROR`
    /// is [`Error::ModemError`], one containing `FAIL` is [`Error::Fail`], anything else
    /// goes to `op`.
    pub fn delayed_response<const LEN: usize, R>(
        &mut self,
        timeout: u32,
        delayed_timeout: u32,
        ty: CommandType,
        cmd: &str,
        args: &str,
        op: impl FnOnce(&str) -> Result<R>,
    ) -> Result<R> {
        let early = self.exchange::<LEN, _>(timeout, ty, cmd, args, |urcs, timestamp, text| {
            let tokens = tokenize(text, SEPARATOR, true);
            match tokens.as_slice() {
                ["OK"] => Ok(None),
                ["OK", line] => Ok(Some(String::from(*line))),
                _ => Err(mismatch(urcs, timestamp, &tokens)),
            }
        })?;

        let line = match early {
            Some(line) => line,
            None => self.exchange::<LEN, _>(
                delayed_timeout,
                CommandType::Bare,
                cmd,
                "",
                |urcs, timestamp, text| {
                    let tokens = tokenize(text, SEPARATOR, true);
                    match tokens.as_slice() {
                        [line] | [line, "OK"] => Ok(String::from(*line)),
                        _ => Err(mismatch(urcs, timestamp, &tokens)),
                    }
                },
            )?,
        };

        let failure = match line.as_str() {
            l if l.contains("ERROR") => Some(Error::ModemError),
            l if l.contains("FAIL") => Some(Error::Fail),
            _ => None,
        };
        if let Some(e) = failure {
            let timestamp = self.clock.now_ms();
            self.urcs.push(&line, timestamp);
            return Err(e);
        }

        op(&line)
    }

    /// For replies carrying one literal string, `\r\n<body>\r\n\r\nOK\r\n`.
    ///
    /// The body is returned as is, truncated to `OUT` bytes.
    pub fn str_token<const LEN: usize, const OUT: usize>(
        &mut self,
        timeout: u32,
        ty: CommandType,
        cmd: &str,
        args: &str,
    ) -> Result<heapless::String<OUT>> {
        const HEAD: &str = "\r\n";
        const TAIL: &str = "\r\n\r\nOK\r\n";

        self.exchange::<LEN, _>(timeout, ty, cmd, args, |urcs, timestamp, text| {
            let Some(body) = text
                .strip_prefix(HEAD)
                .and_then(|rest| rest.strip_suffix(TAIL))
            else {
                return Err(mismatch(
                    urcs,
                    timestamp,
                    &tokenize(text, SEPARATOR, true),
                ));
            };

            let mut out = heapless::String::new();
            for c in body.chars() {
                if out.push(c).is_err() {
                    log::warn!("MODEM AT{} reply truncated to {} bytes", cmd, OUT);
                    break;
                }
            }
            Ok(out)
        })
    }
}

/// Scans for the first `OK` or `...ERROR...` line.
///
/// Every other line, before and after it, is queued as a URC. An `ERROR` line is queued
/// too so the error detail survives. No terminal line at all is [`Error::Unknown`].
pub(crate) fn standard(urcs: &mut UrcQueue, timestamp: u32, tokens: &[&str]) -> Result<()> {
    for (i, token) in tokens.iter().enumerate() {
        let result = if *token == "OK" {
            Ok(())
        } else if token.contains("ERROR") {
            urcs.push(token, timestamp);
            Err(Error::ModemError)
        } else {
            urcs.push(token, timestamp);
            continue;
        };

        urcs.extend(tokens[i + 1..].iter().copied(), timestamp);
        return result;
    }

    Err(Error::Unknown)
}

/// Reply does not have the expected shape. Lines are queued by [`standard`], whose
/// success is still [`Error::Unknown`].
fn mismatch(urcs: &mut UrcQueue, timestamp: u32, tokens: &[&str]) -> Error {
    log::warn!(
        "MODEM unexpected reply shape, {} line(s) queued as URC",
        tokens.len()
    );
    match standard(urcs, timestamp, tokens) {
        Ok(()) => Error::Unknown,
        Err(e) => e,
    }
}
