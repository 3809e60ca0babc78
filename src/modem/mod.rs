//! SIM800 series modem over a blocking [`Transport`].
//!
//! One command is in flight at a time: every method sends its command, blocks until the
//! reply is read or times out, and classifies it. Lines that are not part of the
//! expected reply end up in the [`UrcQueue`].

use alloc::string::String;

use crate::{at::CommandType, Config, Result};

mod call;
mod general;
pub mod interface;
mod response;
mod sms;
pub mod urc;

#[cfg(test)]
mod tests;

pub use interface::{Clock, SerialTransport, Transport};
pub use urc::{Urc, UrcKind, UrcQueue};

pub const DEFAULT_RESPONSE_LEN: usize = 32;

/// Echo must be off (`ATE0`, done by [`Modem::setup`]) for replies to parse.
pub struct Modem<T, C> {
    transport: T,
    clock: C,
    config: Config,
    urcs: UrcQueue,
}

impl<T, C> Modem<T, C>
where
    T: Transport,
    C: Clock,
{
    pub fn new(transport: T, clock: C, config: Config) -> Self {
        Self {
            transport,
            clock,
            config,
            urcs: UrcQueue::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> (T, C) {
        (self.transport, self.clock)
    }

    pub fn urcs(&self) -> &UrcQueue {
        &self.urcs
    }

    /// Queues a block received outside of any command, e.g. by an idle line DMA capture.
    pub fn push_unsolicited(&mut self, bytes: &[u8]) {
        let timestamp = self.clock.now_ms();
        self.urcs.push_raw(bytes, timestamp);
    }

    /// Hands every queued URC to `handler`, oldest first.
    pub fn handle_urcs(&mut self, handler: impl FnMut(Urc)) {
        self.urcs.drain(handler);
    }

    /// Sends one framed command and reads the raw reply into `buffer`.
    ///
    /// Returns the number of reply bytes. Transport errors are passed through unchanged.
    pub fn command(
        &mut self,
        timeout: u32,
        ty: CommandType,
        cmd: &str,
        args: &str,
        buffer: &mut [u8],
    ) -> Result<usize> {
        log::debug!("MODEM TX {:?} AT{} {}", ty, cmd, args);
        for piece in ty.frame(cmd, args) {
            self.transport.send(piece)?;
        }

        let len = self
            .transport
            .receive(buffer, timeout, self.config.idle_timeout)
            .map_err(|e| {
                log::debug!("MODEM RX failed for AT{}: {}", cmd, e);
                e
            })?
            .min(buffer.len());
        log::trace!("MODEM RX {:?}", String::from_utf8_lossy(&buffer[..len]));

        Ok(len)
    }

    /// Writes bytes outside of command framing.
    pub(crate) fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.transport.send(bytes)
    }
}
