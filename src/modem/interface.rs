use embedded_io::{Read, ReadReady, Write};

use crate::{Error, Result};

/// Byte level link to the modem.
pub trait Transport {
    /// Blocking write of the whole slice.
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Receives one reply into `buffer` and returns the number of bytes written.
    ///
    /// Waits up to `timeout_ms` for data, a gap of `idle_timeout_ms` without a new byte
    /// ends the reply. Contents of `buffer` are unspecified on error.
    fn receive(&mut self, buffer: &mut [u8], timeout_ms: u32, idle_timeout_ms: u32)
        -> Result<usize>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).send(bytes)
    }

    fn receive(
        &mut self,
        buffer: &mut [u8],
        timeout_ms: u32,
        idle_timeout_ms: u32,
    ) -> Result<usize> {
        (**self).receive(buffer, timeout_ms, idle_timeout_ms)
    }
}

/// Millisecond tick source. Expected to wrap, differences use `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// [`Transport`] over a blocking `embedded-io` serial port, polling `read_ready` against
/// a [`Clock`].
pub struct SerialTransport<S, C> {
    serial: S,
    clock: C,
}

impl<S, C> SerialTransport<S, C> {
    pub fn new(serial: S, clock: C) -> Self {
        Self { serial, clock }
    }

    pub fn release(self) -> (S, C) {
        (self.serial, self.clock)
    }
}

impl<S, C> Transport for SerialTransport<S, C>
where
    S: Read + Write + ReadReady,
    C: Clock,
{
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.serial.write_all(bytes).map_err(io_error)?;
        self.serial.flush().map_err(io_error)
    }

    fn receive(
        &mut self,
        buffer: &mut [u8],
        timeout_ms: u32,
        idle_timeout_ms: u32,
    ) -> Result<usize> {
        if buffer.is_empty() {
            return Err(Error::InvalidParam);
        }

        let start = self.clock.now_ms();
        let mut last_byte = start;
        let mut received = 0;

        loop {
            if self.serial.read_ready().map_err(io_error)? {
                if received == buffer.len() {
                    log::warn!("MODEM reply does not fit {} bytes", buffer.len());
                    return Err(Error::BufferFull);
                }

                let n = self.serial.read(&mut buffer[received..]).map_err(io_error)?;
                if n > 0 {
                    received += n;
                    last_byte = self.clock.now_ms();
                    if last_byte.wrapping_sub(start) >= timeout_ms {
                        return Ok(received);
                    }
                    continue;
                }
            }

            let now = self.clock.now_ms();
            if received == 0 {
                if now.wrapping_sub(start) >= timeout_ms {
                    return Err(Error::Timeout);
                }
            } else if now.wrapping_sub(last_byte) >= idle_timeout_ms
                || now.wrapping_sub(start) >= timeout_ms
            {
                return Ok(received);
            }
        }
    }
}

fn io_error<E: embedded_io::Error>(e: E) -> Error {
    log::error!("MODEM serial error: {:?}", e);
    e.kind().into()
}
