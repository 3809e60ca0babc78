#![allow(dead_code)]

use std::collections::VecDeque;

use sim800x::{Config, Error, Modem, Result, Transport};

/// Modem stand-in answering each `receive` with the next scripted reply.
#[derive(Debug, Default)]
pub struct ScriptedModem {
    replies: VecDeque<Vec<u8>>,
    pub sent: Vec<u8>,
    pub receives: usize,
}

impl ScriptedModem {
    pub fn new(replies: &[&[u8]]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_vec()).collect(),
            ..Default::default()
        }
    }

    pub fn sent_str(&self) -> String {
        String::from_utf8_lossy(&self.sent).into_owned()
    }
}

impl Transport for ScriptedModem {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.sent.extend_from_slice(bytes);
        Ok(())
    }

    fn receive(&mut self, buffer: &mut [u8], _timeout: u32, _idle: u32) -> Result<usize> {
        self.receives += 1;
        let reply = self.replies.pop_front().ok_or(Error::Timeout)?;
        if reply.len() > buffer.len() {
            return Err(Error::BufferFull);
        }
        buffer[..reply.len()].copy_from_slice(&reply);
        Ok(reply.len())
    }
}

pub fn ticks() -> u32 {
    1000
}

pub fn modem(script: &mut ScriptedModem) -> Modem<&mut ScriptedModem, fn() -> u32> {
    Modem::new(script, ticks as fn() -> u32, Config::default())
}

pub fn drain(modem: &mut Modem<&mut ScriptedModem, fn() -> u32>) -> Vec<String> {
    let mut lines = Vec::new();
    modem.handle_urcs(|urc| lines.push(urc.text));
    lines
}
