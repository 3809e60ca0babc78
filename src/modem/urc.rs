use alloc::{
    collections::VecDeque,
    string::{String, ToString},
    vec::Vec,
};
use core::ops::ControlFlow;

use modem_types::{
    DaylightSavingTime, Functionality, LocalTimestamp, NewMessageIndication, Registration,
};

use crate::at::{from_params, tokenize_with, SEPARATOR};

/// A line the modem sent outside of an expected reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urc {
    pub text: String,
    /// [`Clock`](super::interface::Clock) tick at capture
    pub timestamp: u32,
}

impl Urc {
    pub fn new(text: impl Into<String>, timestamp: u32) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn strip_prefix(&self, prefix: &str) -> Option<&str> {
        self.text.strip_prefix(prefix)
    }

    pub fn kind(&self) -> UrcKind<'_> {
        UrcKind::parse(&self.text)
    }
}

/// Well known SIM800 unsolicited lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrcKind<'a> {
    Ready,
    CallReady,
    SmsReady,
    Ring,
    NoCarrier,
    /// `+CPIN: READY`
    PinStatus(&'a str),
    /// `+CFUN: 1`
    Functionality(Functionality),
    /// `+CMTI: "SM",3`
    NewMessage(NewMessageIndication),
    /// `+CREG: 1[,"lac","ci"]`
    Registration(Registration),
    /// `*PSUTTZ: 2024,11,20,20,4,48,"+4",0`
    LocalTimestamp(LocalTimestamp),
    /// `DST: 0`
    DaylightSavingTime(DaylightSavingTime),
    // +CIEV: 10,"21630","Telekom HU","THU", 0, 0
    IndicatorEvent(&'a str),
    Other(&'a str),
}

impl<'a> UrcKind<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line {
            "RDY" => return Self::Ready,
            "Call Ready" => return Self::CallReady,
            "SMS Ready" => return Self::SmsReady,
            "RING" => return Self::Ring,
            "NO CARRIER" => return Self::NoCarrier,
            _ => {}
        }

        let Some((name, params)) = line.split_once(": ") else {
            return Self::Other(line);
        };
        let parsed = match name {
            "+CPIN" => Ok(Self::PinStatus(params)),
            "+CFUN" => from_params(params).map(Self::Functionality),
            "+CMTI" => from_params(params).map(Self::NewMessage),
            "+CREG" => from_params(params).map(Self::Registration),
            "*PSUTTZ" => from_params(params).map(Self::LocalTimestamp),
            "DST" => from_params(params).map(Self::DaylightSavingTime),
            "+CIEV" => Ok(Self::IndicatorEvent(params)),
            _ => return Self::Other(line),
        };
        parsed.unwrap_or(Self::Other(line))
    }
}

#[derive(Debug)]
enum Entry {
    Line(Urc),
    /// Block captured out of band, split into lines when drained
    Raw { bytes: Vec<u8>, timestamp: u32 },
}

/// FIFO of unsolicited lines waiting for the application.
#[derive(Debug, Default)]
pub struct UrcQueue {
    entries: VecDeque<Entry>,
}

impl UrcQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str, timestamp: u32) {
        log::debug!("MODEM URC queued: {}", line);
        self.entries.push_back(Entry::Line(Urc::new(line, timestamp)));
    }

    pub fn extend<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>, timestamp: u32) {
        for line in lines {
            self.push(line, timestamp);
        }
    }

    /// Queues an unparsed block, e.g. from an idle line DMA capture.
    pub fn push_raw(&mut self, bytes: &[u8], timestamp: u32) {
        if bytes.is_empty() {
            return;
        }
        self.entries.push_back(Entry::Raw {
            bytes: bytes.to_vec(),
            timestamp,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries still queued. A raw block counts as one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Hands every queued line to `handler`, oldest first. Each entry is removed before
    /// its lines are delivered.
    pub fn drain(&mut self, mut handler: impl FnMut(Urc)) {
        while let Some(entry) = self.entries.pop_front() {
            match entry {
                Entry::Line(urc) => handler(urc),
                Entry::Raw { bytes, timestamp } => {
                    let text = String::from_utf8_lossy(&bytes);
                    let _ = tokenize_with(&text, SEPARATOR, true, |line| {
                        handler(Urc::new(line.to_string(), timestamp));
                        ControlFlow::<()>::Continue(())
                    });
                }
            }
        }
    }
}
