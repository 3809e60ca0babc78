use alloc::{
    collections::VecDeque,
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use modem_types::{DateTime, DeleteFlag, ReadMode, SignalQuality, SmsStatus};

use super::*;
use crate::{Error, Result};

/// Replays scripted replies, one per `receive`.
#[derive(Default)]
struct MockTransport {
    replies: VecDeque<Result<Vec<u8>>>,
    sent: Vec<u8>,
    timeouts: Vec<u32>,
}

impl Transport for MockTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.sent.extend_from_slice(bytes);
        Ok(())
    }

    fn receive(&mut self, buffer: &mut [u8], timeout_ms: u32, _idle: u32) -> Result<usize> {
        self.timeouts.push(timeout_ms);
        match self.replies.pop_front() {
            None => Err(Error::Timeout),
            Some(Err(e)) => Err(e),
            Some(Ok(bytes)) if bytes.len() > buffer.len() => Err(Error::BufferFull),
            Some(Ok(bytes)) => {
                buffer[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
        }
    }
}

fn ticks() -> u32 {
    7
}

fn modem(replies: &[&[u8]]) -> Modem<MockTransport, fn() -> u32> {
    let transport = MockTransport {
        replies: replies.iter().map(|r| Ok(r.to_vec())).collect(),
        ..Default::default()
    };
    Modem::new(transport, ticks as fn() -> u32, Config::default())
}

fn urc_lines<T: Transport, C: Clock>(modem: &mut Modem<T, C>) -> Vec<String> {
    let mut lines = Vec::new();
    modem.handle_urcs(|urc| lines.push(urc.text));
    lines
}

#[test]
fn signal_quality() {
    let mut modem = modem(&[b"\r\n+CSQ: 15,2\r\n\r\nOK\r\n"]);
    assert_eq!(
        modem.get_signal_quality(),
        Ok(SignalQuality { rssi: -84, ber: 2 })
    );
    assert_eq!(modem.transport.sent, b"AT+CSQ\r");
    assert!(modem.urcs().is_empty());
}

#[test]
fn clock_round_trip() {
    let mut modem = modem(&[
        b"\r\nOK\r\n",
        b"\r\n+CCLK: \"23/06/15,10:30:00+08\"\r\n\r\nOK\r\n",
    ]);
    let time = DateTime {
        year: 23,
        month: 6,
        day: 15,
        hour: 10,
        minute: 30,
        second: 0,
        zone: 8,
    };

    modem.set_clock(&time).unwrap();
    assert_eq!(modem.get_clock(), Ok(time));
    assert_eq!(
        modem.transport.sent,
        b"AT+CCLK=\"23/06/15,10:30:00+08\"\rAT+CCLK?\r"
    );
}

#[test]
fn invalid_clock_is_not_sent() {
    let mut modem = modem(&[]);
    let time = DateTime {
        year: 23,
        month: 2,
        day: 29,
        ..Default::default()
    };
    assert_eq!(modem.set_clock(&time), Err(Error::InvalidParam));
    assert!(modem.transport.sent.is_empty());
}

#[test]
fn error_reply_is_queued() {
    let mut modem = modem(&[b"\r\nERROR\r\n"]);
    assert_eq!(modem.get_signal_quality(), Err(Error::ModemError));
    assert_eq!(urc_lines(&mut modem), vec!["ERROR"]);
}

#[test]
fn standard_keeps_surrounding_lines() {
    let mut modem = modem(&[b"\r\nNO CARRIER\r\n\r\nOK\r\n\r\nRING\r\n"]);
    modem.hang_up().unwrap();
    assert_eq!(modem.transport.sent, b"ATH\r");
    assert_eq!(urc_lines(&mut modem), vec!["NO CARRIER", "RING"]);
}

#[test]
fn standard_without_terminal_line() {
    let mut modem = modem(&[b"\r\nRING\r\n\r\n+CLIP: \"123\"\r\n"]);
    assert_eq!(modem.answer_call(), Err(Error::Unknown));
    assert_eq!(urc_lines(&mut modem), vec!["RING", "+CLIP: \"123\""]);
}

#[test]
fn standard_on_tokens() {
    let mut modem = modem(&[]);
    assert_eq!(modem.standard(&["+CME ERROR: 10", "OK"]), Err(Error::ModemError));
    assert_eq!(modem.standard(&["OK"]), Ok(()));
    assert_eq!(modem.standard(&[]), Err(Error::Unknown));
    assert_eq!(urc_lines(&mut modem), vec!["+CME ERROR: 10", "OK"]);
}

#[test]
fn at_needs_a_lone_ok() {
    let mut modem = modem(&[b"\r\nOK\r\n", b"\r\nRDY\r\n\r\nOK\r\n"]);
    modem.at().unwrap();
    assert_eq!(modem.at(), Err(Error::Unknown));
    assert_eq!(modem.transport.sent, b"AT\rAT\r");
    assert_eq!(urc_lines(&mut modem), vec!["RDY"]);
}

#[test]
fn first_last_prefix_mismatch() {
    let mut modem = modem(&[b"\r\n+CREG: 1\r\n\r\nOK\r\n"]);
    assert_eq!(modem.get_signal_quality(), Err(Error::Unknown));
    assert_eq!(urc_lines(&mut modem), vec!["+CREG: 1", "OK"]);
}

#[test]
fn first_last_needs_trailing_ok() {
    let mut modem = modem(&[b"\r\n+CSQ: 15,2\r\n\r\nRING\r\n"]);
    assert_eq!(modem.get_signal_quality(), Err(Error::Unknown));
    assert_eq!(urc_lines(&mut modem), vec!["+CSQ: 15,2", "RING"]);
}

#[test]
fn first_last_with_zero_lines_is_rejected() {
    let mut modem = modem(&[b"\r\nOK\r\n"]);
    let result = modem.first_last_token::<16, _>(0, 10, CommandType::Execute, "+CSQ", "", |_| Ok(()));
    assert_eq!(result, Err(Error::InvalidParam));
    assert!(modem.transport.sent.is_empty());
}

#[test]
fn first_last_single_line() {
    let mut modem = modem(&[b"\r\n+CPIN: READY\r\n"]);
    let status = modem.first_last_token::<32, _>(1, 10, CommandType::Read, "+CPIN", "", |tokens| {
        Ok(tokens[0].to_string())
    });
    assert_eq!(status.as_deref(), Ok("READY"));
    assert_eq!(modem.transport.sent, b"AT+CPIN?\r");
}

#[test]
fn identification_strings() {
    let mut modem = modem(&[b"\r\nSIMCOM_Ltd\r\n\r\nOK\r\n", b"\r\n868345037081776\r\n\r\nOK\r\n"]);
    assert_eq!(modem.get_brand().unwrap(), "SIMCOM_Ltd");
    assert_eq!(modem.get_imei().unwrap(), "868345037081776");
    assert_eq!(modem.transport.sent, b"AT+CGMI\rAT+CGSN\r");
}

#[test]
fn str_token_truncates() {
    let mut modem = modem(&[b"\r\nSIMCOM_Ltd\r\n\r\nOK\r\n"]);
    let brand = modem.str_token::<32, 4>(10, CommandType::Execute, "+CGMI", "");
    assert_eq!(brand.as_deref(), Ok("SIMC"));
}

#[test]
fn str_token_framing_mismatch() {
    let mut modem = modem(&[b"\r\nERROR\r\n", b"SIMCOM_Ltd\r\nOK\r\n"]);
    assert_eq!(modem.get_model(), Err(Error::ModemError));
    assert_eq!(modem.get_revision(), Err(Error::Unknown));
    assert_eq!(urc_lines(&mut modem), vec!["ERROR", "SIMCOM_Ltd"]);
}

#[test]
fn transport_errors_pass_through() {
    let mut modem = modem(&[]);
    modem.transport.replies.push_back(Err(Error::Uart));
    assert_eq!(modem.at(), Err(Error::Uart));
    assert_eq!(modem.at(), Err(Error::Timeout));
    assert!(modem.urcs().is_empty());
}

#[test]
fn oversized_reply() {
    let long = format!("\r\n+CSQ: {}\r\n\r\nOK\r\n", "9".repeat(64));
    let mut modem = modem(&[long.as_bytes()]);
    assert_eq!(modem.get_signal_quality(), Err(Error::BufferFull));
}

#[test]
fn non_utf8_reply_is_queued_lossy() {
    let mut modem = modem(&[b"\r\n\xff\r\n\r\nOK\r\n"]);
    assert_eq!(modem.at(), Err(Error::WrongFormat));
    let lines = urc_lines(&mut modem);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains('\u{FFFD}'));
}

#[test]
fn sms_is_sent_after_prompt() {
    let mut modem = modem(&[b"\r\n> ", b"\r\n+CMGS: 12\r\n\r\nOK\r\n"]);
    assert_eq!(modem.send_sms("+98912", b"Hi"), Ok(12));
    assert_eq!(modem.transport.sent, b"AT+CMGS=\"+98912\"\r4869\x1A");
    assert_eq!(modem.transport.timeouts, vec![100, 60_000]);
}

#[test]
fn sms_without_prompt_is_aborted() {
    let mut modem = modem(&[b"\r\nERROR\r\n"]);
    assert_eq!(modem.send_sms("+98912", b"Hi"), Err(Error::ModemError));
    assert_eq!(modem.transport.sent, b"AT+CMGS=\"+98912\"\r\x1B");
    assert_eq!(modem.transport.timeouts.len(), 1);
}

#[test]
fn sms_prompt_timeout_is_aborted() {
    let mut modem = modem(&[]);
    assert_eq!(modem.send_sms("123", b""), Err(Error::Timeout));
    assert_eq!(modem.transport.sent.last(), Some(&0x1B));
}

#[test]
fn sms_parameters_are_checked() {
    let mut modem = modem(&[]);
    assert_eq!(modem.send_sms("", b"Hi"), Err(Error::InvalidParam));
    assert_eq!(modem.send_sms("0912 345", b"Hi"), Err(Error::InvalidParam));
    assert_eq!(modem.send_sms("123", &[b'a'; 161]), Err(Error::InvalidParam));
    assert!(modem.transport.sent.is_empty());
}

#[test]
fn read_and_delete_sms() {
    let mut modem = modem(&[
        b"\r\n+CMGR: \"REC UNREAD\",\"3132\",\"\",\"23/06/15,10:30:00+08\"\r\n4869\r\n\r\nOK\r\n",
        b"\r\nOK\r\n",
    ]);

    let sms = modem.read_sms(3, ReadMode::NoChange).unwrap();
    assert_eq!(sms.status, SmsStatus::ReceivedUnread);
    assert_eq!(sms.sender, "12");
    assert_eq!(sms.text, b"Hi");

    modem.delete_sms(3, DeleteFlag::All).unwrap();
    assert_eq!(modem.transport.sent, b"AT+CMGR=3,1\rAT+CMGD=3,4\r");
}

#[test]
fn empty_sms_slot() {
    let mut modem = modem(&[b"\r\nOK\r\n"]);
    assert_eq!(modem.read_sms(9, ReadMode::Normal), Err(Error::Unknown));
}

#[test]
fn dial_number() {
    let mut modem = modem(&[b"\r\nOK\r\n"]);
    modem.dial("+98912").unwrap();
    assert_eq!(modem.transport.sent, b"ATD+98912;\r");
    assert_eq!(modem.dial("12;H"), Err(Error::InvalidParam));
}

#[test]
fn ussd_reply_after_ok() {
    let mut modem = modem(&[
        b"\r\nOK\r\n",
        b"\r\n+CUSD: 0,\"Balance 10\",15\r\n",
        b"\r\nOK\r\n",
    ]);
    assert_eq!(modem.send_ussd("*140#").as_deref(), Ok("Balance 10"));
    assert_eq!(modem.transport.sent, b"AT+CUSD=1,\"*140#\"\rAT+CUSD=2\r");
    assert_eq!(modem.transport.timeouts, vec![10, 10_000, 10]);
}

#[test]
fn ussd_reply_with_ok() {
    let mut modem = modem(&[
        b"\r\nOK\r\n\r\n+CUSD: 0,\"Hi\",15\r\n",
        b"\r\nOK\r\n",
    ]);
    assert_eq!(modem.send_ussd("*1#").as_deref(), Ok("Hi"));
    assert_eq!(modem.transport.timeouts, vec![10, 10]);
}

#[test]
fn ussd_close_failure_is_ignored() {
    let mut modem = modem(&[b"\r\nOK\r\n", b"\r\n+CUSD: 0,\"Hi\",15\r\n\r\nOK\r\n"]);
    assert_eq!(modem.send_ussd("*1#").as_deref(), Ok("Hi"));
}

#[test]
fn delayed_failures() {
    let mut modem = modem(&[
        b"\r\nOK\r\n",
        b"\r\nSEND FAIL\r\n",
        b"\r\nOK\r\n",
        b"\r\n+CME ERROR: 100\r\n\r\nOK\r\n",
        b"\r\nERROR\r\n",
    ]);
    let call = |modem: &mut Modem<MockTransport, fn() -> u32>| {
        modem.delayed_response::<64, _>(10, 50, CommandType::Write, "+X", "1", |line| {
            Ok(line.len())
        })
    };

    assert_eq!(call(&mut modem), Err(Error::Fail));
    assert_eq!(call(&mut modem), Err(Error::ModemError));
    assert_eq!(call(&mut modem), Err(Error::ModemError));
    assert_eq!(modem.transport.timeouts, vec![10, 50, 10, 50, 10]);
    assert_eq!(
        urc_lines(&mut modem),
        vec!["SEND FAIL", "+CME ERROR: 100", "ERROR"]
    );
}

#[test]
fn unsolicited_blocks_keep_order() {
    let mut modem = modem(&[b"\r\nRING\r\n\r\nOK\r\n"]);
    modem.push_unsolicited(b"\r\n+CMTI: \"SM\",1\r\n");
    modem.answer_call().unwrap();
    modem.push_unsolicited(b"\r\nNO CARRIER\r\n");

    let mut seen = Vec::new();
    modem.handle_urcs(|urc| seen.push((urc.text, urc.timestamp)));
    assert_eq!(
        seen,
        vec![
            ("+CMTI: \"SM\",1".to_string(), 7),
            ("RING".to_string(), 7),
            ("NO CARRIER".to_string(), 7),
        ]
    );
}

#[test]
fn setup_tolerates_echo() {
    let echo = format!("AT{}\r", super::general::SETUP);
    let reply = format!("{}\r\nOK\r\n", echo);
    let mut modem = modem(&[reply.as_bytes()]);
    assert_eq!(modem.setup(), Ok(()));
    assert_eq!(modem.transport.sent, echo.as_bytes());
    assert_eq!(urc_lines(&mut modem), vec![echo]);
    assert_eq!(modem.transport.timeouts, vec![10_000]);
}
