//! Tests for the [`Instrument`] wrapper around a byte port.
//!
//! A `VecDeque<u8>` serves as port: writes are appended at the back and reads drain the front,
//! so pre-filling it stands in for an instrument that already sent its answer.

use std::{collections::VecDeque, time::Duration};

use rstest::*;

use instrumentrs::{Instrument, InstrumentError, InstrumentInterface};

type PortInst = Instrument<VecDeque<u8>>;

/// Create an instrument whose port already holds the given bytes.
fn crt_inst(pending: &[u8], timeout: Duration) -> PortInst {
    Instrument::new(VecDeque::from(pending.to_vec()), timeout)
}

#[fixture]
fn emp_inst() -> PortInst {
    crt_inst(&[], Duration::from_secs(3))
}

#[rstest]
fn terminator_and_timeout(mut emp_inst: PortInst) {
    assert_eq!(emp_inst.get_terminator(), "\n");
    assert_eq!(emp_inst.get_timeout(), Duration::from_secs(3));

    emp_inst.set_terminator("\r\n");
    assert_eq!(emp_inst.get_terminator(), "\r\n");
}

/// A command written to the port comes back with its terminator stripped.
#[rstest]
#[case("\n")]
#[case("\r\n")]
fn sendcmd_read_back(mut emp_inst: PortInst, #[case] terminator: &str) {
    emp_inst.set_terminator(terminator);
    emp_inst.sendcmd(":WAVeform:DATA?").unwrap();
    assert_eq!(emp_inst.read_until_terminator().unwrap(), ":WAVeform:DATA?");
}

#[rstest]
fn query_timeout() {
    let mut inst = crt_inst(b"partial", Duration::ZERO);
    match inst.query("*IDN?") {
        Err(InstrumentError::TimeoutQuery { query, timeout }) => {
            assert_eq!(query, "*IDN?");
            assert_eq!(timeout, Duration::ZERO);
        }
        other => panic!("Expected a query timeout, got {other:?}"),
    }
}

/// The whole block including header and trailing terminator is returned, even if the body
/// contains terminator bytes.
#[rstest]
#[case(b"#15hello\n")]
#[case(b"#13a\nb\n")]
#[case(b"#9000000000\n")]
fn read_block_complete(#[case] raw: &[u8]) {
    let mut inst = crt_inst(raw, Duration::from_secs(3));
    assert_eq!(inst.read_block().unwrap(), raw.to_vec());
}

/// Only the first block is consumed, the next answer stays in the port.
#[rstest]
fn read_block_leaves_next_answer() {
    let mut inst = crt_inst(b"#12ab\n1\n", Duration::from_secs(3));
    assert_eq!(inst.read_block().unwrap(), b"#12ab\n".to_vec());
    assert_eq!(inst.read_until_terminator().unwrap(), "1");
}

/// A body shorter than its header declares is malformed data.
#[rstest]
#[case(b"#9000000010abc")]
#[case(b"#15hel")]
#[case(b"#210")]
fn read_block_short_body(#[case] raw: &[u8]) {
    let mut inst = crt_inst(raw, Duration::from_secs(3));
    assert!(matches!(
        inst.read_block(),
        Err(InstrumentError::CommunicationError(_))
    ));
}

#[rstest]
#[case(b"15hello\n")]
#[case(b"#0\n")]
#[case(b"#3ab0xyz\n")]
fn read_block_bad_header(#[case] raw: &[u8]) {
    let mut inst = crt_inst(raw, Duration::from_secs(3));
    assert!(matches!(
        inst.read_block(),
        Err(InstrumentError::CommunicationError(_))
    ));
}
