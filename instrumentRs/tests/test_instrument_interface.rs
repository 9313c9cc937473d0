//! Tests for the default implementation of the [`InstrumentInterface`] trait.

use std::{collections::VecDeque, time::Duration};

use rstest::*;

use instrumentrs::{InstrumentError, InstrumentInterface};

/// A minimal interface that only implements the required methods on top of two byte queues.
struct TestInstrument {
    to_inst: Vec<u8>,
    from_inst: VecDeque<u8>,
}

impl InstrumentInterface for TestInstrument {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        for byte in buf.iter_mut() {
            *byte = self.from_inst.pop_front().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no more data")
            })?;
        }
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError> {
        self.to_inst.extend_from_slice(data);
        Ok(())
    }
}

#[fixture]
fn inst() -> TestInstrument {
    TestInstrument {
        to_inst: Vec::new(),
        from_inst: VecDeque::from(b"OK\n".to_vec()),
    }
}

#[rstest]
fn test_default_get_terminator(inst: TestInstrument) {
    assert_eq!(inst.get_terminator(), "\n");
}

#[rstest]
fn test_default_get_timeout(inst: TestInstrument) {
    assert_eq!(inst.get_timeout(), Duration::from_secs(3));
}

#[rstest]
fn test_default_query(mut inst: TestInstrument) {
    assert_eq!(inst.query("*OPC?").unwrap(), "OK");
    assert_eq!(inst.to_inst, b"*OPC?\n".to_vec());
}

#[rstest]
fn test_default_write_has_no_terminator(mut inst: TestInstrument) {
    inst.write("\u{5}").unwrap();
    assert_eq!(inst.to_inst, vec![0x05]);
}

/// Running out of data is an I/O error, not a timeout.
#[rstest]
fn test_default_read_eof() {
    let mut inst = TestInstrument {
        to_inst: Vec::new(),
        from_inst: VecDeque::from(b"NO TERMINATOR".to_vec()),
    };
    assert!(matches!(
        inst.read_until_terminator(),
        Err(InstrumentError::Io(_))
    ));
}
