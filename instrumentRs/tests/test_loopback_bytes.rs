//! Test cases for the LoopbackInterfaceBytes, including binary block reads.

use rstest::*;

use instrumentrs::{InstrumentError, InstrumentInterface, LoopbackInterfaceBytes};

/// A function that creates a new `LoopbackInterfaceBytes` with the given input and output vectors.
fn crt_lbk(input: Vec<Vec<u8>>, output: Vec<Vec<u8>>) -> LoopbackInterfaceBytes {
    LoopbackInterfaceBytes::new(input, output)
}

/// Create a loopback interface that contains no commands.
#[fixture]
fn emp_lbk() -> LoopbackInterfaceBytes {
    crt_lbk(vec![], vec![])
}

/// Ensure `finalize` method passes if an empty loopback interface is used.
///
/// This routine calls the finalize method manually, however, it is not necessary to do so as it is
/// implemented in the `Drop` trait for `LoopbackInterfaceBytes`.
#[rstest]
fn finalize_test(mut emp_lbk: LoopbackInterfaceBytes) {
    emp_lbk.finalize();
}

/// Ensure the loopback panics if bytes are left in the loopback interface.
///
/// Note that the finalize method is called in the `Drop` trait, so it is not necessary to call it
/// directly.
#[rstest]
#[case(vec![vec![0x01]], vec![])]
#[case(vec![], vec![vec![0x02]])]
#[case(vec![vec![0x01]], vec![vec![0x02]])]
#[should_panic]
fn finalize_test_panic(#[case] from_host: Vec<Vec<u8>>, #[case] from_inst: Vec<Vec<u8>>) {
    let _ = crt_lbk(from_host, from_inst);
}

#[rstest]
fn write_raw() {
    let mut lbk = crt_lbk(vec![vec![0x01], vec![0x02]], vec![]);
    lbk.write_raw(&[0x01]).unwrap();
    lbk.write_raw(&[0x02]).unwrap();
}

#[rstest]
#[should_panic]
fn write_raw_mismatch() {
    let mut lbk = crt_lbk(vec![vec![0x01]], vec![]);
    let _ = lbk.write_raw(&[0x03]);
}

#[rstest]
fn read_exact() {
    let mut lbk = crt_lbk(vec![vec![0x01], vec![0x02]], vec![vec![0x11], vec![0x22]]);
    lbk.write_raw(&[0x01]).unwrap();
    let mut resp1 = [0u8; 1];
    lbk.read_exact(&mut resp1).unwrap();
    assert_eq!(resp1, [0x11]);

    lbk.write_raw(&[0x02]).unwrap();
    let mut resp2 = [0u8; 1];
    lbk.read_exact(&mut resp2).unwrap();
    assert_eq!(resp2, [0x22]);
}

/// Textual queries work on the bytes loopback as the terminator is part of the scripted bytes.
#[rstest]
fn query_text() {
    let mut lbk = crt_lbk(
        vec![b":WAVeform:STATus?\n".to_vec()],
        vec![b"IDLE,1400\n".to_vec()],
    );
    assert_eq!(lbk.query(":WAVeform:STATus?").unwrap(), "IDLE,1400");
}

/// A block whose body contains the terminator byte is read completely.
#[rstest]
fn read_block_binary_body() {
    let body = vec![b'\n', 0x00, 0xff, b'\n'];
    let mut lbk = crt_lbk(vec![], vec![b"#9000000004".to_vec(), body.clone(), b"\n".to_vec()]);

    let block = lbk.read_block().unwrap();
    assert_eq!(&block[..11], b"#9000000004");
    assert_eq!(&block[11..15], body.as_slice());
    assert_eq!(&block[15..], b"\n");
}

/// Bytes that trail the declared body are returned as well, such that the caller can detect them.
#[rstest]
fn read_block_trailing_bytes() {
    let mut lbk = crt_lbk(vec![], vec![b"#15abcdefg\n".to_vec()]);
    let block = lbk.read_block().unwrap();
    assert_eq!(block, b"#15abcdefg\n".to_vec());
}

#[rstest]
#[case(b"X9".to_vec())]
#[case(b"#0".to_vec())]
fn read_block_bad_header(#[case] head: Vec<u8>) {
    let mut lbk = crt_lbk(vec![], vec![head]);
    match lbk.read_block() {
        Err(InstrumentError::CommunicationError(_)) => {}
        _ => panic!("Expected CommunicationError"),
    }
}

#[rstest]
fn read_block_bad_length() {
    let mut lbk = crt_lbk(vec![], vec![b"#2x1".to_vec()]);
    assert!(matches!(
        lbk.read_block(),
        Err(InstrumentError::CommunicationError(_))
    ));
}
