//! Test cases for the LoopbackInterfaceString.

use rstest::*;

use instrumentrs::{InstrumentInterface, LoopbackInterfaceString};

/// A function that creates a new `LoopbackInterfaceString` with the given input and output
/// vectors and the default terminator.
fn crt_lbk(input: Vec<&str>, output: Vec<&str>) -> LoopbackInterfaceString {
    let input = input.iter().map(|s| s.to_string()).collect();
    let output = output.iter().map(|s| s.to_string()).collect();
    LoopbackInterfaceString::new(input, output, "\n")
}

/// Create a loopback interface that contains no commands.
#[fixture]
fn emp_lbk() -> LoopbackInterfaceString {
    crt_lbk(vec![], vec![])
}

/// Ensure `finalize` method passes if an empty loopback interface is used.
#[rstest]
fn finalize_test(mut emp_lbk: LoopbackInterfaceString) {
    emp_lbk.finalize();
}

/// Ensure the loopback panics on drop if commands are left in the loopback interface.
#[rstest]
#[case(vec!["cmd"], vec![])]
#[case(vec![], vec!["resp"])]
#[case(vec!["cmd"], vec!["resp"])]
#[should_panic]
fn finalize_test_panic(#[case] from_host: Vec<&str>, #[case] from_inst: Vec<&str>) {
    let _ = crt_lbk(from_host, from_inst);
}

#[rstest]
fn sendcmd() {
    let mut lbk = crt_lbk(vec!["channel.open('1101')", "channel.close('1101')"], vec![]);
    lbk.sendcmd("channel.open('1101')").unwrap();
    lbk.sendcmd("channel.close('1101')").unwrap();
}

#[rstest]
#[should_panic]
fn sendcmd_mismatch() {
    let mut lbk = crt_lbk(vec!["cmd1"], vec![]);
    let _ = lbk.sendcmd("cmd3");
}

#[rstest]
fn terminator(mut emp_lbk: LoopbackInterfaceString) {
    assert_eq!(emp_lbk.get_terminator(), "\n");
    emp_lbk.set_terminator("\r\n");
    assert_eq!(emp_lbk.get_terminator(), "\r\n");
}

#[rstest]
fn query() {
    let mut lbk = crt_lbk(vec![":MN?", ":SN?"], vec!["RUDAT-13G-90", "12345"]);
    let resp1 = lbk.query(":MN?").unwrap();
    assert_eq!(resp1, "RUDAT-13G-90");
    let resp2 = lbk.query(":SN?").unwrap();
    assert_eq!(resp2, "12345");
}

/// Whitespace around the answer is stripped, the content in between is not.
#[rstest]
fn query_trims_answer() {
    let mut lbk = crt_lbk(vec!["*IDN?"], vec!["  RIGOL TECHNOLOGIES,DS4024,DS4A0000,00.02.03 "]);
    let resp = lbk.query("*IDN?").unwrap();
    assert_eq!(resp, "RIGOL TECHNOLOGIES,DS4024,DS4A0000,00.02.03");
}
