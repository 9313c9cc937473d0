//! Framing of the binary waveform blocks.
//!
//! A block is `#9`, nine ASCII digits with the body length in bytes, and the body. The
//! instrument terminates it with a newline.

use instrumentrs::InstrumentError;

/// Length of the `#9DDDDDDDDD` header.
const HEADER_LEN: usize = 11;

/// Validate a raw block and return its body without header and trailing whitespace.
///
/// Only whitespace after the declared body length is stripped, so samples that happen to be
/// whitespace bytes are kept. Any other difference between the declared and the received length
/// makes the block malformed.
pub(crate) fn validate_strip_block(block: &[u8]) -> Result<&[u8], InstrumentError> {
    let malformed = || InstrumentError::CommunicationError("Malformed data".to_string());

    if block.len() < HEADER_LEN || !block.starts_with(b"#9") {
        return Err(malformed());
    }
    let digits = &block[2..HEADER_LEN];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(malformed());
    }
    let size = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(malformed)?;

    let body = &block[HEADER_LEN..];
    if body.len() < size || !body[size..].iter().all(u8::is_ascii_whitespace) {
        return Err(malformed());
    }
    Ok(&body[..size])
}
