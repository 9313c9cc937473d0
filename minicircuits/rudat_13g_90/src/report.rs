//! HID reports that are exchanged with Mini-Circuits USB devices.
//!
//! Every report is exactly 64 bytes long. A command report starts with the SCPI command code,
//! followed by the ASCII command and zero padding. The answer echoes the code and carries the
//! ASCII answer up to the first zero byte.

use instrumentrs::InstrumentError;

/// Length of every HID report in bytes.
pub const REPORT_LEN: usize = 64;

/// Code of a report that carries a SCPI command.
const SCPI_CODE: u8 = 0x01;

/// Report to be sent to the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    data: [u8; REPORT_LEN],
}

impl CommandReport {
    /// Raw bytes of the report.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<&str> for CommandReport {
    type Error = InstrumentError;

    /// Pack a SCPI command into a report.
    ///
    /// Fails if the command is not ASCII or does not fit next to the command code.
    fn try_from(cmd: &str) -> Result<Self, InstrumentError> {
        if !cmd.is_ascii() {
            return Err(InstrumentError::InvalidValue(format!(
                "Command {cmd:?} contains non-ASCII characters"
            )));
        }
        let bytes = cmd.as_bytes();
        if bytes.len() > REPORT_LEN - 1 {
            return Err(InstrumentError::InvalidValue(format!(
                "Command {cmd:?} is {} bytes long, at most {} bytes fit into a report",
                bytes.len(),
                REPORT_LEN - 1
            )));
        }
        let mut data = [0u8; REPORT_LEN];
        data[0] = SCPI_CODE;
        data[1..=bytes.len()].copy_from_slice(bytes);
        Ok(CommandReport { data })
    }
}

/// Report that was received from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadReport {
    answer: String,
}

impl ReadReport {
    /// Unpack a report that was read from the device.
    ///
    /// The first byte must echo the SCPI command code.
    pub fn try_new(data: &[u8]) -> Result<Self, InstrumentError> {
        if data.len() != REPORT_LEN {
            return Err(InstrumentError::CommunicationError(format!(
                "Report of {} bytes received, expected {REPORT_LEN}",
                data.len()
            )));
        }
        if data[0] != SCPI_CODE {
            return Err(InstrumentError::CommunicationError(format!(
                "Report echoes code {:#04x}, expected {SCPI_CODE:#04x}",
                data[0]
            )));
        }
        let body = &data[1..];
        let end = body.iter().position(|&b| b == 0).unwrap_or(body.len());
        let answer = str::from_utf8(&body[..end])
            .map_err(|_| InstrumentError::ResponseParseError("Invalid UTF8".into()))?;
        Ok(ReadReport {
            answer: answer.trim().to_string(),
        })
    }

    /// Answer of the device with surrounding whitespace removed.
    pub fn answer(&self) -> &str {
        &self.answer
    }
}
