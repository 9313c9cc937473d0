//! Mapping of boolean values to the on/off tokens that instruments understand.

use crate::InstrumentError;

/// The pair of tokens an instrument uses for a boolean setting.
///
/// Instruments disagree on how to spell "on" and "off": SCPI instruments use `ON`/`OFF` or
/// `1`/`0`, while script based instruments such as the Keithley 3706A use `true`/`false`. Setting
/// a value always sends the `on`/`off` token, parsing accepts both spellings of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnOff {
    on: &'static str,
    off: &'static str,
}

impl OnOff {
    /// `ON` and `OFF`, the SCPI default. `1` and `0` are accepted when parsing.
    pub const SCPI: OnOff = OnOff {
        on: "ON",
        off: "OFF",
    };

    /// `1` and `0`.
    pub const NUMERIC: OnOff = OnOff { on: "1", off: "0" };

    /// `true` and `false`, as used by Lua-based instrument scripting.
    pub const BOOLEAN: OnOff = OnOff {
        on: "true",
        off: "false",
    };

    /// The token to send for a boolean value.
    pub fn to_cmd_str(&self, value: bool) -> &'static str {
        if value { self.on } else { self.off }
    }

    /// Parse an answer of the instrument into a boolean.
    ///
    /// The comparison ignores case and surrounding whitespace. The numeric tokens `1` and `0` are
    /// always accepted, as SCPI instruments answer with them even when set with `ON`/`OFF`.
    pub fn from_cmd_str(&self, value: &str) -> Result<bool, InstrumentError> {
        let value = value.trim();
        if value.eq_ignore_ascii_case(self.on) || value == "1" {
            Ok(true)
        } else if value.eq_ignore_ascii_case(self.off) || value == "0" {
            Ok(false)
        } else {
            Err(InstrumentError::ResponseParseError(value.to_string()))
        }
    }
}
