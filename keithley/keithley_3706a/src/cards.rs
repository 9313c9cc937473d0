//! Switch card inventory and interlock states of the system switch mainframe.

use std::fmt::Display;

use instrumentrs::InstrumentError;

/// Answer of `slot[i].idn` for a slot without a card.
pub(crate) const EMPTY_SLOT: &str = "Empty Slot";

/// A switch card that is installed in one of the six slots of the mainframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCard {
    /// Slot number the card is installed in, from 1 to 6.
    pub slot: usize,
    /// Model of the card, e.g., "3730".
    pub model: String,
    /// Matrix type of the card, e.g., "6x16 High Density Matrix".
    pub matrix_type: String,
    /// Firmware version of the card.
    pub firmware: String,
    /// Serial number of the card.
    pub serial: String,
    /// Number of matrix rows.
    pub rows: usize,
    /// Number of matrix columns.
    pub columns: usize,
}

impl SwitchCard {
    /// Parse the answer of `slot[i].idn`, which is `model,matrix type,firmware,serial`.
    ///
    /// The number of rows and columns are queried separately and set here as well.
    pub(crate) fn from_idn(
        slot: usize,
        idn: &str,
        rows: usize,
        columns: usize,
    ) -> Result<Self, InstrumentError> {
        let fields: Vec<&str> = idn.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [model, matrix_type, firmware, serial] => Ok(SwitchCard {
                slot,
                model: model.to_string(),
                matrix_type: matrix_type.to_string(),
                firmware: firmware.to_string(),
                serial: serial.to_string(),
                rows,
                columns,
            }),
            _ => Err(InstrumentError::ResponseParseError(idn.to_string())),
        }
    }

    /// Name of the slot as the instrument understands it, e.g., "slot3".
    pub fn slot_name(&self) -> String {
        format!("slot{}", self.slot)
    }
}

impl Display for SwitchCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot {}- Model:{}, Matrix Type:{}, Firmware:{}, Serial:{}",
            self.slot, self.model, self.matrix_type, self.firmware, self.serial
        )
    }
}

/// State of the hardware interlocks of a switch card.
///
/// If both interlocks are disengaged, the channel relays still operate but the analog backplane
/// relays of that slot cannot be energized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterlockState {
    /// No card is installed or the card does not support interlocks.
    NotSupported,
    /// Interlocks 1 and 2 are disengaged.
    BothDisengaged,
    /// Interlock 1 is engaged, interlock 2 (if it exists) is disengaged.
    Interlock1Engaged,
    /// Interlock 2 is engaged, interlock 1 is disengaged.
    Interlock2Engaged,
    /// Both interlocks are engaged.
    BothEngaged,
}

impl InterlockState {
    /// Parse the answer of `slot[i].interlock.state`.
    ///
    /// The instrument answers `nil` for cards without interlocks, otherwise a number from 0 to 3
    /// that may be formatted as a float.
    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        let value = value.trim();
        if value == "nil" {
            return Ok(InterlockState::NotSupported);
        }
        let code = value
            .parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(value.to_string()))?;
        match code as i64 {
            0 => Ok(InterlockState::BothDisengaged),
            1 => Ok(InterlockState::Interlock1Engaged),
            2 => Ok(InterlockState::Interlock2Engaged),
            3 => Ok(InterlockState::BothEngaged),
            _ => Err(InstrumentError::ResponseParseError(value.to_string())),
        }
    }

    /// Numeric state as reported by the instrument, `None` if interlocks are not supported.
    pub fn code(&self) -> Option<u8> {
        match self {
            InterlockState::NotSupported => None,
            InterlockState::BothDisengaged => Some(0),
            InterlockState::Interlock1Engaged => Some(1),
            InterlockState::Interlock2Engaged => Some(2),
            InterlockState::BothEngaged => Some(3),
        }
    }
}

impl Display for InterlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            InterlockState::NotSupported => {
                "No card is installed or the installed card does not support interlocks"
            }
            InterlockState::BothDisengaged => "Interlocks 1 and 2 are disengaged on the card",
            InterlockState::Interlock1Engaged => {
                "Interlock 1 is engaged, interlock 2 (if it exists) is disengaged"
            }
            InterlockState::Interlock2Engaged => "Interlock 2 is engaged, interlock 1 is disengaged",
            InterlockState::BothEngaged => "Both interlock 1 and 2 are engaged",
        };
        write!(f, "{msg}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    fn card_from_idn() {
        let card =
            SwitchCard::from_idn(2, "3730, 6x16 High Density Matrix, 01.40h, 04090345", 6, 16)
                .unwrap();
        assert_eq!(card.slot, 2);
        assert_eq!(card.model, "3730");
        assert_eq!(card.matrix_type, "6x16 High Density Matrix");
        assert_eq!(card.firmware, "01.40h");
        assert_eq!(card.serial, "04090345");
        assert_eq!(card.slot_name(), "slot2");
    }

    #[rstest]
    fn card_from_idn_invalid() {
        assert!(SwitchCard::from_idn(1, "3730,6x16", 6, 16).is_err());
    }

    #[rstest]
    #[case("nil", InterlockState::NotSupported)]
    #[case("0", InterlockState::BothDisengaged)]
    #[case("1.00000e+00", InterlockState::Interlock1Engaged)]
    #[case("2", InterlockState::Interlock2Engaged)]
    #[case("3.0", InterlockState::BothEngaged)]
    fn interlock_from_cmd_str(#[case] resp: &str, #[case] exp: InterlockState) {
        assert_eq!(InterlockState::from_cmd_str(resp).unwrap(), exp);
    }

    #[rstest]
    #[case("4")]
    #[case("engaged")]
    fn interlock_from_cmd_str_invalid(#[case] resp: &str) {
        assert!(InterlockState::from_cmd_str(resp).is_err());
    }
}
