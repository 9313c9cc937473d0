//! Trigger settings of the oscilloscope.

use std::fmt::Display;

use instrumentrs::InstrumentError;

/// Type of the trigger, set with `:TRIGger:MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerType {
    /// Edge trigger.
    Edge,
    /// Pulse width trigger.
    Pulse,
    /// Runt trigger.
    Runt,
    /// Nth edge trigger.
    NthEdge,
    /// Slope trigger.
    Slope,
    /// Video trigger.
    Video,
    /// Pattern trigger.
    Pattern,
    /// RS232 trigger.
    Rs232,
    /// I2C trigger.
    Iic,
    /// SPI trigger.
    Spi,
    /// CAN trigger.
    Can,
    /// FlexRay trigger.
    Flex,
    /// USB trigger.
    Usb,
}

impl TriggerType {
    const ALL: [TriggerType; 13] = [
        TriggerType::Edge,
        TriggerType::Pulse,
        TriggerType::Runt,
        TriggerType::NthEdge,
        TriggerType::Slope,
        TriggerType::Video,
        TriggerType::Pattern,
        TriggerType::Rs232,
        TriggerType::Iic,
        TriggerType::Spi,
        TriggerType::Can,
        TriggerType::Flex,
        TriggerType::Usb,
    ];

    pub(crate) fn to_cmd_str(self) -> &'static str {
        match self {
            TriggerType::Edge => "EDGE",
            TriggerType::Pulse => "PULS",
            TriggerType::Runt => "RUNT",
            TriggerType::NthEdge => "NEDG",
            TriggerType::Slope => "SLOP",
            TriggerType::Video => "VID",
            TriggerType::Pattern => "PATT",
            TriggerType::Rs232 => "RS232",
            TriggerType::Iic => "IIC",
            TriggerType::Spi => "SPI",
            TriggerType::Can => "CAN",
            TriggerType::Flex => "FLEX",
            TriggerType::Usb => "USB",
        }
    }

    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.to_cmd_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| InstrumentError::ResponseParseError(value.to_string()))
    }
}

impl Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cmd_str())
    }
}

/// Sweep mode of the trigger, set with `:TRIGger:SWEep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Acquire even without a trigger event.
    Auto,
    /// Acquire only on trigger events.
    Normal,
    /// Acquire once on the next trigger event.
    Single,
}

impl TriggerMode {
    pub(crate) fn to_cmd_str(self) -> &'static str {
        match self {
            TriggerMode::Auto => "AUTO",
            TriggerMode::Normal => "NORM",
            TriggerMode::Single => "SING",
        }
    }

    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        match value.trim().to_uppercase().as_str() {
            "AUTO" => Ok(TriggerMode::Auto),
            "NORM" | "NORMAL" => Ok(TriggerMode::Normal),
            "SING" | "SINGLE" => Ok(TriggerMode::Single),
            _ => Err(InstrumentError::ResponseParseError(value.to_string())),
        }
    }
}

impl Display for TriggerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cmd_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    fn trigger_type_round_trip() {
        for t in TriggerType::ALL {
            assert_eq!(TriggerType::from_cmd_str(t.to_cmd_str()).unwrap(), t);
        }
        assert!(TriggerType::from_cmd_str("GLITCH").is_err());
    }

    #[rstest]
    #[case("AUTO", TriggerMode::Auto)]
    #[case("norm", TriggerMode::Normal)]
    #[case("SING", TriggerMode::Single)]
    fn trigger_mode_from_cmd_str(#[case] resp: &str, #[case] exp: TriggerMode) {
        assert_eq!(TriggerMode::from_cmd_str(resp).unwrap(), exp);
    }
}
