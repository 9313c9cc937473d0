//! Connect rule of the channel relays.

use std::fmt::Display;

use instrumentrs::InstrumentError;

/// The order in which relays are opened and closed when switching channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectRule {
    /// Relays open and close at the same time, the order is not guaranteed.
    Off,
    /// All relays open before any new relay closes.
    #[default]
    BreakBeforeMake,
    /// New relays close before the old relays open.
    MakeBeforeBreak,
}

impl ConnectRule {
    /// Name of the rule constant as used in `channel.connectrule = channel.{RULE}`.
    pub(crate) fn to_cmd_str(self) -> &'static str {
        match self {
            ConnectRule::Off => "OFF",
            ConnectRule::BreakBeforeMake => "BREAK_BEFORE_MAKE",
            ConnectRule::MakeBeforeBreak => "MAKE_BEFORE_BREAK",
        }
    }

    /// Parse the numeric rule that `print(channel.connectrule)` returns.
    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        let code = value
            .trim()
            .parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(value.to_string()))?;
        match code as i64 {
            0 => Ok(ConnectRule::Off),
            1 => Ok(ConnectRule::BreakBeforeMake),
            2 => Ok(ConnectRule::MakeBeforeBreak),
            _ => Err(InstrumentError::ResponseParseError(value.to_string())),
        }
    }
}

impl Display for ConnectRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cmd_str())
    }
}
