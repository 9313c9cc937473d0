//! Advisory conditions of switching operations.
//!
//! These conditions never stop an operation. They are returned to the caller and logged.

use std::fmt::Display;

/// A non-fatal condition that was found while closing channels or setting backplane relays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchWarning {
    /// The channel is on the list of channels that are forbidden to close.
    ForbiddenChannel(String),
    /// Both hardware interlocks of the slot are disengaged, so its analog backplane relays cannot
    /// be energized. If a specific relay was addressed, it is given.
    InterlocksDisengaged {
        /// Slot with the disengaged interlocks.
        slot: usize,
        /// The addressed analog backplane relay, if any.
        relay: Option<String>,
    },
}

impl Display for SwitchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchWarning::ForbiddenChannel(ch) => write!(
                f,
                "You are attempting to close channel {ch}, which is forbidden to close."
            ),
            SwitchWarning::InterlocksDisengaged {
                slot,
                relay: Some(relay),
            } => write!(
                f,
                "The hardware interlocks in Slot {slot} are disengaged. The analog backplane relay {relay} cannot be energized."
            ),
            SwitchWarning::InterlocksDisengaged { slot, relay: None } => write!(
                f,
                "The hardware interlocks in Slot {slot} are disengaged. The corresponding analog backplane relays cannot be energized."
            ),
        }
    }
}
