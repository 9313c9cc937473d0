//! Enumeration and validation of channel specifiers.
//!
//! A specifier is a comma-separated list of elements. Every element must be one of:
//! - a matrix channel `SRCC`: slot digit, row, and zero padded two-digit column, e.g., "1103",
//! - a channel range `A:B` of two distinct matrix channels of the same slot, where `A` comes
//!   before `B` in the enumeration order,
//! - a slot, i.e., "allslots" or "slotN",
//! - an analog backplane relay `S9RR` with `RR` from 11 to 16, e.g., "1911".
//!
//! On a fully populated mainframe the legal elements can count many thousands, so a failed
//! validation never reports the full set.

use std::collections::{HashMap, HashSet};

use crate::cards::SwitchCard;

/// Relay numbers of the analog backplane, the same for every slot.
const BACKPLANE_RELAYS: [u8; 6] = [11, 12, 13, 14, 15, 16];

/// Name of all slots together.
pub(crate) const ALL_SLOTS: &str = "allslots";

/// All matrix channels of a card in enumeration order: rows first, then zero padded columns.
pub(crate) fn matrix_channels(card: &SwitchCard) -> Vec<String> {
    let mut channels = Vec::with_capacity(card.rows * card.columns);
    for row in 1..=card.rows {
        for col in 1..=card.columns {
            channels.push(channel_id(card.slot, row, col));
        }
    }
    channels
}

/// Format the id of a single matrix channel.
pub(crate) fn channel_id(slot: usize, row: usize, column: usize) -> String {
    format!("{slot}{row}{column:02}")
}

/// The analog backplane relays of the given slots.
pub(crate) fn backplane_relays(slots: impl IntoIterator<Item = usize>) -> Vec<String> {
    slots
        .into_iter()
        .flat_map(|slot| BACKPLANE_RELAYS.iter().map(move |r| format!("{slot}9{r}")))
        .collect()
}

/// All legal specifier elements for a given card inventory.
#[derive(Debug)]
pub(crate) struct SpecifierSet {
    /// Matrix channels, slot names, and backplane relays.
    tokens: HashSet<String>,
    /// Backplane relays and the slot they belong to.
    backplanes: HashMap<String, usize>,
    /// Slot and enumeration position of every matrix channel, used for channel ranges.
    positions: HashMap<String, (usize, usize)>,
}

impl SpecifierSet {
    /// Enumerate all legal elements for the installed cards.
    pub(crate) fn new(cards: &[SwitchCard]) -> Self {
        let mut tokens = HashSet::new();
        let mut positions = HashMap::new();
        let mut backplanes = HashMap::new();

        tokens.insert(ALL_SLOTS.to_string());
        for card in cards {
            tokens.insert(card.slot_name());
            for (idx, ch) in matrix_channels(card).into_iter().enumerate() {
                positions.insert(ch.clone(), (card.slot, idx));
                tokens.insert(ch);
            }
            for relay in backplane_relays([card.slot]) {
                backplanes.insert(relay.clone(), card.slot);
                tokens.insert(relay);
            }
        }

        SpecifierSet {
            tokens,
            backplanes,
            positions,
        }
    }

    /// Check if a single element is legal.
    ///
    /// A range `A:B` is legal if it is one of the pairwise combinations of the channels of one
    /// slot in enumeration order, which is checked without materializing all combinations.
    pub(crate) fn contains(&self, element: &str) -> bool {
        if self.tokens.contains(element) {
            return true;
        }
        match element.split_once(':') {
            Some((first, second)) => match (self.positions.get(first), self.positions.get(second))
            {
                (Some((slot_a, idx_a)), Some((slot_b, idx_b))) => {
                    slot_a == slot_b && idx_a < idx_b
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Check if every comma-separated element of the specifier is legal.
    pub(crate) fn is_valid(&self, specifier: &str) -> bool {
        specifier.split(',').all(|el| self.contains(el))
    }

    /// The slot of an analog backplane relay, `None` if the element is not a backplane relay.
    pub(crate) fn backplane_slot(&self, element: &str) -> Option<usize> {
        self.backplanes.get(element).copied()
    }

    /// Check if any element of the specifier is an analog backplane relay.
    pub(crate) fn has_backplane(&self, specifier: &str) -> bool {
        specifier
            .split(',')
            .any(|el| self.backplane_slot(el).is_some())
    }
}
