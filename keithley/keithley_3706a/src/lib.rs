//! A rust driver for the Keithley 3706A system switch.
//!
//! The 3706A is a six slot mainframe that holds matrix switch cards. Channels, channel ranges,
//! slots, and analog backplane relays are addressed with specifier strings, e.g., `"1101"` for
//! slot 1, row 1, column 1 or `"1911"` for the first backplane relay of slot 1. Every specifier
//! is checked against the cards that are installed before it is sent to the instrument.
//!
//! The instrument speaks TSP, queries are therefore wrapped into `print(...)` by the driver.
//!
//! # Example
//!
//! ```no_run
//! use instrumentrs::TcpIpInterface;
//! use keithley_3706a::Keithley3706A;
//!
//! let interface = TcpIpInterface::simple("192.168.1.50:5025").unwrap();
//! let mut inst = Keithley3706A::try_new(interface).unwrap();
//!
//! for card in inst.get_switch_cards() {
//!     println!("{card}");
//! }
//!
//! // Close a channel, advisory conditions are returned (and logged).
//! let warnings = inst.close_channel("1101").unwrap();
//! for w in warnings {
//!     println!("Warning: {w}");
//! }
//! println!("{:?}", inst.get_closed_channels("slot1").unwrap());
//! ```

#![deny(warnings, missing_docs)]

mod cards;
mod connect_rule;
mod specifier;
mod warnings;

pub use cards::{InterlockState, SwitchCard};
pub use connect_rule::ConnectRule;
pub use warnings::SwitchWarning;

use std::sync::{Arc, Mutex};

use instrumentrs::{InstrumentError, InstrumentInterface, OnOff, validate};
use log::{info, warn};

use cards::EMPTY_SLOT;
use specifier::{ALL_SLOTS, SpecifierSet};

/// Number of slots of the mainframe.
const NUM_SLOTS: usize = 6;

/// Allowed elements for most channel operations.
const ANY_SPECIFIER: &str = "channels, channel ranges, slots, backplane relays or \"allslots\"";
/// Allowed elements for closing channels.
const CLOSE_SPECIFIER: &str = "channels or channel ranges and associated backplane relays";
/// Allowed elements for operations that do not apply to backplane relays.
const NO_BACKPLANE_SPECIFIER: &str = "channels, channel ranges, slots, or \"allslots\"";

/// Identification of the mainframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idn {
    /// Vendor name.
    pub vendor: String,
    /// Model, e.g., "3706A".
    pub model: String,
    /// Serial number.
    pub serial: String,
    /// Firmware version.
    pub firmware: String,
}

/// Available memory of the mainframe in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailableMemory {
    /// System memory.
    pub system: f64,
    /// Memory for scripts.
    pub script: f64,
    /// Memory for channel patterns.
    pub pattern: f64,
    /// Memory for configurations.
    pub config: f64,
}

/// A rust driver for the Keithley 3706A.
///
/// The installed cards are queried when the driver is created and kept until
/// [`Keithley3706A::update_switch_cards`] is called. Clones share the interface and the card
/// inventory, so an update through one clone is seen by all of them.
pub struct Keithley3706A<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    cards: Arc<Mutex<Vec<SwitchCard>>>,
}

impl<T: InstrumentInterface> Keithley3706A<T> {
    /// Create a new Keithley 3706A instance with the given instrument interface.
    ///
    /// The cards in all six slots are queried, so this fails if the instrument does not answer.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    pub fn try_new(interface: T) -> Result<Self, InstrumentError> {
        let mut intf = interface;
        intf.set_terminator("\n");
        let mut inst = Keithley3706A {
            interface: Arc::new(Mutex::new(intf)),
            cards: Arc::new(Mutex::new(Vec::new())),
        };
        inst.update_switch_cards()?;
        Ok(inst)
    }

    /// Log the identification, the installed cards, and their interlock states.
    pub fn connect_message(&mut self) -> Result<(), InstrumentError> {
        let idn = self.get_idn()?;
        info!(
            "Connected to: {} {} SYSTEM SWITCH (serial:{}, firmware:{})",
            idn.vendor, idn.model, idn.serial, idn.firmware
        );
        for card in self.get_switch_cards() {
            info!("{card}");
        }
        for (slot, state) in self.get_interlock_state()? {
            info!("{state} in Slot {slot}.");
        }
        Ok(())
    }

    /// Query the identification of the mainframe.
    pub fn get_idn(&mut self) -> Result<Idn, InstrumentError> {
        let resp = self.query_raw("*IDN?")?;
        let fields: Vec<&str> = resp.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [vendor, model, serial, firmware] => Ok(Idn {
                vendor: vendor.to_string(),
                // The model is reported as "Model 3706A".
                model: model.get(6..).unwrap_or(*model).to_string(),
                serial: serial.to_string(),
                firmware: firmware.to_string(),
            }),
            _ => Err(InstrumentError::ResponseParseError(resp)),
        }
    }

    /// Get the switch cards that are installed.
    pub fn get_switch_cards(&self) -> Vec<SwitchCard> {
        self.cards.lock().expect("Mutex should not be poisoned").clone()
    }

    /// Query all slots for installed cards and their matrix size.
    pub fn update_switch_cards(&mut self) -> Result<(), InstrumentError> {
        let mut cards = Vec::new();
        for slot in 1..=NUM_SLOTS {
            let idn = self.query(&format!("slot[{slot}].idn"))?;
            if idn == EMPTY_SLOT {
                continue;
            }
            let rows = self.query_count(&format!("slot[{slot}].rows.matrix"))?;
            let columns = self.query_count(&format!("slot[{slot}].columns.matrix"))?;
            cards.push(SwitchCard::from_idn(slot, &idn, rows, columns)?);
        }
        *self.cards.lock().expect("Mutex should not be poisoned") = cards;
        Ok(())
    }

    /// All matrix channels of all installed cards.
    pub fn get_channels(&self) -> Vec<String> {
        self.get_switch_cards()
            .iter()
            .flat_map(specifier::matrix_channels)
            .collect()
    }

    /// All matrix channels of the card in a given slot.
    pub fn get_channels_by_slot(&self, slot: usize) -> Result<Vec<String>, InstrumentError> {
        let card = self.card_in_slot(slot)?;
        Ok(specifier::matrix_channels(&card))
    }

    /// All analog backplane relays of the installed cards, e.g., "1911" to "1916" for slot 1.
    ///
    /// Not to be confused with [`Keithley3706A::get_backplane`], which returns the relays that
    /// are associated with given channels.
    pub fn get_analog_backplane_specifiers(&self) -> Vec<String> {
        specifier::backplane_relays(self.get_switch_cards().iter().map(|c| c.slot))
    }

    /// Query the interlock states of all installed cards.
    pub fn get_interlock_state(&mut self) -> Result<Vec<(usize, InterlockState)>, InstrumentError> {
        let slots: Vec<usize> = self.get_switch_cards().iter().map(|c| c.slot).collect();
        let mut states = Vec::with_capacity(slots.len());
        for slot in slots {
            states.push((slot, self.get_interlock_state_by_slot(slot)?));
        }
        Ok(states)
    }

    /// Query the interlock state of one slot.
    pub fn get_interlock_state_by_slot(
        &mut self,
        slot: usize,
    ) -> Result<InterlockState, InstrumentError> {
        validate::int_in_range(slot as i64, 1, NUM_SLOTS as i64)?;
        let resp = self.query(&format!("slot[{slot}].interlock.state"))?;
        InterlockState::from_cmd_str(&resp)
    }

    /// Get the connect rule of the channel relays.
    pub fn get_channel_connect_rule(&mut self) -> Result<ConnectRule, InstrumentError> {
        let resp = self.query("channel.connectrule")?;
        ConnectRule::from_cmd_str(&resp)
    }

    /// Set the connect rule of the channel relays.
    pub fn set_channel_connect_rule(&mut self, rule: ConnectRule) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("channel.connectrule = channel.{}", rule.to_cmd_str()))
    }

    /// Check if the GPIB interface is enabled.
    pub fn get_gpib_enabled(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query("comm.gpib.enable")?;
        OnOff::BOOLEAN.from_cmd_str(&resp)
    }

    /// Enable or disable the GPIB interface.
    pub fn set_gpib_enabled(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            "comm.gpib.enable = {}",
            OnOff::BOOLEAN.to_cmd_str(enabled)
        ))
    }

    /// Get the GPIB address.
    pub fn get_gpib_address(&mut self) -> Result<u8, InstrumentError> {
        let resp = self.query("gpib.address")?;
        resp.parse::<f64>()
            .map(|v| v as u8)
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Set the GPIB address, which must be between 1 and 30.
    pub fn set_gpib_address(&mut self, address: u8) -> Result<(), InstrumentError> {
        validate::int_in_range(address as i64, 1, 30)?;
        self.sendcmd(&format!("gpib.address = {address}"))
    }

    /// Check if the LAN interface is enabled.
    pub fn get_lan_enabled(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query("comm.lan.enable")?;
        OnOff::BOOLEAN.from_cmd_str(&resp)
    }

    /// Enable or disable the LAN interface.
    pub fn set_lan_enabled(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            "comm.lan.enable = {}",
            OnOff::BOOLEAN.to_cmd_str(enabled)
        ))
    }

    /// Reset the given channels, slots, or backplane relays to factory defaults.
    pub fn reset_channel(&mut self, val: &str) -> Result<(), InstrumentError> {
        self.check_specifier(val, ANY_SPECIFIER)?;
        self.sendcmd(&format!("channel.reset('{val}')"))
    }

    /// Open the given channels and backplane relays.
    pub fn open_channel(&mut self, val: &str) -> Result<(), InstrumentError> {
        self.check_specifier(val, ANY_SPECIFIER)?;
        self.sendcmd(&format!("channel.open('{val}')"))
    }

    /// Close the given channels and backplane relays.
    ///
    /// Slots cannot be closed all together. Closing a channel that is forbidden to close or a
    /// backplane relay on a card with disengaged interlocks is still done, but these conditions
    /// are returned as warnings.
    pub fn close_channel(&mut self, val: &str) -> Result<Vec<SwitchWarning>, InstrumentError> {
        if self.is_slot(val) {
            return Err(InstrumentError::InvalidValue(
                "Slots cannot be closed all together.".to_string(),
            ));
        }
        let specs = self.check_specifier(val, CLOSE_SPECIFIER)?;
        let warnings = self.close_warnings(&specs, val)?;
        self.sendcmd(&format!("channel.close('{val}')"))?;
        Ok(warnings)
    }

    /// Close the given channels and open all others.
    ///
    /// An empty specifier would open all channels, use [`Keithley3706A::open_channel`] for that.
    pub fn exclusive_close(&mut self, val: &str) -> Result<Vec<SwitchWarning>, InstrumentError> {
        if self.is_slot(val) {
            return Err(InstrumentError::InvalidValue(
                "Slots cannot be exclusively closed.".to_string(),
            ));
        }
        if val.is_empty() {
            return Err(InstrumentError::InvalidValue(
                "An empty string may cause all channels and associated backplane relays to open. Use \"open_channel\" instead.".to_string(),
            ));
        }
        let specs = self.check_specifier(val, CLOSE_SPECIFIER)?;
        let warnings = self.close_warnings(&specs, val)?;
        self.sendcmd(&format!("channel.exclusiveclose('{val}')"))?;
        Ok(warnings)
    }

    /// Close the given channels and open all other channels on the slots they belong to.
    pub fn exclusive_slot_close(
        &mut self,
        val: &str,
    ) -> Result<Vec<SwitchWarning>, InstrumentError> {
        if self.is_slot(val) {
            return Err(InstrumentError::InvalidValue(
                "Slots cannot be exclusively closed.".to_string(),
            ));
        }
        if val.is_empty() {
            return Err(InstrumentError::InvalidValue(
                "Argument cannot be an empty string.".to_string(),
            ));
        }
        let specs = self.check_specifier(val, CLOSE_SPECIFIER)?;
        let warnings = self.close_warnings(&specs, val)?;
        self.sendcmd(&format!("channel.exclusiveslotclose('{val}')"))?;
        Ok(warnings)
    }

    /// Query the closed channels among the given ones. Returns `None` if none are closed.
    pub fn get_closed_channels(&mut self, val: &str) -> Result<Option<Vec<String>>, InstrumentError> {
        if val.is_empty() {
            return Err(InstrumentError::InvalidValue(
                "Argument cannot be an empty string.".to_string(),
            ));
        }
        self.check_specifier(val, ANY_SPECIFIER)?;
        let resp = self.query(&format!("channel.getclose('{val}')"))?;
        if resp == "nil" {
            return Ok(None);
        }
        Ok(Some(resp.split(';').map(|s| s.trim().to_string()).collect()))
    }

    /// Forbid closing the given channels and backplane relays.
    pub fn set_forbidden_channels(&mut self, val: &str) -> Result<(), InstrumentError> {
        self.check_specifier(val, ANY_SPECIFIER)?;
        self.sendcmd(&format!("channel.setforbidden('{val}')"))
    }

    /// Query which of the given channels and backplane relays are forbidden to close.
    ///
    /// The answer of the instrument is returned as is.
    pub fn get_forbidden_channels(&mut self, val: &str) -> Result<String, InstrumentError> {
        self.check_specifier(val, ANY_SPECIFIER)?;
        self.query(&format!("channel.getforbidden('{val}')"))
    }

    /// Remove the given channels from the list of channels that are forbidden to close.
    pub fn clear_forbidden_channels(&mut self, val: &str) -> Result<(), InstrumentError> {
        self.check_specifier(val, ANY_SPECIFIER)?;
        self.sendcmd(&format!("channel.clearforbidden('{val}')"))
    }

    /// Set an additional delay in seconds for the given channels.
    ///
    /// Delays cannot be set for analog backplane relays.
    pub fn set_delay(&mut self, val: &str, delay: f64) -> Result<(), InstrumentError> {
        self.reject_backplanes(
            val,
            "Additional delay times cannot be set for analog backplane relays.",
        )?;
        self.check_specifier(val, NO_BACKPLANE_SPECIFIER)?;
        self.sendcmd(&format!("channel.setdelay('{val}', {delay})"))
    }

    /// Query the additional delays in seconds of the given channels.
    pub fn get_delay(&mut self, val: &str) -> Result<Vec<f64>, InstrumentError> {
        self.reject_backplanes(
            val,
            "Additional delay times cannot be set for analog backplane relays.",
        )?;
        self.check_specifier(val, NO_BACKPLANE_SPECIFIER)?;
        let resp = self.query(&format!("channel.getdelay('{val}')"))?;
        resp.split(',')
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| InstrumentError::ResponseParseError(resp.clone()))
            })
            .collect()
    }

    /// Set the analog backplane relays that are used with the given channels.
    ///
    /// # Arguments
    /// * `val` - Channels to change, these cannot be backplane relays.
    /// * `backplane` - Comma-separated analog backplane relays to use for the channels.
    ///
    /// Every slot with disengaged interlocks is returned as a warning.
    pub fn set_backplane(
        &mut self,
        val: &str,
        backplane: &str,
    ) -> Result<Vec<SwitchWarning>, InstrumentError> {
        self.reject_backplanes(
            val,
            &format!("{val} is not a valid specifier. The specifier cannot be analog backplane relay."),
        )?;
        let specs = self.check_specifier(val, NO_BACKPLANE_SPECIFIER)?;
        if !backplane
            .split(',')
            .all(|plane| specs.backplane_slot(plane).is_some())
        {
            return Err(InstrumentError::InvalidValue(format!(
                "{backplane} is not a valid specifier. The specifier should be analog backplane relay."
            )));
        }

        let mut warnings = Vec::new();
        for (slot, state) in self.get_interlock_state()? {
            if state == InterlockState::BothDisengaged {
                warnings.push(SwitchWarning::InterlocksDisengaged { slot, relay: None });
            }
        }
        warnings.iter().for_each(|w| warn!("{w}"));

        self.sendcmd(&format!("channel.setbackplane('{val}', '{backplane}')"))?;
        Ok(warnings)
    }

    /// Query the analog backplane relays that are used with the given channels.
    pub fn get_backplane(&mut self, val: &str) -> Result<String, InstrumentError> {
        self.reject_backplanes(val, &format!("{val} cannot be a analog backplane relay."))?;
        self.check_specifier(val, NO_BACKPLANE_SPECIFIER)?;
        self.query(&format!("channel.getbackplane('{val}')"))
    }

    /// Connect the given columns to a row of a slot, which opens the formed channels.
    ///
    /// Returns the ids of the channels that were opened.
    pub fn connect_row_to_columns(
        &mut self,
        slot: usize,
        row: usize,
        columns: &[usize],
    ) -> Result<Vec<String>, InstrumentError> {
        let channels = self.form_channels(slot, &[row], columns)?;
        for ch in &channels {
            self.open_channel(ch)?;
        }
        Ok(channels)
    }

    /// Disconnect the given columns from a row of a slot, which closes the formed channels.
    ///
    /// Returns the ids of the channels that were closed.
    pub fn disconnect_row_from_columns(
        &mut self,
        slot: usize,
        row: usize,
        columns: &[usize],
    ) -> Result<Vec<String>, InstrumentError> {
        let channels = self.form_channels(slot, &[row], columns)?;
        for ch in &channels {
            self.close_channel(ch)?;
        }
        Ok(channels)
    }

    /// Connect the given rows to a column of a slot, which opens the formed channels.
    ///
    /// Returns the ids of the channels that were opened.
    pub fn connect_column_to_rows(
        &mut self,
        slot: usize,
        column: usize,
        rows: &[usize],
    ) -> Result<Vec<String>, InstrumentError> {
        let channels = self.form_channels(slot, rows, &[column])?;
        for ch in &channels {
            self.open_channel(ch)?;
        }
        Ok(channels)
    }

    /// Disconnect the given rows from a column of a slot, which closes the formed channels.
    ///
    /// Returns the ids of the channels that were closed.
    pub fn disconnect_column_from_rows(
        &mut self,
        slot: usize,
        column: usize,
        rows: &[usize],
    ) -> Result<Vec<String>, InstrumentError> {
        let channels = self.form_channels(slot, rows, &[column])?;
        for ch in &channels {
            self.close_channel(ch)?;
        }
        Ok(channels)
    }

    /// Query the available memory in percent.
    pub fn get_available_memory(&mut self) -> Result<AvailableMemory, InstrumentError> {
        let resp = self.query("memory.available()")?;
        let vals = resp
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| InstrumentError::ResponseParseError(resp.clone()))?;
        match vals.as_slice() {
            [system, script, pattern, config] => Ok(AvailableMemory {
                system: *system,
                script: *script,
                pattern: *pattern,
                config: *config,
            }),
            _ => Err(InstrumentError::ResponseParseError(resp)),
        }
    }

    /// Query the current IP address of the instrument.
    pub fn get_ip_address(&mut self) -> Result<String, InstrumentError> {
        self.query("lan.status.ipaddress")
    }

    /// Reset the LAN interface.
    pub fn reset_local_network(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("lan.reset()")
    }

    /// Save the present setup.
    ///
    /// # Arguments
    /// * `path` - Path and file name on a USB flash drive. If `None`, the setup is saved to the
    ///   nonvolatile memory of the instrument and overwrites previous saves.
    pub fn save_setup(&mut self, path: Option<&str>) -> Result<(), InstrumentError> {
        match path {
            Some(p) => self.sendcmd(&format!("setup.save('{p}')")),
            None => self.sendcmd("setup.save()"),
        }
    }

    /// Recall a saved setup.
    ///
    /// # Arguments
    /// * `location` - `"0"` for factory defaults, `"1"` for the setup in nonvolatile memory, or
    ///   the relative path to a setup on a USB flash drive.
    pub fn load_setup(&mut self, location: &str) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("setup.recall('{location}')"))
    }

    /// Find the card in a slot or return an unknown slot error.
    fn card_in_slot(&self, slot: usize) -> Result<SwitchCard, InstrumentError> {
        let cards = self.get_switch_cards();
        cards
            .iter()
            .find(|c| c.slot == slot)
            .cloned()
            .ok_or_else(|| InstrumentError::UnknownSlot {
                slot,
                available: cards.iter().map(|c| c.slot).collect(),
            })
    }

    /// Check if the value names one slot or all slots.
    fn is_slot(&self, val: &str) -> bool {
        val == ALL_SLOTS
            || self
                .get_switch_cards()
                .iter()
                .any(|c| c.slot_name() == val)
    }

    /// Validate the specifier against the installed cards and return the set of legal elements.
    fn check_specifier(&self, val: &str, expected: &str) -> Result<SpecifierSet, InstrumentError> {
        let specs = SpecifierSet::new(&self.get_switch_cards());
        if !specs.is_valid(val) {
            return Err(InstrumentError::InvalidValue(format!(
                "{val} is not a valid specifier. The specifier should be {expected}."
            )));
        }
        Ok(specs)
    }

    /// Return an invalid value error with the message if any element is a backplane relay.
    fn reject_backplanes(&self, val: &str, msg: &str) -> Result<(), InstrumentError> {
        if SpecifierSet::new(&self.get_switch_cards()).has_backplane(val) {
            return Err(InstrumentError::InvalidValue(msg.to_string()));
        }
        Ok(())
    }

    /// Form the channel ids of the given rows and columns and validate them.
    fn form_channels(
        &self,
        slot: usize,
        rows: &[usize],
        columns: &[usize],
    ) -> Result<Vec<String>, InstrumentError> {
        self.card_in_slot(slot)?;
        let channels: Vec<String> = rows
            .iter()
            .flat_map(|row| {
                columns
                    .iter()
                    .map(move |col| specifier::channel_id(slot, *row, *col))
            })
            .collect();
        for ch in &channels {
            self.check_specifier(ch, CLOSE_SPECIFIER)?;
        }
        Ok(channels)
    }

    /// Collect and log the advisory conditions of closing the given specifier.
    ///
    /// The forbidden channels are always queried, the interlock states only if backplane relays
    /// are addressed.
    fn close_warnings(
        &mut self,
        specs: &SpecifierSet,
        val: &str,
    ) -> Result<Vec<SwitchWarning>, InstrumentError> {
        let forbidden = self.get_forbidden_channels(ALL_SLOTS)?;
        let forbidden: Vec<&str> = forbidden
            .split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "nil")
            .collect();

        let mut warnings: Vec<SwitchWarning> = val
            .split(',')
            .filter(|el| forbidden.contains(el))
            .map(|el| SwitchWarning::ForbiddenChannel(el.to_string()))
            .collect();

        if specs.has_backplane(val) {
            let states = self.get_interlock_state()?;
            for el in val.split(',') {
                if let Some(slot) = specs.backplane_slot(el) {
                    let disengaged = states
                        .iter()
                        .any(|(s, state)| *s == slot && *state == InterlockState::BothDisengaged);
                    if disengaged {
                        warnings.push(SwitchWarning::InterlocksDisengaged {
                            slot,
                            relay: Some(el.to_string()),
                        });
                    }
                }
            }
        }

        warnings.iter().for_each(|w| warn!("{w}"));
        Ok(warnings)
    }

    /// Query a row or column count, which the instrument reports as a float.
    fn query_count(&mut self, cmd: &str) -> Result<usize, InstrumentError> {
        let resp = self.query(cmd)?;
        resp.parse::<f64>()
            .map(|v| v as usize)
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Send a command to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(cmd)
    }

    /// Query a TSP expression, which is wrapped into `print(...)`.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        self.query_raw(&format!("print({cmd})"))
    }

    /// Query the instrument without wrapping the command.
    fn query_raw(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for Keithley3706A<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            cards: self.cards.clone(),
        }
    }
}
