//! Waveform capture of a single oscilloscope channel.
//!
//! A capture is done in two steps: [`ScopeArray::prepare_curvedata`] fetches the preamble and
//! computes the time axis, then [`ScopeArray::get_curvedata`] reads the samples once and converts
//! them into volts. Every read needs its own preparation.

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use instrumentrs::{InstrumentError, InstrumentInterface};
use log::{debug, info};

use crate::{block::validate_strip_block, preamble::Preamble};

/// Default number of status polls before a raw readout is given up.
const DEFAULT_MAX_READ_STEPS: usize = 50;

/// Default wait between two polls, which lets the instrument refill its buffer.
const DEFAULT_READ_DELAY: Duration = Duration::from_millis(300);

/// Memory that the waveform is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// The waveform that is displayed on the screen, read in a single block.
    Display,
    /// The waveform in the internal memory. Acquisition is stopped and the data is streamed in
    /// chunks until the instrument reports that it is done.
    Raw,
}

impl Display for ReadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadMode::Display => write!(f, "display"),
            ReadMode::Raw => write!(f, "raw"),
        }
    }
}

/// Waveform of one channel with its time axis.
///
/// **This structure can only be created through a [`crate::Channel`].**
pub struct ScopeArray<T: InstrumentInterface> {
    channel: usize,
    mode: ReadMode,
    interface: Arc<Mutex<T>>,
    max_read_steps: usize,
    read_delay: Duration,
    trace_ready: bool,
    preamble: Option<Preamble>,
    setpoints: Vec<f64>,
}

impl<T: InstrumentInterface> ScopeArray<T> {
    /// Create a new scope array for the given one-based channel number.
    pub(crate) fn new(channel: usize, mode: ReadMode, interface: Arc<Mutex<T>>) -> Self {
        ScopeArray {
            channel,
            mode,
            interface,
            max_read_steps: DEFAULT_MAX_READ_STEPS,
            read_delay: DEFAULT_READ_DELAY,
            trace_ready: false,
            preamble: None,
            setpoints: Vec::new(),
        }
    }

    /// Get the read mode of this array.
    pub fn get_read_mode(&self) -> ReadMode {
        self.mode
    }

    /// Set the maximum number of status polls of a raw readout, at least one.
    pub fn set_max_read_steps(&mut self, steps: usize) -> Result<(), InstrumentError> {
        if steps == 0 {
            return Err(InstrumentError::InvalidArgument(
                "At least one read step is required.".to_string(),
            ));
        }
        self.max_read_steps = steps;
        Ok(())
    }

    /// Set the wait between two status polls of a raw readout. Defaults to 300 ms.
    pub fn set_read_delay(&mut self, delay: Duration) {
        self.read_delay = delay;
    }

    /// Check if the trace is prepared and can be read.
    pub fn is_trace_ready(&self) -> bool {
        self.trace_ready
    }

    /// Preamble of the last preparation, if any.
    pub fn get_preamble(&self) -> Option<&Preamble> {
        self.preamble.as_ref()
    }

    /// Time of every point of the last preparation in seconds.
    pub fn get_setpoints(&self) -> &[f64] {
        &self.setpoints
    }

    /// Number of points of the last preparation.
    pub fn get_shape(&self) -> usize {
        self.preamble.map_or(0, |p| p.points)
    }

    /// Prepare the oscilloscope for returning a waveform.
    ///
    /// In raw mode, the acquisition is stopped first. The preamble is fetched again on every
    /// call, since it defines the scaling of the data that will be read.
    pub fn prepare_curvedata(&mut self) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        match self.mode {
            ReadMode::Raw => {
                intf.sendcmd(":STOP")?;
                intf.sendcmd(":WAVeform:MODE RAW")?;
            }
            ReadMode::Display => intf.sendcmd(":WAVeform:MODE NORM")?,
        }
        let resp = intf.query(":WAVeform:PREamble?")?;
        drop(intf);

        let preamble = Preamble::from_cmd_str(&resp)?;
        debug!("Preamble of channel {}: {preamble:?}", self.channel);

        self.setpoints = preamble.time_axis();
        self.preamble = Some(preamble);
        self.trace_ready = true;
        Ok(())
    }

    /// Read the prepared waveform and return it in volts.
    ///
    /// Fails with [`InstrumentError::TraceNotReady`] if the trace was not prepared since the
    /// last read. The interface stays locked for the whole readout.
    pub fn get_curvedata(&mut self) -> Result<Vec<f64>, InstrumentError> {
        let preamble = match (self.trace_ready, self.preamble) {
            (true, Some(p)) => p,
            _ => return Err(InstrumentError::TraceNotReady),
        };
        self.trace_ready = false;

        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(":WAVeform:FORMat BYTE")?;
        intf.sendcmd(&format!(":WAVeform:SOURce CHAN{}", self.channel))?;

        let data = match self.mode {
            ReadMode::Raw => read_raw_memory(
                &mut *intf,
                preamble.points,
                self.max_read_steps,
                self.read_delay,
            )?,
            ReadMode::Display => {
                info!(
                    "Readout of display waveform started, {} points",
                    preamble.points
                );
                intf.sendcmd(":WAVeform:DATA?")?;
                let blk = intf.read_block()?;
                validate_strip_block(&blk)?.to_vec()
            }
        };
        drop(intf);
        info!("Readout ended, total read size: {}", data.len());

        info!("Data conversion");
        let volts = preamble.to_volts(&data);
        info!("Data conversion done");
        Ok(volts)
    }
}

/// Stream the internal memory in chunks until the instrument reports `IDLE`.
fn read_raw_memory<T: InstrumentInterface>(
    intf: &mut T,
    points: usize,
    max_read_steps: usize,
    read_delay: Duration,
) -> Result<Vec<u8>, InstrumentError> {
    info!("Readout of raw waveform started, {points} points");
    intf.sendcmd(&format!(":WAVeform:POINts {points}"))?;
    intf.sendcmd(":WAVeform:RESet")?;
    intf.sendcmd(":WAVeform:BEGin")?;

    let mut data = Vec::with_capacity(points);
    for step in 0..max_read_steps {
        let resp = intf.query(":WAVeform:STATus?")?;
        let status = resp.split(',').next().unwrap_or_default().trim();

        intf.sendcmd(":WAVeform:DATA?")?;
        let blk = intf.read_block()?;
        let chunk = validate_strip_block(&blk)?;
        data.extend_from_slice(chunk);

        if status == "IDLE" {
            intf.sendcmd(":WAVeform:END")?;
            return Ok(data);
        }
        info!(
            "chunks read: {step}, last chunk points: {}, total read size: {}",
            chunk.len(),
            data.len()
        );
        thread::sleep(read_delay);
    }

    Err(InstrumentError::CommunicationError(format!(
        "Raw waveform readout did not finish within {max_read_steps} read steps"
    )))
}
