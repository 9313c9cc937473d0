//! Enumerated settings of the AWG and their command tokens.

use std::fmt::Display;

use instrumentrs::InstrumentError;

/// Operating mode of the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwgMode {
    /// Arbitrary waveform generator.
    Awg,
    /// Function generator.
    Fgen,
}

impl AwgMode {
    pub(crate) fn to_cmd_str(self) -> &'static str {
        match self {
            AwgMode::Awg => "AWG",
            AwgMode::Fgen => "FGEN",
        }
    }

    pub(crate) fn from_cmd_str(s: &str) -> Result<Self, InstrumentError> {
        match s.trim() {
            "AWG" => Ok(AwgMode::Awg),
            "FGEN" => Ok(AwgMode::Fgen),
            _ => Err(InstrumentError::ResponseParseError(s.to_string())),
        }
    }
}

/// Source of the sample clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Internal clock.
    Internal,
    /// Internal clock locked to a fixed 10 MHz reference.
    InternalFixedReference,
    /// Internal clock locked to a variable reference.
    InternalVariableReference,
    /// External clock.
    External,
}

impl ClockSource {
    pub(crate) fn to_cmd_str(self) -> &'static str {
        match self {
            ClockSource::Internal => "INT",
            ClockSource::InternalFixedReference => "EFIX",
            ClockSource::InternalVariableReference => "EVAR",
            ClockSource::External => "EXT",
        }
    }

    pub(crate) fn from_cmd_str(s: &str) -> Result<Self, InstrumentError> {
        match s.trim() {
            "INT" => Ok(ClockSource::Internal),
            "EFIX" => Ok(ClockSource::InternalFixedReference),
            "EVAR" => Ok(ClockSource::InternalVariableReference),
            "EXT" => Ok(ClockSource::External),
            _ => Err(InstrumentError::ResponseParseError(s.to_string())),
        }
    }
}

impl Display for ClockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockSource::Internal => write!(f, "Internal"),
            ClockSource::InternalFixedReference => write!(f, "Internal, 10 MHz ref."),
            ClockSource::InternalVariableReference => write!(f, "Internal, variable ref."),
            ClockSource::External => write!(f, "External"),
        }
    }
}

/// State of the waveform playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Playback is stopped.
    Stopped,
    /// Playback is armed and waits for a trigger.
    WaitingForTrigger,
    /// Playback is running.
    Running,
}

impl RunState {
    pub(crate) fn from_cmd_str(s: &str) -> Result<Self, InstrumentError> {
        match s.trim() {
            "0" => Ok(RunState::Stopped),
            "1" => Ok(RunState::WaitingForTrigger),
            "2" => Ok(RunState::Running),
            _ => Err(InstrumentError::ResponseParseError(s.to_string())),
        }
    }
}

impl Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Stopped => write!(f, "Stopped"),
            RunState::WaitingForTrigger => write!(f, "Waiting for trigger"),
            RunState::Running => write!(f, "Running"),
        }
    }
}

/// Waveform shape of the function generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FgenType {
    /// Sine.
    Sine,
    /// Square.
    Square,
    /// Triangle.
    Triangle,
    /// Noise.
    Noise,
    /// DC level.
    Dc,
    /// Gaussian pulse.
    Gaussian,
    /// Exponential rise.
    ExpRise,
    /// Exponential decay.
    ExpDecay,
    /// No waveform.
    None,
}

impl FgenType {
    pub(crate) fn to_cmd_str(self) -> &'static str {
        match self {
            FgenType::Sine => "SINE",
            FgenType::Square => "SQUARE",
            FgenType::Triangle => "TRIANGLE",
            FgenType::Noise => "NOISE",
            FgenType::Dc => "DC",
            FgenType::Gaussian => "GAUSSIAN",
            FgenType::ExpRise => "EXPRISE",
            FgenType::ExpDecay => "EXPDECAY",
            FgenType::None => "NONE",
        }
    }

    pub(crate) fn from_cmd_str(s: &str) -> Result<Self, InstrumentError> {
        match s.trim() {
            "SINE" => Ok(FgenType::Sine),
            "SQUARE" => Ok(FgenType::Square),
            "TRIANGLE" => Ok(FgenType::Triangle),
            "NOISE" => Ok(FgenType::Noise),
            "DC" => Ok(FgenType::Dc),
            "GAUSSIAN" => Ok(FgenType::Gaussian),
            "EXPRISE" => Ok(FgenType::ExpRise),
            "EXPDECAY" => Ok(FgenType::ExpDecay),
            "NONE" => Ok(FgenType::None),
            _ => Err(InstrumentError::ResponseParseError(s.to_string())),
        }
    }
}

/// Signal path of a function generator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalPath {
    /// DC coupled, high bandwidth.
    DcHighBandwidth,
    /// DC coupled, high voltage.
    DcHighVoltage,
    /// AC coupled, direct.
    AcDirect,
}

impl SignalPath {
    pub(crate) fn to_cmd_str(self) -> &'static str {
        match self {
            SignalPath::DcHighBandwidth => "DCHB",
            SignalPath::DcHighVoltage => "DCHV",
            SignalPath::AcDirect => "ACD",
        }
    }

    pub(crate) fn from_cmd_str(s: &str) -> Result<Self, InstrumentError> {
        match s.trim() {
            "DCHB" => Ok(SignalPath::DcHighBandwidth),
            "DCHV" => Ok(SignalPath::DcHighVoltage),
            "ACD" => Ok(SignalPath::AcDirect),
            _ => Err(InstrumentError::ResponseParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(FgenType::Sine)]
    #[case(FgenType::ExpDecay)]
    #[case(FgenType::None)]
    fn fgen_type_tokens(#[case] fgen: FgenType) {
        assert_eq!(FgenType::from_cmd_str(fgen.to_cmd_str()).unwrap(), fgen);
    }

    #[rstest]
    fn clock_source_tokens() {
        assert_eq!(
            ClockSource::from_cmd_str("EFIX\n").unwrap(),
            ClockSource::InternalFixedReference
        );
        assert_eq!(ClockSource::External.to_cmd_str(), "EXT");
        assert!(ClockSource::from_cmd_str("REF").is_err());
    }

    #[rstest]
    #[case("0", RunState::Stopped)]
    #[case("1", RunState::WaitingForTrigger)]
    #[case("2", RunState::Running)]
    fn run_state(#[case] s: &str, #[case] exp: RunState) {
        assert_eq!(RunState::from_cmd_str(s).unwrap(), exp);
    }

    #[rstest]
    fn run_state_display() {
        assert_eq!(RunState::WaitingForTrigger.to_string(), "Waiting for trigger");
    }
}
