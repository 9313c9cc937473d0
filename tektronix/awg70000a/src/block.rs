//! Waveform upload as IEEE 488.2 definite-length blocks.

use instrumentrs::InstrumentError;

/// Build the header `#{digits}{len}` of a definite-length block with `len` body bytes.
pub(crate) fn definite_block_header(len: usize) -> String {
    let len_str = len.to_string();
    format!("#{}{len_str}", len_str.len())
}

/// Encode normalized samples as little-endian `f32` values.
///
/// Every sample must lie within [-1, 1].
pub(crate) fn encode_samples(samples: &[f64]) -> Result<Vec<u8>, InstrumentError> {
    if let Some((idx, val)) = samples
        .iter()
        .enumerate()
        .find(|(_, v)| !(-1.0..=1.0).contains(*v))
    {
        return Err(InstrumentError::InvalidValue(format!(
            "Sample {idx} has value {val}, all samples must be within [-1, 1]"
        )));
    }
    Ok(samples
        .iter()
        .flat_map(|&v| (v as f32).to_le_bytes())
        .collect())
}
