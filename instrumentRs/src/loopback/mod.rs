//! Scripted instrument simulators for driver tests.
//!
//! Both loopbacks are created with the exact traffic the host is expected to send and the answers
//! the instrument gives back. Any deviation from the script panics, as does traffic that is left
//! over when the loopback is dropped.
//!
//! - [`LoopbackInterfaceString`] scripts line-based command sets and appends the terminator to
//!   every line, which suits SCPI and TSP instruments.
//! - [`LoopbackInterfaceBytes`] scripts raw bytes and uses them unmodified. Answers of the
//!   instrument form one continuous stream, such that definite-length blocks and fixed-size
//!   reports can be read in arbitrary chunks.

mod loopback_interface_bytes;
mod loopback_interface_string;

pub use loopback_interface_bytes::*;
pub use loopback_interface_string::*;

/// Position in a script, starting at 0 and advancing on every call to `next`.
#[derive(Debug, Default)]
struct IncrIndex {
    index: usize,
}

impl IncrIndex {
    fn next(&mut self) -> usize {
        let current = self.index;
        self.index += 1;
        current
    }
}
