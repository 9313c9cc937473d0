//! Shortcuts to create [`crate::Instrument`] interfaces for common ports.

#[cfg(feature = "serial")]
pub mod serial;
pub mod tcp_ip;
