//! Report sink trait and error types.

use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Endpoint disabled: the host has not configured the device, or has
    /// reset or deconfigured it.
    NotReady,
}

/// Async trait for HID report sinks.
///
/// This trait abstracts the endpoint that carries input reports to the
/// host, so the polling loop can be exercised without USB hardware.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Transmit one serialized report.
    ///
    /// May block until the host has collected the previous report.
    fn send(&mut self, report: &[u8]) -> impl Future<Output = Result<(), OutputError>>;
}
