//! Platform-agnostic core of a USB HID joystick adapter.
//!
//! This crate turns raw digital joystick and button lines into a standard
//! 3-byte HID input report, without any platform-specific dependencies. It
//! can be used both in embedded `no_std` firmware and on host for testing.
//!
//! # Overview
//!
//! The pipeline runs leaf to root:
//!
//! - [`sampler`]: reads active-low pins ([`InputSampler`], [`PinSampler`])
//! - [`debounce`]: bit-parallel vertical counter debounce ([`Debouncer`])
//! - [`report`]: maps directions and buttons to a [`JoystickReport`]
//! - [`device`]: owns sampler and debouncer, serves the host stack callbacks
//!   ([`JoystickDevice`], [`HidReportHandler`])
//! - [`delivery`]: change detection and idle keep-alive ([`ReportGate`])
//! - [`bridge`]: one polling tick end to end ([`JoystickBridge`])
//! - [`status`]: USB status tracking and LED patterns ([`StatusTracker`])
//!
//! # Example
//!
//! ```rust
//! use joystick_core::{build_report, ButtonLineSet, Debouncer, DebounceWindow, JoystickDirections};
//!
//! let mut debouncer = Debouncer::new(DebounceWindow::Short);
//! let raw = ButtonLineSet::BUTTON1;
//!
//! // A press is accepted on the fourth consecutive tick.
//! for _ in 0..3 {
//!     assert!(debouncer.update(raw).is_empty());
//! }
//! assert_eq!(debouncer.update(raw), ButtonLineSet::BUTTON1);
//!
//! let report = build_report(JoystickDirections::UP | JoystickDirections::RIGHT, debouncer.confirmed());
//! assert_eq!(report.as_bytes(), [100, (-100i8) as u8, 0x01]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Route internal logging through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This must go first so the macros are visible to the other modules.
mod fmt;

pub mod bridge;
pub mod config;
pub mod debounce;
pub mod delivery;
pub mod device;
pub mod handler;
pub mod output;
pub mod report;
pub mod sampler;
pub mod status;
pub mod types;

// Re-export main types at crate root
pub use bridge::{BridgeError, JoystickBridge, TickOutcome};
pub use config::{DebounceWindow, DeviceConfig};
pub use debounce::Debouncer;
pub use delivery::ReportGate;
pub use device::JoystickDevice;
pub use handler::{CreatedReport, HidReportHandler, ReportType, Ticked};
pub use output::{OutputError, ReportSink};
pub use report::{build_report, JoystickReport, AXIS_MAGNITUDE, REPORT_DESCRIPTOR};
pub use sampler::{InputSampler, PinSampler};
pub use status::{LedPattern, StatusTracker, UsbStatus};
pub use types::{ButtonLineSet, JoystickDirections};
