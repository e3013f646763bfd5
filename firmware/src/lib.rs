//! Debounced digital joystick to USB HID adapter for RP2040.
//!
//! This crate wires the platform-agnostic `joystick-core` pipeline to the
//! RP2040: GPIO inputs, the embassy-usb HID class, and the status LED.

#![no_std]

// Re-export core types for convenience
pub use joystick_core::{
    build_report, BridgeError, ButtonLineSet, DebounceWindow, DeviceConfig, HidReportHandler,
    JoystickBridge, JoystickDevice, JoystickDirections, JoystickReport, LedPattern, OutputError,
    PinSampler, ReportSink, StatusTracker, TickOutcome, UsbStatus, REPORT_DESCRIPTOR,
};

pub mod led;
pub mod shared;
pub mod status;
pub mod usb_output;

pub use led::drive_led;
pub use shared::{SharedDevice, SharedJoystick};
pub use status::{StatusLink, UsbStatusHandler};
pub use usb_output::{configure_usb_hid, JoystickRequestHandler, UsbHidOutput};

/// pid.codes test vendor ID.
pub const USB_VID: u16 = 0x1209;
/// pid.codes test product ID.
pub const USB_PID: u16 = 0x0001;
pub const USB_MANUFACTURER: &str = "Rust Joystick";
pub const USB_PRODUCT: &str = "USB Joystick Adapter";
pub const USB_SERIAL: &str = "001";

/// Pipeline configuration baked into this firmware build.
#[cfg(not(feature = "debounce-long"))]
pub const DEVICE_CONFIG: DeviceConfig = DeviceConfig::DEFAULT;

/// Pipeline configuration baked into this firmware build.
#[cfg(feature = "debounce-long")]
pub const DEVICE_CONFIG: DeviceConfig = DeviceConfig::DEFAULT.with_window(DebounceWindow::Long);
