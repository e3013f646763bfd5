//! HID joystick report: wire layout, descriptor and the report builder.

use crate::types::{ButtonLineSet, JoystickDirections};

/// Axis deflection reported for an asserted direction.
pub const AXIS_MAGNITUDE: i8 = 100;

/// USB HID joystick input report.
///
/// This matches [`REPORT_DESCRIPTOR`].
/// Total size: 3 bytes, `[X:i8][Y:i8][Button:u8]`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct JoystickReport {
    /// X axis, negative is left (-100 to 100)
    pub x: i8,
    /// Y axis, negative is up (-100 to 100)
    pub y: i8,
    /// Button bitfield (8 buttons)
    pub buttons: u8,
}

impl JoystickReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 3;

    /// Neutral/zero report.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            x: 0,
            y: 0,
            buttons: 0,
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; Self::SIZE] {
        [self.x as u8, self.y as u8, self.buttons]
    }

    /// Parse a report from the front of `bytes`.
    ///
    /// Returns `None` if fewer than [`Self::SIZE`] bytes are given.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [x, y, buttons, ..] => Some(Self {
                x: *x as i8,
                y: *y as i8,
                buttons: *buttons,
            }),
            _ => None,
        }
    }

    /// Write the report into `buf`, returning the number of bytes written.
    ///
    /// Writes nothing and returns 0 if `buf` is shorter than [`Self::SIZE`].
    pub fn write_to(&self, buf: &mut [u8]) -> usize {
        match buf.get_mut(..Self::SIZE) {
            Some(dst) => {
                dst.copy_from_slice(&self.as_bytes());
                Self::SIZE
            }
            None => 0,
        }
    }
}

/// Build a report from a joystick sample and the debounced buttons.
///
/// Opposite directions are resolved by priority, not independently:
/// UP wins over DOWN and LEFT wins over RIGHT. A centered axis reports 0.
#[must_use]
pub fn build_report(joystick: JoystickDirections, buttons: ButtonLineSet) -> JoystickReport {
    let y = if joystick.contains(JoystickDirections::UP) {
        -AXIS_MAGNITUDE
    } else if joystick.contains(JoystickDirections::DOWN) {
        AXIS_MAGNITUDE
    } else {
        0
    };

    let x = if joystick.contains(JoystickDirections::LEFT) {
        -AXIS_MAGNITUDE
    } else if joystick.contains(JoystickDirections::RIGHT) {
        AXIS_MAGNITUDE
    } else {
        0
    };

    JoystickReport {
        x,
        y,
        buttons: buttons.raw(),
    }
}

/// HID Joystick Report Descriptor.
///
/// This descriptor defines a joystick with:
/// - X/Y axes in a pointer collection (signed 8-bit, -100 to 100)
/// - 8 buttons (one bit each)
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Axes ---
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x16, 0x9C, 0xFF, //     Logical Minimum (-100)
    0x26, 0x64, 0x00, //     Logical Maximum (100)
    0x36, 0xFF, 0xFF, //     Physical Minimum (-1)
    0x46, 0x01, 0x00, //     Physical Maximum (1)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x08, //     Report Size (8)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0xC0, //   End Collection
    //
    // --- Buttons (8 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x08, //   Usage Maximum (Button 8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];
