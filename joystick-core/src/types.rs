//! Core input types: ButtonLineSet, JoystickDirections.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

/// One 8-line button port represented as a bitfield.
///
/// Bit `n` is button `n + 1`. A set bit means "pressed": the active-low
/// electrical level has already been inverted by the sampler.
///
/// # Example
///
/// ```
/// use joystick_core::ButtonLineSet;
///
/// let buttons = ButtonLineSet::BUTTON1 | ButtonLineSet::BUTTON8;
/// assert!(buttons.contains(ButtonLineSet::BUTTON1));
/// assert!(!buttons.contains(ButtonLineSet::BUTTON2));
/// assert_eq!(buttons.raw(), 0x81);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLineSet(pub u8);

impl ButtonLineSet {
    pub const BUTTON1: Self = Self(1 << 0);
    pub const BUTTON2: Self = Self(1 << 1);
    pub const BUTTON3: Self = Self(1 << 2);
    pub const BUTTON4: Self = Self(1 << 3);
    pub const BUTTON5: Self = Self(1 << 4);
    pub const BUTTON6: Self = Self(1 << 5);
    pub const BUTTON7: Self = Self(1 << 6);
    pub const BUTTON8: Self = Self(1 << 7);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Every valid button line.
    pub const ALL: Self = Self(0xFF);

    /// Number of lines in one port.
    pub const LINES: usize = 8;

    /// Button set for a single zero-based line index.
    ///
    /// Returns `None` if `index` is not below [`Self::LINES`].
    #[inline]
    #[must_use]
    pub const fn line(index: usize) -> Option<Self> {
        if index < Self::LINES {
            Some(Self(1 << index))
        } else {
            None
        }
    }

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, buttons: ButtonLineSet) -> bool {
        (self.0 & buttons.0) == buttons.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, buttons: ButtonLineSet, pressed: bool) {
        if pressed {
            self.0 |= buttons.0;
        } else {
            self.0 &= !buttons.0;
        }
    }

    /// Get the raw u8 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ButtonLineSet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonLineSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ButtonLineSet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for ButtonLineSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitXor for ButtonLineSet {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for ButtonLineSet {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Digital joystick direction mask.
///
/// Only the low four bits are meaningful. Opposite directions may both be
/// set here (a worn or shorted stick can do that); resolving them is the
/// report builder's job.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickDirections(u8);

impl JoystickDirections {
    pub const UP: Self = Self(1 << 0);
    pub const DOWN: Self = Self(1 << 1);
    pub const LEFT: Self = Self(1 << 2);
    pub const RIGHT: Self = Self(1 << 3);

    /// Stick centered.
    pub const NONE: Self = Self(0);

    /// All four direction bits.
    pub const ALL: Self = Self(0x0F);

    /// Build a direction mask, dropping any bits outside [`Self::ALL`].
    #[inline]
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Check if the given direction(s) are asserted.
    #[inline]
    #[must_use]
    pub const fn contains(self, directions: JoystickDirections) -> bool {
        (self.0 & directions.0) == directions.0
    }

    /// Assert or release direction(s).
    #[inline]
    pub fn set(&mut self, directions: JoystickDirections, asserted: bool) {
        if asserted {
            self.0 |= directions.0;
        } else {
            self.0 &= !directions.0;
        }
    }

    /// Get the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if the stick is centered.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for JoystickDirections {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for JoystickDirections {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
