//! Digital input sampling for the joystick and button ports.

use embedded_hal::digital::InputPin;

use crate::types::{ButtonLineSet, JoystickDirections};

/// Source of raw joystick and button samples.
///
/// Implementations return the instantaneous logical state of the lines:
/// a bit is set when the line is asserted. Sampling has no side effects
/// beyond the read and cannot fail.
pub trait InputSampler {
    /// Read the four joystick direction lines.
    fn sample_joystick(&mut self) -> JoystickDirections;

    /// Read the eight button lines.
    fn sample_buttons(&mut self) -> ButtonLineSet;
}

/// Order of the joystick pins handed to [`PinSampler::new`].
const DIRECTION_ORDER: [JoystickDirections; 4] = [
    JoystickDirections::UP,
    JoystickDirections::DOWN,
    JoystickDirections::LEFT,
    JoystickDirections::RIGHT,
];

/// [`InputSampler`] over `embedded-hal` input pins.
///
/// Every line is wired active-low with a pull-up: a switch closes the line
/// to ground, so an electrically low pin reads as asserted.
///
/// # Pins
///
/// - `joystick`: up, down, left, right
/// - `buttons`: button 1 through button 8
pub struct PinSampler<P> {
    joystick: [P; 4],
    buttons: [P; 8],
}

impl<P: InputPin> PinSampler<P> {
    /// Create a sampler from already configured pull-up input pins.
    #[must_use]
    pub fn new(joystick: [P; 4], buttons: [P; 8]) -> Self {
        Self { joystick, buttons }
    }
}

/// A failed read counts as a released line.
#[inline]
fn asserted<P: InputPin>(pin: &mut P) -> bool {
    pin.is_low().unwrap_or(false)
}

impl<P: InputPin> InputSampler for PinSampler<P> {
    fn sample_joystick(&mut self) -> JoystickDirections {
        let mut directions = JoystickDirections::NONE;
        for (pin, direction) in self.joystick.iter_mut().zip(DIRECTION_ORDER) {
            directions.set(direction, asserted(pin));
        }
        directions
    }

    fn sample_buttons(&mut self) -> ButtonLineSet {
        let mut bits = 0u8;
        for (line, pin) in self.buttons.iter_mut().enumerate() {
            if asserted(pin) {
                bits |= 1 << line;
            }
        }
        ButtonLineSet(bits) & ButtonLineSet::ALL
    }
}

#[cfg(test)]
pub(crate) mod mock {
    extern crate std;

    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::rc::Rc;

    /// Pin whose electrical level is shared with the test body.
    ///
    /// `true` in the cell means the line is pulled low (switch closed).
    #[derive(Clone)]
    pub struct MockPin(pub Rc<Cell<bool>>);

    impl MockPin {
        pub fn open() -> Self {
            Self(Rc::new(Cell::new(false)))
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0.get())
        }
    }

    /// Sampler replaying values written by the test body.
    #[derive(Clone, Default)]
    pub struct ScriptedSampler {
        pub joystick: Rc<Cell<JoystickDirections>>,
        pub buttons: Rc<Cell<ButtonLineSet>>,
    }

    impl InputSampler for ScriptedSampler {
        fn sample_joystick(&mut self) -> JoystickDirections {
            self.joystick.get()
        }

        fn sample_buttons(&mut self) -> ButtonLineSet {
            self.buttons.get()
        }
    }
}
