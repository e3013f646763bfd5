//! USB connection status and the LED pattern shown for it.

/// Connection status as seen from the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbStatus {
    /// Bus disabled or suspended.
    #[default]
    NotReady,
    /// Attached and waiting for the host to select a configuration.
    Enumerating,
    /// Configured; reports flow to the host.
    Ready,
    /// An endpoint write failed while configured.
    Error,
}

impl UsbStatus {
    /// LED pattern used to indicate this status.
    #[must_use]
    pub const fn led_pattern(self) -> LedPattern {
        match self {
            Self::NotReady => LedPattern::Off,
            Self::Enumerating => LedPattern::Blink { period_ms: 100 },
            Self::Ready => LedPattern::Solid,
            Self::Error => LedPattern::Blink { period_ms: 500 },
        }
    }
}

/// What a single status LED should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPattern {
    Off,
    Solid,
    /// Toggle every `period_ms` milliseconds.
    Blink { period_ms: u32 },
}

/// Folds USB bus events into a [`UsbStatus`].
///
/// Each `on_*` method returns the new status so callers can forward it
/// without a second lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusTracker {
    status: UsbStatus,
    configured: bool,
    suspended: bool,
}

impl StatusTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: UsbStatus::NotReady,
            configured: false,
            suspended: false,
        }
    }

    /// Current status.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> UsbStatus {
        self.status
    }

    /// Bus enabled (`true`) or disabled (`false`).
    pub fn on_enabled(&mut self, enabled: bool) -> UsbStatus {
        self.configured = false;
        self.suspended = false;
        self.set(if enabled {
            UsbStatus::Enumerating
        } else {
            UsbStatus::NotReady
        })
    }

    /// Bus reset by the host.
    pub fn on_reset(&mut self) -> UsbStatus {
        self.configured = false;
        self.suspended = false;
        self.set(UsbStatus::Enumerating)
    }

    /// Configuration selected (`true`) or cleared (`false`).
    pub fn on_configured(&mut self, configured: bool) -> UsbStatus {
        self.configured = configured;
        if self.suspended {
            return self.status;
        }
        self.set(if configured {
            UsbStatus::Ready
        } else {
            UsbStatus::Enumerating
        })
    }

    /// Bus suspended (`true`) or resumed (`false`).
    pub fn on_suspended(&mut self, suspended: bool) -> UsbStatus {
        self.suspended = suspended;
        self.set(match (suspended, self.configured) {
            (true, _) => UsbStatus::NotReady,
            (false, true) => UsbStatus::Ready,
            (false, false) => UsbStatus::Enumerating,
        })
    }

    /// A report write failed. Only counts as an error while configured.
    pub fn on_output_error(&mut self) -> UsbStatus {
        if self.configured && !self.suspended {
            self.set(UsbStatus::Error)
        } else {
            self.status
        }
    }

    fn set(&mut self, status: UsbStatus) -> UsbStatus {
        if status != self.status {
            debug!("usb status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_not_ready() {
        let tracker = StatusTracker::new();
        assert_eq!(tracker.status(), UsbStatus::NotReady);
        assert_eq!(tracker, StatusTracker::default());
    }

    #[test]
    fn test_enumeration_sequence() {
        let mut tracker = StatusTracker::new();
        assert_eq!(tracker.on_enabled(true), UsbStatus::Enumerating);
        assert_eq!(tracker.on_reset(), UsbStatus::Enumerating);
        assert_eq!(tracker.on_configured(true), UsbStatus::Ready);
        assert_eq!(tracker.on_configured(false), UsbStatus::Enumerating);
        assert_eq!(tracker.on_enabled(false), UsbStatus::NotReady);
    }

    #[test]
    fn test_suspend_resume() {
        let mut tracker = StatusTracker::new();
        tracker.on_enabled(true);
        assert_eq!(tracker.on_suspended(true), UsbStatus::NotReady);
        assert_eq!(tracker.on_suspended(false), UsbStatus::Enumerating);

        tracker.on_configured(true);
        assert_eq!(tracker.on_suspended(true), UsbStatus::NotReady);
        // Configuration changes while suspended are remembered.
        assert_eq!(tracker.on_configured(true), UsbStatus::NotReady);
        assert_eq!(tracker.on_suspended(false), UsbStatus::Ready);
    }

    #[test]
    fn test_output_error_only_when_configured() {
        let mut tracker = StatusTracker::new();
        assert_eq!(tracker.on_output_error(), UsbStatus::NotReady);
        tracker.on_enabled(true);
        assert_eq!(tracker.on_output_error(), UsbStatus::Enumerating);

        tracker.on_configured(true);
        assert_eq!(tracker.on_output_error(), UsbStatus::Error);
    }

    #[test]
    fn test_error_cleared_by_configuration_or_reset() {
        let mut tracker = StatusTracker::new();
        tracker.on_enabled(true);
        tracker.on_configured(true);
        tracker.on_output_error();
        assert_eq!(tracker.on_configured(true), UsbStatus::Ready);

        tracker.on_output_error();
        assert_eq!(tracker.on_reset(), UsbStatus::Enumerating);
        assert_eq!(tracker.on_output_error(), UsbStatus::Enumerating);
    }

    #[test]
    fn test_led_patterns() {
        assert_eq!(UsbStatus::NotReady.led_pattern(), LedPattern::Off);
        assert_eq!(
            UsbStatus::Enumerating.led_pattern(),
            LedPattern::Blink { period_ms: 100 }
        );
        assert_eq!(UsbStatus::Ready.led_pattern(), LedPattern::Solid);
        assert_eq!(
            UsbStatus::Error.led_pattern(),
            LedPattern::Blink { period_ms: 500 }
        );
    }
}
