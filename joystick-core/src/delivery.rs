//! Report delivery gate: change detection plus idle keep-alive.
//!
//! The HID interrupt endpoint should only carry a report when something
//! changed, or when the host asked for periodic repeats via SET_IDLE.
//! [`ReportGate`] keeps a copy of the last transmitted report and decides,
//! once per created report, whether it goes on the wire.

use crate::report::JoystickReport;

/// Previous-report buffer and idle timer for one HID interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportGate {
    /// Last transmitted bytes. Starts zeroed.
    previous: [u8; JoystickReport::SIZE],
    idle_ms: u32,
    idle_remaining_ms: u32,
    /// Set after a failed transmission so the next report goes out regardless.
    resend: bool,
}

impl ReportGate {
    /// Create a gate with the given keep-alive period. Zero disables it.
    ///
    /// The idle countdown starts expired, so with a non-zero period the
    /// first report after creation is sent on the first tick.
    #[must_use]
    pub const fn new(idle_ms: u32) -> Self {
        Self {
            previous: [0; JoystickReport::SIZE],
            idle_ms,
            idle_remaining_ms: 0,
            resend: false,
        }
    }

    /// Return to the freshly configured state with a new keep-alive period.
    ///
    /// Call this whenever the host (re)selects a configuration: the previous
    /// report is forgotten and the idle countdown restarts expired.
    pub fn reset(&mut self, idle_ms: u32) {
        debug!("delivery gate reset, idle {} ms", idle_ms);
        *self = Self::new(idle_ms);
    }

    /// Current keep-alive period in milliseconds (GET_IDLE).
    #[inline]
    #[must_use]
    pub const fn idle_ms(&self) -> u32 {
        self.idle_ms
    }

    /// Change the keep-alive period (SET_IDLE).
    ///
    /// A running countdown keeps its remaining time; the new period applies
    /// from the next reload. Re-setting the same period is a no-op.
    pub fn set_idle_ms(&mut self, idle_ms: u32) {
        if idle_ms != self.idle_ms {
            debug!("idle period {} -> {} ms", self.idle_ms, idle_ms);
            self.idle_ms = idle_ms;
            if self.idle_remaining_ms > idle_ms {
                self.idle_remaining_ms = idle_ms;
            }
        }
    }

    /// Count the idle period down by one millisecond.
    #[inline]
    pub fn millisecond_elapsed(&mut self) {
        self.elapse_ms(1);
    }

    /// Count the idle period down by `ms` milliseconds.
    pub fn elapse_ms(&mut self, ms: u32) {
        self.idle_remaining_ms = self.idle_remaining_ms.saturating_sub(ms);
    }

    /// Forget that the previous report reached the host.
    ///
    /// Call this when a transmission approved by [`Self::should_send`]
    /// failed; the next report is then sent even if unchanged.
    pub fn invalidate(&mut self) {
        self.resend = true;
    }

    /// Decide whether `report` must be transmitted.
    ///
    /// Returns `true` when `force` is set, when the bytes differ from the
    /// last transmitted report, when the idle period has elapsed, or after
    /// [`Self::invalidate`]. On `true` the bytes become the new previous
    /// report and the idle countdown reloads.
    pub fn should_send(&mut self, report: &[u8], force: bool) -> bool {
        let changed = report != self.previous.as_slice();
        let idle_elapsed = self.idle_ms != 0 && self.idle_remaining_ms == 0;

        if !(force || changed || idle_elapsed || self.resend) {
            return false;
        }

        let len = report.len().min(JoystickReport::SIZE);
        self.previous = [0; JoystickReport::SIZE];
        self.previous[..len].copy_from_slice(&report[..len]);
        self.idle_remaining_ms = self.idle_ms;
        self.resend = false;
        true
    }

    /// Last transmitted report bytes.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> &[u8] {
        &self.previous
    }
}
