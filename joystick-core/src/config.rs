//! Device configuration: tick period, debounce window, idle keep-alive.

/// Length of the vertical counter, and so of the debounce window.
///
/// The window is counted in ticks, not time. With the default 1 ms tick a
/// [`Short`](Self::Short) window accepts a change after 4 ms and a
/// [`Long`](Self::Long) window after 8 ms.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceWindow {
    /// Two counter bits: 4 ticks of contiguous disagreement.
    #[default]
    Short,
    /// Three counter bits: 8 ticks of contiguous disagreement.
    Long,
}

impl DebounceWindow {
    /// Number of consecutive disagreeing ticks needed to accept a change.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u8 {
        match self {
            DebounceWindow::Short => 4,
            DebounceWindow::Long => 8,
        }
    }
}

/// Runtime configuration of the joystick pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Period of the tick that advances the debouncer, in milliseconds.
    pub tick_period_ms: u64,
    /// Debounce window length.
    pub window: DebounceWindow,
    /// Keep-alive period used until the host sends SET_IDLE, in milliseconds.
    /// Zero reports only on change.
    pub default_idle_ms: u32,
}

impl DeviceConfig {
    /// One tick per USB full-speed frame, short window, 500 ms keep-alive.
    pub const DEFAULT: Self = Self {
        tick_period_ms: 1,
        window: DebounceWindow::Short,
        default_idle_ms: 500,
    };

    /// Replace the debounce window.
    #[must_use]
    pub const fn with_window(mut self, window: DebounceWindow) -> Self {
        self.window = window;
        self
    }

    /// Replace the tick period.
    #[must_use]
    pub const fn with_tick_period_ms(mut self, tick_period_ms: u64) -> Self {
        self.tick_period_ms = tick_period_ms;
        self
    }

    /// Replace the default idle period.
    #[must_use]
    pub const fn with_default_idle_ms(mut self, default_idle_ms: u32) -> Self {
        self.default_idle_ms = default_idle_ms;
        self
    }

    /// Wall-clock time a change must persist before it is accepted.
    #[inline]
    #[must_use]
    pub const fn debounce_ms(&self) -> u64 {
        self.tick_period_ms * self.window.ticks() as u64
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
