//! USB bus events to status LED plumbing.

use core::cell::RefCell;

use defmt::info;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_usb::Handler;
use joystick_core::{StatusTracker, UsbStatus};
use portable_atomic::{AtomicU32, Ordering};

/// Status tracker plus a latest-value signal for the LED task.
///
/// Also counts how often the host selected a configuration, so the tick
/// task can tell a fresh enumeration from an ongoing session.
pub struct StatusLink {
    tracker: Mutex<CriticalSectionRawMutex, RefCell<StatusTracker>>,
    signal: Signal<CriticalSectionRawMutex, UsbStatus>,
    configurations: AtomicU32,
}

impl StatusLink {
    pub const fn new() -> Self {
        Self {
            tracker: Mutex::new(RefCell::new(StatusTracker::new())),
            signal: Signal::new(),
            configurations: AtomicU32::new(0),
        }
    }

    /// Number of times the device has been configured since power-up.
    pub fn configurations(&self) -> u32 {
        self.configurations.load(Ordering::Acquire)
    }

    /// Apply one event to the tracker and publish the result if it changed.
    pub fn update(&self, event: impl FnOnce(&mut StatusTracker) -> UsbStatus) {
        let (before, after) = self.tracker.lock(|tracker| {
            let mut tracker = tracker.borrow_mut();
            let before = tracker.status();
            (before, event(&mut *tracker))
        });
        if before != after {
            info!("USB status: {:?}", after);
            self.signal.signal(after);
        }
    }

    /// Current status.
    pub fn status(&self) -> UsbStatus {
        self.tracker.lock(|tracker| tracker.borrow().status())
    }

    /// Wait for the next status change.
    pub async fn changed(&self) -> UsbStatus {
        self.signal.wait().await
    }
}

impl Default for StatusLink {
    fn default() -> Self {
        Self::new()
    }
}

/// embassy-usb device handler feeding a [`StatusLink`].
///
/// A new configuration also restores the host-visible idle period to its
/// default, before the host can send SET_IDLE for the new session.
pub struct UsbStatusHandler {
    link: &'static StatusLink,
    idle_ms: &'static AtomicU32,
    default_idle_ms: u32,
}

impl UsbStatusHandler {
    pub fn new(
        link: &'static StatusLink,
        idle_ms: &'static AtomicU32,
        default_idle_ms: u32,
    ) -> Self {
        Self {
            link,
            idle_ms,
            default_idle_ms,
        }
    }
}

impl Handler for UsbStatusHandler {
    fn enabled(&mut self, enabled: bool) {
        self.link.update(|tracker| tracker.on_enabled(enabled));
    }

    fn reset(&mut self) {
        self.link.update(StatusTracker::on_reset);
    }

    fn addressed(&mut self, addr: u8) {
        info!("USB address set to: {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            self.idle_ms.store(self.default_idle_ms, Ordering::Relaxed);
            self.link.configurations.fetch_add(1, Ordering::Release);
        }
        self.link.update(|tracker| tracker.on_configured(configured));
    }

    fn suspended(&mut self, suspended: bool) {
        self.link.update(|tracker| tracker.on_suspended(suspended));
    }
}
