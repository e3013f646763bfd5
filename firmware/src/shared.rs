//! Joystick device shared between the tick task and USB control requests.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use joystick_core::sampler::InputSampler;
use joystick_core::{CreatedReport, HidReportHandler, JoystickDevice, ReportType, Ticked};

/// The device behind a critical-section mutex.
pub type SharedDevice<S> = Mutex<CriticalSectionRawMutex, RefCell<JoystickDevice<S>>>;

/// Handle to a [`SharedDevice`].
///
/// The tick task drives it through the bridge while the USB stack serves
/// GET_REPORT and SET_REPORT through the request handler. Every call holds
/// the lock only for its own duration, never across an await.
pub struct SharedJoystick<S: 'static> {
    device: &'static SharedDevice<S>,
}

impl<S> SharedJoystick<S> {
    pub const fn new(device: &'static SharedDevice<S>) -> Self {
        Self { device }
    }
}

impl<S> Clone for SharedJoystick<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SharedJoystick<S> {}

impl<S: InputSampler> Ticked for SharedJoystick<S> {
    fn tick(&mut self) {
        self.device.lock(|device| device.borrow_mut().tick());
    }
}

impl<S: InputSampler> HidReportHandler for SharedJoystick<S> {
    fn create_report(
        &mut self,
        report_id: &mut u8,
        report_type: ReportType,
        buf: &mut [u8],
    ) -> CreatedReport {
        self.device.lock(|device| {
            device
                .borrow_mut()
                .create_report(report_id, report_type, buf)
        })
    }

    fn process_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]) {
        self.device.lock(|device| {
            device
                .borrow_mut()
                .process_report(report_id, report_type, data)
        });
    }
}
