//! JoystickDevice: the report producer served to the USB device stack.

use crate::config::DeviceConfig;
use crate::debounce::Debouncer;
use crate::handler::{CreatedReport, HidReportHandler, ReportType, Ticked};
use crate::report::{build_report, JoystickReport};
use crate::sampler::InputSampler;
use crate::types::ButtonLineSet;

/// Joystick adapter state: the input sampler plus the one button debouncer.
///
/// Buttons are debounced on [`Ticked::tick`]; the joystick is sampled fresh
/// whenever a report is created. Creating or consuming reports never
/// advances the debouncer, so the host may poll GET_REPORT freely.
pub struct JoystickDevice<S> {
    sampler: S,
    debouncer: Debouncer,
    last_report: JoystickReport,
}

impl<S: InputSampler> JoystickDevice<S> {
    /// Create a device with every button confirmed released.
    #[must_use]
    pub fn new(sampler: S, config: &DeviceConfig) -> Self {
        Self {
            sampler,
            debouncer: Debouncer::new(config.window),
            last_report: JoystickReport::neutral(),
        }
    }

    /// Sample the joystick and build a report from the debounced buttons.
    pub fn report(&mut self) -> JoystickReport {
        let joystick = self.sampler.sample_joystick();
        let report = build_report(joystick, self.debouncer.confirmed());
        self.last_report = report;
        report
    }

    /// Debounced button state.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> ButtonLineSet {
        self.debouncer.confirmed()
    }

    /// The most recently built report.
    #[inline]
    #[must_use]
    pub fn last_report(&self) -> JoystickReport {
        self.last_report
    }

    /// Read-only view of the debounce state.
    #[inline]
    #[must_use]
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }
}

impl<S: InputSampler> Ticked for JoystickDevice<S> {
    fn tick(&mut self) {
        let raw = self.sampler.sample_buttons();
        self.debouncer.update(raw);
    }
}

impl<S: InputSampler> HidReportHandler for JoystickDevice<S> {
    /// The joystick has a single unnumbered report, served for every type.
    fn create_report(
        &mut self,
        report_id: &mut u8,
        _report_type: ReportType,
        buf: &mut [u8],
    ) -> CreatedReport {
        *report_id = 0;

        let size = self.report().write_to(buf);
        if size == 0 {
            warn!("report buffer too small: {} bytes", buf.len());
        }

        CreatedReport {
            size,
            force_send: false,
        }
    }

    fn process_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]) {
        // No host-to-device reports are defined for this device.
        debug!(
            "discarding {:?} report {} ({} bytes)",
            report_type,
            report_id,
            data.len()
        );
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::DebounceWindow;
    use crate::sampler::mock::ScriptedSampler;
    use crate::types::JoystickDirections;
    use std::vec::Vec;

    fn device() -> (JoystickDevice<ScriptedSampler>, ScriptedSampler) {
        let sampler = ScriptedSampler::default();
        let device = JoystickDevice::new(sampler.clone(), &DeviceConfig::DEFAULT);
        (device, sampler)
    }

    fn create(device: &mut JoystickDevice<ScriptedSampler>) -> (CreatedReport, [u8; 3]) {
        let mut id = 7;
        let mut buf = [0xEE; 3];
        let created = device.create_report(&mut id, ReportType::Input, &mut buf);
        assert_eq!(id, 0);
        (created, buf)
    }

    #[test]
    fn test_create_report_writes_full_report() {
        let (mut device, sampler) = device();
        sampler.joystick.set(JoystickDirections::UP | JoystickDirections::DOWN | JoystickDirections::RIGHT);

        let (created, buf) = create(&mut device);
        assert_eq!(
            created,
            CreatedReport {
                size: 3,
                force_send: false
            }
        );
        assert_eq!(buf, [100, (-100i8) as u8, 0]);
        assert_eq!(device.last_report().as_bytes(), buf);
    }

    #[test]
    fn test_buttons_follow_ticks_not_reports() {
        let (mut device, sampler) = device();
        sampler.buttons.set(ButtonLineSet::BUTTON3);

        // Report creation alone never advances the debouncer.
        for _ in 0..10 {
            let (_, buf) = create(&mut device);
            assert_eq!(buf[2], 0);
        }

        for _ in 0..3 {
            device.tick();
        }
        assert!(device.buttons().is_empty());
        device.tick();
        assert_eq!(device.buttons(), ButtonLineSet::BUTTON3);

        let (_, buf) = create(&mut device);
        assert_eq!(buf[2], ButtonLineSet::BUTTON3.raw());
    }

    #[test]
    fn test_long_window_from_config() {
        let sampler = ScriptedSampler::default();
        let config = DeviceConfig::DEFAULT.with_window(DebounceWindow::Long);
        let mut device = JoystickDevice::new(sampler.clone(), &config);
        assert_eq!(device.debouncer().window(), DebounceWindow::Long);
        sampler.buttons.set(ButtonLineSet::BUTTON1);
        for _ in 0..7 {
            device.tick();
        }
        assert!(device.buttons().is_empty());
        device.tick();
        assert_eq!(device.buttons(), ButtonLineSet::BUTTON1);
    }

    #[test]
    fn test_short_buffer_produces_nothing() {
        let (mut device, _sampler) = device();
        let mut id = 0;
        let mut buf = [0xEE; 2];
        let created = device.create_report(&mut id, ReportType::Input, &mut buf);
        assert_eq!(created, CreatedReport::NONE);
        assert_eq!(buf, [0xEE, 0xEE]);
    }

    #[test]
    fn test_every_input_combination_reported() {
        let (mut device, sampler) = device();
        for bits in 0u16..(1 << 12) {
            let joystick = JoystickDirections::from_bits_truncate((bits & 0x0F) as u8);
            let buttons = ButtonLineSet((bits >> 4) as u8);
            sampler.joystick.set(joystick);
            sampler.buttons.set(buttons);
            for _ in 0..DebounceWindow::Short.ticks() {
                device.tick();
            }

            let (created, buf) = create(&mut device);
            assert_eq!(created.size, JoystickReport::SIZE);
            assert_eq!(buf, build_report(joystick, buttons).as_bytes());
        }
    }

    #[test]
    fn test_process_report_is_a_no_op() {
        let (mut device, sampler) = device();
        sampler.buttons.set(ButtonLineSet::BUTTON2);
        device.tick();
        device.tick();
        let _ = create(&mut device);

        let debouncer_before = device.debouncer().clone();
        let report_before = device.last_report();

        let mut payload: Vec<u8> = Vec::new();
        for len in 0..=64u8 {
            for report_type in [ReportType::Output, ReportType::Feature, ReportType::Input] {
                device.process_report(len, report_type, &payload);
            }
            payload.push(len.wrapping_mul(37));
        }

        assert_eq!(device.debouncer(), &debouncer_before);
        assert_eq!(device.last_report(), report_before);
    }
}
