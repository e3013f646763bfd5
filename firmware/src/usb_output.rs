//! USB HID joystick output and control request handling.

use defmt::debug;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{
    Config, HidBootProtocol, HidSubclass, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use joystick_core::sampler::InputSampler;
use joystick_core::{HidReportHandler, OutputError, ReportSink, ReportType, REPORT_DESCRIPTOR};
use portable_atomic::{AtomicU32, Ordering};

use crate::shared::SharedJoystick;

/// HID writer type used by this firmware.
pub type JoystickWriter<'d> = HidWriter<'d, Driver<'d, USB>, 8>;

/// USB HID joystick output.
///
/// Wraps an embassy-usb HID writer to send serialized joystick reports.
pub struct UsbHidOutput<'d> {
    writer: JoystickWriter<'d>,
}

impl<'d> UsbHidOutput<'d> {
    /// Create a new USB HID output from the given HID writer.
    pub fn new(writer: JoystickWriter<'d>) -> Self {
        Self { writer }
    }

    /// Wait until the device is ready (USB configured).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
    }
}

impl<'d> ReportSink for UsbHidOutput<'d> {
    async fn send(&mut self, report: &[u8]) -> Result<(), OutputError> {
        self.writer.write(report).await.map_err(|e| match e {
            EndpointError::Disabled => OutputError::NotReady,
            _ => OutputError::Io,
        })
    }
}

/// HID request handler: GET_REPORT, SET_REPORT, GET_IDLE and SET_IDLE.
///
/// Reports are served by the shared device. The idle period is stored in
/// an atomic the tick task copies into its delivery gate.
pub struct JoystickRequestHandler<S: 'static> {
    device: SharedJoystick<S>,
    idle_ms: &'static AtomicU32,
}

impl<S> JoystickRequestHandler<S> {
    pub fn new(device: SharedJoystick<S>, idle_ms: &'static AtomicU32) -> Self {
        Self { device, idle_ms }
    }
}

fn split_report_id(id: ReportId) -> (u8, ReportType) {
    match id {
        ReportId::In(id) => (id, ReportType::Input),
        ReportId::Out(id) => (id, ReportType::Output),
        ReportId::Feature(id) => (id, ReportType::Feature),
    }
}

impl<S: InputSampler> RequestHandler for JoystickRequestHandler<S> {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        let (mut report_id, report_type) = split_report_id(id);
        let created = self.device.create_report(&mut report_id, report_type, buf);
        debug!("GET_REPORT {:?}: {} bytes", report_type, created.size);
        (created.size > 0).then_some(created.size)
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        let (report_id, report_type) = split_report_id(id);
        self.device.process_report(report_id, report_type, data);
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, duration_ms: u32) {
        debug!("SET_IDLE {} ms", duration_ms);
        self.idle_ms.store(duration_ms, Ordering::Relaxed);
    }

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        Some(self.idle_ms.load(Ordering::Relaxed))
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    request_handler: &'d mut dyn RequestHandler,
) -> JoystickWriter<'d> {
    let config = Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(request_handler),
        poll_ms: 1,
        max_packet_size: 8,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
