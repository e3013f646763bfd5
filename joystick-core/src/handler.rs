//! Callback contract between the USB device stack and the report producer.
//!
//! The stack owns enumeration, endpoints and control requests. It calls into
//! the report producer through [`HidReportHandler`] whenever it needs a
//! report or has received one, and through [`Ticked`] once per time tick.

/// HID report type, as carried in the high byte of a GET/SET_REPORT `wValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportType {
    /// Device-to-host input report.
    Input,
    /// Host-to-device output report.
    Output,
    /// Bidirectional feature report.
    Feature,
}

/// Result of [`HidReportHandler::create_report`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct CreatedReport {
    /// Number of bytes written to the buffer. Zero means no report.
    pub size: usize,
    /// `true` to send even if the report equals the previous one; `false`
    /// leaves the decision to the delivery gate's change detection.
    pub force_send: bool,
}

impl CreatedReport {
    /// Nothing was produced.
    pub const NONE: Self = Self {
        size: 0,
        force_send: false,
    };
}

/// Report producer invoked by the USB device stack.
///
/// # Contract
///
/// - `create_report` must write a complete report (every byte set) or
///   nothing at all.
/// - `process_report` must accept any well-formed host report without
///   failing, even when the device has no use for it.
pub trait HidReportHandler {
    /// Produce a report into `buf`.
    ///
    /// `report_id` holds the ID requested by the host, or zero; the handler
    /// sets it to the ID of the generated report. Devices without report IDs
    /// leave it at zero.
    fn create_report(
        &mut self,
        report_id: &mut u8,
        report_type: ReportType,
        buf: &mut [u8],
    ) -> CreatedReport;

    /// Consume a report sent by the host.
    fn process_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]);
}

/// Periodic time tick.
///
/// One call is one unit of debounce time. Callers must invoke it exactly
/// once per tick period and never re-entrantly.
pub trait Ticked {
    /// Advance time-dependent state by one tick.
    fn tick(&mut self);
}
