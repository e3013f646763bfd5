//! JoystickBridge: one polling tick from pins to the HID endpoint.

use crate::config::DeviceConfig;
use crate::delivery::ReportGate;
use crate::handler::{HidReportHandler, ReportType, Ticked};
use crate::output::{OutputError, ReportSink};
use crate::report::JoystickReport;

/// What a single [`JoystickBridge::process_tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// The handler produced no report.
    Empty,
    /// A report was built but matches the last transmitted one.
    Unchanged,
    /// A report was transmitted.
    Sent,
}

/// Drives a report handler once per tick and forwards reports to a sink.
///
/// Each tick advances the handler's debounce state exactly once, creates a
/// report, and lets the [`ReportGate`] decide whether the sink receives it.
///
/// # Error Handling
///
/// A failed transmission invalidates the gate, so the same report is
/// offered again on the next tick instead of being lost.
pub struct JoystickBridge<H, O> {
    handler: H,
    output: O,
    gate: ReportGate,
    tick_period_ms: u32,
}

impl<H: HidReportHandler + Ticked, O: ReportSink> JoystickBridge<H, O> {
    /// Create a bridge from a report handler and a report sink.
    pub fn new(handler: H, output: O, config: &DeviceConfig) -> Self {
        Self {
            handler,
            output,
            gate: ReportGate::new(config.default_idle_ms),
            tick_period_ms: u32::try_from(config.tick_period_ms).unwrap_or(u32::MAX),
        }
    }

    /// Run one tick: debounce, build, gate, transmit.
    ///
    /// Must be called exactly once per configured tick period.
    pub async fn process_tick(&mut self) -> Result<TickOutcome, BridgeError> {
        self.handler.tick();
        self.gate.elapse_ms(self.tick_period_ms);

        let mut report_id = 0;
        let mut buf = [0u8; JoystickReport::SIZE];
        let created = self
            .handler
            .create_report(&mut report_id, ReportType::Input, &mut buf);
        if created.size == 0 {
            return Ok(TickOutcome::Empty);
        }

        let report = &buf[..created.size];
        if !self.gate.should_send(report, created.force_send) {
            return Ok(TickOutcome::Unchanged);
        }

        trace!("sending report {:?}", report);
        if let Err(e) = self.output.send(report).await {
            self.gate.invalidate();
            return Err(BridgeError::Output(e));
        }
        Ok(TickOutcome::Sent)
    }

    /// Get a reference to the report handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Get a reference to the report sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the report sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Get a reference to the delivery gate.
    pub fn gate(&self) -> &ReportGate {
        &self.gate
    }

    /// Get a mutable reference to the delivery gate (SET_IDLE updates,
    /// reset on a new configuration).
    pub fn gate_mut(&mut self) -> &mut ReportGate {
        &mut self.gate
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the report sink.
    Output(OutputError),
}
