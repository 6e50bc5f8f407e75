//! Result of one bring-up run

use crate::commands::{OperatingMode, Reply};
use crate::{Error, ErrorKind};

/// What happened to one step of the bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The step was never attempted
    #[default]
    Skipped,
    /// The module confirmed the step
    Confirmed,
    /// The step failed
    Failed(ErrorKind),
}

impl Outcome {
    /// Summarizes the result of a step.
    pub fn of<R, E>(result: &Result<R, Error<E>>) -> Self {
        match result {
            Ok(_) => Outcome::Confirmed,
            Err(e) => Outcome::Failed(e.kind()),
        }
    }

    /// Whether the module confirmed the step.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Confirmed)
    }
}

/// Per-step record of a [`Bluetooth::initialize`](crate::Bluetooth::initialize) run.
///
/// Nothing in here is an error: every failure has already been logged and
/// absorbed. The report exists so callers and tests can see which steps took
/// effect without parsing log output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// Command mode and baud rate change
    pub baud_rate: Outcome,
    /// Device name
    pub name: Outcome,
    /// Own address query
    pub device_id: Outcome,
    /// Remote configuration timer
    pub configuration_timer: Outcome,
    /// Inquiry scan window
    pub inquiry_window: Outcome,
    /// Page scan window
    pub page_scan_window: Outcome,
    /// Firmware version query
    pub firmware_version: Outcome,
    /// Stored remote address query; only run on pre-6.x firmware
    pub remote_address: Outcome,
    /// Connection mode change
    pub mode: Outcome,
    /// Final reboot
    pub reboot: Outcome,
    /// Firmware banner, when it could be read
    pub firmware: Option<Reply>,
    /// Mode chosen for the module; `None` when no decision was made
    pub selected_mode: Option<OperatingMode>,
    /// Whether the module reported a bonded remote address
    pub remote_address_stored: bool,
}
