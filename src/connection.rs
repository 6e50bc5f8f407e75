//! Caller-owned state of the attached module

use heapless::String;

/// Capacity of [`RadioConnection::device_id`]; an RN-42 address is 12 hex digits.
pub const DEVICE_ID_CAPACITY: usize = 32;

/// Placeholder identifier written before the module is queried.
pub const UNKNOWN_DEVICE_ID: &str = "Unknown";

/// Live handle to the attached module.
///
/// Owned by the caller; [`Bluetooth::initialize`](crate::Bluetooth::initialize)
/// borrows it for the duration of the configuration and updates the baud rate
/// and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioConnection {
    /// Baud rate of the serial link, in bits per second
    pub baud_rate: u32,
    /// The module's own Bluetooth address; empty when it could not be read
    pub device_id: String<DEVICE_ID_CAPACITY>,
}

impl RadioConnection {
    /// Creates a connection that should run at `baud_rate`.
    pub fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            device_id: String::new(),
        }
    }

    pub(crate) fn mark_unknown(&mut self) {
        self.device_id.clear();
        // fits: the placeholder is shorter than the capacity
        let _ = self.device_id.push_str(UNKNOWN_DEVICE_ID);
    }
}
