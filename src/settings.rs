//! Bring-up settings
//!
//! The defaults are the values the OpenXC vehicle interface ships with and
//! must be kept bit-exact for modules already in the field.

/// Name advertised by the module.
pub const DEVICE_NAME: &str = "OpenXC-VI";

/// Time the module needs after power-up before it accepts commands.
pub const BOOT_DELAY_MS: u32 = 500;

/// Inquiry and page scan window, in 625μs slots.
pub const SCAN_WINDOW: u16 = 0x0200;

/// Values written to the module during [`Bluetooth::initialize`](crate::Bluetooth::initialize).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Advertised device name
    pub device_name: &'static str,
    /// Append the last four address digits to the name
    pub serialized_name: bool,
    /// Settle time after power-up
    pub boot_delay_ms: u32,
    /// Remote configuration window in seconds; 0 disables it
    pub configuration_timer: u8,
    /// Inquiry scan window
    pub inquiry_window: u16,
    /// Page scan window
    pub page_scan_window: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_name: DEVICE_NAME,
            serialized_name: true,
            boot_delay_ms: BOOT_DELAY_MS,
            configuration_timer: 0,
            inquiry_window: SCAN_WINDOW,
            page_scan_window: SCAN_WINDOW,
        }
    }
}
