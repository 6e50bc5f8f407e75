//! Radio behaviour commands
//!
//! This module contains commands that shape how the module behaves on air:
//! - Inquiry scan window (discoverability)
//! - Page scan window (connectability)
//! - Connection mode
//!
//! Window values are in units of 625μs; 0x0200 gives a 320ms window.

use crate::commands::{AtCommand, Command, HexWord};

/// Error type for invalid operating mode values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingModeError {
    /// The value does not correspond to a valid operating mode
    InvalidValue(u8),
}

/// Connection mode of the module
///
/// Values are the module's own codes and are sent verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Waits to be connected to
    Slave = 0,
    /// Initiates connections on command
    Master = 1,
    /// Connects when characters arrive on the UART
    Trigger = 2,
    /// Reconnects to the stored remote address on power-up
    AutoMaster = 3,
    /// Connects when the DTR line is asserted
    AutoConnectDtr = 4,
    /// Connects to any device found during inquiry
    AutoConnectAny = 5,
    /// Discoverable and bondable, reconnects to the bonded peer
    Pairing = 6,
}

impl OperatingMode {
    /// Numeric code sent with the `SM` command.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for OperatingMode {
    type Error = OperatingModeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Slave),
            1 => Ok(Self::Master),
            2 => Ok(Self::Trigger),
            3 => Ok(Self::AutoMaster),
            4 => Ok(Self::AutoConnectDtr),
            5 => Ok(Self::AutoConnectAny),
            6 => Ok(Self::Pairing),
            invalid => Err(OperatingModeError::InvalidValue(invalid)),
        }
    }
}

/// SetInquiryWindow (`SI,<hex>`)
///
/// Sets how long the module listens for inquiries in each scan interval.
///
/// # Important Notes
/// - Lower values save power but make the module harder to discover
/// - Takes effect after reboot
#[derive(Debug, Clone)]
pub struct SetInquiryWindow {
    /// Window length in 625μs slots
    pub window: u16,
}

impl Command for SetInquiryWindow {
    type Parameter = HexWord;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand::setting("SI,")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        HexWord(self.window)
    }
}

/// SetPageScanWindow (`SJ,<hex>`)
///
/// Sets how long the module listens for connection pages in each scan
/// interval.
#[derive(Debug, Clone)]
pub struct SetPageScanWindow {
    /// Window length in 625μs slots
    pub window: u16,
}

impl Command for SetPageScanWindow {
    type Parameter = HexWord;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand::setting("SJ,")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        HexWord(self.window)
    }
}

/// SetMode (`SM,<code>`)
///
/// Selects the connection mode.
#[derive(Debug, Clone)]
pub struct SetMode {
    /// Mode to switch to
    pub mode: OperatingMode,
}

impl Command for SetMode {
    type Parameter = u8;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand::setting("SM,")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        self.mode.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_codes_are_module_values() {
        assert_eq!(OperatingMode::Slave.code(), 0);
        assert_eq!(OperatingMode::AutoMaster.code(), 3);
        assert_eq!(OperatingMode::Pairing.code(), 6);
    }

    #[test]
    fn mode_from_code() {
        assert_eq!(OperatingMode::try_from(6), Ok(OperatingMode::Pairing));
        assert_eq!(
            OperatingMode::try_from(7),
            Err(OperatingModeError::InvalidValue(7))
        );
    }
}
