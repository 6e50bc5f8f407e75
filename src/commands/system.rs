//! Link and lifecycle commands
//!
//! This module contains commands that control the module itself rather than
//! its radio:
//! - Entering command mode
//! - UART baud rate
//! - Remote configuration timer
//! - Reboot
//!
//! The baud rate is the one setting the rest of the bring-up depends on; if
//! it cannot be confirmed, nothing else can be trusted to reach the module.

use crate::commands::{AtCommand, Command, NoParameters};

/// Error type for baud rates the module cannot run at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudRateError {
    /// The value has no rate code
    Unsupported(u32),
}

/// UART baud rates supported by the module
///
/// The module encodes each rate as two digits in the `SU` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    B1200 = 1_200,
    B2400 = 2_400,
    B4800 = 4_800,
    B9600 = 9_600,
    B19200 = 19_200,
    B38400 = 38_400,
    B57600 = 57_600,
    /// Factory default
    B115200 = 115_200,
    B230400 = 230_400,
    B460800 = 460_800,
    B921600 = 921_600,
}

impl BaudRate {
    /// Order tried when looking for the rate a module is running at,
    /// most likely first.
    pub const ALL: [BaudRate; 11] = [
        BaudRate::B115200,
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B230400,
        BaudRate::B460800,
        BaudRate::B921600,
        BaudRate::B4800,
        BaudRate::B2400,
        BaudRate::B1200,
    ];

    /// Rate in bits per second.
    pub fn bits_per_second(self) -> u32 {
        self as u32
    }

    /// Two-digit code used by the `SU` command.
    pub fn code(self) -> &'static str {
        match self {
            BaudRate::B1200 => "12",
            BaudRate::B2400 => "24",
            BaudRate::B4800 => "48",
            BaudRate::B9600 => "96",
            BaudRate::B19200 => "19",
            BaudRate::B38400 => "38",
            BaudRate::B57600 => "57",
            BaudRate::B115200 => "11",
            BaudRate::B230400 => "23",
            BaudRate::B460800 => "46",
            BaudRate::B921600 => "92",
        }
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = BaudRateError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        BaudRate::ALL
            .iter()
            .copied()
            .find(|rate| rate.bits_per_second() == value)
            .ok_or(BaudRateError::Unsupported(value))
    }
}

/// EnterCommandMode (`$$$`)
///
/// Switches the module from data mode into command mode.
///
/// # Important Notes
/// - Sent without a carriage return
/// - Module answers `CMD`
/// - Only honoured shortly after boot unless the configuration timer allows
///   otherwise
#[derive(Debug, Clone)]
pub struct EnterCommandMode;

impl Command for EnterCommandMode {
    type Parameter = NoParameters;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand {
            request: "$$$",
            terminator: "",
            expected_response: Some("CMD"),
            error_response: "ERR",
        }
    }

    fn invoking_parameters(self) -> Self::Parameter {
        NoParameters
    }
}

/// SetBaudRate (`SU,<code>`)
///
/// Sets the module's UART rate.
///
/// # Important Notes
/// - The local UART must be switched to match once confirmed
#[derive(Debug, Clone)]
pub struct SetBaudRate {
    /// New UART rate
    pub baud: BaudRate,
}

impl Command for SetBaudRate {
    type Parameter = &'static str;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand::setting("SU,")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        self.baud.code()
    }
}

/// SetConfigTimer (`ST,<seconds>`)
///
/// Sets how long after power-up the module accepts command mode from the
/// remote side.
///
/// # Timer Values
/// - 0: remote configuration disabled, local only
/// - 1-252: window in seconds
/// - 253-255: special continuous modes
#[derive(Debug, Clone)]
pub struct SetConfigTimer {
    /// Window in seconds
    pub seconds: u8,
}

impl Command for SetConfigTimer {
    type Parameter = u8;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand::setting("ST,")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        self.seconds
    }
}

/// Reboot (`R,1`)
///
/// Restarts the module, applying stored settings and leaving command mode.
#[derive(Debug, Clone)]
pub struct Reboot;

impl Command for Reboot {
    type Parameter = u8;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand {
            expected_response: Some("Reboot"),
            ..AtCommand::setting("R,")
        }
    }

    fn invoking_parameters(self) -> Self::Parameter {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baud_rate_codes_match_module_table() {
        assert_eq!(BaudRate::try_from(9_600).map(BaudRate::code), Ok("96"));
        assert_eq!(BaudRate::try_from(115_200).map(BaudRate::code), Ok("11"));
        assert_eq!(BaudRate::try_from(921_600).map(BaudRate::code), Ok("92"));
    }

    #[test]
    fn unknown_baud_rate_is_rejected() {
        assert_eq!(
            BaudRate::try_from(14_400),
            Err(BaudRateError::Unsupported(14_400))
        );
    }

    #[test]
    fn search_order_starts_with_factory_default() {
        assert_eq!(BaudRate::ALL[0], BaudRate::B115200);
    }
}
