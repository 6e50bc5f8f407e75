//! AT command implementations
//!
//! This module contains the RN-42 commands used to bring the module up.
//! Commands are organized into functional categories:
//!
//! # Command Categories
//! - [`system`]: Link and lifecycle control
//!   - Enter command mode
//!   - Set the UART baud rate
//!   - Disable the remote configuration timer
//!   - Reboot the module
//!
//! - [`identity`]: Naming and identification
//!   - Set the advertised device name
//!   - Read the module's own address
//!   - Read the firmware version
//!   - Read the stored remote address
//!
//! - [`radio`]: Radio behaviour
//!   - Inquiry and page scan windows
//!   - Connection mode
//!
//! # Wire Format
//! A request is the command's prefix, its parameter (if any) and a carriage
//! return. The module answers with a line of text:
//! - `AOK` when a setting was accepted
//! - `ERR` when it was rejected
//! - free-form text for queries
//!
//! Replies are matched on their leading characters, so trailing text after
//! a token does not change the verdict.
//!
//! # Important Notes
//! - Every command except [`EnterCommandMode`] requires command mode
//! - Most settings only take effect after [`Reboot`]
//! - Leaving command mode happens implicitly on reboot

use core::fmt::{self, Display, Write};

use heapless::String;

use crate::Error;

pub mod identity;
pub mod radio;
pub mod system;

pub use identity::*;
pub use radio::*;
pub use system::*;

/// Largest request the driver will encode, terminator included.
pub const REQUEST_CAPACITY: usize = 48;

/// Largest reply the driver keeps; anything longer is read and dropped.
pub const RESPONSE_CAPACITY: usize = 64;

/// Free-form reply text.
pub type Reply = String<RESPONSE_CAPACITY>;

/// Reply the module sends when it accepts a setting.
pub const SUCCESS_TOKEN: &str = "AOK";

/// Reply the module sends when it rejects a command.
pub const ERROR_TOKEN: &str = "ERR";

/// Descriptor of one AT exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtCommand {
    /// Text sent ahead of the parameter
    pub request: &'static str,
    /// Text sent after the parameter
    pub terminator: &'static str,
    /// Reply prefix signalling success; `None` accepts any reply that is not
    /// an error
    pub expected_response: Option<&'static str>,
    /// Reply prefix signalling rejection
    pub error_response: &'static str,
}

impl AtCommand {
    /// A carriage-return terminated command answered with `AOK` or `ERR`.
    pub const fn setting(request: &'static str) -> Self {
        Self {
            request,
            terminator: "\r",
            expected_response: Some(SUCCESS_TOKEN),
            error_response: ERROR_TOKEN,
        }
    }

    /// A carriage-return terminated command answered with free-form text.
    pub const fn query(request: &'static str) -> Self {
        Self {
            request,
            terminator: "\r",
            expected_response: None,
            error_response: ERROR_TOKEN,
        }
    }

    /// Writes the full request for `parameter` into `buffer`.
    pub fn encode<P, const N: usize>(&self, parameter: P, buffer: &mut String<N>) -> fmt::Result
    where
        P: Display,
    {
        buffer.clear();
        write!(buffer, "{}{}{}", self.request, parameter, self.terminator)
    }

    /// Checks a reply against the expected tokens.
    ///
    /// Returns the reply text on success.
    pub fn classify<'a, E>(&self, reply: &'a str) -> Result<&'a str, Error<E>> {
        if reply.starts_with(self.error_response) {
            return Err(Error::Rejected);
        }

        match self.expected_response {
            Some(token) if reply.starts_with(token) => Ok(reply),
            Some(_) => Err(Error::MalformedReply),
            None => Ok(reply),
        }
    }
}

/// Placeholder parameter for commands that take none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParameters;

impl Display for NoParameters {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// Parses the text of a successful reply.
pub trait FromReply: Sized {
    /// Returns `None` when the text cannot be represented.
    fn from_reply(reply: &str) -> Option<Self>;
}

impl FromReply for () {
    fn from_reply(_reply: &str) -> Option<Self> {
        Some(())
    }
}

impl<const N: usize> FromReply for String<N> {
    fn from_reply(reply: &str) -> Option<Self> {
        let mut text = String::new();
        text.push_str(reply).ok()?;
        Some(text)
    }
}

/// An RN-42 command.
pub trait Command {
    /// Value substituted into the request
    type Parameter: Display;
    /// Parsed form of a successful reply
    type Response: FromReply;

    /// Wire description of this command.
    fn spec() -> AtCommand;

    /// Consumes the command, yielding its request parameter.
    fn invoking_parameters(self) -> Self::Parameter;
}

/// Four upper-case hex digits, the format the module uses for window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexWord(pub u16);

impl Display for HexWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_accepts_only_success_token() {
        let spec = AtCommand::setting("SI,");
        assert_eq!(spec.classify::<()>("AOK"), Ok("AOK"));
        assert_eq!(spec.classify::<()>("ERR"), Err(Error::Rejected));
        assert_eq!(spec.classify::<()>("?"), Err(Error::MalformedReply));
    }

    #[test]
    fn query_accepts_any_reply_but_error() {
        let spec = AtCommand::query("V");
        assert_eq!(spec.classify::<()>("Ver 4.77"), Ok("Ver 4.77"));
        assert_eq!(spec.classify::<()>("ERR"), Err(Error::Rejected));
    }

    #[test]
    fn encode_appends_parameter_and_terminator() {
        let mut buffer: String<REQUEST_CAPACITY> = String::new();
        AtCommand::setting("SJ,")
            .encode(HexWord(0x0200), &mut buffer)
            .unwrap();
        assert_eq!(buffer.as_str(), "SJ,0200\r");

        AtCommand::query("V").encode(NoParameters, &mut buffer).unwrap();
        assert_eq!(buffer.as_str(), "V\r");
    }

    #[test]
    fn encode_reports_overflow() {
        let mut buffer: String<4> = String::new();
        assert!(AtCommand::setting("SN,")
            .encode("OpenXC-VI", &mut buffer)
            .is_err());
    }

    #[test]
    fn oversized_reply_does_not_fit() {
        assert_eq!(String::<4>::from_reply("00066"), None);
        assert_eq!(
            String::<16>::from_reply("00066").as_deref(),
            Some("00066")
        );
    }
}
