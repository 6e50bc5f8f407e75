//! Naming and identification commands
//!
//! Commands to name the module and to read back what it knows about itself
//! and its last peer. Query replies are free-form text; only the error
//! token marks failure.

use crate::commands::{AtCommand, Command, FromReply, NoParameters, Reply};
use crate::connection::DEVICE_ID_CAPACITY;

/// Reply the module gives when no remote address is stored
pub const REMOTE_ADDRESS_NOT_SET: &str = "NOT SET";

/// SetName (`SN,<name>`)
///
/// Sets the advertised device name verbatim.
#[derive(Debug, Clone)]
pub struct SetName<'a> {
    /// Device name, up to 20 characters
    pub name: &'a str,
}

impl<'a> Command for SetName<'a> {
    type Parameter = &'a str;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand::setting("SN,")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        self.name
    }
}

/// SetSerializedName (`S-,<name>`)
///
/// Sets the advertised device name with the last four digits of the
/// module's address appended, so several units can be told apart.
#[derive(Debug, Clone)]
pub struct SetSerializedName<'a> {
    /// Name prefix, up to 15 characters
    pub name: &'a str,
}

impl<'a> Command for SetSerializedName<'a> {
    type Parameter = &'a str;
    type Response = ();

    fn spec() -> AtCommand {
        AtCommand::setting("S-,")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        self.name
    }
}

/// GetAddress (`GB`)
///
/// Returns the module's own Bluetooth address as 12 hex digits.
#[derive(Debug, Clone)]
pub struct GetAddress;

impl Command for GetAddress {
    type Parameter = NoParameters;
    type Response = heapless::String<DEVICE_ID_CAPACITY>;

    fn spec() -> AtCommand {
        AtCommand::query("GB")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        NoParameters
    }
}

/// GetFirmwareVersion (`V`)
///
/// Returns the firmware banner, e.g. `Ver 6.15 04/26/2013`.
#[derive(Debug, Clone)]
pub struct GetFirmwareVersion;

impl Command for GetFirmwareVersion {
    type Parameter = NoParameters;
    type Response = Reply;

    fn spec() -> AtCommand {
        AtCommand::query("V")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        NoParameters
    }
}

/// Remote address stored in the module's non-volatile memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAddress {
    /// No peer has been bonded
    NotSet,
    /// Address of the last bonded peer
    Stored(Reply),
}

impl FromReply for RemoteAddress {
    fn from_reply(reply: &str) -> Option<Self> {
        if reply == REMOTE_ADDRESS_NOT_SET {
            Some(RemoteAddress::NotSet)
        } else {
            Reply::from_reply(reply).map(RemoteAddress::Stored)
        }
    }
}

/// GetRemoteAddress (`GR`)
///
/// Returns the stored remote address, or `NOT SET`.
#[derive(Debug, Clone)]
pub struct GetRemoteAddress;

impl Command for GetRemoteAddress {
    type Parameter = NoParameters;
    type Response = RemoteAddress;

    fn spec() -> AtCommand {
        AtCommand::query("GR")
    }

    fn invoking_parameters(self) -> Self::Parameter {
        NoParameters
    }
}
