//! RN-42 Device Interface
//!
//! This module provides a command-level interface to an RN-42 class module
//! attached over a UART. It handles:
//! - Encoding requests and writing them to the link
//! - Collecting and classifying replies
//! - Finding the baud rate the module is running at
//!
//! The interface is built around the `Device<T, D>` struct which wraps a
//! [`Transport`] and a delay provider.
//!
//! # Example
//! ```ignore
//! use rn42::{Device, commands::GetFirmwareVersion};
//!
//! let mut device = Device::new(uart, delay);
//! device.enter_command_mode(115_200)?;
//! let version = device.execute_command(GetFirmwareVersion)?;
//! ```

use embedded_hal::delay::DelayNs;
use heapless::{String, Vec};

use crate::commands::{
    BaudRate, Command, EnterCommandMode, FromReply, SetBaudRate, REQUEST_CAPACITY,
    RESPONSE_CAPACITY,
};
use crate::{Error, Transport};

/// Quiet time before `$$$` so the module sees it as a separate burst.
pub const COMMAND_MODE_GUARD_MS: u32 = 100;

/// Overflow read past a full reply before giving up on the link going idle.
pub const MAX_DISCARDED_BYTES: usize = 1024;

/// Main device interface for the RN-42.
///
/// Issues one command at a time: each request is written in full and its
/// reply read back before the next command can start.
pub struct Device<T, D> {
    transport: T,
    delay: D,
}

impl<T, D> Device<T, D> {
    /// Creates a new Device instance wrapping the provided link and delay.
    pub fn new(transport: T, delay: D) -> Self {
        Self { transport, delay }
    }

    /// Releases the underlying link and delay provider.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}

impl<T, D> Device<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Executes a command on the module.
    ///
    /// # Returns
    /// The parsed reply on success
    ///
    /// # Errors
    /// * `Error::Transport` - the link failed
    /// * `Error::NoResponse` - nothing arrived before the read timeout
    /// * `Error::Rejected` - the module answered with its error token
    /// * `Error::MalformedReply` - the reply could not be interpreted
    /// * `Error::RequestTooLong` - the request does not fit the buffer
    pub fn execute_command<C>(&mut self, command: C) -> Result<C::Response, Error<T::Error>>
    where
        C: Command,
    {
        let spec = C::spec();

        let mut request: String<REQUEST_CAPACITY> = String::new();
        spec.encode(command.invoking_parameters(), &mut request)
            .map_err(|_| Error::<T::Error>::RequestTooLong)?;

        self.transport
            .write(request.as_bytes())
            .map_err(Error::Transport)?;

        let raw = self.read_reply()?;
        let reply = utf8_prefix(&raw)
            .ok_or(Error::<T::Error>::MalformedReply)?
            .trim_end_matches(|c: char| c == '\r' || c == '\n');

        if reply.is_empty() {
            return Err(Error::MalformedReply);
        }

        let text = spec.classify::<T::Error>(reply)?;
        C::Response::from_reply(text).ok_or(Error::MalformedReply)
    }

    /// Puts the module into command mode.
    ///
    /// Tries `preferred` first, then every other rate the module supports,
    /// switching the local link before each attempt. On success the link is
    /// left at the rate that answered, which is returned.
    ///
    /// # Errors
    /// The failure of the last attempt when no rate answers, or
    /// `Error::Transport` as soon as the link cannot change rate.
    pub fn enter_command_mode(&mut self, preferred: u32) -> Result<u32, Error<T::Error>> {
        let candidates = core::iter::once(preferred).chain(
            BaudRate::ALL
                .iter()
                .map(|rate| rate.bits_per_second())
                .filter(move |baud| *baud != preferred),
        );

        let mut last = Error::NoResponse;
        for baud in candidates {
            self.set_local_baud_rate(baud)?;
            self.delay.delay_ms(COMMAND_MODE_GUARD_MS);

            match self.execute_command(EnterCommandMode) {
                Ok(()) => {
                    debug!("Entered command mode at {} baud", baud);
                    return Ok(baud);
                }
                Err(e) => {
                    debug!("No command prompt at {} baud ({})", baud, e.kind().as_str());
                    last = e;
                }
            }
        }

        Err(last)
    }

    /// Changes the module's UART rate and follows it with the local link.
    ///
    /// Requires command mode.
    pub fn set_baud_rate(&mut self, baud: u32) -> Result<(), Error<T::Error>> {
        let rate = BaudRate::try_from(baud)
            .map_err(|_| Error::<T::Error>::UnsupportedBaudRate(baud))?;
        self.execute_command(SetBaudRate { baud: rate })?;
        self.set_local_baud_rate(baud)
    }

    /// Changes only the local UART rate.
    pub fn set_local_baud_rate(&mut self, baud: u32) -> Result<(), Error<T::Error>> {
        self.transport.set_baud_rate(baud).map_err(Error::Transport)
    }

    /// Discards any input buffered on the link.
    pub fn clear_input(&mut self) -> Result<(), Error<T::Error>> {
        self.transport.clear().map_err(Error::Transport)
    }

    /// Blocks for `ms` milliseconds.
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Collects reply bytes until the link goes idle.
    ///
    /// Bytes past [`RESPONSE_CAPACITY`] are read and dropped so they cannot
    /// be mistaken for the start of the next reply. At most
    /// [`MAX_DISCARDED_BYTES`] are dropped; a link that never goes idle
    /// still returns.
    fn read_reply(&mut self) -> Result<Vec<u8, RESPONSE_CAPACITY>, Error<T::Error>> {
        let mut reply = Vec::new();
        let mut discarded = 0;

        while discarded < MAX_DISCARDED_BYTES {
            match self.transport.read().map_err(Error::Transport)? {
                Some(byte) => {
                    if reply.push(byte).is_err() {
                        discarded += 1;
                    }
                }
                None => break,
            }
        }

        if discarded > 0 {
            debug!("Dropped {} reply bytes past capacity", discarded);
        }

        if reply.is_empty() {
            return Err(Error::NoResponse);
        }

        Ok(reply)
    }
}

/// Decodes `bytes`, tolerating a character cut off by truncation at the end.
fn utf8_prefix(bytes: &[u8]) -> Option<&str> {
    match core::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) if e.error_len().is_none() => {
            core::str::from_utf8(&bytes[..e.valid_up_to()]).ok()
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::commands::{GetFirmwareVersion, SetInquiryWindow};
    use std::collections::VecDeque;
    use std::vec::Vec as StdVec;

    #[derive(Default)]
    struct Link {
        written: StdVec<u8>,
        rx: VecDeque<u8>,
        bauds: StdVec<u32>,
    }

    impl Transport for Link {
        type Error = ();

        fn write(&mut self, bytes: &[u8]) -> Result<(), ()> {
            self.written.extend_from_slice(bytes);
            Ok(())
        }

        fn read(&mut self) -> Result<Option<u8>, ()> {
            Ok(self.rx.pop_front())
        }

        fn set_baud_rate(&mut self, baud: u32) -> Result<(), ()> {
            self.bauds.push(baud);
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn device_with_reply(reply: &str) -> Device<Link, NoDelay> {
        let mut link = Link::default();
        link.rx.extend(reply.bytes());
        Device::new(link, NoDelay)
    }

    #[test]
    fn setting_writes_request_and_accepts_aok() {
        let mut device = device_with_reply("AOK\r\n");
        assert_eq!(
            device.execute_command(SetInquiryWindow { window: 0x0200 }),
            Ok(())
        );
        let (link, _) = device.release();
        assert_eq!(link.written, b"SI,0200\r");
    }

    #[test]
    fn query_returns_reply_without_line_ending() {
        let mut device = device_with_reply("Ver 6.15 04/26/2013\r\n");
        let version = device.execute_command(GetFirmwareVersion).unwrap();
        assert_eq!(version.as_str(), "Ver 6.15 04/26/2013");
    }

    #[test]
    fn silence_is_no_response() {
        let mut device = device_with_reply("");
        assert_eq!(device.execute_command(GetFirmwareVersion), Err(Error::NoResponse));
    }

    #[test]
    fn error_token_is_rejection() {
        let mut device = device_with_reply("ERR\r\n");
        assert_eq!(
            device.execute_command(SetInquiryWindow { window: 0x0200 }),
            Err(Error::Rejected)
        );
    }

    #[test]
    fn unexpected_text_is_malformed() {
        let mut device = device_with_reply("?\r\n");
        assert_eq!(
            device.execute_command(SetInquiryWindow { window: 0x0200 }),
            Err(Error::MalformedReply)
        );
    }

    #[test]
    fn bare_line_ending_is_malformed() {
        let mut device = device_with_reply("\r\n");
        assert_eq!(device.execute_command(GetFirmwareVersion), Err(Error::MalformedReply));
    }

    #[test]
    fn overlong_reply_is_truncated_and_drained() {
        let banner =
            "Ver 4.77 RN-42 01/05/2010\r\n(c) Roving Networks\r\nBuild 0123456789 extra";
        assert!(banner.len() > RESPONSE_CAPACITY);

        let mut device = device_with_reply(banner);
        let version = device.execute_command(GetFirmwareVersion).unwrap();
        assert_eq!(version.as_str(), &banner[..RESPONSE_CAPACITY]);

        let (link, _) = device.release();
        assert!(link.rx.is_empty());
    }

    #[test]
    fn endless_reply_still_returns() {
        let mut device = device_with_reply("");
        device
            .transport
            .rx
            .extend(core::iter::repeat(b'x').take(RESPONSE_CAPACITY + MAX_DISCARDED_BYTES + 10));
        assert!(device.execute_command(GetFirmwareVersion).is_ok());
        let (link, _) = device.release();
        assert_eq!(link.rx.len(), 10);
    }

    #[test]
    fn multibyte_character_cut_by_truncation_is_dropped() {
        assert_eq!(utf8_prefix(&"ab\u{e9}".as_bytes()[..3]), Some("ab"));
        assert_eq!(utf8_prefix(&[b'a', 0xFF, b'b']), None);
    }

    #[test]
    fn baud_rate_follows_confirmed_change() {
        let mut device = device_with_reply("AOK\r\n");
        assert_eq!(device.set_baud_rate(9_600), Ok(()));
        let (link, _) = device.release();
        assert_eq!(link.written, b"SU,96\r");
        assert_eq!(link.bauds, [9_600]);
    }

    #[test]
    fn unsupported_baud_rate_sends_nothing() {
        let mut device = device_with_reply("AOK\r\n");
        assert_eq!(
            device.set_baud_rate(14_400),
            Err(Error::UnsupportedBaudRate(14_400))
        );
        let (link, _) = device.release();
        assert!(link.written.is_empty());
    }

    #[test]
    fn command_mode_tries_preferred_rate_first() {
        let mut device = device_with_reply("CMD\r\n");
        assert_eq!(device.enter_command_mode(9_600), Ok(9_600));
        let (link, _) = device.release();
        assert_eq!(link.written, b"$$$");
        assert_eq!(link.bauds, [9_600]);
    }

    #[test]
    fn command_mode_tries_every_rate_once() {
        let mut device = device_with_reply("");
        assert_eq!(device.enter_command_mode(9_600), Err(Error::NoResponse));
        let (link, _) = device.release();
        assert_eq!(link.bauds.len(), BaudRate::ALL.len());
        assert_eq!(link.bauds[0], 9_600);
        assert_eq!(link.bauds[1], 115_200);
    }
}
