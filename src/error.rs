//! Error types
//!
//! Every AT exchange can fail in one of a small number of ways. [`Error`]
//! carries the transport's own error for link-level faults, while
//! [`ErrorKind`] is the `Copy` summary recorded in a configuration
//! [`Report`](crate::Report).

/// Failure of a single AT exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The serial link itself failed (write, read or baud change)
    Transport(E),
    /// Nothing arrived before the transport's read timeout
    NoResponse,
    /// The module answered with its error token
    Rejected,
    /// A reply arrived but matched neither the success nor the error token,
    /// was not valid text, or did not fit the expected reply type
    MalformedReply,
    /// The encoded request does not fit the request buffer
    RequestTooLong,
    /// The module has no rate code for this baud rate
    UnsupportedBaudRate(u32),
}

impl<E> Error<E> {
    /// Drops the transport error, keeping only the category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::NoResponse => ErrorKind::NoResponse,
            Error::Rejected => ErrorKind::Rejected,
            Error::MalformedReply => ErrorKind::MalformedReply,
            Error::RequestTooLong => ErrorKind::RequestTooLong,
            Error::UnsupportedBaudRate(_) => ErrorKind::UnsupportedBaudRate,
        }
    }
}

/// Category of an [`Error`], independent of the transport error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// See [`Error::Transport`]
    Transport,
    /// See [`Error::NoResponse`]
    NoResponse,
    /// See [`Error::Rejected`]
    Rejected,
    /// See [`Error::MalformedReply`]
    MalformedReply,
    /// See [`Error::RequestTooLong`]
    RequestTooLong,
    /// See [`Error::UnsupportedBaudRate`]
    UnsupportedBaudRate,
}

impl ErrorKind {
    /// Short description used in diagnostic output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "link error",
            ErrorKind::NoResponse => "no response",
            ErrorKind::Rejected => "error response",
            ErrorKind::MalformedReply => "malformed response",
            ErrorKind::RequestTooLong => "request too long",
            ErrorKind::UnsupportedBaudRate => "unsupported baud rate",
        }
    }
}
