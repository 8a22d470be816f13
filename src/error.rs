//! Error handling.

use std::{result, str};

use thiserror::Error;

use crate::protocol::CloseCode;

/// Result type of all library calls.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Possible negotiation errors.
///
/// Parsing the extensions header itself never fails; errors come from reading the
/// headers, or from the handshake layer refusing what the server negotiated.
#[derive(Error, Debug)]
pub enum Error {
    /// A header value is not valid UTF-8.
    #[error("UTF-8 encoding error")]
    Utf8,
    /// Header block exceeded a size limit.
    #[error("Space limit exceeded: {0}")]
    Capacity(#[from] CapacityError),
    /// Protocol violation.
    #[error("WebSocket protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// HTTP format error.
    #[cfg(feature = "handshake")]
    #[error("HTTP format error: {0}")]
    HttpFormat(#[from] http::Error),
}

impl From<str::Utf8Error> for Error {
    fn from(_: str::Utf8Error) -> Self {
        Error::Utf8
    }
}

#[cfg(feature = "handshake")]
impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Error::HttpFormat(err.into())
    }
}

impl From<httparse::Error> for Error {
    fn from(err: httparse::Error) -> Self {
        match err {
            httparse::Error::TooManyHeaders => Error::Capacity(CapacityError::TooManyHeaders),
            e => Error::Protocol(ProtocolError::HttparseError(e)),
        }
    }
}

/// Indicates the specific type/cause of a capacity error.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CapacityError {
    /// Too many headers provided (see [`httparse::Error::TooManyHeaders`]).
    #[error("Too many headers")]
    TooManyHeaders,
}

/// Indicates the specific type/cause of a protocol error.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProtocolError {
    /// No more data while still reading the handshake response.
    #[error("Handshake not finished")]
    HandshakeIncomplete,
    /// Wrapper around a [`httparse::Error`] value.
    #[error("httparse error: {0}")]
    HttparseError(httparse::Error),
    /// The server negotiated an extension, parameter or value this side does not understand,
    /// or repeated one it does.
    #[error("Unexpected \"Sec-WebSocket-Extensions\" in response header")]
    UnsupportedExtension,
    /// The server enabled `permessage-deflate` although the client never offered it.
    #[error("Server enabled permessage-deflate without an offer")]
    UnsolicitedExtension,
    /// The server demands `client_no_context_takeover` but the client requires context takeover.
    #[error("The client requires context takeover")]
    ContextTakeoverRequired,
    /// The client asked for `server_no_context_takeover` and the server did not echo it.
    #[error("Server ignored the server_no_context_takeover request")]
    NoContextTakeoverIgnored,
}

impl ProtocolError {
    /// Close code to fail the connection with after this error.
    pub fn close_code(&self) -> CloseCode {
        match self {
            ProtocolError::UnsupportedExtension | ProtocolError::UnsolicitedExtension => {
                CloseCode::Policy
            }
            ProtocolError::ContextTakeoverRequired | ProtocolError::NoContextTakeoverIgnored => {
                CloseCode::Extension
            }
            ProtocolError::HandshakeIncomplete | ProtocolError::HttparseError(_) => {
                CloseCode::Protocol
            }
        }
    }
}
