//! WebSocket extensions negotiated in the opening handshake.
// Only `permessage-deflate` is understood; anything else is reported as unknown.

mod deflate;

pub use self::deflate::{DeflateContext, ExtensionsConfig};

use log::*;

use crate::{
    error::{ProtocolError, Result},
    handshake::headers::ResponseHeaders,
    protocol::Role,
};

/// Name of the header carrying extension offers and responses.
pub const SEC_WEBSOCKET_EXTENSIONS: &str = "Sec-WebSocket-Extensions";

pub(crate) const PERMESSAGE_DEFLATE: &str = "permessage-deflate";
pub(crate) const CLIENT_NO_CONTEXT_TAKEOVER: &str = "client_no_context_takeover";
pub(crate) const SERVER_NO_CONTEXT_TAKEOVER: &str = "server_no_context_takeover";

/// Extensions the server agreed to in its `Sec-WebSocket-Extensions` response header(s).
///
/// The default value means no extension was negotiated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionsResult {
    /// `permessage-deflate` was negotiated.
    pub permessage_deflate: bool,
    /// The client must reset its compression context after each message.
    pub client_no_context_takeover: bool,
    /// The server resets its compression context after each message.
    pub server_no_context_takeover: bool,
    /// An extension, parameter or value was not recognized, or a recognized one was repeated.
    ///
    /// The connection should be refused when this is set.
    pub unknown_values: bool,
}

impl ExtensionsResult {
    /// Fail with [`ProtocolError::UnsupportedExtension`] if the server negotiated anything
    /// this side does not understand.
    pub fn verify(self) -> Result<Self> {
        if self.unknown_values {
            Err(ProtocolError::UnsupportedExtension.into())
        } else {
            Ok(self)
        }
    }

    /// Per-message context resets for the endpoint acting as `role`, or `None` when
    /// `permessage-deflate` is not in use.
    pub fn deflate_context(&self, role: Role) -> Option<DeflateContext> {
        if !self.permessage_deflate {
            return None;
        }
        let (own, peer) = match role {
            Role::Client => (self.client_no_context_takeover, self.server_no_context_takeover),
            Role::Server => (self.server_no_context_takeover, self.client_no_context_takeover),
        };
        Some(DeflateContext { compress_reset: own, decompress_reset: peer })
    }
}

/// Parse every `Sec-WebSocket-Extensions` header of a handshake response.
///
/// Other headers are ignored. Malformed or unknown extensions never fail the parse, they
/// set [`ExtensionsResult::unknown_values`] instead. The only error is one raised while
/// reading a header value.
pub fn parse<H>(headers: &H) -> Result<ExtensionsResult>
where
    H: ResponseHeaders + ?Sized,
{
    let mut parser = ExtensionsParser::default();
    headers.for_each_extension_value(&mut |value| parser.feed(value))?;
    Ok(parser.finish())
}

/// Parse raw `Sec-WebSocket-Extensions` values as if each came from its own header line.
pub fn parse_values<'a, I>(values: I) -> ExtensionsResult
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = ExtensionsParser::default();
    for value in values {
        parser.feed(value);
    }
    parser.finish()
}

#[derive(Debug, Default)]
struct ExtensionsParser {
    compression_enabled: bool,
    client_no_context_takeover: bool,
    server_no_context_takeover: bool,
    unexpected_values: bool,
}

impl ExtensionsParser {
    fn feed(&mut self, header: &str) {
        // Padding around the whole value is not an empty extension.
        let header = trim_substring(header, 0, header.len());
        let mut pos = 0;
        while pos < header.len() {
            let extension_end = delimiter_offset(header, b',', pos, header.len());
            let token_end = delimiter_offset(header, b';', pos, extension_end);
            let name = trim_substring(header, pos, token_end);

            if name.eq_ignore_ascii_case(PERMESSAGE_DEFLATE) {
                if self.compression_enabled {
                    trace!("Duplicate extension {}", PERMESSAGE_DEFLATE);
                    self.unexpected_values = true;
                }
                self.compression_enabled = true;

                let mut param_pos = token_end + 1;
                while param_pos < extension_end {
                    let param_end = delimiter_offset(header, b';', param_pos, extension_end);
                    self.param(trim_substring(header, param_pos, param_end));
                    param_pos = param_end + 1;
                }
            } else {
                trace!("Unknown extension {:?}", name);
                self.unexpected_values = true;
            }

            pos = extension_end + 1;
        }
    }

    fn param(&mut self, param: &str) {
        let seen = if param.eq_ignore_ascii_case(CLIENT_NO_CONTEXT_TAKEOVER) {
            &mut self.client_no_context_takeover
        } else if param.eq_ignore_ascii_case(SERVER_NO_CONTEXT_TAKEOVER) {
            &mut self.server_no_context_takeover
        } else {
            // Empty parameters come from stray semicolons and carry nothing.
            if !param.is_empty() {
                trace!("Unknown {} parameter {:?}", PERMESSAGE_DEFLATE, param);
                self.unexpected_values = true;
            }
            return;
        };

        if *seen {
            trace!("Duplicate {} parameter {:?}", PERMESSAGE_DEFLATE, param);
            self.unexpected_values = true;
        }
        *seen = true;
    }

    fn finish(self) -> ExtensionsResult {
        let result = ExtensionsResult {
            permessage_deflate: self.compression_enabled,
            client_no_context_takeover: self.client_no_context_takeover,
            server_no_context_takeover: self.server_no_context_takeover,
            unknown_values: self.unexpected_values,
        };
        debug!("Negotiated extensions: {:?}", result);
        result
    }
}

/// Offset of the first `delimiter` in `input[start..end]`, or `end` if there is none.
fn delimiter_offset(input: &str, delimiter: u8, start: usize, end: usize) -> usize {
    input.as_bytes()[start..end]
        .iter()
        .position(|&b| b == delimiter)
        .map_or(end, |offset| start + offset)
}

/// `input[start..end]` without leading and trailing spaces and tabs.
fn trim_substring(input: &str, start: usize, end: usize) -> &str {
    input[start..end].trim_matches(|c: char| c == ' ' || c == '\t')
}
