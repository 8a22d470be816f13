//! Extension negotiation on the client side of the WebSocket handshake.

pub mod headers;

use log::*;

use crate::{
    error::{Error, ProtocolError, Result},
    extensions::{self, DeflateContext, ExtensionsConfig},
    protocol::Role,
};

use self::headers::{Headers, ResponseHeaders};

// Limit the number of header lines.
pub(crate) const MAX_HEADERS: usize = 124;

/// Try to parse a server response: status line followed by headers.
///
/// Returns the number of bytes consumed, the status code and the headers, or `None` if the
/// response is not complete yet. Bytes past the consumed size belong to the WebSocket stream.
pub fn parse_response(buf: &[u8]) -> Result<Option<(usize, u16, Headers)>> {
    let mut hbuffer = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut resp = httparse::Response::new(&mut hbuffer);
    Ok(match resp.parse(buf)? {
        httparse::Status::Partial => None,
        httparse::Status::Complete(size) => {
            let code = resp.code.ok_or(Error::Protocol(ProtocolError::HandshakeIncomplete))?;
            Some((size, code, Headers::from_httparse(resp.headers)))
        }
    })
}

/// Check the `Sec-WebSocket-Extensions` header(s) of a server response against what the
/// client offered.
///
/// Returns the client's compression context settings if `permessage-deflate` was agreed on,
/// `None` if no extension is in use. Fails if the server negotiated something unknown or
/// repeated, enabled an extension that was never offered, requires the client to drop
/// its context while `config` forbids it, or did not echo a requested
/// `server_no_context_takeover` (RFC 7692 section 7.1.1.1).
pub fn verify_response_extensions<H>(
    headers: &H,
    config: &ExtensionsConfig,
) -> Result<Option<DeflateContext>>
where
    H: ResponseHeaders + ?Sized,
{
    let result = extensions::parse(headers)?.verify().map_err(|e| {
        warn!("Refusing server extensions: {}", e);
        e
    })?;

    if result.permessage_deflate && !config.compression {
        warn!("Server enabled permessage-deflate without an offer");
        return Err(ProtocolError::UnsolicitedExtension.into());
    }
    if result.client_no_context_takeover && !config.accept_no_context_takeover {
        warn!("Server requires client_no_context_takeover");
        return Err(ProtocolError::ContextTakeoverRequired.into());
    }
    if result.permessage_deflate
        && config.request_no_context_takeover
        && !result.server_no_context_takeover
    {
        warn!("Server did not agree to server_no_context_takeover");
        return Err(ProtocolError::NoContextTakeoverIgnored.into());
    }

    let context = result.deflate_context(Role::Client);
    debug!("Extension negotiation done: {:?}", context);
    Ok(context)
}

/// Add the `Sec-WebSocket-Extensions` offer for `config` to a client request.
#[cfg(feature = "handshake")]
pub fn apply_extension_headers<T>(
    request: &mut http::Request<T>,
    config: &ExtensionsConfig,
) -> Result<()> {
    if let Some(offer) = config.offer() {
        let value = http::HeaderValue::from_str(&offer)?;
        request.headers_mut().append(http::header::SEC_WEBSOCKET_EXTENSIONS, value);
    }
    Ok(())
}
