//! Read-only access to HTTP response headers.

use std::str::from_utf8;

use crate::{
    error::{Error, Result},
    extensions::SEC_WEBSOCKET_EXTENSIONS,
};

use super::MAX_HEADERS;

/// An ordered, read-only view over the header lines of an HTTP response.
///
/// Header lines are addressed by index in `0..header_count()`. Implementations should
/// return `None` for indices past the end.
pub trait ResponseHeaders {
    /// Number of header lines.
    fn header_count(&self) -> usize;

    /// Name of the header line at `index`.
    fn header_name(&self, index: usize) -> Option<&str>;

    /// Value of the header line at `index`.
    ///
    /// Fails if the raw value cannot be read as text.
    fn header_value(&self, index: usize) -> Option<Result<&str>>;

    /// Call `f` with the value of every `Sec-WebSocket-Extensions` header, in order.
    ///
    /// Stops at the first value that cannot be read. The provided version walks all header
    /// lines; collections with a lookup by name should override it.
    fn for_each_extension_value(&self, f: &mut dyn FnMut(&str)) -> Result<()> {
        for index in 0..self.header_count() {
            match self.header_name(index) {
                Some(name) if name.eq_ignore_ascii_case(SEC_WEBSOCKET_EXTENSIONS) => {}
                _ => continue,
            }
            if let Some(value) = self.header_value(index).transpose()? {
                f(value);
            }
        }
        Ok(())
    }
}

/// HTTP request or response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    data: Vec<(String, Box<[u8]>)>,
}

impl Headers {
    /// Get first header with the given name, if any.
    pub fn find_first(&self, name: &str) -> Option<&[u8]> {
        self.data.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_ref())
    }

    /// Iterate over all values of headers with the given name, in order.
    pub fn find_all<'h>(&'h self, name: &'h str) -> impl Iterator<Item = &'h [u8]> + 'h {
        self.data
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_ref())
    }

    /// Check if the given header has the given value.
    pub fn header_is(&self, name: &str, value: &str) -> bool {
        self.find_first(name).map(|v| v == value.as_bytes()).unwrap_or(false)
    }

    /// Check if the given header has the given value (case-insensitive).
    pub fn header_is_ignore_case(&self, name: &str, value: &str) -> bool {
        self.find_first(name)
            .and_then(|val_raw| from_utf8(val_raw).ok())
            .map(|val| val.eq_ignore_ascii_case(value))
            .unwrap_or(false)
    }

    /// Number of header lines.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if there are no header lines.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Try to parse a header block terminated by an empty line.
    ///
    /// Returns the number of bytes consumed together with the headers, or `None` if the
    /// block is not complete yet.
    pub fn parse(buf: &[u8]) -> Result<Option<(usize, Headers)>> {
        let mut hbuffer = [httparse::EMPTY_HEADER; MAX_HEADERS];
        Ok(match httparse::parse_headers(buf, &mut hbuffer)? {
            httparse::Status::Partial => None,
            httparse::Status::Complete((size, hdr)) => Some((size, Headers::from_httparse(hdr))),
        })
    }

    /// Copy headers out of the `httparse` buffer.
    pub fn from_httparse(raw: &[httparse::Header<'_>]) -> Self {
        Headers {
            data: raw
                .iter()
                .map(|h| (h.name.into(), Vec::from(h.value).into_boxed_slice()))
                .collect(),
        }
    }
}

impl ResponseHeaders for Headers {
    fn header_count(&self) -> usize {
        self.data.len()
    }

    fn header_name(&self, index: usize) -> Option<&str> {
        self.data.get(index).map(|(name, _)| name.as_str())
    }

    fn header_value(&self, index: usize) -> Option<Result<&str>> {
        self.data.get(index).map(|(_, value)| from_utf8(value).map_err(Error::from))
    }
}

impl<'b> ResponseHeaders for [httparse::Header<'b>] {
    fn header_count(&self) -> usize {
        self.len()
    }

    fn header_name(&self, index: usize) -> Option<&str> {
        self.get(index).map(|h| h.name)
    }

    fn header_value(&self, index: usize) -> Option<Result<&str>> {
        self.get(index).map(|h| from_utf8(h.value).map_err(Error::from))
    }
}

impl<'h, 'b> ResponseHeaders for httparse::Response<'h, 'b> {
    fn header_count(&self) -> usize {
        self.headers.header_count()
    }

    fn header_name(&self, index: usize) -> Option<&str> {
        self.headers.header_name(index)
    }

    fn header_value(&self, index: usize) -> Option<Result<&str>> {
        self.headers.header_value(index)
    }
}

#[cfg(feature = "handshake")]
impl ResponseHeaders for http::HeaderMap {
    fn header_count(&self) -> usize {
        self.len()
    }

    fn header_name(&self, index: usize) -> Option<&str> {
        self.iter().nth(index).map(|(name, _)| name.as_str())
    }

    fn header_value(&self, index: usize) -> Option<Result<&str>> {
        self.iter()
            .nth(index)
            .map(|(_, value)| from_utf8(value.as_bytes()).map_err(Error::from))
    }

    fn for_each_extension_value(&self, f: &mut dyn FnMut(&str)) -> Result<()> {
        for value in self.get_all(http::header::SEC_WEBSOCKET_EXTENSIONS).iter() {
            f(from_utf8(value.as_bytes())?);
        }
        Ok(())
    }
}

#[cfg(feature = "handshake")]
impl<T> ResponseHeaders for http::Response<T> {
    fn header_count(&self) -> usize {
        self.headers().header_count()
    }

    fn header_name(&self, index: usize) -> Option<&str> {
        self.headers().header_name(index)
    }

    fn header_value(&self, index: usize) -> Option<Result<&str>> {
        self.headers().header_value(index)
    }

    fn for_each_extension_value(&self, f: &mut dyn FnMut(&str)) -> Result<()> {
        self.headers().for_each_extension_value(f)
    }
}
