//! Permessage-deflate negotiation settings.

use super::{PERMESSAGE_DEFLATE, SERVER_NO_CONTEXT_TAKEOVER};

/// Client-side extension settings for the opening handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExtensionsConfig {
    /// Whether to offer `permessage-deflate` to the server.
    /// Default: true
    pub compression: bool,
    /// Indicates whether to ask the server to reset its sliding window for each message.
    /// If set, the handshake fails when the server accepts compression without agreeing.
    /// Default: false
    pub request_no_context_takeover: bool,
    /// Indicates whether this endpoint will agree to reset the sliding window for each message it
    /// compresses. If it won't, the handshake fails when the server requests no context takeover.
    /// Default: true
    pub accept_no_context_takeover: bool,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        ExtensionsConfig {
            compression: true,
            request_no_context_takeover: false,
            accept_no_context_takeover: true,
        }
    }
}

impl ExtensionsConfig {
    /// Set [`Self::compression`].
    pub fn compression(mut self, compression: bool) -> Self {
        self.compression = compression;
        self
    }

    /// Set [`Self::request_no_context_takeover`].
    pub fn request_no_context_takeover(mut self, request: bool) -> Self {
        self.request_no_context_takeover = request;
        self
    }

    /// Set [`Self::accept_no_context_takeover`].
    pub fn accept_no_context_takeover(mut self, accept: bool) -> Self {
        self.accept_no_context_takeover = accept;
        self
    }

    /// The `Sec-WebSocket-Extensions` value to send in the client request, if any.
    pub fn offer(&self) -> Option<String> {
        if !self.compression {
            return None;
        }
        let mut offer = String::from(PERMESSAGE_DEFLATE);
        if self.request_no_context_takeover {
            offer.push_str("; ");
            offer.push_str(SERVER_NO_CONTEXT_TAKEOVER);
        }
        Some(offer)
    }
}

/// Which compression contexts an endpoint resets after every message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeflateContext {
    /// Reset the compressor after each outgoing message.
    pub compress_reset: bool,
    /// Reset the decompressor after each incoming message.
    pub decompress_reset: bool,
}
