//! `Sec-WebSocket-Extensions` negotiation for the WebSocket `permessage-deflate` extension.
#![deny(
    missing_docs,
    missing_copy_implementations,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_must_use,
    unused_mut,
    unused_imports,
    unused_import_braces
)]

#[cfg(feature = "handshake")]
pub use http;

pub mod error;
pub mod extensions;
pub mod handshake;
pub mod protocol;

pub use crate::{
    error::{Error, Result},
    extensions::{parse, parse_values, DeflateContext, ExtensionsConfig, ExtensionsResult},
    handshake::{headers::ResponseHeaders, verify_response_extensions},
    protocol::{CloseCode, Role},
};
