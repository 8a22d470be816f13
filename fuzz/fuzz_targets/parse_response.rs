#![no_main]
use libfuzzer_sys::fuzz_target;
use ws_extensions::{handshake::parse_response, verify_response_extensions, ExtensionsConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(Some((_, _, headers))) = parse_response(data) {
        verify_response_extensions(&headers, &ExtensionsConfig::default()).ok();
    }
});
