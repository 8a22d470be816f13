//! Extension negotiation against `http` responses, the way a client handshake sees them.
#![cfg(feature = "handshake")]

use http::{header::SEC_WEBSOCKET_EXTENSIONS, HeaderValue, Response};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ws_extensions::{
    error::{Error, ProtocolError},
    extensions::parse,
    verify_response_extensions, CloseCode, DeflateContext, ExtensionsConfig, ExtensionsResult,
};

fn response(values: &[&str]) -> Response<()> {
    let _ = env_logger::try_init();

    let mut builder = Response::builder()
        .status(101)
        .header("Connection", "Upgrade")
        .header("Upgrade", "websocket");
    for value in values {
        builder = builder.header(SEC_WEBSOCKET_EXTENSIONS, *value);
    }
    builder.body(()).unwrap()
}

#[test]
fn no_extension_header() {
    assert_eq!(parse(&response(&[])).unwrap(), ExtensionsResult::default());
}

#[test]
fn header_name_is_case_insensitive() {
    let mut resp = response(&[]);
    resp.headers_mut()
        .append("SEC-WEBSOCKET-EXTENSIONS", HeaderValue::from_static("permessage-deflate"));
    assert!(parse(&resp).unwrap().permessage_deflate);
}

#[test]
fn other_headers_are_ignored() {
    let mut resp = response(&["permessage-deflate"]);
    resp.headers_mut().append("X-Extensions", HeaderValue::from_static("unknown-ext"));
    resp.headers_mut()
        .append("Sec-WebSocket-Protocol", HeaderValue::from_static("client_no_context_takeover"));
    assert_eq!(
        parse(&resp).unwrap(),
        ExtensionsResult { permessage_deflate: true, ..Default::default() }
    );
}

#[test]
fn split_and_combined_headers_agree() {
    let split = response(&[
        "permessage-deflate; server_no_context_takeover",
        "",
        "x-webkit-deflate-frame",
    ]);
    let combined =
        response(&["permessage-deflate; server_no_context_takeover, x-webkit-deflate-frame"]);
    let result = parse(&split).unwrap();
    assert_eq!(result, parse(&combined).unwrap());
    assert_eq!(
        result,
        ExtensionsResult {
            permessage_deflate: true,
            client_no_context_takeover: false,
            server_no_context_takeover: true,
            unknown_values: true,
        }
    );
}

#[test]
fn duplicates_across_headers() {
    let resp = response(&[
        "permessage-deflate; client_no_context_takeover",
        "permessage-deflate; client_no_context_takeover",
    ]);
    let result = parse(&resp).unwrap();
    assert!(result.permessage_deflate);
    assert!(result.client_no_context_takeover);
    assert!(result.unknown_values);
}

#[test]
fn opaque_header_value() {
    let mut resp = response(&[]);
    resp.headers_mut()
        .append(SEC_WEBSOCKET_EXTENSIONS, HeaderValue::from_bytes(b"permessage-\xe9").unwrap());
    assert!(matches!(parse(&resp), Err(Error::Utf8)));
}

/// Surround every token and parameter with a random mix of spaces and tabs.
fn pad(rng: &mut impl Rng, tokens: &[&[&str]]) -> String {
    let mut ws = || -> String {
        let len = rng.random_range(0..4);
        (0..len).map(|_| if rng.random_bool(0.5) { ' ' } else { '\t' }).collect()
    };
    let mut extensions = Vec::new();
    for extension in tokens {
        let mut params = Vec::new();
        for token in extension.iter() {
            let (before, after) = (ws(), ws());
            params.push(format!("{before}{token}{after}"));
        }
        extensions.push(params.join(";"));
    }
    extensions.join(",")
}

#[test]
fn whitespace_and_case_invariance() {
    let cases: &[&[&[&str]]] = &[
        &[&["permessage-deflate"]],
        &[&["permessage-deflate", "client_no_context_takeover"]],
        &[&["permessage-deflate", "server_no_context_takeover", "client_no_context_takeover"]],
        &[&["permessage-deflate", "client_max_window_bits=15"]],
        &[&["permessage-deflate"], &["permessage-deflate", "server_no_context_takeover"]],
        &[&["unknown-ext", "client_no_context_takeover"], &["permessage-deflate"]],
    ];

    let seed: u64 = rand::random();
    let mut rng = StdRng::seed_from_u64(seed);
    for case in cases {
        let expected = parse(&response(&[pad_none(case).as_str()])).unwrap();
        for _ in 0..32 {
            let padded = pad(&mut rng, case);
            let result = parse(&response(&[padded.as_str()])).unwrap();
            assert_eq!(result, expected, "{padded:?} (seed {seed})");
            let upper = padded.to_ascii_uppercase();
            let result = parse(&response(&[upper.as_str()])).unwrap();
            assert_eq!(result, expected, "{upper:?} (seed {seed})");
        }
    }
}

fn pad_none(tokens: &[&[&str]]) -> String {
    tokens.iter().map(|extension| extension.join(";")).collect::<Vec<_>>().join(",")
}

#[test]
fn client_handshake_accepts_deflate() {
    let resp = response(&["permessage-deflate; server_no_context_takeover"]);
    let context = verify_response_extensions(&resp, &ExtensionsConfig::default()).unwrap();
    assert_eq!(context, Some(DeflateContext { compress_reset: false, decompress_reset: true }));
}

#[test]
fn client_handshake_without_extensions() {
    let resp = response(&[]);
    assert_eq!(verify_response_extensions(&resp, &ExtensionsConfig::default()).unwrap(), None);
}

#[test]
fn client_handshake_refuses_unknown() {
    let resp = response(&[", permessage-deflate"]);
    let err = verify_response_extensions(&resp, &ExtensionsConfig::default()).unwrap_err();
    match err {
        Error::Protocol(e) => {
            assert_eq!(e, ProtocolError::UnsupportedExtension);
            assert_eq!(e.close_code(), CloseCode::Policy);
            assert_eq!(u16::from(e.close_code()), 1008);
        }
        e => panic!("unexpected error: {e}"),
    }
}

#[test]
fn client_handshake_requires_server_no_context_takeover_echo() {
    let config = ExtensionsConfig::default().request_no_context_takeover(true);
    let err = verify_response_extensions(&response(&["permessage-deflate"]), &config).unwrap_err();
    match err {
        Error::Protocol(e) => {
            assert_eq!(e, ProtocolError::NoContextTakeoverIgnored);
            assert_eq!(u16::from(e.close_code()), 1010);
        }
        e => panic!("unexpected error: {e}"),
    }
}
