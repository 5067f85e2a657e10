//! End-to-end integration tests for the BORICA protocol codec.
//!
//! These tests exercise the full message lifecycle on both legs: building,
//! serializing, and signing an outbound payment request, then parsing and
//! verifying an inbound gateway response. They prove that the crate's
//! components compose correctly: field codec, version layouts, request
//! builder, RSA signing, and the offset parser.
//!
//! One RSA keypair stands in for both the merchant and the gateway — the
//! protocol uses the same signature scheme in both directions, so a single
//! 1024-bit key exercises the real 128-byte signature paths.

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

use borica_protocol::codec::layout::message_length;
use borica_protocol::config::{Environment, GatewayConfig, RESPONSE_MESSAGE_LENGTH, SIGNATURE_LENGTH};
use borica_protocol::crypto::material::{CertificateMaterial, PrivateKeyMaterial};
use borica_protocol::crypto::signing::{sign_message, verify_message};
use borica_protocol::request::builder::Request;
use borica_protocol::request::types::{Currency, Language, ProtocolVersion, TransactionCode};
use borica_protocol::response::{Response, ResponseError};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

static TEST_KEY: OnceLock<RsaPrivateKey> = OnceLock::new();

/// One process-wide RSA-1024 key: the gateway's key size, shared across
/// tests because generation is the slow part.
fn test_key() -> &'static RsaPrivateKey {
    TEST_KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).expect("generate test RSA key")
    })
}

fn test_config() -> GatewayConfig {
    let key = test_key();
    GatewayConfig {
        terminal_id: "91000000".to_string(),
        environment: Environment::Test,
        private_key: PrivateKeyMaterial::from_pem(
            key.to_pkcs8_pem(LineEnding::LF).unwrap().to_string(),
            None,
        ),
        certificate: CertificateMaterial::from_pem(
            key.to_public_key()
                .to_public_key_pem(LineEnding::LF)
                .unwrap(),
        ),
    }
}

/// A fully populated payment request with a pinned timestamp.
fn payment_request(config: &GatewayConfig) -> Request {
    Request::new(config)
        .transaction_code(TransactionCode::RegisterTransaction)
        .amount(12.34)
        .expect("valid amount")
        .order("ORDER-42", "Two tickets, row 11")
        .language(Language::EN)
        .currency(Currency::BGN)
        .timestamp_str("2026-02-19 10:45:00", "%Y-%m-%d %H:%M:%S")
        .expect("valid timestamp")
}

/// Fabricates a signed, base64-encoded gateway response the way the
/// gateway itself would: 56 bytes of fields, then the signature over them.
fn gateway_response(config: &GatewayConfig, response_code: &str) -> String {
    let fields = format!(
        "{}{}{}{}{:<15}{}{}",
        "10", "20260219104506", "000000001234", "91000000", "ORDER-42", response_code, "1.1"
    );
    assert_eq!(fields.len(), 56);

    let mut message = fields.into_bytes();
    let signature = sign_message(&message, &config.private_key).expect("sign response");
    message.extend_from_slice(&signature);
    STANDARD.encode(message)
}

// ---------------------------------------------------------------------------
// 1. Outbound: build, sign, inspect
// ---------------------------------------------------------------------------

#[test]
fn outbound_message_full_lifecycle() {
    let config = test_config();
    let request = payment_request(&config);

    // The payload is the exact fixed-width concatenation.
    let message = request.build().expect("build signed message");
    assert_eq!(
        message.payload().len(),
        message_length(ProtocolVersion::V1_1)
    );
    assert_eq!(message.signature().len(), SIGNATURE_LENGTH);

    // Spot-check the grid: code, timestamp, amount at the front.
    let payload = String::from_utf8(message.payload().to_vec()).unwrap();
    assert!(payload.starts_with("1020260219104500000000001234"));
    assert!(payload.contains("ORDER-42"));
    assert!(payload.ends_with("BGN"));

    // The signature verifies against the matching certificate and covers
    // exactly the payload bytes.
    assert!(
        verify_message(message.payload(), message.signature(), &config.certificate).unwrap()
    );
    assert!(!verify_message(
        &message.payload()[1..],
        message.signature(),
        &config.certificate
    )
    .unwrap());

    // Transport-facing views.
    assert_eq!(message.to_bytes().len(), message.len());
    assert_eq!(
        STANDARD.decode(message.to_base64()).unwrap(),
        message.to_bytes()
    );
    assert_eq!(request.gateway_endpoint(), "https://gatet.borica.bg/boreps/");
}

#[test]
fn outbound_layout_varies_by_protocol_version() {
    let config = test_config();

    let v10 = payment_request(&config)
        .protocol_version(ProtocolVersion::V1_0)
        .build()
        .unwrap();
    let v11 = payment_request(&config).build().unwrap();
    let v20 = payment_request(&config)
        .protocol_version(ProtocolVersion::V2_0)
        .one_time_token("T0K3N")
        .build()
        .unwrap();

    assert_eq!(v10.payload().len(), 181);
    assert_eq!(v11.payload().len(), 184);
    assert_eq!(v20.payload().len(), 190);

    let v10_payload = String::from_utf8(v10.payload().to_vec()).unwrap();
    let v20_payload = String::from_utf8(v20.payload().to_vec()).unwrap();
    assert!(v10_payload.ends_with("1.0"), "1.0 carries no currency");
    assert!(v20_payload.ends_with("BGNT0K3N "), "2.0 ends with currency + padded token");
}

#[test]
fn each_build_reads_key_material_fresh() {
    // Same request, built twice: two scoped key loads, identical bytes.
    let config = test_config();
    let request = payment_request(&config);

    let first = request.build().unwrap();
    let second = request.build().unwrap();
    assert_eq!(first, second, "PKCS#1 v1.5 signing is deterministic");
}

// ---------------------------------------------------------------------------
// 2. Inbound: parse, verify, interpret
// ---------------------------------------------------------------------------

#[test]
fn inbound_message_full_lifecycle() {
    let config = test_config();
    let raw = gateway_response(&config, "00");

    let response = Response::parse(&raw, &config.certificate).expect("parse response");
    assert!(response.signature_ok());
    assert!(response.is_successful());
    assert_eq!(response.transaction_code(), "10");
    assert_eq!(response.terminal_id(), "91000000");
    assert_eq!(response.order_id().trim_end(), "ORDER-42");
    assert_eq!(response.amount(), Some(12.34));
    assert_eq!(
        response.transaction_time().unwrap().to_string(),
        "2026-02-19 10:45:06"
    );
}

#[test]
fn declined_response_parses_but_is_not_successful() {
    let config = test_config();
    let response =
        Response::parse(&gateway_response(&config, "51"), &config.certificate).unwrap();
    assert!(response.signature_ok(), "decline is still authentically signed");
    assert!(!response.is_successful());
    assert_eq!(response.response_code(), "51");
}

#[test]
fn forged_response_is_detected_not_rejected() {
    let config = test_config();
    let mut message = STANDARD.decode(gateway_response(&config, "51")).unwrap();
    // An attacker flips the response code on a declined transaction.
    message[51] = b'0';
    message[52] = b'0';
    let forged = STANDARD.encode(&message);

    let response = Response::parse(&forged, &config.certificate).unwrap();
    assert!(response.is_successful(), "field itself reads approved");
    assert!(!response.signature_ok(), "but the signature gives it away");
}

#[test]
fn short_or_garbled_responses_are_malformed() {
    let config = test_config();

    let short = STANDARD.encode(vec![0u8; RESPONSE_MESSAGE_LENGTH - 1]);
    assert!(matches!(
        Response::parse(&short, &config.certificate),
        Err(ResponseError::MalformedMessage { .. })
    ));

    assert!(matches!(
        Response::parse("%%% not base64 %%%", &config.certificate),
        Err(ResponseError::MalformedMessage { .. })
    ));
}

// ---------------------------------------------------------------------------
// 3. Cross-leg consistency
// ---------------------------------------------------------------------------

#[test]
fn amount_encoding_agrees_across_legs() {
    // The amount a request encodes is the amount a response decodes.
    let config = test_config();
    let request = payment_request(&config).amount(1075.50).unwrap();
    let payload = String::from_utf8(request.message_bytes()).unwrap();
    assert!(payload.contains("000000107550"));

    let response =
        Response::parse(&gateway_response(&config, "00"), &config.certificate).unwrap();
    assert_eq!(response.amount(), Some(12.34));
}

#[test]
fn silent_reject_policy_survives_the_full_flow() {
    // A typo'd language code must not corrupt the outbound message —
    // the builder keeps the previous value and the wire shows it.
    let config = test_config();
    let request = payment_request(&config).language_code("FR");
    let payload = String::from_utf8(request.message_bytes()).unwrap();
    // Language sits right after the 125-char description field.
    assert_eq!(request.get_language(), Language::EN);
    assert!(payload.contains("EN1.1BGN"));
}
