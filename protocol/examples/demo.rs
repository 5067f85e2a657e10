//! Interactive CLI demo of the full message lifecycle.
//!
//! Walks through both legs of the protocol with a freshly generated
//! RSA-1024 keypair standing in for merchant and gateway: build and sign
//! an outbound payment request, then fabricate, parse, and verify an
//! inbound gateway response — including what a tampered one looks like.
//!
//! Run with:
//!   cargo run --example demo
//!
//! Set `RUST_LOG=borica_protocol=debug` to watch the codec's own events.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use tracing_subscriber::EnvFilter;

use borica_protocol::config::{Environment, GatewayConfig};
use borica_protocol::crypto::material::{CertificateMaterial, PrivateKeyMaterial};
use borica_protocol::crypto::signing::sign_message;
use borica_protocol::request::builder::Request;
use borica_protocol::request::types::{Language, ProtocolVersion, TransactionCode};
use borica_protocol::response::Response;

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[ Step {num} ]==============================================={RESET}");
    println!("{BOLD}  {title}{RESET}");
}

fn kv(label: &str, value: impl std::fmt::Display) {
    println!("  {DIM}{label:<22}{RESET}{value}");
}

fn verdict(label: &str, ok: bool) {
    let mark = if ok {
        format!("{GREEN}valid{RESET}")
    } else {
        format!("{RED}INVALID{RESET}")
    };
    println!("  {DIM}{label:<22}{RESET}{mark}");
}

// ---------------------------------------------------------------------------
// Demo
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    section(1, "Key material (demo keypair, gateway key size)");
    let key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024)?;
    let config = GatewayConfig {
        terminal_id: "91000000".to_string(),
        environment: Environment::Test,
        private_key: PrivateKeyMaterial::from_pem(
            key.to_pkcs8_pem(LineEnding::LF)?.to_string(),
            None,
        ),
        certificate: CertificateMaterial::from_pem(
            key.to_public_key().to_public_key_pem(LineEnding::LF)?,
        ),
    };
    kv("terminal", &config.terminal_id);
    kv("gateway", config.environment.endpoint());

    section(2, "Build and sign an outbound payment request");
    let request = Request::new(&config)
        .transaction_code(TransactionCode::RegisterTransaction)
        .amount(12.34)?
        .order("ORDER-42", "Two tickets, row 11")
        .language(Language::EN)
        .protocol_version(ProtocolVersion::V1_1);

    let message = request.build()?;
    kv("payload bytes", message.payload().len());
    kv("signature bytes", message.signature().len());
    kv("payload", String::from_utf8_lossy(message.payload()).trim_end());
    kv("signature (hex)", &message.signature_hex()[..32]);
    kv("as base64", &message.to_base64()[..48]);

    section(3, "Parse and verify a gateway response");
    let raw = fabricate_gateway_response(&config, "00")?;
    let response = Response::parse(&raw, &config.certificate)?;
    kv("transaction code", response.transaction_code());
    kv("amount", response.amount().unwrap_or_default());
    kv("response code", response.response_code());
    kv("successful", response.is_successful());
    verdict("signature", response.signature_ok());

    section(4, "Spot a forged response");
    let mut forged = STANDARD.decode(&raw)?;
    forged[16] = b'9'; // someone got greedy with the amount field
    let forged_response = Response::parse(&STANDARD.encode(forged), &config.certificate)?;
    kv("claimed amount", forged_response.amount().unwrap_or_default());
    verdict("signature", forged_response.signature_ok());

    println!();
    println!("{BOLD}{GREEN}Done.{RESET} The bytes either match or they don't.");
    Ok(())
}

/// Builds the base64 message the gateway's callback would deliver.
fn fabricate_gateway_response(config: &GatewayConfig, code: &str) -> Result<String> {
    let fields = format!(
        "{}{}{}{}{:<15}{}{}",
        "10", "20260219104506", "000000001234", "91000000", "ORDER-42", code, "1.1"
    );
    let mut message = fields.into_bytes();
    let signature = sign_message(&message, &config.private_key)?;
    message.extend_from_slice(&signature);
    Ok(STANDARD.encode(message))
}
