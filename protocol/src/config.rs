//! # Gateway Configuration & Wire Constants
//!
//! Every magic number of the BORICA wire format lives here. If you're
//! hardcoding a field width somewhere else, you're doing it wrong and you
//! owe the team coffee.
//!
//! These values are dictated by the gateway's message specification.
//! Changing them does not give you a new protocol version; it gives you
//! messages the gateway silently fails to verify.

use serde::{Deserialize, Serialize};

use crate::crypto::material::{CertificateMaterial, PrivateKeyMaterial};

// ---------------------------------------------------------------------------
// Gateway endpoints
// ---------------------------------------------------------------------------

/// Production gateway. Messages sent here move real money.
pub const PRODUCTION_GATEWAY_URL: &str = "https://gate.borica.bg/boreps/";

/// Test gateway. Where integration mistakes go to be forgiven.
pub const TEST_GATEWAY_URL: &str = "https://gatet.borica.bg/boreps/";

// ---------------------------------------------------------------------------
// Field widths
// ---------------------------------------------------------------------------

/// Transaction code width. All defined codes are two ASCII digits.
pub const TRANSACTION_CODE_WIDTH: usize = 2;

/// Timestamp width: `YYYYMMDDHHMMSS`.
pub const TIMESTAMP_WIDTH: usize = 14;

/// `chrono` format string producing the 14-digit wire timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Amount width. Minor units (stotinki/cents), zero-padded on the left.
pub const AMOUNT_WIDTH: usize = 12;

/// Terminal identifier width, assigned by the gateway per merchant.
pub const TERMINAL_ID_WIDTH: usize = 8;

/// Order identifier width. Shorter ids are right-padded with spaces.
pub const ORDER_ID_WIDTH: usize = 15;

/// Order description width.
pub const ORDER_DESCRIPTION_WIDTH: usize = 125;

/// Language code width (ISO 639-1, upper case).
pub const LANGUAGE_WIDTH: usize = 2;

/// Protocol version width (`1.0`, `1.1`, `2.0`).
pub const PROTOCOL_VERSION_WIDTH: usize = 3;

/// Currency code width (ISO 4217).
pub const CURRENCY_WIDTH: usize = 3;

/// One-time token width. Protocol 2.0 only.
pub const ONE_TIME_TOKEN_WIDTH: usize = 6;

// ---------------------------------------------------------------------------
// Signature & response layout
// ---------------------------------------------------------------------------

/// RSA signature block length in bytes. The gateway signs with a 1024-bit
/// key, so the block is always exactly 128 bytes — not base64, raw binary.
pub const SIGNATURE_LENGTH: usize = 128;

/// Minimum decoded length of an inbound response message: 56 bytes of
/// fixed-offset fields followed by the 128-byte signature block. Anything
/// shorter cannot be sliced and is rejected as malformed.
pub const RESPONSE_MESSAGE_LENGTH: usize = 184;

/// Response code the gateway uses for an approved transaction.
pub const SUCCESS_RESPONSE_CODE: &str = "00";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Which gateway a built request is destined for.
///
/// This is an explicit configuration value, injected at construction —
/// never an ambient environment variable the codec sniffs on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// The real gateway. Real cards, real money, real consequences.
    Production,
    /// The sandbox gateway used during merchant certification.
    Test,
}

impl Environment {
    /// Returns the base URL of the gateway for this environment.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_GATEWAY_URL,
            Self::Test => TEST_GATEWAY_URL,
        }
    }
}

// ---------------------------------------------------------------------------
// GatewayConfig
// ---------------------------------------------------------------------------

/// Configuration the embedding application supplies.
///
/// How these values are loaded (config file, environment, vault) is the
/// application's business. The codec only ever sees the resolved values.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Merchant terminal identifier assigned by the gateway (8 characters).
    pub terminal_id: String,
    /// Production or test gateway.
    pub environment: Environment,
    /// Private signing key for outbound messages.
    pub private_key: PrivateKeyMaterial,
    /// Public certificate used to verify inbound response signatures.
    pub certificate: CertificateMaterial,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
