//! # Inbound Response Parsing & Verification
//!
//! The gateway answers with a base64-encoded message laid out on the same
//! fixed grid as requests, ending in a 128-byte RSA signature block:
//!
//! ```text
//! offset  width  field
//!      0      2  transaction code
//!      2     14  transaction time (YYYYMMDDHHMMSS)
//!     16     12  amount (minor units)
//!     28      8  terminal id
//!     36     15  order id
//!     51      2  response code ("00" = approved)
//!     53      3  protocol version
//!     56    128  RSA signature over bytes 0..56
//! ```
//!
//! A [`Response`] is constructed only by [`Response::parse`] and read-only
//! afterwards. The signature verdict rides along as a boolean: the parser
//! never throws on a bad signature, because whether to trust an unverified
//! gateway message is a policy decision that belongs to the caller, not to
//! a codec.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::codec::fixed::decode_field;
use crate::config::{
    RESPONSE_MESSAGE_LENGTH, SIGNATURE_LENGTH, SUCCESS_RESPONSE_CODE, TIMESTAMP_FORMAT,
};
use crate::crypto::material::{CertificateMaterial, KeyError};
use crate::crypto::signing::verify_message;

// ---------------------------------------------------------------------------
// Field offsets
// ---------------------------------------------------------------------------

// (offset, length) pairs of the fixed response grid.
const TRANSACTION_CODE: (usize, usize) = (0, 2);
const TRANSACTION_TIME: (usize, usize) = (2, 14);
const AMOUNT: (usize, usize) = (16, 12);
const TERMINAL_ID: (usize, usize) = (28, 8);
const ORDER_ID: (usize, usize) = (36, 15);
const RESPONSE_CODE: (usize, usize) = (51, 2);
const PROTOCOL_VERSION: (usize, usize) = (53, 3);

/// Offset where the signature block starts; everything before it is what
/// the gateway signed.
const SIGNATURE_OFFSET: usize = 56;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors parsing an inbound gateway message.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The message is not valid base64 or is too short for the fixed
    /// layout. Nothing useful can be sliced out of it, so no partially
    /// populated response is ever produced.
    #[error("malformed message: {reason}")]
    MalformedMessage { reason: String },

    /// The verification certificate could not be loaded.
    #[error(transparent)]
    Key(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// A parsed, verified-or-not inbound gateway message.
///
/// Field accessors return the raw fixed-width slices (padding included)
/// so the caller sees exactly what the gateway sent; the typed accessors
/// ([`Response::amount`], [`Response::transaction_time`]) do the obvious
/// conversions on top.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    transaction_code: String,
    transaction_time: String,
    amount: String,
    terminal_id: String,
    order_id: String,
    response_code: String,
    protocol_version: String,
    #[serde(skip)]
    signature: Vec<u8>,
    signature_ok: bool,
}

impl Response {
    /// Parses a base64 gateway message and verifies its signature.
    ///
    /// The certificate is loaded inside this call (scoped read, no
    /// caching); failure to load it is an error. A signature that loads
    /// but does not match is NOT an error — it surfaces as
    /// [`Response::signature_ok`] returning `false`.
    ///
    /// Messages shorter than the 184-byte fixed layout, or that are not
    /// base64 at all, fail with [`ResponseError::MalformedMessage`].
    /// Trailing bytes beyond the layout are ignored.
    pub fn parse(
        raw_base64: &str,
        certificate: &CertificateMaterial,
    ) -> Result<Self, ResponseError> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        let message =
            STANDARD
                .decode(raw_base64.trim())
                .map_err(|_| ResponseError::MalformedMessage {
                    reason: "invalid base64".to_string(),
                })?;

        if message.len() < RESPONSE_MESSAGE_LENGTH {
            return Err(ResponseError::MalformedMessage {
                reason: format!(
                    "{} bytes, fixed layout requires {}",
                    message.len(),
                    RESPONSE_MESSAGE_LENGTH
                ),
            });
        }

        let signature = message[SIGNATURE_OFFSET..SIGNATURE_OFFSET + SIGNATURE_LENGTH].to_vec();
        let signed_portion = &message[..SIGNATURE_OFFSET];
        let signature_ok = verify_message(signed_portion, &signature, certificate)?;

        let field = |(offset, len)| decode_field(&message, offset, len);
        let response = Self {
            transaction_code: field(TRANSACTION_CODE),
            transaction_time: field(TRANSACTION_TIME),
            amount: field(AMOUNT),
            terminal_id: field(TERMINAL_ID),
            order_id: field(ORDER_ID),
            response_code: field(RESPONSE_CODE),
            protocol_version: field(PROTOCOL_VERSION),
            signature,
            signature_ok,
        };

        debug!(
            transaction_code = %response.transaction_code,
            response_code = %response.response_code,
            signature_ok,
            "parsed gateway response"
        );
        Ok(response)
    }

    /// Raw transaction code field.
    pub fn transaction_code(&self) -> &str {
        &self.transaction_code
    }

    /// Raw 14-digit transaction time field.
    pub fn transaction_time_raw(&self) -> &str {
        &self.transaction_time
    }

    /// Transaction time parsed from the wire format, if well-formed.
    pub fn transaction_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.transaction_time, TIMESTAMP_FORMAT).ok()
    }

    /// Raw 12-digit minor-unit amount field.
    pub fn amount_raw(&self) -> &str {
        &self.amount
    }

    /// Amount in major units, if the field is numeric: the wire carries
    /// minor units, so this divides by 100.
    pub fn amount(&self) -> Option<f64> {
        let minor: u64 = self.amount.trim().parse().ok()?;
        Some(minor as f64 / 100.0)
    }

    /// Raw terminal identifier field.
    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }

    /// Raw order identifier field, padding included.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Raw two-character gateway response code.
    pub fn response_code(&self) -> &str {
        &self.response_code
    }

    /// Raw protocol version field.
    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    /// The 128-byte signature block as received.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Whether the signature verified against the gateway certificate.
    ///
    /// Callers MUST check this before trusting any other field; the
    /// parser deliberately does not enforce it.
    pub fn signature_ok(&self) -> bool {
        self.signature_ok
    }

    /// True iff the gateway approved the transaction (response code
    /// `"00"`). Says nothing about the signature — check
    /// [`Response::signature_ok`] too.
    pub fn is_successful(&self) -> bool {
        self.response_code == SUCCESS_RESPONSE_CODE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
