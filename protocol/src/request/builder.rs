//! Outbound request construction via the builder pattern.
//!
//! The [`Request`] builder enforces a disciplined flow: construct from the
//! injected [`GatewayConfig`], chain the fluent setters, and call
//! [`Request::build`] to get back a [`SignedMessage`] whose payload is the
//! exact field concatenation the signature covers.
//!
//! A builder accumulates mutable field state, so one logical payment means
//! one builder instance — don't share a builder between concurrent
//! operations, clone the config instead.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::codec::fixed::{encode_amount, encode_fixed, Alignment};
use crate::codec::layout::{request_fields, RequestField};
use crate::config::{
    Environment, GatewayConfig, ONE_TIME_TOKEN_WIDTH, ORDER_DESCRIPTION_WIDTH, ORDER_ID_WIDTH,
    TERMINAL_ID_WIDTH, TIMESTAMP_FORMAT,
};
use crate::crypto::material::PrivateKeyMaterial;
use crate::crypto::signing::{sign_message, SigningError};

use super::types::{Currency, Language, ProtocolVersion, TransactionCode};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the fail-fast builder operations.
///
/// Note what is NOT here: unsupported enumerated values. Those follow the
/// keep-previous policy on the string setters and never surface as errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The amount is not a finite, non-negative number.
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    /// A timestamp string did not parse under the supplied format.
    #[error("unparseable timestamp {value:?} for format {format:?}")]
    InvalidTimestamp { value: String, format: String },

    /// An epoch timestamp outside the representable range.
    #[error("epoch timestamp out of range: {0}")]
    InvalidEpoch(i64),
}

// ---------------------------------------------------------------------------
// SignedMessage
// ---------------------------------------------------------------------------

/// A fully serialized, signed outbound message.
///
/// `payload` is the delimiter-free concatenation of the fixed-width fields;
/// `signature` is the raw RSA signature over exactly those payload bytes.
/// On the wire the two travel back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl SignedMessage {
    /// The serialized fields the signature covers.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The raw signature block.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Hex rendering of the signature block, for logs and reconciliation
    /// trails. The wire carries the raw bytes, never this.
    pub fn signature_hex(&self) -> String {
        hex::encode(&self.signature)
    }

    /// Payload followed by signature — the full wire message.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.payload.len() + self.signature.len());
        bytes.extend_from_slice(&self.payload);
        bytes.extend_from_slice(&self.signature);
        bytes
    }

    /// Base64 rendering of the full message, for transports that cannot
    /// carry the raw signature bytes in a form value.
    pub fn to_base64(&self) -> String {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        STANDARD.encode(self.to_bytes())
    }

    /// Total wire length: payload plus signature block.
    pub fn len(&self) -> usize {
        self.payload.len() + self.signature.len()
    }

    /// True only for a degenerate message with no payload and no signature.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty() && self.signature.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Fluent builder for outbound payment-authorization messages.
///
/// # Usage
///
/// ```rust,no_run
/// use borica_protocol::config::{Environment, GatewayConfig};
/// use borica_protocol::crypto::{CertificateMaterial, PrivateKeyMaterial};
/// use borica_protocol::request::{Request, TransactionCode};
///
/// let config = GatewayConfig {
///     terminal_id: "12345678".to_string(),
///     environment: Environment::Test,
///     private_key: PrivateKeyMaterial::from_file("merchant.key", None),
///     certificate: CertificateMaterial::from_file("gateway.cer"),
/// };
///
/// let message = Request::new(&config)
///     .transaction_code(TransactionCode::RegisterTransaction)
///     .amount(12.34)?
///     .order("ORDER-42", "Two tickets, row 11")
///     .build()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Setter policy
///
/// The enum-typed setters cannot fail — invalid values don't typecheck.
/// The string/numeric convenience setters (`language_code`,
/// `currency_code`, `protocol_version_code`, `transaction_code_value`,
/// `order_id`) validate and, on unsupported input, keep the previous value
/// and emit a `tracing` debug event. That silence is the gateway
/// integration contract, reproduced deliberately; inspect the `get_*`
/// accessors if you need to know what the builder will actually send.
#[derive(Debug, Clone)]
pub struct Request {
    transaction_code: Option<TransactionCode>,
    amount: Option<f64>,
    terminal_id: String,
    order_id: Option<String>,
    order_description: Option<String>,
    language: Language,
    currency: Currency,
    protocol_version: ProtocolVersion,
    one_time_token: Option<String>,
    timestamp: Option<NaiveDateTime>,
    environment: Environment,
    private_key: PrivateKeyMaterial,
}

impl Request {
    /// Creates a builder bound to the injected gateway configuration.
    ///
    /// Defaults: language BG, currency BGN, protocol version 1.1,
    /// timestamp taken at serialization time unless set explicitly.
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            transaction_code: None,
            amount: None,
            terminal_id: config.terminal_id.clone(),
            order_id: None,
            order_description: None,
            language: Language::default(),
            currency: Currency::default(),
            protocol_version: ProtocolVersion::default(),
            one_time_token: None,
            timestamp: None,
            environment: config.environment,
            private_key: config.private_key.clone(),
        }
    }

    // -- fail-fast setters --------------------------------------------------

    /// Sets the amount in major currency units (12.34 means 12 leva and
    /// 34 stotinki). Fails fast on NaN, infinities, and negative values;
    /// the wire encoding multiplies by 100 and zero-pads to 12 digits.
    pub fn amount(mut self, amount: f64) -> Result<Self, RequestError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(RequestError::InvalidAmount(amount));
        }
        self.amount = Some(amount);
        Ok(self)
    }

    // -- enum-typed setters -------------------------------------------------

    /// Sets the requested operation.
    pub fn transaction_code(mut self, code: TransactionCode) -> Self {
        self.transaction_code = Some(code);
        self
    }

    /// Sets the cardholder-facing language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the settlement currency. Ignored on the wire under protocol
    /// 1.0, which has no currency field.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the protocol version, which selects the field layout.
    pub fn protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.protocol_version = version;
        self
    }

    // -- keep-previous setters ----------------------------------------------

    /// Sets the language from a string code. Unsupported codes keep the
    /// previous value — see the setter policy above.
    pub fn language_code(mut self, code: &str) -> Self {
        match code.parse::<Language>() {
            Ok(language) => self.language = language,
            Err(err) => debug!(%err, "keeping previous language"),
        }
        self
    }

    /// Sets the currency from a string code. Unsupported codes keep the
    /// previous value.
    pub fn currency_code(mut self, code: &str) -> Self {
        match code.parse::<Currency>() {
            Ok(currency) => self.currency = currency,
            Err(err) => debug!(%err, "keeping previous currency"),
        }
        self
    }

    /// Sets the protocol version from its wire string. Unknown versions
    /// keep the previous value.
    pub fn protocol_version_code(mut self, code: &str) -> Self {
        match code.parse::<ProtocolVersion>() {
            Ok(version) => self.protocol_version = version,
            Err(err) => debug!(%err, "keeping previous protocol version"),
        }
        self
    }

    /// Sets the transaction code from its numeric value. Codes outside the
    /// gateway's mapping keep the previous value.
    pub fn transaction_code_value(mut self, code: u8) -> Self {
        match TransactionCode::from_code(code) {
            Ok(tc) => self.transaction_code = Some(tc),
            Err(err) => debug!(%err, "keeping previous transaction code"),
        }
        self
    }

    /// Sets order id and description in one call.
    pub fn order(self, id: &str, description: &str) -> Self {
        self.order_id(id).order_description(description)
    }

    /// Sets the merchant order identifier.
    ///
    /// Accepted only when the length is strictly between 1 and 15
    /// characters (2–14 inclusive); anything else keeps the previous
    /// value. The exclusive upper bound looks like an off-by-one against
    /// the 15-character field, but it is what the gateway integration has
    /// always enforced — reproduced here verbatim until the gateway's own
    /// documentation says otherwise.
    pub fn order_id(mut self, id: &str) -> Self {
        let length = id.chars().count();
        if length > 1 && length < 15 {
            self.order_id = Some(id.to_string());
        } else {
            debug!(length, "order id outside accepted bounds, keeping previous value");
        }
        self
    }

    /// Sets the order description, truncated to the 125-character field.
    /// Always accepted.
    pub fn order_description(mut self, description: &str) -> Self {
        self.order_description = Some(description.chars().take(ORDER_DESCRIPTION_WIDTH).collect());
        self
    }

    /// Sets the one-time token required under protocol 2.0. Not rendered
    /// under earlier versions.
    pub fn one_time_token(mut self, token: &str) -> Self {
        self.one_time_token = Some(token.to_string());
        self
    }

    // -- timestamp setters --------------------------------------------------

    /// Sets an explicit message timestamp.
    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Parses a timestamp from a string with an explicit `chrono` format.
    pub fn timestamp_str(mut self, value: &str, format: &str) -> Result<Self, RequestError> {
        let parsed = NaiveDateTime::parse_from_str(value, format).map_err(|_| {
            RequestError::InvalidTimestamp {
                value: value.to_string(),
                format: format.to_string(),
            }
        })?;
        self.timestamp = Some(parsed);
        Ok(self)
    }

    /// Sets the timestamp from Unix epoch seconds (UTC).
    pub fn timestamp_epoch(mut self, epoch_seconds: i64) -> Result<Self, RequestError> {
        let parsed = DateTime::from_timestamp(epoch_seconds, 0)
            .ok_or(RequestError::InvalidEpoch(epoch_seconds))?;
        self.timestamp = Some(parsed.naive_utc());
        Ok(self)
    }

    // -- accessors ----------------------------------------------------------

    /// Currently configured transaction code, if any.
    pub fn get_transaction_code(&self) -> Option<TransactionCode> {
        self.transaction_code
    }

    /// Currently configured amount in major units, if any.
    pub fn get_amount(&self) -> Option<f64> {
        self.amount
    }

    /// Terminal identifier injected from configuration.
    pub fn get_terminal_id(&self) -> &str {
        &self.terminal_id
    }

    /// Currently configured order id, if one has been accepted.
    pub fn get_order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// Currently configured order description, if any.
    pub fn get_order_description(&self) -> Option<&str> {
        self.order_description.as_deref()
    }

    /// Currently configured language.
    pub fn get_language(&self) -> Language {
        self.language
    }

    /// Currently configured currency.
    pub fn get_currency(&self) -> Currency {
        self.currency
    }

    /// Currently configured protocol version.
    pub fn get_protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    /// Currently configured one-time token, if any.
    pub fn get_one_time_token(&self) -> Option<&str> {
        self.one_time_token.as_deref()
    }

    // -- serialization ------------------------------------------------------

    /// Serializes the request into its ordered fixed-width fields.
    ///
    /// The field set and order come from the protocol version's layout.
    /// Unset optional state renders as its blank fixed-width default
    /// (all-zero amount, space-padded order fields); an unset transaction
    /// code renders as an empty first field, which the gateway rejects —
    /// setting the code is the caller's contract.
    pub fn serialize(&self) -> Vec<String> {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().naive_utc())
            .format(TIMESTAMP_FORMAT)
            .to_string();

        request_fields(self.protocol_version)
            .iter()
            .map(|field| match field {
                RequestField::TransactionCode => self
                    .transaction_code
                    .map(|tc| tc.wire().to_string())
                    .unwrap_or_default(),
                RequestField::Timestamp => timestamp.clone(),
                RequestField::Amount => encode_amount(self.amount.unwrap_or(0.0)),
                RequestField::TerminalId => {
                    encode_fixed(&self.terminal_id, TERMINAL_ID_WIDTH, ' ', Alignment::Left)
                }
                RequestField::OrderId => encode_fixed(
                    self.order_id.as_deref().unwrap_or(""),
                    ORDER_ID_WIDTH,
                    ' ',
                    Alignment::Left,
                ),
                RequestField::OrderDescription => encode_fixed(
                    self.order_description.as_deref().unwrap_or(""),
                    ORDER_DESCRIPTION_WIDTH,
                    ' ',
                    Alignment::Left,
                ),
                RequestField::Language => self.language.to_string(),
                RequestField::ProtocolVersion => self.protocol_version.to_string(),
                RequestField::Currency => self.currency.to_string(),
                RequestField::OneTimeToken => encode_fixed(
                    self.one_time_token.as_deref().unwrap_or(""),
                    ONE_TIME_TOKEN_WIDTH,
                    ' ',
                    Alignment::Left,
                ),
            })
            .collect()
    }

    /// The delimiter-free concatenation of [`Request::serialize`] — the
    /// exact bytes the signature covers.
    pub fn message_bytes(&self) -> Vec<u8> {
        self.serialize().concat().into_bytes()
    }

    /// Serializes, signs, and returns the signed outbound message.
    ///
    /// The private key is loaded inside this call and released before it
    /// returns; building the same request twice reads the key twice.
    pub fn build(&self) -> Result<SignedMessage, SigningError> {
        let payload = self.message_bytes();
        let signature = sign_message(&payload, &self.private_key)?;
        debug!(
            payload_len = payload.len(),
            version = %self.protocol_version,
            "built signed outbound message"
        );
        Ok(SignedMessage { payload, signature })
    }

    /// The gateway base URL for the environment this request was
    /// configured with.
    pub fn gateway_endpoint(&self) -> &'static str {
        self.environment.endpoint()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
