//! Per-version request field layout.
//!
//! The gateway added fields across protocol revisions without ever moving
//! the existing ones: 1.0 has no currency, 1.1 appends it, and 2.0 appends
//! the one-time token after that. The layout is therefore a pure function
//! of the protocol version, expressed as static ordered slices. Request
//! serialization walks the slice; it never asks "which version am I?"
//! field by field.

use crate::config::{
    AMOUNT_WIDTH, CURRENCY_WIDTH, LANGUAGE_WIDTH, ONE_TIME_TOKEN_WIDTH, ORDER_DESCRIPTION_WIDTH,
    ORDER_ID_WIDTH, PROTOCOL_VERSION_WIDTH, TERMINAL_ID_WIDTH, TIMESTAMP_WIDTH,
    TRANSACTION_CODE_WIDTH,
};
use crate::request::types::ProtocolVersion;

/// One slot in the outbound message grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    TransactionCode,
    Timestamp,
    Amount,
    TerminalId,
    OrderId,
    OrderDescription,
    Language,
    ProtocolVersion,
    Currency,
    OneTimeToken,
}

impl RequestField {
    /// Fixed width of this field on the wire, in characters.
    pub fn width(self) -> usize {
        match self {
            Self::TransactionCode => TRANSACTION_CODE_WIDTH,
            Self::Timestamp => TIMESTAMP_WIDTH,
            Self::Amount => AMOUNT_WIDTH,
            Self::TerminalId => TERMINAL_ID_WIDTH,
            Self::OrderId => ORDER_ID_WIDTH,
            Self::OrderDescription => ORDER_DESCRIPTION_WIDTH,
            Self::Language => LANGUAGE_WIDTH,
            Self::ProtocolVersion => PROTOCOL_VERSION_WIDTH,
            Self::Currency => CURRENCY_WIDTH,
            Self::OneTimeToken => ONE_TIME_TOKEN_WIDTH,
        }
    }
}

/// The common prefix every protocol version shares.
const FIELDS_V1_0: &[RequestField] = &[
    RequestField::TransactionCode,
    RequestField::Timestamp,
    RequestField::Amount,
    RequestField::TerminalId,
    RequestField::OrderId,
    RequestField::OrderDescription,
    RequestField::Language,
    RequestField::ProtocolVersion,
];

/// 1.1 appends the currency code.
const FIELDS_V1_1: &[RequestField] = &[
    RequestField::TransactionCode,
    RequestField::Timestamp,
    RequestField::Amount,
    RequestField::TerminalId,
    RequestField::OrderId,
    RequestField::OrderDescription,
    RequestField::Language,
    RequestField::ProtocolVersion,
    RequestField::Currency,
];

/// 2.0 appends the one-time token after the currency.
const FIELDS_V2_0: &[RequestField] = &[
    RequestField::TransactionCode,
    RequestField::Timestamp,
    RequestField::Amount,
    RequestField::TerminalId,
    RequestField::OrderId,
    RequestField::OrderDescription,
    RequestField::Language,
    RequestField::ProtocolVersion,
    RequestField::Currency,
    RequestField::OneTimeToken,
];

/// Returns the ordered field list for a protocol version.
pub fn request_fields(version: ProtocolVersion) -> &'static [RequestField] {
    match version {
        ProtocolVersion::V1_0 => FIELDS_V1_0,
        ProtocolVersion::V1_1 => FIELDS_V1_1,
        ProtocolVersion::V2_0 => FIELDS_V2_0,
    }
}

/// Total unsigned message length for a protocol version, in bytes.
pub fn message_length(version: ProtocolVersion) -> usize {
    request_fields(version).iter().map(|f| f.width()).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
