//! Wire enums for outbound requests.
//!
//! These types are the vocabulary of the protocol: every value that appears
//! in a fixed-width field as an enumerated code is a real enum here, so an
//! invalid code is unrepresentable once it crosses the string boundary.
//! The string boundary itself (`FromStr`) is where the gateway's enumerated
//! sets are enforced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An input value outside one of the protocol's enumerated sets.
///
/// The fluent builder converts these into keep-previous no-ops; strict
/// callers can use the `FromStr` implementations directly and propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("invalid protocol version: {0}")]
    InvalidProtocolVersion(String),

    #[error("unknown transaction code: {0}")]
    UnknownTransactionCode(String),

    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

// ---------------------------------------------------------------------------
// ProtocolVersion
// ---------------------------------------------------------------------------

/// Protocol revision spoken with the gateway.
///
/// The version governs the field layout of the outbound message: 1.0
/// predates the currency field, and only 2.0 carries the one-time token.
/// See [`crate::codec::layout`] for the exact per-version grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// The original layout, BGN-only.
    V1_0,
    /// Adds the explicit currency field. The default for new integrations.
    V1_1,
    /// Adds the one-time token issued during cardholder enrollment.
    V2_0,
}

impl ProtocolVersion {
    /// The 3-character wire rendering (`"1.0"`, `"1.1"`, `"2.0"`).
    pub fn wire(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V2_0 => "2.0",
        }
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V1_1
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire())
    }
}

impl FromStr for ProtocolVersion {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.0" => Ok(Self::V1_0),
            "1.1" => Ok(Self::V1_1),
            "2.0" => Ok(Self::V2_0),
            other => Err(ValueError::InvalidProtocolVersion(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionCode
// ---------------------------------------------------------------------------

/// The operation an outbound message requests from the gateway.
///
/// The two-digit wire codes are fixed by the gateway's specification; a
/// request carries exactly one of them in its first field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCode {
    /// `10` — immediate payment authorization.
    RegisterTransaction,
    /// `11` — profit (winnings) payout to the cardholder.
    PayProfit,
    /// `21` — first leg of a delayed authorization (hold funds).
    DelayedAuthorizationRequest,
    /// `22` — capture a previously held authorization.
    DelayedAuthorizationComplete,
    /// `23` — release a previously held authorization.
    DelayedAuthorizationReversal,
    /// `40` — reversal of a completed payment.
    Reversal,
    /// `41` — reversal of a profit payout.
    PayedProfitReversal,
}

impl TransactionCode {
    /// Numeric gateway code.
    pub fn code(self) -> u8 {
        match self {
            Self::RegisterTransaction => 10,
            Self::PayProfit => 11,
            Self::DelayedAuthorizationRequest => 21,
            Self::DelayedAuthorizationComplete => 22,
            Self::DelayedAuthorizationReversal => 23,
            Self::Reversal => 40,
            Self::PayedProfitReversal => 41,
        }
    }

    /// The 2-digit wire rendering.
    pub fn wire(self) -> &'static str {
        match self {
            Self::RegisterTransaction => "10",
            Self::PayProfit => "11",
            Self::DelayedAuthorizationRequest => "21",
            Self::DelayedAuthorizationComplete => "22",
            Self::DelayedAuthorizationReversal => "23",
            Self::Reversal => "40",
            Self::PayedProfitReversal => "41",
        }
    }

    /// Operation name as the gateway documentation spells it.
    pub fn name(self) -> &'static str {
        match self {
            Self::RegisterTransaction => "registerTransaction",
            Self::PayProfit => "payProfit",
            Self::DelayedAuthorizationRequest => "delayedAuthorizationRequest",
            Self::DelayedAuthorizationComplete => "delayedAuthorizationComplete",
            Self::DelayedAuthorizationReversal => "delayedAuthorizationReversal",
            Self::Reversal => "reversal",
            Self::PayedProfitReversal => "payedProfitReversal",
        }
    }

    /// Looks up a numeric gateway code.
    pub fn from_code(code: u8) -> Result<Self, ValueError> {
        match code {
            10 => Ok(Self::RegisterTransaction),
            11 => Ok(Self::PayProfit),
            21 => Ok(Self::DelayedAuthorizationRequest),
            22 => Ok(Self::DelayedAuthorizationComplete),
            23 => Ok(Self::DelayedAuthorizationReversal),
            40 => Ok(Self::Reversal),
            41 => Ok(Self::PayedProfitReversal),
            other => Err(ValueError::UnknownTransactionCode(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransactionCode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: u8 = s
            .parse()
            .map_err(|_| ValueError::UnknownTransactionCode(s.to_string()))?;
        Self::from_code(code)
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Currencies the gateway settles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Bulgarian Lev — the default, and the only option under protocol 1.0.
    BGN,
    /// United States Dollar.
    USD,
    /// Euro.
    EUR,
}

impl Default for Currency {
    fn default() -> Self {
        Self::BGN
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BGN => write!(f, "BGN"),
            Self::USD => write!(f, "USD"),
            Self::EUR => write!(f, "EUR"),
        }
    }
}

impl FromStr for Currency {
    type Err = ValueError;

    /// Case-insensitive, matching the gateway's tolerant input handling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BGN" => Ok(Self::BGN),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            _ => Err(ValueError::UnsupportedCurrency(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Cardholder-facing language for the gateway's payment pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Bulgarian. The default.
    BG,
    /// English.
    EN,
}

impl Default for Language {
    fn default() -> Self {
        Self::BG
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BG => write!(f, "BG"),
            Self::EN => write!(f, "EN"),
        }
    }
}

impl FromStr for Language {
    type Err = ValueError;

    /// Case-insensitive, matching the gateway's tolerant input handling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BG" => Ok(Self::BG),
            "EN" => Ok(Self::EN),
            _ => Err(ValueError::UnsupportedLanguage(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_version_wire_strings() {
        assert_eq!(ProtocolVersion::V1_0.to_string(), "1.0");
        assert_eq!(ProtocolVersion::V1_1.to_string(), "1.1");
        assert_eq!(ProtocolVersion::V2_0.to_string(), "2.0");
    }

    #[test]
    fn protocol_version_default_is_1_1() {
        assert_eq!(ProtocolVersion::default(), ProtocolVersion::V1_1);
    }

    #[test]
    fn protocol_version_rejects_unknown() {
        assert_eq!(
            "3.0".parse::<ProtocolVersion>(),
            Err(ValueError::InvalidProtocolVersion("3.0".to_string()))
        );
    }

    #[test]
    fn transaction_code_round_trips_through_numeric_code() {
        for tc in [
            TransactionCode::RegisterTransaction,
            TransactionCode::PayProfit,
            TransactionCode::DelayedAuthorizationRequest,
            TransactionCode::DelayedAuthorizationComplete,
            TransactionCode::DelayedAuthorizationReversal,
            TransactionCode::Reversal,
            TransactionCode::PayedProfitReversal,
        ] {
            assert_eq!(TransactionCode::from_code(tc.code()), Ok(tc));
            assert_eq!(tc.wire().parse::<TransactionCode>(), Ok(tc));
        }
    }

    #[test]
    fn transaction_code_wire_is_two_digits() {
        assert_eq!(TransactionCode::RegisterTransaction.wire(), "10");
        assert_eq!(TransactionCode::Reversal.wire(), "40");
        assert_eq!(TransactionCode::Reversal.wire().len(), 2);
    }

    #[test]
    fn transaction_code_rejects_unmapped() {
        assert!(TransactionCode::from_code(12).is_err());
        assert!("99".parse::<TransactionCode>().is_err());
        assert!("banana".parse::<TransactionCode>().is_err());
    }

    #[test]
    fn currency_parse_is_case_insensitive() {
        assert_eq!("bgn".parse::<Currency>(), Ok(Currency::BGN));
        assert_eq!("Usd".parse::<Currency>(), Ok(Currency::USD));
        assert_eq!(
            "GBP".parse::<Currency>(),
            Err(ValueError::UnsupportedCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn language_parse_is_case_insensitive() {
        assert_eq!("bg".parse::<Language>(), Ok(Language::BG));
        assert_eq!("En".parse::<Language>(), Ok(Language::EN));
        assert_eq!(
            "FR".parse::<Language>(),
            Err(ValueError::UnsupportedLanguage("FR".to_string()))
        );
    }

    #[test]
    fn defaults_match_gateway_defaults() {
        assert_eq!(Currency::default(), Currency::BGN);
        assert_eq!(Language::default(), Language::BG);
    }

    #[test]
    fn wire_enum_serde_roundtrip() {
        let version = ProtocolVersion::V2_0;
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(serde_json::from_str::<ProtocolVersion>(&json).unwrap(), version);

        let code = TransactionCode::DelayedAuthorizationComplete;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(serde_json::from_str::<TransactionCode>(&json).unwrap(), code);
    }
}
