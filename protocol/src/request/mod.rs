//! # Outbound Request Module
//!
//! Construction, serialization, and signing of outbound payment messages.
//! Every registration, delayed authorization, and reversal sent to the
//! gateway is represented as a [`Request`].
//!
//! ```text
//! types.rs   — Wire enums (ProtocolVersion, TransactionCode, Currency, Language)
//! builder.rs — Fluent Request builder, field serialization, SignedMessage
//! ```
//!
//! ## Request Lifecycle
//!
//! 1. **Construct** — [`Request::new`] with the injected [`GatewayConfig`].
//! 2. **Populate** — chain the fluent setters for code, amount, order, etc.
//! 3. **Build** — [`Request::build`] serializes the fields in wire order,
//!    signs the concatenation, and returns a [`SignedMessage`].
//! 4. **Submit** — hand the bytes (and [`Request::gateway_endpoint`]) to the
//!    transport layer. Transport is explicitly not this crate's business.
//!
//! ## Setter Policy
//!
//! The enumerated string setters (`language_code` and friends) validate and
//! silently keep the previous value on unsupported input. That is gateway
//! tradition, reproduced here deliberately as a documented no-op — see the
//! policy notes on each setter, and use the enum-typed setters when you want
//! the compiler to do the validating.
//!
//! [`GatewayConfig`]: crate::config::GatewayConfig

pub mod builder;
pub mod types;

pub use builder::{Request, RequestError, SignedMessage};
pub use types::{Currency, Language, ProtocolVersion, TransactionCode, ValueError};
