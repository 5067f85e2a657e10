//! # Fixed-Width Field Codec
//!
//! The byte-exact core of the protocol. Everything the gateway reads is a
//! fixed-width ASCII field at a known position; everything we send must be
//! padded and truncated to the exact same grid.
//!
//! ```text
//! fixed.rs  — encode/decode primitives (truncate-then-pad, offset slicing)
//! layout.rs — the ordered, version-dependent field list for requests
//! ```
//!
//! The layout is a pure function of the protocol version. Adding a future
//! version means adding one field list in `layout.rs` — serialization code
//! never branches on versions directly.

pub mod fixed;
pub mod layout;

pub use fixed::{decode_field, encode_amount, encode_fixed, Alignment};
pub use layout::{message_length, request_fields, RequestField};
