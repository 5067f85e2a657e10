// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # BORICA Protocol — Core Codec Library
//!
//! Byte-exact codec for the BORICA ePay gateway's fixed-width, RSA-signed
//! messaging protocol. Outbound payment-authorization messages are assembled
//! field by field, concatenated in a version-dependent order, and signed;
//! inbound gateway responses are base64-decoded, sliced at fixed offsets,
//! and checked against the gateway's public certificate.
//!
//! The protocol itself is unforgiving: every field has a fixed width, the
//! concatenation order is part of the signature input, and a single byte out
//! of place means the gateway rejects the payment (or worse, authorizes the
//! wrong one). This library exists so that exactly one place in your stack
//! has to get those bytes right.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the two directions of the
//! message flow:
//!
//! - **codec** — Fixed-width encode/decode primitives and the per-version
//!   field layout. The byte-exact heart of the crate.
//! - **request** — Typed wire enums and the fluent [`request::Request`]
//!   builder that assembles, serializes, and signs outbound messages.
//! - **crypto** — Key material with scoped per-call file reads, RSA
//!   signing, and certificate-based verification.
//! - **response** — Offset-based parser for inbound gateway messages with
//!   a signature verdict.
//! - **config** — Gateway endpoints, wire-format constants, and the
//!   configuration values the embedding application injects.
//!
//! ## What this crate does NOT do
//!
//! Transport. The gateway speaks HTTP, but submitting the built message and
//! receiving the callback are the embedding application's job. This crate
//! hands you bytes and takes bytes back; everything in between is yours.
//!
//! ## Design Philosophy
//!
//! 1. The wire format is the contract. Reproduce it exactly, byte for byte.
//! 2. Key material is read inside the call that needs it and released
//!    immediately. No ambient caching, no hidden global state.
//! 3. A bad signature on a response is a verdict, not an exception — the
//!    caller decides whether to trust an unverified message.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod request;
pub mod response;
