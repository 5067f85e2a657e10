//! # Key Material & RSA Signing
//!
//! The gateway's trust model is 2000s PKI: merchants sign outbound messages
//! with an RSA private key (PKCS#1 v1.5 over SHA-1 — the gateway's choice,
//! not ours), and verify inbound messages against an X.509 certificate the
//! gateway publishes.
//!
//! ```text
//! material.rs — key/certificate sources, loaded fresh on every call
//! signing.rs  — sign_message / verify_message over exact byte sequences
//! ```
//!
//! ## Scoped acquisition
//!
//! Key files are opened, read fully, and released inside the call that
//! needs them. Nothing is cached between calls, so independent sign and
//! verify operations stay independent — and tests can substitute in-memory
//! PEM sources without touching the filesystem.

pub mod material;
pub mod signing;

pub use material::{CertificateMaterial, KeyError, KeySource, PrivateKeyMaterial};
pub use signing::{sign_message, verify_message, SigningError};
