//! Key and certificate material with per-call scoped loading.
//!
//! A `PrivateKeyMaterial` or `CertificateMaterial` is a *description* of
//! where key bytes live, not the key itself. The actual PEM is read and
//! parsed inside each `load()` call and dropped when the caller is done —
//! repeated signing operations re-read the file every time, exactly like
//! the gateway integration guides assume.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use thiserror::Error;
use tracing::debug;
use x509_cert::der::{DecodePem, Encode};
use x509_cert::Certificate;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors loading key material.
///
/// These are intentionally vague about *why* parsing failed — error
/// messages that describe key material in detail have a way of ending up
/// in log aggregators.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The underlying file could not be read.
    #[error("failed to read key material: {0}")]
    Io(#[from] std::io::Error),

    /// The private key PEM did not parse, or the passphrase was wrong.
    #[error("private key rejected: not a parseable RSA key or wrong passphrase")]
    InvalidPrivateKey,

    /// The certificate (or public key) PEM did not parse as RSA material.
    #[error("certificate rejected: not a parseable X.509 certificate or RSA public key")]
    InvalidCertificate,
}

// ---------------------------------------------------------------------------
// KeySource
// ---------------------------------------------------------------------------

/// Where a piece of PEM material comes from.
///
/// `File` is the production arrangement; `Inline` exists so tests and
/// secret-manager integrations can hand the PEM over directly without a
/// round-trip through the filesystem.
#[derive(Clone)]
pub enum KeySource {
    /// Read the PEM from disk on every load. Open, read, close — no
    /// retained handle.
    File(PathBuf),
    /// The PEM text itself.
    Inline(String),
}

impl KeySource {
    /// Reads the PEM text. The file handle, if any, lives only inside
    /// this call.
    fn read(&self) -> Result<String, KeyError> {
        match self {
            Self::File(path) => {
                let pem = fs::read_to_string(path)?;
                debug!(path = %path.display(), "read key material from disk");
                Ok(pem)
            }
            Self::Inline(pem) => Ok(pem.clone()),
        }
    }
}

// Inline PEM never goes through Debug output. Private keys in a log file
// are a breach, not a diagnostic.
impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Inline(_) => f.write_str("Inline(<redacted>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// PrivateKeyMaterial
// ---------------------------------------------------------------------------

/// The merchant's signing key: a PEM source plus an optional passphrase.
///
/// Accepted framings: encrypted PKCS#8 (`ENCRYPTED PRIVATE KEY`, decrypted
/// with the passphrase), plain PKCS#8 (`PRIVATE KEY`), and traditional
/// PKCS#1 (`RSA PRIVATE KEY`) — gateway-issued keys show up in all three.
#[derive(Clone)]
pub struct PrivateKeyMaterial {
    source: KeySource,
    passphrase: Option<String>,
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyMaterial")
            .field("source", &self.source)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl PrivateKeyMaterial {
    /// Key material backed by a PEM file on disk.
    pub fn from_file(path: impl Into<PathBuf>, passphrase: Option<String>) -> Self {
        Self {
            source: KeySource::File(path.into()),
            passphrase,
        }
    }

    /// Key material supplied directly as PEM text.
    pub fn from_pem(pem: impl Into<String>, passphrase: Option<String>) -> Self {
        Self {
            source: KeySource::Inline(pem.into()),
            passphrase,
        }
    }

    /// Loads and parses the RSA private key. Called once per signing
    /// operation; the parsed key is dropped with the caller's scope.
    ///
    /// A passphrase is applied if the PEM is encrypted and ignored if it
    /// is not, mirroring how the reference OpenSSL tooling behaves.
    pub fn load(&self) -> Result<RsaPrivateKey, KeyError> {
        let pem = self.source.read()?;

        if let Some(pass) = &self.passphrase {
            if let Ok(key) = RsaPrivateKey::from_pkcs8_encrypted_pem(&pem, pass.as_bytes()) {
                return Ok(key);
            }
        }
        if let Ok(key) = RsaPrivateKey::from_pkcs8_pem(&pem) {
            return Ok(key);
        }
        RsaPrivateKey::from_pkcs1_pem(&pem).map_err(|_| KeyError::InvalidPrivateKey)
    }
}

// ---------------------------------------------------------------------------
// CertificateMaterial
// ---------------------------------------------------------------------------

/// The gateway's public certificate, used to verify response signatures.
///
/// Accepts the X.509 certificate PEM the gateway distributes, or a bare
/// SPKI public-key PEM (`PUBLIC KEY`) — the latter keeps round-trip tests
/// honest without minting certificates.
#[derive(Debug, Clone)]
pub struct CertificateMaterial {
    source: KeySource,
}

impl CertificateMaterial {
    /// Certificate backed by a PEM file on disk.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: KeySource::File(path.into()),
        }
    }

    /// Certificate supplied directly as PEM text.
    pub fn from_pem(pem: impl Into<String>) -> Self {
        Self {
            source: KeySource::Inline(pem.into()),
        }
    }

    /// Loads the certificate and extracts its RSA public key. Called once
    /// per verification; nothing is cached.
    pub fn load(&self) -> Result<RsaPublicKey, KeyError> {
        let pem = self.source.read()?;

        if pem.contains("BEGIN CERTIFICATE") {
            let cert = Certificate::from_pem(pem.as_bytes())
                .map_err(|_| KeyError::InvalidCertificate)?;
            let spki = cert
                .tbs_certificate
                .subject_public_key_info
                .to_der()
                .map_err(|_| KeyError::InvalidCertificate)?;
            return RsaPublicKey::from_public_key_der(&spki)
                .map_err(|_| KeyError::InvalidCertificate);
        }

        RsaPublicKey::from_public_key_pem(&pem).map_err(|_| KeyError::InvalidCertificate)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
