//! RSA signing and verification over exact byte sequences.
//!
//! The scheme is PKCS#1 v1.5 with SHA-1, because that is what the gateway
//! verifies. Yes, SHA-1. The signature covers the exact bytes handed in —
//! no canonicalization, no re-encoding — so the serialized field
//! concatenation IS the signing input, byte for byte.

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha1::Sha1;
use thiserror::Error;
use tracing::debug;

use super::material::{CertificateMaterial, KeyError, PrivateKeyMaterial};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors producing an outbound signature.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The private key could not be loaded or parsed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The RSA primitive rejected the signing operation.
    #[error("signing failed: {0}")]
    Primitive(String),
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Signs `message` with the merchant's private key.
///
/// The key material is loaded inside this call and dropped before it
/// returns; nothing is cached across invocations. The returned signature
/// is raw binary — for a 1024-bit gateway key, exactly 128 bytes.
pub fn sign_message(
    message: &[u8],
    key: &PrivateKeyMaterial,
) -> Result<Vec<u8>, SigningError> {
    let private_key = key.load()?;
    let signing_key = SigningKey::<Sha1>::new(private_key);
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| SigningError::Primitive(e.to_string()))?;

    let bytes = signature.to_vec();
    debug!(message_len = message.len(), signature_len = bytes.len(), "signed message");
    Ok(bytes)
}

/// Verifies `signature` over `message` against the gateway's certificate.
///
/// A failure to *load* the certificate is an error — the caller cannot
/// make a trust decision without it. A signature that simply does not
/// match is `Ok(false)`: a verdict, not an exception, so the caller
/// explicitly decides what to do with an unverified message.
pub fn verify_message(
    message: &[u8],
    signature: &[u8],
    certificate: &CertificateMaterial,
) -> Result<bool, KeyError> {
    let public_key = certificate.load()?;
    let verifying_key = VerifyingKey::<Sha1>::new(public_key);

    let signature = match Signature::try_from(signature) {
        Ok(sig) => sig,
        // Wrong length or structure: not a signature at all, verdict false.
        Err(_) => return Ok(false),
    };

    Ok(verifying_key.verify(message, &signature).is_ok())
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::OnceLock;

    use rsa::RsaPrivateKey;

    static TEST_KEY: OnceLock<RsaPrivateKey> = OnceLock::new();

    /// A process-wide 1024-bit RSA key — the gateway's key size, so
    /// signatures come out at the protocol's fixed 128 bytes. Generation
    /// is slow enough in debug builds that tests share one key.
    pub(crate) fn test_rsa_key() -> &'static RsaPrivateKey {
        TEST_KEY.get_or_init(|| {
            RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).expect("generate test RSA key")
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
