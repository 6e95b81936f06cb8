//! Paybox message authentication.
//!
//! Outgoing forms are signed with HMAC-SHA512 using the merchant's secret;
//! incoming IPN notifications are signed by Paybox with SHA1withRSA.

use crate::error::{GatewayError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rsa::RsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use sha1::Sha1;
use sha2::Sha512;
use thiserror::Error;

type HmacSha512 = Hmac<Sha512>;

/// Uppercase hex HMAC-SHA512 of `message`, keyed with the hex-encoded
/// merchant secret.
pub fn compute_hmac(secret_hex: &str, message: &str) -> Result<String> {
    let key = hex::decode(secret_hex.trim()).map_err(|e| {
        GatewayError::ConfigurationError(format!("Paybox secret is not valid hex: {e}"))
    })?;
    let mut mac = HmacSha512::new_from_slice(&key)
        .map_err(|e| GatewayError::ConfigurationError(format!("Invalid Paybox secret: {e}")))?;
    mac.update(message.as_bytes());
    Ok(hex::encode_upper(mac.finalize().into_bytes()))
}

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("invalid public key: {0}")]
    InvalidKey(String),
    #[error("signature is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("malformed signature: {0}")]
    Malformed(String),
    #[error("signature does not match message")]
    Mismatch,
}

/// Checks a base64 SHA1withRSA `signature` of `message` against a PEM
/// encoded (SubjectPublicKeyInfo) RSA public key.
pub fn verify_signature(
    public_key_pem: &str,
    message: &str,
    signature: &str,
) -> std::result::Result<(), SignatureError> {
    let public_key = RsaPublicKey::from_public_key_pem(public_key_pem.trim())
        .map_err(|e| SignatureError::InvalidKey(e.to_string()))?;
    let bytes = STANDARD.decode(signature.trim())?;
    let signature = Signature::try_from(bytes.as_slice())
        .map_err(|e| SignatureError::Malformed(e.to_string()))?;

    VerifyingKey::<Sha1>::new(public_key)
        .verify(message.as_bytes(), &signature)
        .map_err(|_| SignatureError::Mismatch)
}
