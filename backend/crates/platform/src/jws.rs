//! Compact HS256 Signed Tokens
//!
//! Encodes a JSON claim set as `base64url(header).base64url(claims).base64url(mac)`
//! where `mac = HMAC-SHA256(secret, "<header>.<claims>")`.
//!
//! Only `HS256` is ever produced or accepted. A token whose header names any
//! other algorithm (`none`, `HS384`, `RS256`, ...) is rejected before its
//! signature is looked at.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

/// The single accepted signing algorithm
pub const ALGORITHM: &str = "HS256";

const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Error)]
pub enum JwsError {
    /// Not three base64url segments, or a segment failed to decode
    #[error("Malformed token")]
    Malformed,

    /// Header names an algorithm other than HS256
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match the header and claims
    #[error("Signature verification failed")]
    BadSignature,

    /// Claims are not valid JSON for the requested type
    #[error("Invalid claims: {0}")]
    InvalidClaims(#[source] serde_json::Error),

    /// Claims could not be serialized
    #[error("Failed to encode claims: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid signing key")]
    InvalidKey,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

/// Sign `claims` with `secret`
pub fn sign<C: Serialize>(claims: &C, secret: &[u8]) -> Result<String, JwsError> {
    let header = Header {
        alg: ALGORITHM.to_string(),
        typ: Some(TOKEN_TYPE.to_string()),
    };

    let header_json = serde_json::to_vec(&header).map_err(JwsError::Encode)?;
    let claims_json = serde_json::to_vec(claims).map_err(JwsError::Encode)?;

    let signing_input = format!(
        "{}.{}",
        to_base64url(&header_json),
        to_base64url(&claims_json)
    );
    let signature =
        hmac_sha256(secret, signing_input.as_bytes()).map_err(|_| JwsError::InvalidKey)?;

    Ok(format!("{}.{}", signing_input, to_base64url(&signature)))
}

/// Verify `token` against `secret` and decode its claims
///
/// Checks run in this order: shape, header algorithm, signature, claims JSON.
/// Claim semantics (issuer, expiry, ...) are the caller's business.
pub fn verify<C: DeserializeOwned>(token: &str, secret: &[u8]) -> Result<C, JwsError> {
    let mut segments = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwsError::Malformed);
    };

    let header_json = from_base64url(header_b64).map_err(|_| JwsError::Malformed)?;
    let header: Header = serde_json::from_slice(&header_json).map_err(|_| JwsError::Malformed)?;
    if header.alg != ALGORITHM {
        return Err(JwsError::UnsupportedAlgorithm(header.alg));
    }

    let signature = from_base64url(signature_b64).map_err(|_| JwsError::Malformed)?;
    // Signing input is the exact bytes received, not a re-encoding
    let signing_input_len = header_b64.len() + 1 + claims_b64.len();
    let signing_input = &token.as_bytes()[..signing_input_len];
    let valid =
        verify_hmac_sha256(secret, signing_input, &signature).map_err(|_| JwsError::InvalidKey)?;
    if !valid {
        return Err(JwsError::BadSignature);
    }

    let claims_json = from_base64url(claims_b64).map_err(|_| JwsError::Malformed)?;
    serde_json::from_slice(&claims_json).map_err(JwsError::InvalidClaims)
}
