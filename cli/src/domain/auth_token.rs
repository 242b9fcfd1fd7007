//! Login tokens for the companion service's `control.ashx` endpoint.
//!
//! A token is `base64(nonce ‖ tag ‖ ciphertext)` where the ciphertext is an
//! AES-256-GCM encryption of a small JSON payload naming the user and the
//! current time. The base64 output uses `@` and `$` in place of `+` and `/`
//! so it can be dropped into a query string as-is.
//!
//! Tokens are not cached: each session gets a fresh one because the embedded
//! timestamp is checked by the server.

use std::time::{SystemTime, UNIX_EPOCH};

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::error::ProvisionError;

/// Length of the AES-256 key taken from the front of the shared key.
pub const KEY_LEN: usize = 32;
/// GCM nonce length.
pub const NONCE_LEN: usize = 12;
/// GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// Fully-qualified user id as the companion service spells it.
#[must_use]
pub fn format_user_id(user: &str, domain: &str) -> String {
    format!("user/{domain}/{user}")
}

/// Decode the hex shared key and keep the first [`KEY_LEN`] bytes.
///
/// # Errors
///
/// `InvalidKey` if the input is not hex or decodes to fewer than 32 bytes.
pub fn parse_shared_key(shared_key_hex: &str) -> Result<[u8; KEY_LEN], ProvisionError> {
    let bytes = hex::decode(shared_key_hex.trim())
        .map_err(|e| ProvisionError::InvalidKey(format!("not hex: {e}")))?;
    bytes
        .get(..KEY_LEN)
        .and_then(|k| <[u8; KEY_LEN]>::try_from(k).ok())
        .ok_or_else(|| {
            ProvisionError::InvalidKey(format!(
                "key length must be at least {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })
}

/// Derive a fresh token for `user` in `domain` using the current time and a
/// random nonce.
///
/// The key is validated before the random source is touched.
///
/// # Errors
///
/// `InvalidKey` for a bad shared key, `Crypto` if the OS random source or the
/// cipher fails.
pub fn derive_token(user: &str, domain: &str, shared_key_hex: &str) -> Result<String, ProvisionError> {
    let key = parse_shared_key(shared_key_hex)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| ProvisionError::Crypto(format!("random source: {e}")))?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ProvisionError::Crypto(format!("system clock before epoch: {e}")))?
        .as_secs();

    seal_token(user, domain, &key, now, &nonce)
}

/// Build the token for an explicit timestamp and nonce.
///
/// # Errors
///
/// `Crypto` if the cipher rejects the key or the payload.
pub fn seal_token(
    user: &str,
    domain: &str,
    key: &[u8; KEY_LEN],
    unix_time: u64,
    nonce: &[u8; NONCE_LEN],
) -> Result<String, ProvisionError> {
    let payload = serde_json::json!({
        "userid": format_user_id(user, domain),
        "domainid": domain,
        "time": unix_time,
    });
    let mut buffer = serde_json::to_vec(&payload)
        .map_err(|e| ProvisionError::Crypto(format!("payload encoding: {e}")))?;

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| ProvisionError::Crypto(format!("cipher init: {e}")))?;
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        .map_err(|e| ProvisionError::Crypto(format!("seal: {e}")))?;

    let mut data = Vec::with_capacity(NONCE_LEN + TAG_LEN + buffer.len());
    data.extend_from_slice(nonce);
    data.extend_from_slice(&tag);
    data.extend_from_slice(&buffer);

    Ok(to_url_alphabet(&STANDARD.encode(data)))
}

/// Swap the standard base64 symbols for the companion service's `@`/`$`.
#[must_use]
pub fn to_url_alphabet(encoded: &str) -> String {
    encoded.replace('/', "$").replace('+', "@")
}

/// Inverse of [`to_url_alphabet`].
#[must_use]
pub fn from_url_alphabet(token: &str) -> String {
    token.replace('$', "/").replace('@', "+")
}
