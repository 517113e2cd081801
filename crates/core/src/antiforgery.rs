//! Anti-forgery token primitives.
//!
//! Tokens use the double-submit pattern: the same value is handed to the
//! browser as a cookie and must be echoed back in a request header on every
//! state-mutating request. A token is `<nonce>.<signature>` where the nonce
//! is 16 random bytes and the signature is HMAC-SHA256 over the nonce, both
//! hex-encoded, so a forged cookie without the server secret is rejected.

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Cookie that carries the token issued to the browser.
pub const COOKIE_NAME: &str = "projecthub_antiforgery";

/// Request header that must echo the cookie value.
pub const HEADER_NAME: &str = "x-csrf-token";

/// Length of the random nonce in bytes.
pub const NONCE_LENGTH: usize = 16;

/// Length of a generated signing secret in bytes.
pub const SECRET_LENGTH: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Generate a random signing secret for processes started without one.
pub fn generate_secret() -> Vec<u8> {
    let secret: [u8; SECRET_LENGTH] = rand::random();
    secret.to_vec()
}

/// Issue a new signed token.
pub fn issue_token(secret: &[u8]) -> String {
    let nonce: [u8; NONCE_LENGTH] = rand::random();
    let signature = sign(secret, &nonce).finalize().into_bytes();
    format!("{}.{}", hex::encode(nonce), hex::encode(signature))
}

/// Check that `token` was issued with `secret`.
pub fn verify_token(secret: &[u8], token: &str) -> bool {
    let Some((nonce_hex, signature_hex)) = token.split_once('.') else {
        return false;
    };
    let (Some(nonce), Some(signature)) = (hex::decode(nonce_hex), hex::decode(signature_hex))
    else {
        return false;
    };
    if nonce.len() != NONCE_LENGTH {
        return false;
    }
    sign(secret, &nonce).verify_slice(&signature).is_ok()
}

/// Validate a double-submitted token pair: the header must match the cookie
/// and the cookie must carry a valid signature.
pub fn verify_pair(secret: &[u8], cookie: &str, header: &str) -> bool {
    cookie == header && verify_token(secret, cookie)
}

fn sign(secret: &[u8], nonce: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(nonce);
    mac
}

// ---------------------------------------------------------------------------
// hex encoding
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string; `None` on odd length or non-hex characters.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn issued_token_verifies() {
        let token = issue_token(SECRET);
        assert!(verify_token(SECRET, &token));
    }

    #[test]
    fn token_has_nonce_and_signature() {
        let token = issue_token(SECRET);
        let (nonce, signature) = token.split_once('.').unwrap();
        assert_eq!(nonce.len(), NONCE_LENGTH * 2);
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(issue_token(SECRET), issue_token(SECRET));
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = issue_token(SECRET);
        assert!(!verify_token(b"another-secret", &token));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = issue_token(SECRET);
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_token(SECRET, &tampered));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(!verify_token(SECRET, ""));
        assert!(!verify_token(SECRET, "no-dot"));
        assert!(!verify_token(SECRET, "zz.zz"));
        assert!(!verify_token(SECRET, "abc.def"));
    }

    #[test]
    fn pair_requires_matching_values() {
        let a = issue_token(SECRET);
        let b = issue_token(SECRET);
        assert!(verify_pair(SECRET, &a, &a));
        assert!(!verify_pair(SECRET, &a, &b));
    }

    #[test]
    fn hex_round_trip() {
        let bytes = [0u8, 15, 16, 255];
        assert_eq!(hex::decode(&hex::encode(bytes)), Some(bytes.to_vec()));
        assert_eq!(hex::decode("abc"), None);
    }

    #[test]
    fn generated_secret_has_expected_length() {
        assert_eq!(generate_secret().len(), SECRET_LENGTH);
    }
}
