use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};

use crate::error::ExchangeError;
use crate::models::Signature;

/// Parse a hex private key, with or without the 0x prefix.
pub fn parse_private_key(private_key_hex: &str) -> Result<SigningKey, ExchangeError> {
    let stripped = private_key_hex
        .strip_prefix("0x")
        .unwrap_or(private_key_hex);

    let bytes = hex::decode(stripped)
        .map_err(|e| ExchangeError::Signing(format!("invalid private key hex: {e}")))?;

    SigningKey::from_slice(&bytes)
        .map_err(|e| ExchangeError::Signing(format!("invalid private key: {e}")))
}

/// Sign canonical action bytes: Keccak-256 the payload, produce a recoverable
/// secp256k1 signature, and normalize the recovery id to the Ethereum
/// convention (27/28).
pub fn sign_action_bytes(key: &SigningKey, payload: &[u8]) -> Result<Signature, ExchangeError> {
    let hash = Keccak256::digest(payload);

    let (sig, recovery_id) = key
        .sign_prehash_recoverable(&hash)
        .map_err(|e| ExchangeError::Signing(e.to_string()))?;

    let bytes = sig.to_bytes();
    let mut v = recovery_id.to_byte();
    if v < 27 {
        v += 27;
    }

    Ok(Signature {
        r: format!("0x{}", hex::encode(&bytes[..32])),
        s: format!("0x{}", hex::encode(&bytes[32..])),
        v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::{RecoveryId, VerifyingKey};

    const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn parses_key_with_and_without_prefix() {
        let with = parse_private_key(TEST_KEY).unwrap();
        let without = parse_private_key(&TEST_KEY[2..]).unwrap();
        assert_eq!(with.to_bytes(), without.to_bytes());
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(parse_private_key("0xnothex").is_err());
        assert!(parse_private_key("0x1234").is_err());
    }

    #[test]
    fn signature_components_are_well_formed() {
        let key = parse_private_key(TEST_KEY).unwrap();
        let sig = sign_action_bytes(&key, b"{\"type\":\"order\"}").unwrap();

        // 0x + 32 bytes of hex on each component, Ethereum-normalized v.
        assert_eq!(sig.r.len(), 66);
        assert_eq!(sig.s.len(), 66);
        assert!(sig.r.starts_with("0x"));
        assert!(sig.s.starts_with("0x"));
        assert!(sig.v == 27 || sig.v == 28);
    }

    #[test]
    fn signing_is_deterministic() {
        let key = parse_private_key(TEST_KEY).unwrap();
        let a = sign_action_bytes(&key, b"payload").unwrap();
        let b = sign_action_bytes(&key, b"payload").unwrap();
        assert_eq!(a.r, b.r);
        assert_eq!(a.s, b.s);
        assert_eq!(a.v, b.v);
    }

    #[test]
    fn signature_recovers_to_signing_key() {
        let key = parse_private_key(TEST_KEY).unwrap();
        let payload = b"{\"type\":\"cancel\"}";
        let sig = sign_action_bytes(&key, payload).unwrap();

        let hash = Keccak256::digest(payload);
        let r_bytes = hex::decode(&sig.r[2..]).unwrap();
        let s_bytes = hex::decode(&sig.s[2..]).unwrap();
        let mut raw = [0u8; 64];
        raw[..32].copy_from_slice(&r_bytes);
        raw[32..].copy_from_slice(&s_bytes);

        let parsed = k256::ecdsa::Signature::from_slice(&raw).unwrap();
        let recovery_id = RecoveryId::try_from(sig.v - 27).unwrap();
        let recovered = VerifyingKey::recover_from_prehash(&hash, &parsed, recovery_id).unwrap();

        assert_eq!(recovered, *key.verifying_key());
    }
}
