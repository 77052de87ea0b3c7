// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! AES-256-CBC engine keyed by a SHA-256 passphrase digest

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use super::payload::CipherPayload;
use super::{BLOCK_SIZE, KEY_SIZE};
use crate::error::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Derive the AES key from a passphrase
///
/// Plain SHA-256 of the UTF-8 bytes: no salt, no stretching. The passphrase is
/// the whole secret.
pub fn derive_key(passphrase: &str) -> [u8; KEY_SIZE] {
    Sha256::digest(passphrase.as_bytes()).into()
}

/// Encrypt `plaintext` under `passphrase`, returning `base64(IV || ciphertext)`
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    CryptoEngine::new(passphrase).encrypt(plaintext)
}

/// Decrypt a base64 payload produced by [`encrypt`]
pub fn decrypt(payload: &str, passphrase: &str) -> Result<String> {
    CryptoEngine::new(passphrase).decrypt(payload)
}

/// Cipher bound to one derived key
#[derive(Clone)]
pub struct CryptoEngine {
    key: [u8; KEY_SIZE],
}

impl std::fmt::Debug for CryptoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoEngine").finish_non_exhaustive()
    }
}

impl CryptoEngine {
    /// Create an engine for a passphrase
    pub fn new(passphrase: &str) -> Self {
        Self {
            key: derive_key(passphrase),
        }
    }

    /// Encrypt to the base64 wire format
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        Ok(self.encrypt_payload(plaintext)?.to_base64())
    }

    /// Encrypt with a fresh random IV
    pub fn encrypt_payload(&self, plaintext: &str) -> Result<CipherPayload> {
        let mut iv = [0u8; BLOCK_SIZE];
        OsRng
            .try_fill_bytes(&mut iv)
            .map_err(|e| Error::crypto(format!("random source unavailable: {}", e)))?;
        self.encrypt_with_iv(plaintext, iv)
    }

    /// Encrypt with a caller-chosen IV
    pub fn encrypt_with_iv(&self, plaintext: &str, iv: [u8; BLOCK_SIZE]) -> Result<CipherPayload> {
        let cipher = Aes256CbcEnc::new_from_slices(&self.key, &iv)
            .map_err(|e| Error::crypto(format!("cipher init failed: {}", e)))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(CipherPayload::new(iv, &ciphertext))
    }

    /// Decrypt the base64 wire format
    pub fn decrypt(&self, payload: &str) -> Result<String> {
        self.decrypt_payload(&CipherPayload::from_base64(payload)?)
    }

    /// Decrypt an already decoded payload
    pub fn decrypt_payload(&self, payload: &CipherPayload) -> Result<String> {
        let ciphertext = payload.ciphertext();
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::crypto(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        let cipher = Aes256CbcDec::new_from_slices(&self.key, payload.iv())
            .map_err(|e| Error::crypto(format!("cipher init failed: {}", e)))?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::crypto("bad padding"))?;

        String::from_utf8(plaintext)
            .map_err(|e| Error::crypto(format!("plaintext is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "tenant/app+AA:BB:CC:DD:EE:FF";

    #[test]
    fn test_key_derivation_is_sha256() {
        // sha256("abc")
        let key = derive_key("abc");
        assert_eq!(key[0], 0xba);
        assert_eq!(key[1], 0x78);
        assert_eq!(key[31], 0xad);
        assert_eq!(derive_key("abc"), key);
        assert_ne!(derive_key("abd"), key);
    }

    #[test]
    fn test_round_trip() {
        for plaintext in [
            "",
            "hello",
            "exactly sixteen!",
            "{\"relay\":1,\"channel\":\"A140\"}",
            "房客 App API 測試工具",
            "emoji 🔌⚡",
        ] {
            let encrypted = encrypt(plaintext, SEED).unwrap();
            assert_eq!(decrypt(&encrypted, SEED).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_payload_layout() {
        let engine = CryptoEngine::new(SEED);
        let payload = engine.encrypt_payload("exactly sixteen!").unwrap();

        // one IV block plus the plaintext block plus a full padding block
        assert_eq!(payload.len(), BLOCK_SIZE * 3);
        assert_eq!(payload.ciphertext().len() % BLOCK_SIZE, 0);
    }

    #[test]
    fn test_fresh_iv_each_time() {
        let engine = CryptoEngine::new(SEED);
        let a = engine.encrypt("same text").unwrap();
        let b = engine.encrypt("same text").unwrap();
        assert_ne!(a, b);
        assert_eq!(engine.decrypt(&a).unwrap(), engine.decrypt(&b).unwrap());
    }

    #[test]
    fn test_fixed_iv_is_deterministic() {
        let engine = CryptoEngine::new(SEED);
        let a = engine.encrypt_with_iv("payload", [3u8; BLOCK_SIZE]).unwrap();
        let b = engine.encrypt_with_iv("payload", [3u8; BLOCK_SIZE]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tampered_ciphertext_never_returns_original() {
        let engine = CryptoEngine::new(SEED);
        let original = "a message spanning more than a single AES block";
        let payload = engine.encrypt_payload(original).unwrap();

        for index in BLOCK_SIZE..payload.len() {
            let mut bytes = payload.as_bytes().to_vec();
            bytes[index] ^= 0x01;
            let tampered = CipherPayload::from_bytes(bytes).unwrap();
            match engine.decrypt_payload(&tampered) {
                Ok(text) => assert_ne!(text, original),
                Err(e) => assert!(e.is_crypto()),
            }
        }
    }

    #[test]
    fn test_wrong_passphrase_never_returns_original() {
        let encrypted = encrypt("secret relay command", SEED).unwrap();
        match decrypt(&encrypted, "another seed") {
            Ok(text) => assert_ne!(text, "secret relay command"),
            Err(e) => assert!(e.is_crypto()),
        }
    }

    #[test]
    fn test_malformed_payloads_fail() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        assert!(decrypt("%%%", SEED).unwrap_err().is_crypto());
        // IV only, no ciphertext
        assert!(decrypt(&STANDARD.encode([0u8; BLOCK_SIZE]), SEED)
            .unwrap_err()
            .is_crypto());
        // ciphertext not block aligned
        assert!(decrypt(&STANDARD.encode([0u8; BLOCK_SIZE + 5]), SEED)
            .unwrap_err()
            .is_crypto());
    }
}
