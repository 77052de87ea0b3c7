// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! IV-prefixed cipher payload

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::BLOCK_SIZE;
use crate::error::{Error, Result};

/// Cipher output as it travels: the IV followed by the ciphertext
///
/// Always at least one block long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherPayload {
    bytes: Vec<u8>,
}

impl CipherPayload {
    /// Join an IV and a ciphertext
    pub fn new(iv: [u8; BLOCK_SIZE], ciphertext: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        bytes.extend_from_slice(&iv);
        bytes.extend_from_slice(ciphertext);
        Self { bytes }
    }

    /// Wrap raw bytes, rejecting anything shorter than one block
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < BLOCK_SIZE {
            return Err(Error::crypto(format!(
                "payload is {} bytes, shorter than the {}-byte IV",
                bytes.len(),
                BLOCK_SIZE
            )));
        }
        Ok(Self { bytes })
    }

    /// Decode a base64 payload
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::crypto(format!("invalid base64: {}", e)))?;
        Self::from_bytes(bytes)
    }

    /// Encode for transport
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// The initialization vector
    pub fn iv(&self) -> &[u8] {
        &self.bytes[..BLOCK_SIZE]
    }

    /// Everything after the IV
    pub fn ciphertext(&self) -> &[u8] {
        &self.bytes[BLOCK_SIZE..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_iv_and_ciphertext() {
        let payload = CipherPayload::new([7u8; BLOCK_SIZE], &[1, 2, 3]);
        assert_eq!(payload.iv(), &[7u8; BLOCK_SIZE]);
        assert_eq!(payload.ciphertext(), &[1, 2, 3]);
        assert_eq!(payload.len(), BLOCK_SIZE + 3);
    }

    #[test]
    fn test_short_payload_rejected() {
        let err = CipherPayload::from_bytes(vec![0u8; BLOCK_SIZE - 1]).unwrap_err();
        assert!(err.is_crypto());

        let encoded = STANDARD.encode([0u8; 4]);
        assert!(CipherPayload::from_base64(&encoded).unwrap_err().is_crypto());
    }

    #[test]
    fn test_bad_base64_rejected() {
        let err = CipherPayload::from_base64("not*base64!").unwrap_err();
        assert!(err.is_crypto());
    }

    #[test]
    fn test_base64_preserves_bytes() {
        let payload = CipherPayload::new([9u8; BLOCK_SIZE], &[0xff; BLOCK_SIZE]);
        let decoded = CipherPayload::from_base64(&payload.to_base64()).unwrap();
        assert_eq!(decoded, payload);
    }
}
