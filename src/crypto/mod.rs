// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Seeded symmetric encryption for channel payloads
//!
//! AES-256-CBC with PKCS#7 padding. The key is the SHA-256 digest of a
//! passphrase (the "key seed"), and every payload carries its own random IV:
//! the wire format is `base64(IV || ciphertext)`.
//!
//! There is no authentication tag, so a tampered payload is only caught when
//! it breaks the padding or the UTF-8 decoding. Integrity is not verified by
//! this layer.

mod engine;
mod payload;

pub use engine::{decrypt, derive_key, encrypt, CryptoEngine};
pub use payload::CipherPayload;

/// AES block size, and therefore the IV length
pub const BLOCK_SIZE: usize = 16;

/// Derived key length (SHA-256 output, AES-256 key)
pub const KEY_SIZE: usize = 32;
