// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Passphrase-based seed derivation.
//!
//! The watermark carries no encryption; the only secret-derived value is the
//! traversal seed. Deriving it with Argon2id and a fixed salt lets both
//! parties share a passphrase instead of a raw integer, and keeps the seed
//! reproducible on the extracting side.

use argon2::Argon2;
use zeroize::Zeroizing;

/// Fixed salt for traversal seed derivation.
/// Fixed so the extractor can reproduce the seed from the passphrase alone.
const ORDER_SALT: &[u8; 16] = b"wordmark-ordr-v1";

/// Derive the 64-bit traversal seed from a passphrase.
///
/// Deterministic: the same passphrase always yields the same seed.
pub fn derive_order_seed(passphrase: &str) -> u64 {
    let key = derive_order_key(passphrase);
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&key[..8]);
    u64::from_le_bytes(seed)
}

fn derive_order_key(passphrase: &str) -> Zeroizing<[u8; 32]> {
    let mut output = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), ORDER_SALT, &mut *output)
        .expect("Argon2 order seed derivation should not fail");
    output
}
