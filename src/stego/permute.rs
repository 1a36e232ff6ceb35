// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Sentence traversal order.
//!
//! Embedder and extractor must visit sentences in exactly the same order, so
//! the order is a pure function of `(seed, n)`: either the identity or a
//! Fisher-Yates shuffle driven by a ChaCha20 PRNG. The sequence is computed
//! once and consumed as plain data.
//!
//! # Cross-platform portability
//!
//! The shuffle uses `u32` for `gen_range` (not `usize`). `usize` is 32-bit on
//! WASM but 64-bit on native, which makes `rand::Rng::gen_range` consume
//! different amounts of PRNG entropy per step and produce different shuffles.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::stego::crypto;

/// How sentences are visited during embedding and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Document order, `0..n`.
    #[default]
    Sequential,
    /// Seeded pseudo-random permutation of `0..n`.
    Seeded(u64),
}

impl TraversalOrder {
    /// Seeded order whose seed is derived from a passphrase (Argon2id).
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::Seeded(crypto::derive_order_seed(passphrase))
    }

    /// The seed, if any.
    pub fn seed(&self) -> Option<u64> {
        match self {
            Self::Sequential => None,
            Self::Seeded(seed) => Some(*seed),
        }
    }

    /// Materialize the visiting order for a document of `n` sentences.
    pub fn indices(&self, n: usize) -> Vec<usize> {
        match self {
            Self::Sequential => sequential(n),
            Self::Seeded(seed) => seeded_permutation(*seed, n),
        }
    }
}

/// Identity order `0..n`.
pub fn sequential(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Full permutation of `0..n` from a seeded Fisher-Yates shuffle.
///
/// Identical `(seed, n)` always yields the identical sequence.
pub fn seeded_permutation(seed: u64, n: usize) -> Vec<usize> {
    debug_assert!(n <= u32::MAX as usize, "document too large for portable shuffle");
    let mut order = sequential(n);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        order.swap(i, j);
    }
    order
}
