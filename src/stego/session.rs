// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Shared embed/extract state and its compact byte form.
//!
//! A [`WatermarkSession`] is everything an extractor needs besides the
//! document: the traversal order, the number of carried bits and the
//! terminator. The core never transmits it; [`WatermarkSession::to_bytes`]
//! exists so callers can send it out-of-band.
//!
//! ```text
//! [1 byte ] format version (1)
//! [1 byte ] order kind: 0 = sequential, 1 = seeded
//! [8 bytes] seed (big-endian u64, zero when sequential)
//! [4 bytes] bit length (big-endian u32)
//! [1 byte ] terminator pattern, packed MSB first
//! [4 bytes] CRC-32 of everything above
//! ```

use crate::stego::bits::{self, BITS_IN_BYTE, STOP_SIGN};
use crate::stego::error::StegoError;
use crate::stego::permute::TraversalOrder;

const SESSION_VERSION: u8 = 1;
const ORDER_SEQUENTIAL: u8 = 0;
const ORDER_SEEDED: u8 = 1;

/// Serialized session size: version + kind + seed + bit length + terminator + crc.
pub const SESSION_BYTES: usize = 1 + 1 + 8 + 4 + 1 + 4; // 19

/// Minimum shared state between an embed call and its extract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkSession {
    pub order: TraversalOrder,
    /// Carried bits, terminator included. Equals the rewritten sentence count.
    pub bit_length: usize,
    pub terminator: [u8; BITS_IN_BYTE],
}

impl WatermarkSession {
    pub fn new(order: TraversalOrder, bit_length: usize) -> Self {
        Self { order, bit_length, terminator: STOP_SIGN }
    }

    /// Session for extraction when only the order is known.
    pub fn for_order(order: TraversalOrder) -> Self {
        Self::new(order, 0)
    }

    pub fn with_terminator(mut self, terminator: [u8; BITS_IN_BYTE]) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SESSION_BYTES);
        out.push(SESSION_VERSION);
        match self.order {
            TraversalOrder::Sequential => {
                out.push(ORDER_SEQUENTIAL);
                out.extend_from_slice(&0u64.to_be_bytes());
            }
            TraversalOrder::Seeded(seed) => {
                out.push(ORDER_SEEDED);
                out.extend_from_slice(&seed.to_be_bytes());
            }
        }
        let bit_length = u32::try_from(self.bit_length).unwrap_or(u32::MAX);
        out.extend_from_slice(&bit_length.to_be_bytes());
        out.push(bits::terminator_byte(&self.terminator));

        let crc = crc32fast::hash(&out);
        out.extend_from_slice(&crc.to_be_bytes());
        out
    }

    /// Parse a session, verifying version, order kind and CRC.
    pub fn from_bytes(data: &[u8]) -> Result<Self, StegoError> {
        if data.len() != SESSION_BYTES {
            return Err(StegoError::SessionCorrupted);
        }
        let (body, crc_bytes) = data.split_at(SESSION_BYTES - 4);
        let stored_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
        if stored_crc != crc32fast::hash(body) {
            return Err(StegoError::SessionCorrupted);
        }
        if body[0] != SESSION_VERSION {
            return Err(StegoError::SessionCorrupted);
        }

        let mut seed = [0u8; 8];
        seed.copy_from_slice(&body[2..10]);
        let order = match body[1] {
            ORDER_SEQUENTIAL => TraversalOrder::Sequential,
            ORDER_SEEDED => TraversalOrder::Seeded(u64::from_be_bytes(seed)),
            _ => return Err(StegoError::SessionCorrupted),
        };
        let bit_length = u32::from_be_bytes([body[10], body[11], body[12], body[13]]) as usize;
        let terminator = bits::terminator_from_byte(body[14]);

        Ok(Self { order, bit_length, terminator })
    }
}
