// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload to bitstream conversion.
//!
//! The watermark bitstream is the payload bytes, MSB first, followed by an
//! 8-bit terminator:
//!
//! ```text
//! [N * 8 bits] payload bytes, most significant bit first
//! [8 bits    ] terminator (00000000 by default)
//! ```
//!
//! There is no length prefix. The extractor learns where the payload ends
//! only by reading the terminator at a byte boundary, which is why a payload
//! byte equal to the terminator cannot be carried (see
//! [`find_terminator_collision`]).

use crate::stego::error::StegoError;

/// Number of bits per payload byte.
pub const BITS_IN_BYTE: usize = 8;

/// Default end-of-payload marker.
pub const STOP_SIGN: [u8; BITS_IN_BYTE] = [0; BITS_IN_BYTE];

/// Convert bytes to a bit vector (MSB first).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * BITS_IN_BYTE);
    for &byte in bytes {
        for bit_pos in (0..BITS_IN_BYTE).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + BITS_IN_BYTE - 1) / BITS_IN_BYTE);
    for chunk in bits.chunks(BITS_IN_BYTE) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}

/// Pack a terminator bit pattern into the byte it represents.
pub fn terminator_byte(terminator: &[u8; BITS_IN_BYTE]) -> u8 {
    bits_to_bytes(terminator)[0]
}

/// Unpack a byte into a terminator bit pattern.
pub fn terminator_from_byte(byte: u8) -> [u8; BITS_IN_BYTE] {
    let mut pattern = [0u8; BITS_IN_BYTE];
    pattern.copy_from_slice(&bytes_to_bits(&[byte]));
    pattern
}

/// Encode a payload into a bitstream ending in [`STOP_SIGN`].
pub fn encode(payload: &[u8]) -> Vec<u8> {
    encode_with(payload, &STOP_SIGN)
}

/// Encode a payload into a bitstream ending in `terminator`.
pub fn encode_with(payload: &[u8], terminator: &[u8; BITS_IN_BYTE]) -> Vec<u8> {
    let mut bits = bytes_to_bits(payload);
    bits.extend_from_slice(terminator);
    bits
}

/// Decode a terminator-free bitstream back into bytes.
///
/// The caller strips the terminator first; this function does not look for it.
///
/// # Errors
/// [`StegoError::MalformedBitstream`] if `bits.len()` is not a multiple of 8.
pub fn decode(bits: &[u8]) -> Result<Vec<u8>, StegoError> {
    if bits.len() % BITS_IN_BYTE != 0 {
        return Err(StegoError::MalformedBitstream { len: bits.len() });
    }
    Ok(bits_to_bytes(bits))
}

/// True when the stream is byte-aligned and its last byte is the terminator.
///
/// Zero runs that straddle a byte boundary never count, so a payload such as
/// `0x80 0x01` cannot end extraction early.
pub fn ends_with_terminator(bits: &[u8], terminator: &[u8; BITS_IN_BYTE]) -> bool {
    bits.len() >= BITS_IN_BYTE
        && bits.len() % BITS_IN_BYTE == 0
        && bits[bits.len() - BITS_IN_BYTE..] == terminator[..]
}

/// Remove the trailing terminator from a bitstream.
///
/// # Errors
/// [`StegoError::MalformedBitstream`] if the stream does not end with the
/// terminator at a byte boundary.
pub fn strip_terminator<'a>(
    bits: &'a [u8],
    terminator: &[u8; BITS_IN_BYTE],
) -> Result<&'a [u8], StegoError> {
    if !ends_with_terminator(bits, terminator) {
        return Err(StegoError::MalformedBitstream { len: bits.len() });
    }
    Ok(&bits[..bits.len() - BITS_IN_BYTE])
}

/// Offset of the first payload byte that would read back as the terminator.
pub fn find_terminator_collision(payload: &[u8], terminator: &[u8; BITS_IN_BYTE]) -> Option<usize> {
    let marker = terminator_byte(terminator);
    payload.iter().position(|&b| b == marker)
}
