// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the watermark pipeline.
//!
//! [`StegoError`] covers all failure modes from bitstream decoding through
//! embedding, extraction and the injected linguistic collaborators.

use core::fmt;

/// Errors that can occur during watermark embedding or extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The bitstream length is not a whole number of bytes.
    MalformedBitstream { len: usize },
    /// The document ran out of eligible sentences before every bit was placed.
    InsufficientCarrier { required: usize, embedded: usize },
    /// Sentences were exhausted before the terminator was observed.
    TruncatedExtraction { bits_read: usize },
    /// The payload contains a byte that reads back as the terminator.
    TerminatorInPayload { offset: usize },
    /// The extracted payload is not valid UTF-8.
    InvalidUtf8,
    /// Version, kind, length or CRC check failed on a serialized session.
    SessionCorrupted,
    /// The linguistic analyzer failed or returned inconsistent tokens.
    Analyzer(String),
    /// The synonym provider failed.
    SynonymProvider(String),
    /// The operation was cancelled through its progress handle.
    Cancelled,
    /// The configured deadline passed before the operation completed.
    TimedOut,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBitstream { len } => {
                write!(f, "bitstream of {len} bits is not a multiple of 8")
            }
            Self::InsufficientCarrier { required, embedded } => write!(
                f,
                "not enough carrier sentences: embedded {embedded} of {required} bits"
            ),
            Self::TruncatedExtraction { bits_read } => {
                write!(f, "terminator not found after reading {bits_read} bits")
            }
            Self::TerminatorInPayload { offset } => {
                write!(f, "payload byte at offset {offset} collides with the terminator")
            }
            Self::InvalidUtf8 => write!(f, "extracted text is not valid UTF-8"),
            Self::SessionCorrupted => write!(f, "watermark session bytes are corrupted"),
            Self::Analyzer(msg) => write!(f, "linguistic analyzer failed: {msg}"),
            Self::SynonymProvider(msg) => write!(f, "synonym provider failed: {msg}"),
            Self::Cancelled => write!(f, "operation cancelled by user"),
            Self::TimedOut => write!(f, "operation timed out"),
        }
    }
}

impl std::error::Error for StegoError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_counts() {
        let err = StegoError::InsufficientCarrier { required: 24, embedded: 10 };
        assert_eq!(err.to_string(), "not enough carrier sentences: embedded 10 of 24 bits");

        let err = StegoError::MalformedBitstream { len: 13 };
        assert!(err.to_string().contains("13"));
    }
}
