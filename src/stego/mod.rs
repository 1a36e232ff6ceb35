// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Watermark embedding and extraction.
//!
//! One bit per eligible sentence, carried by the character-length parity of
//! the sentence's anchor token (nominal subject, else root):
//!
//! - **Embed** (`embed_message` / `embed_bits`): rewrite the anchor with a
//!   parity-matching synonym, emitting only sentences that carried a bit.
//! - **Extract** (`extract_message` / `extract_bits`): re-derive the anchor of
//!   each sentence, read its parity, stop at the terminator.
//!
//! Both sides share a [`WatermarkSession`] (traversal order, bit length and
//! terminator) and must use the same [`LinguisticAnalyzer`]; any divergence
//! silently corrupts the recovered payload.

pub mod error;
pub mod bits;
pub mod permute;
pub mod crypto;
pub mod linguistic;
pub mod anchor;
pub mod synonym;
pub mod session;
pub mod capacity;
mod pipeline;
pub mod progress;

pub use error::StegoError;
pub use linguistic::{
    DependencyRole, LinguisticAnalyzer, PartOfSpeech, SearchParameters, SynonymClass,
    SynonymProvider, Token,
};
pub use permute::TraversalOrder;
pub use session::WatermarkSession;
pub use capacity::{estimate_capacity, CapacityInfo};
pub use progress::Progress;
pub use pipeline::{
    embed_bits, embed_message, embed_text, extract_bits, extract_message, extract_text,
    rewrite_sentence, EmbedConfig, Embedded, ExtractConfig, SentenceOutcome, DEFAULT_INTENSITY,
};
