// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # wordmark-core
//!
//! Linguistic steganography engine: hides a byte payload in natural-language
//! text by steering the odd/even character length of one syntactically
//! chosen word per sentence, and recovers it blind from the rewritten text.
//!
//! - Capacity is one bit per eligible sentence; the payload is terminated by
//!   a zero byte.
//! - Sentence order is either document order or a seeded permutation shared
//!   between embedder and extractor.
//! - Tagging and synonym generation are injected through the
//!   [`LinguisticAnalyzer`] and [`SynonymProvider`] traits. The [`lexicon`]
//!   module ships dictionary-backed reference implementations.
//!
//! There is no encryption layer and no error correction: the channel is
//! closed and fragile by construction.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use wordmark_core::lexicon::{DictionaryAnalyzer, Thesaurus};
//! use wordmark_core::{embed_text, extract_text, EmbedConfig, ExtractConfig, TraversalOrder};
//!
//! let thesaurus = load_thesaurus();
//! let analyzer = DictionaryAnalyzer::new().with_thesaurus(&thesaurus);
//! let sentences = wordmark_core::text::split_sentences(&cover_text);
//!
//! let config = EmbedConfig::default().with_order(TraversalOrder::from_passphrase("pass"));
//! let embedded = embed_text(&sentences, "Hi", &analyzer, &thesaurus, &config).unwrap();
//!
//! let decoded = extract_text(&embedded.sentences, &analyzer, &ExtractConfig::new(embedded.session)).unwrap();
//! assert_eq!(decoded, "Hi");
//! ```

pub mod lexicon;
pub mod stego;
pub mod text;

pub use stego::{embed_bits, embed_message, embed_text, extract_bits, extract_message, extract_text};
pub use stego::{EmbedConfig, Embedded, ExtractConfig, SentenceOutcome, DEFAULT_INTENSITY};
pub use stego::{estimate_capacity, CapacityInfo, Progress, StegoError, TraversalOrder, WatermarkSession};
pub use stego::{DependencyRole, LinguisticAnalyzer, PartOfSpeech, SearchParameters, SynonymClass, SynonymProvider, Token};
pub use stego::progress;
