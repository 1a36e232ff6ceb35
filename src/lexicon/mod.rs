// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Reference implementations of the linguistic collaborators.
//!
//! Production deployments plug in a real tagger/parser and an embedding-based
//! synonym source. These two are dictionary-backed, deterministic and
//! dependency-free beyond the crate's own stack:
//!
//! - [`DictionaryAnalyzer`]: rule-based tagging over a word list.
//! - [`Thesaurus`]: ranked synonym lists plus same-class filler words.

pub mod analyzer;
pub mod thesaurus;

pub use analyzer::DictionaryAnalyzer;
pub use thesaurus::{Thesaurus, DEFAULT_FILLER};
