// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Parity-matching synonym substitution.
//!
//! Given an anchor and a target bit, returns the word that should stand in
//! the anchor's place: the anchor itself when its length parity already
//! encodes the bit, otherwise the highest-ranked provider candidate with the
//! right parity.

use crate::stego::anchor::Anchor;
use crate::stego::error::StegoError;
use crate::stego::linguistic::{word_parity, SynonymProvider};

/// Choose the word that makes `anchor` encode `target_bit`.
///
/// Returns `Ok(None)` when no candidate has the required parity; the sentence
/// then cannot carry the bit and is skipped by the embedder.
///
/// The provider is only called when the anchor's own parity differs from
/// `target_bit`. The synonym class comes from the anchor's part of speech,
/// falling back to the class of the search parameters that selected it.
pub fn match_parity(
    anchor: &Anchor<'_>,
    target_bit: u8,
    provider: &dyn SynonymProvider,
    intensity: f32,
) -> Result<Option<String>, StegoError> {
    let original = &anchor.token.text;
    if word_parity(original) == target_bit {
        return Ok(Some(original.clone()));
    }

    let class = anchor
        .token
        .pos
        .synonym_class()
        .unwrap_or(anchor.params.synonym_class);
    let candidates = provider.synonyms(original, class, intensity)?;

    // Case mapping can change the char count ("ß" -> "SS"), so parity is
    // tested on the word as it will be written.
    let upper = starts_uppercase(original);
    Ok(candidates
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| if upper { capitalize_first(&c) } else { c })
        .find(|c| word_parity(c) == target_bit))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Upper-case the first character, leaving the rest as given.
fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
