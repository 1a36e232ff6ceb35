// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! In-memory reference synonym provider.
//!
//! Candidates come in two tiers:
//!
//! 1. explicit synonyms of the word, nearest first, kept only when their
//!    similarity is below the intensity threshold
//! 2. filler words drawn from the same class's vocabulary, so that both
//!    length parities are usually available even for words with few or no
//!    listed synonyms
//!
//! Filler selection is pseudo-random but deterministic: a ChaCha20 PRNG is
//! seeded from the thesaurus seed, the word's CRC-32 and its class, so that
//! repeated embeds of the same document produce the same text.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::stego::error::StegoError;
use crate::stego::linguistic::{SynonymClass, SynonymProvider};

/// Default number of filler candidates appended after explicit synonyms.
pub const DEFAULT_FILLER: usize = 10;

/// Similarity assumed between a word and an unrelated vocabulary word.
const UNRELATED_SIMILARITY: f32 = 0.0;

/// Word-list [`SynonymProvider`].
#[derive(Debug, Clone)]
pub struct Thesaurus {
    seed: u64,
    filler: usize,
    entries: HashMap<(SynonymClass, String), Vec<(String, f32)>>,
    vocabulary: BTreeMap<SynonymClass, BTreeSet<String>>,
}

impl Thesaurus {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            filler: DEFAULT_FILLER,
            entries: HashMap::new(),
            vocabulary: BTreeMap::new(),
        }
    }

    /// Number of filler words appended to each candidate list.
    pub fn with_filler(mut self, filler: usize) -> Self {
        self.filler = filler;
        self
    }

    /// Add synonyms of `word` with their similarity scores. All words become
    /// part of the class vocabulary.
    pub fn insert(&mut self, word: &str, class: SynonymClass, synonyms: &[(&str, f32)]) {
        let key = word.to_lowercase();
        self.add_vocabulary(class, &[key.as_str()]);
        let list = self.entries.entry((class, key)).or_default();
        for (synonym, similarity) in synonyms {
            list.push((synonym.to_lowercase(), *similarity));
        }
        let words: Vec<&str> = synonyms.iter().map(|(s, _)| *s).collect();
        self.add_vocabulary(class, &words);
    }

    pub fn with_entry(mut self, word: &str, class: SynonymClass, synonyms: &[(&str, f32)]) -> Self {
        self.insert(word, class, synonyms);
        self
    }

    /// Add words usable as filler for `class`.
    pub fn add_vocabulary(&mut self, class: SynonymClass, words: &[&str]) {
        let set = self.vocabulary.entry(class).or_default();
        set.extend(words.iter().map(|w| w.to_lowercase()));
    }

    pub fn with_vocabulary(mut self, class: SynonymClass, words: &[&str]) -> Self {
        self.add_vocabulary(class, words);
        self
    }

    /// Every known word with its class, in a stable order.
    pub fn vocabulary(&self) -> impl Iterator<Item = (&str, SynonymClass)> + '_ {
        self.vocabulary
            .iter()
            .flat_map(|(class, words)| words.iter().map(move |w| (w.as_str(), *class)))
    }

    fn similarity(&self, word: &str, class: SynonymClass, other: &str) -> f32 {
        self.entries
            .get(&(class, word.to_string()))
            .and_then(|list| list.iter().find(|(w, _)| w == other))
            .map_or(UNRELATED_SIMILARITY, |(_, s)| *s)
    }

    fn filler_rng(&self, word: &str, class: SynonymClass) -> ChaCha20Rng {
        let word_hash = u64::from(crc32fast::hash(word.as_bytes()));
        ChaCha20Rng::seed_from_u64(self.seed ^ (word_hash << 8) ^ class as u64)
    }
}

impl SynonymProvider for Thesaurus {
    fn synonyms(&self, word: &str, class: SynonymClass, intensity: f32) -> Result<Vec<String>, StegoError> {
        let key = word.to_lowercase();

        let mut ranked = self.entries.get(&(class, key.clone())).cloned().unwrap_or_default();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut candidates: Vec<String> = ranked
            .into_iter()
            .filter(|(_, similarity)| *similarity < intensity)
            .map(|(w, _)| w)
            .collect();

        if let Some(vocabulary) = self.vocabulary.get(&class) {
            let pool: Vec<&String> = vocabulary
                .iter()
                .filter(|w| **w != key && !candidates.contains(w))
                .collect();
            let mut rng = self.filler_rng(&key, class);
            let filler: Vec<String> = pool
                .choose_multiple(&mut rng, self.filler)
                .filter(|w| self.similarity(&key, class, w) < intensity)
                .map(|w| (*w).clone())
                .collect();
            candidates.extend(filler);
        }

        Ok(candidates)
    }
}
