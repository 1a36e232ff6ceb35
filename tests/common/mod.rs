// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Shared fixtures: a small animal lexicon and generated cover documents.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use wordmark_core::lexicon::{DictionaryAnalyzer, Thesaurus};
use wordmark_core::{LinguisticAnalyzer, StegoError, SynonymClass, SynonymProvider, Token};

pub const NOUNS: &[&str] = &[
    "cat", "dog", "fox", "owl", "bird", "wolf", "bear", "deer", "horse", "mouse", "eagle",
    "otter", "rabbit", "badger", "ferret",
];

pub const VERBS: &[&str] = &["sleeps", "runs", "hunts", "waits", "eats", "rests", "hides", "sings"];

/// Thesaurus whose filler covers the whole class vocabulary, so every anchor
/// has candidates of both parities.
pub fn thesaurus() -> Thesaurus {
    Thesaurus::new(2026)
        .with_filler(64)
        .with_entry("cat", SynonymClass::Noun, &[("kitten", 0.72), ("feline", 0.65)])
        .with_entry("dog", SynonymClass::Noun, &[("hound", 0.7), ("puppy", 0.6)])
        .with_vocabulary(SynonymClass::Noun, NOUNS)
        .with_vocabulary(SynonymClass::Verb, VERBS)
}

pub fn analyzer(thesaurus: &Thesaurus) -> DictionaryAnalyzer {
    DictionaryAnalyzer::new().with_thesaurus(thesaurus)
}

/// `n` sentences, each with a noun subject and a verb root.
pub fn cover_document(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let noun = NOUNS[i % NOUNS.len()];
            let verb = VERBS[(i * 3) % VERBS.len()];
            if i % 4 == 0 {
                let mut capitalized = noun.to_string();
                capitalized[..1].make_ascii_uppercase();
                format!("{capitalized} {verb} near the river.")
            } else {
                format!("The {noun} {verb} near the river.")
            }
        })
        .collect()
}

/// Analyzer wrapper that counts `tokenize` calls.
pub struct CountingAnalyzer<A> {
    pub inner: A,
    calls: AtomicUsize,
}

impl<A> CountingAnalyzer<A> {
    pub fn new(inner: A) -> Self {
        Self { inner, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<A: LinguisticAnalyzer> LinguisticAnalyzer for CountingAnalyzer<A> {
    fn tokenize(&self, sentence: &str) -> Result<Vec<Token>, StegoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.tokenize(sentence)
    }
}

/// Provider wrapper that counts `synonyms` calls.
pub struct CountingProvider<P> {
    pub inner: P,
    calls: AtomicUsize,
}

impl<P> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: SynonymProvider> SynonymProvider for CountingProvider<P> {
    fn synonyms(&self, word: &str, class: SynonymClass, intensity: f32) -> Result<Vec<String>, StegoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.synonyms(word, class, intensity)
    }
}
