// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Token model and the two linguistic collaborators.
//!
//! The watermark core never parses language itself. Segmentation, tagging and
//! synonym generation come from an injected [`LinguisticAnalyzer`] and
//! [`SynonymProvider`] pair, chosen once at configuration time. Both traits
//! are object-safe and `Send + Sync`.

use core::fmt;

use crate::stego::error::StegoError;

/// Dependency relation of a token to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyRole {
    /// Nominal subject (`nsubj`).
    NominalSubject,
    /// Sentence root.
    Root,
    /// Punctuation attachment.
    Punctuation,
    Other,
}

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    CoordinatingConjunction,
    Adposition,
    Numeral,
    Particle,
    Interjection,
    Punctuation,
    Space,
    Other,
}

impl PartOfSpeech {
    /// Synonym class used to look up substitutes for a word with this tag.
    ///
    /// Conjunctions and determiners are looked up as nouns; tags with no
    /// substitutable class return `None`.
    pub fn synonym_class(self) -> Option<SynonymClass> {
        match self {
            Self::Pronoun => Some(SynonymClass::Pronoun),
            Self::CoordinatingConjunction | Self::Noun | Self::ProperNoun | Self::Determiner => {
                Some(SynonymClass::Noun)
            }
            Self::Verb => Some(SynonymClass::Verb),
            Self::Adjective => Some(SynonymClass::Adjective),
            Self::Adverb => Some(SynonymClass::Adverb),
            _ => None,
        }
    }
}

/// Word class a synonym provider searches within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SynonymClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
}

impl SynonymClass {
    /// The part of speech a word of this class is tagged with.
    pub fn part_of_speech(self) -> PartOfSpeech {
        match self {
            Self::Noun => PartOfSpeech::Noun,
            Self::Verb => PartOfSpeech::Verb,
            Self::Adjective => PartOfSpeech::Adjective,
            Self::Adverb => PartOfSpeech::Adverb,
            Self::Pronoun => PartOfSpeech::Pronoun,
        }
    }
}

impl fmt::Display for SynonymClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noun => write!(f, "NOUN"),
            Self::Verb => write!(f, "VERB"),
            Self::Adjective => write!(f, "ADJ"),
            Self::Adverb => write!(f, "ADV"),
            Self::Pronoun => write!(f, "PRON"),
        }
    }
}

/// One token of an analysed sentence. Read-only to the watermark core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text exactly as it appears in the sentence.
    pub text: String,
    /// Byte offset of `text` within the sentence.
    pub offset: usize,
    pub role: DependencyRole,
    pub pos: PartOfSpeech,
    /// Whitespace-only token.
    pub is_space: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, offset: usize, role: DependencyRole, pos: PartOfSpeech) -> Self {
        let text = text.into();
        let is_space = !text.is_empty() && text.chars().all(char::is_whitespace);
        Self { text, offset, role, pos, is_space }
    }

    /// Length in characters (Unicode scalar values), not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The bit this token encodes: its character length modulo 2.
    pub fn parity(&self) -> u8 {
        word_parity(&self.text)
    }

    /// Byte offset one past the end of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Character-length parity of a word.
pub fn word_parity(word: &str) -> u8 {
    (word.chars().count() % 2) as u8
}

/// Which dependency role to anchor on, and the synonym class to fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParameters {
    pub role: DependencyRole,
    pub synonym_class: SynonymClass,
}

impl SearchParameters {
    /// Anchor on the nominal subject, substituting nouns.
    pub const SUBJECT: Self = Self {
        role: DependencyRole::NominalSubject,
        synonym_class: SynonymClass::Noun,
    };

    /// Anchor on the sentence root, substituting verbs.
    pub const ROOT: Self = Self {
        role: DependencyRole::Root,
        synonym_class: SynonymClass::Verb,
    };
}

/// Sentence segmentation plus POS and dependency tagging.
///
/// Must be deterministic: identical input text yields identical tokens.
/// Token offsets must index into the sentence passed in.
pub trait LinguisticAnalyzer: Send + Sync {
    fn tokenize(&self, sentence: &str) -> Result<Vec<Token>, StegoError>;
}

/// Ranked substitute words for a given word.
///
/// # Contract
///
/// - Candidates are ordered nearest first and already filtered to
///   similarity `< intensity`.
/// - Candidates are already inflected to the grammatical form of `word`.
/// - The call may be expensive (model inference) and is assumed blocking.
pub trait SynonymProvider: Send + Sync {
    fn synonyms(&self, word: &str, class: SynonymClass, intensity: f32) -> Result<Vec<String>, StegoError>;
}
