// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Dictionary-driven reference analyzer.
//!
//! Tags words by lookup in a word → part-of-speech table and derives the two
//! dependency roles the watermark needs with fixed rules:
//!
//! - root: the first verb, else the first auxiliary, else the first word
//! - nominal subject: the nearest noun, proper noun or pronoun before a
//!   verbal or auxiliary root
//!
//! This is not a parser. It is deterministic, fast and good enough for
//! controlled vocabularies, tests and demos.

use std::collections::HashMap;

use crate::lexicon::thesaurus::Thesaurus;
use crate::stego::error::StegoError;
use crate::stego::linguistic::{DependencyRole, LinguisticAnalyzer, PartOfSpeech, Token};

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "every", "each", "no",
];
const PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they", "someone", "nobody"];
const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "am", "has", "have", "had", "do", "does", "did",
    "will", "would", "can", "could", "shall", "should", "may", "might", "must",
];
const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "with", "from", "to", "of", "over", "under", "into", "through", "near",
    "for", "after", "before",
];
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor"];

/// Rule-based [`LinguisticAnalyzer`] over a word dictionary.
#[derive(Debug, Clone)]
pub struct DictionaryAnalyzer {
    words: HashMap<String, PartOfSpeech>,
}

impl Default for DictionaryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryAnalyzer {
    /// Analyzer that knows English function words only.
    pub fn new() -> Self {
        let mut analyzer = Self { words: HashMap::new() };
        for (list, pos) in [
            (DETERMINERS, PartOfSpeech::Determiner),
            (PRONOUNS, PartOfSpeech::Pronoun),
            (AUXILIARIES, PartOfSpeech::Auxiliary),
            (ADPOSITIONS, PartOfSpeech::Adposition),
            (CONJUNCTIONS, PartOfSpeech::CoordinatingConjunction),
        ] {
            for word in list {
                analyzer.insert(word, pos);
            }
        }
        analyzer
    }

    /// Register (or retag) a word. Lookup is case-insensitive.
    pub fn insert(&mut self, word: &str, pos: PartOfSpeech) {
        self.words.insert(word.to_lowercase(), pos);
    }

    pub fn with_word(mut self, word: &str, pos: PartOfSpeech) -> Self {
        self.insert(word, pos);
        self
    }

    pub fn with_words(mut self, words: &[&str], pos: PartOfSpeech) -> Self {
        for word in words {
            self.insert(word, pos);
        }
        self
    }

    /// Register every thesaurus word under its class's part of speech, so
    /// that substituted sentences analyse the same way as the originals.
    pub fn with_thesaurus(mut self, thesaurus: &Thesaurus) -> Self {
        for (word, class) in thesaurus.vocabulary() {
            self.insert(word, class.part_of_speech());
        }
        self
    }

    fn tag(&self, word: &str) -> PartOfSpeech {
        if let Some(pos) = self.words.get(&word.to_lowercase()) {
            return *pos;
        }
        if word.chars().all(|c| c.is_ascii_digit()) {
            PartOfSpeech::Numeral
        } else {
            PartOfSpeech::Other
        }
    }
}

/// Split a sentence into word, punctuation and whitespace pieces with byte
/// offsets. A single ASCII space between tokens is not a token.
fn segment(sentence: &str) -> Vec<(usize, &str, Piece)> {
    let mut pieces = Vec::new();
    let mut chars = sentence.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let mut end = start + c.len_utf8();
        let kind = if c.is_whitespace() {
            while let Some(&(i, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
            Piece::Space
        } else if c.is_alphanumeric() {
            while let Some(&(i, next)) = chars.peek() {
                if next.is_alphanumeric() {
                    end = i + next.len_utf8();
                    chars.next();
                } else if (next == '\'' || next == '-') && joins_word(&sentence[i + next.len_utf8()..]) {
                    // apostrophe or hyphen inside a word
                    end = i + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            Piece::Word
        } else {
            Piece::Punct
        };

        let text = &sentence[start..end];
        if kind == Piece::Space && text == " " {
            continue;
        }
        pieces.push((start, text, kind));
    }
    pieces
}

fn joins_word(rest: &str) -> bool {
    rest.chars().next().is_some_and(char::is_alphanumeric)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Word,
    Punct,
    Space,
}

impl LinguisticAnalyzer for DictionaryAnalyzer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<Token>, StegoError> {
        let mut tokens: Vec<Token> = segment(sentence)
            .into_iter()
            .map(|(offset, text, kind)| {
                let (role, pos) = match kind {
                    Piece::Word => (DependencyRole::Other, self.tag(text)),
                    Piece::Punct => (DependencyRole::Punctuation, PartOfSpeech::Punctuation),
                    Piece::Space => (DependencyRole::Other, PartOfSpeech::Space),
                };
                Token::new(text, offset, role, pos)
            })
            .collect();

        let is_word = |t: &Token| !matches!(t.pos, PartOfSpeech::Punctuation | PartOfSpeech::Space);
        let root = tokens
            .iter()
            .position(|t| t.pos == PartOfSpeech::Verb)
            .or_else(|| tokens.iter().position(|t| t.pos == PartOfSpeech::Auxiliary))
            .or_else(|| tokens.iter().position(is_word));

        let Some(root) = root else {
            return Ok(tokens);
        };
        tokens[root].role = DependencyRole::Root;

        if matches!(tokens[root].pos, PartOfSpeech::Verb | PartOfSpeech::Auxiliary) {
            let subject = tokens[..root].iter().rposition(|t| {
                matches!(t.pos, PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Pronoun)
            });
            if let Some(subject) = subject {
                tokens[subject].role = DependencyRole::NominalSubject;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> DictionaryAnalyzer {
        DictionaryAnalyzer::new()
            .with_words(&["cat", "river", "fox"], PartOfSpeech::Noun)
            .with_words(&["sleeps", "run", "jumps"], PartOfSpeech::Verb)
            .with_word("quick", PartOfSpeech::Adjective)
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn offsets_index_into_sentence() {
        let sentence = "The cat sleeps near the river.";
        let tokens = analyzer().tokenize(sentence).unwrap();
        assert_eq!(texts(&tokens), ["The", "cat", "sleeps", "near", "the", "river", "."]);
        for t in &tokens {
            assert_eq!(&sentence[t.offset..t.end()], t.text);
        }
    }

    #[test]
    fn subject_and_root() {
        let tokens = analyzer().tokenize("The quick fox jumps.").unwrap();
        assert_eq!(tokens[2].role, DependencyRole::NominalSubject);
        assert_eq!(tokens[3].role, DependencyRole::Root);
        assert_eq!(tokens[4].role, DependencyRole::Punctuation);
    }

    #[test]
    fn imperative_has_root_only() {
        let tokens = analyzer().tokenize("Run to the river!").unwrap();
        assert_eq!(tokens[0].role, DependencyRole::Root);
        assert!(tokens.iter().all(|t| t.role != DependencyRole::NominalSubject));
    }

    #[test]
    fn auxiliary_root_with_pronoun_subject() {
        let tokens = analyzer().tokenize("It is quick.").unwrap();
        assert_eq!(tokens[0].role, DependencyRole::NominalSubject);
        assert_eq!(tokens[1].role, DependencyRole::Root);
    }

    #[test]
    fn verbless_fragment_roots_on_first_word() {
        let tokens = analyzer().tokenize("Quick, the river.").unwrap();
        assert_eq!(tokens[0].role, DependencyRole::Root);
    }

    #[test]
    fn punctuation_only_has_no_roles() {
        let tokens = analyzer().tokenize("?!").unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.role == DependencyRole::Punctuation));
    }

    #[test]
    fn whitespace_runs_become_space_tokens() {
        let tokens = analyzer().tokenize("The cat\t sleeps").unwrap();
        assert_eq!(texts(&tokens), ["The", "cat", "\t ", "sleeps"]);
        assert!(tokens[2].is_space);
    }

    #[test]
    fn contractions_and_hyphens_stay_whole() {
        let tokens = analyzer().tokenize("The cat's well-known trick - done.").unwrap();
        assert_eq!(texts(&tokens), ["The", "cat's", "well-known", "trick", "-", "done", "."]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let tokens = analyzer().tokenize("CAT SLEEPS").unwrap();
        assert_eq!(tokens[0].pos, PartOfSpeech::Noun);
        assert_eq!(tokens[1].role, DependencyRole::Root);
    }
}
