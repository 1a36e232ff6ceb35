// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Document ingestion: raw text to sentences and back.

/// Split raw text into sentences.
///
/// A sentence ends after `.`, `?` or `!` when followed by whitespace or the
/// end of input; the terminal punctuation stays with its sentence. Newlines
/// are removed, leading whitespace is trimmed and empty sentences are
/// discarded.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' || c == '\r' {
            // A line break still separates words.
            if !current.ends_with(' ') && !current.is_empty() {
                current.push(' ');
            }
            continue;
        }
        current.push(c);

        let at_boundary = chars.peek().map_or(true, |next| next.is_whitespace());
        if matches!(c, '.' | '?' | '!') && at_boundary {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Join sentences back into running text with single spaces.
pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    sentences
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ")
}
