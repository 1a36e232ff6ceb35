// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Anchor token selection and in-place substitution.
//!
//! Each sentence carries at most one bit, in the length parity of a single
//! anchor token chosen purely by syntactic role: the first nominal subject,
//! otherwise the first sentence root. Space-only tokens never qualify.

use crate::stego::error::StegoError;
use crate::stego::linguistic::{SearchParameters, Token};

/// The token chosen to carry a sentence's bit.
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    /// Index of the token within the analysed sentence.
    pub index: usize,
    pub token: &'a Token,
    pub params: SearchParameters,
}

/// Pick the anchor token of an analysed sentence.
///
/// Returns `None` if the sentence has neither a subject nor a root, in which
/// case it is ineligible for both embedding and extraction.
pub fn select_anchor(tokens: &[Token]) -> Option<Anchor<'_>> {
    find_by(tokens, SearchParameters::SUBJECT).or_else(|| find_by(tokens, SearchParameters::ROOT))
}

fn find_by(tokens: &[Token], params: SearchParameters) -> Option<Anchor<'_>> {
    tokens
        .iter()
        .enumerate()
        .find(|(_, t)| t.role == params.role && !t.is_space)
        .map(|(index, token)| Anchor { index, token, params })
}

/// Replace `token` inside `sentence` with `replacement`, leaving every other
/// byte untouched.
///
/// # Errors
/// [`StegoError::Analyzer`] if the token's offset and text do not match the
/// sentence (an analyzer contract violation).
pub fn substitute(sentence: &str, token: &Token, replacement: &str) -> Result<String, StegoError> {
    match sentence.get(token.offset..token.end()) {
        Some(span) if span == token.text => {}
        _ => {
            return Err(StegoError::Analyzer(format!(
                "token {:?} not found at byte offset {}",
                token.text, token.offset
            )))
        }
    }

    let mut out = String::with_capacity(sentence.len() - token.text.len() + replacement.len());
    out.push_str(&sentence[..token.offset]);
    out.push_str(replacement);
    out.push_str(&sentence[token.end()..]);
    Ok(out)
}
