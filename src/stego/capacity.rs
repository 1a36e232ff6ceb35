// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier capacity estimation.
//!
//! Each eligible sentence (one with a subject or root anchor) can carry at
//! most one bit, and the terminator costs one byte. The estimate is an upper
//! bound: sentences whose anchor has no parity-matching synonym are skipped
//! at embed time.

use crate::stego::anchor::select_anchor;
use crate::stego::bits::BITS_IN_BYTE;
use crate::stego::error::StegoError;
use crate::stego::linguistic::LinguisticAnalyzer;

/// Capacity of a document as a watermark carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInfo {
    pub sentences: usize,
    pub eligible_sentences: usize,
    /// Bits including the terminator.
    pub max_bits: usize,
    /// Payload bytes, terminator excluded.
    pub max_payload_bytes: usize,
}

/// Estimate the maximum payload size a document can carry.
pub fn estimate_capacity<S: AsRef<str>>(
    sentences: &[S],
    analyzer: &dyn LinguisticAnalyzer,
) -> Result<CapacityInfo, StegoError> {
    let mut eligible = 0usize;
    for sentence in sentences {
        let tokens = analyzer.tokenize(sentence.as_ref())?;
        if select_anchor(&tokens).is_some() {
            eligible += 1;
        }
    }

    Ok(CapacityInfo {
        sentences: sentences.len(),
        eligible_sentences: eligible,
        max_bits: eligible,
        max_payload_bytes: (eligible / BITS_IN_BYTE).saturating_sub(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::DictionaryAnalyzer;
    use crate::stego::linguistic::PartOfSpeech;

    #[test]
    fn counts_only_eligible_sentences() {
        let analyzer = DictionaryAnalyzer::new().with_word("sleeps", PartOfSpeech::Verb);
        let mut doc = vec!["It sleeps."; 20];
        doc.extend(["...", "!?", "--"]);
        let info = estimate_capacity(&doc, &analyzer).unwrap();
        assert_eq!(info.sentences, 23);
        assert_eq!(info.eligible_sentences, 20);
        // 20 bits: two whole bytes, one of them the terminator.
        assert_eq!(info.max_payload_bytes, 1);
    }

    #[test]
    fn too_small_for_any_payload() {
        let analyzer = DictionaryAnalyzer::new();
        let doc = vec!["It is."; 7];
        assert_eq!(estimate_capacity(&doc, &analyzer).unwrap().max_payload_bytes, 0);
        let empty: Vec<&str> = Vec::new();
        assert_eq!(estimate_capacity(&empty, &analyzer).unwrap().eligible_sentences, 0);
    }
}
