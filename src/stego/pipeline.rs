// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Watermark embed/extract pipeline.
//!
//! Embedding walks the sentences in traversal order and, for each one:
//! 1. analyses it and selects the anchor token (subject, else root)
//! 2. finds a substitute whose length parity equals the next payload bit
//! 3. rewrites the sentence and, optionally, re-analyses it to confirm the
//!    extractor will read the same bit back
//!
//! Only sentences that carried a bit are emitted. Extraction mirrors the walk
//! over the rewritten document without mutating anything, reading one parity
//! bit per eligible sentence until the terminator appears at a byte boundary.

#[cfg(feature = "parallel")]
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::stego::anchor::{select_anchor, substitute};
use crate::stego::bits::{self, BITS_IN_BYTE, STOP_SIGN};
use crate::stego::error::StegoError;
use crate::stego::linguistic::{LinguisticAnalyzer, SynonymProvider, Token};
use crate::stego::permute::TraversalOrder;
use crate::stego::progress::Progress;
use crate::stego::session::WatermarkSession;
use crate::stego::synonym::match_parity;

/// Default similarity threshold handed to the synonym provider.
pub const DEFAULT_INTENSITY: f32 = 0.8;

/// Embedding options.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Candidates must have similarity strictly below this value.
    pub intensity: f32,
    pub order: TraversalOrder,
    pub terminator: [u8; BITS_IN_BYTE],
    /// Re-analyse every rewritten sentence and skip it unless its anchor
    /// still reads back the target bit.
    pub verify_rewrites: bool,
    pub deadline: Option<Instant>,
    pub progress: Option<Progress>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
            order: TraversalOrder::Sequential,
            terminator: STOP_SIGN,
            verify_rewrites: true,
            deadline: None,
            progress: None,
        }
    }
}

impl EmbedConfig {
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_terminator(mut self, terminator: [u8; BITS_IN_BYTE]) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify_rewrites = verify;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Extraction options.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub session: WatermarkSession,
    pub deadline: Option<Instant>,
    pub progress: Option<Progress>,
}

impl ExtractConfig {
    pub fn new(session: WatermarkSession) -> Self {
        Self { session, deadline: None, progress: None }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl From<WatermarkSession> for ExtractConfig {
    fn from(session: WatermarkSession) -> Self {
        Self::new(session)
    }
}

/// Result of a successful embed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    /// The rewritten document: one sentence per carried bit, arranged so that
    /// `session.order` visits them in bit order.
    pub sentences: Vec<String>,
    pub session: WatermarkSession,
    /// Input indices visited, in traversal order.
    pub consumed: Vec<usize>,
    /// Input indices that carried a bit, in bit order.
    pub carriers: Vec<usize>,
}

/// What happened to one sentence during embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceOutcome {
    pub text: String,
    pub bit_carried: bool,
}

impl SentenceOutcome {
    fn carried(text: String) -> Self {
        Self { text, bit_carried: true }
    }

    fn skipped(sentence: &str) -> Self {
        Self { text: sentence.to_string(), bit_carried: false }
    }
}

/// Sentences analysed along a traversal order.
///
/// Without the `parallel` feature each sentence is tokenized when it is
/// visited. With it, the next `ANALYSIS_BATCH` sentences of the order are
/// tokenized together across rayon workers, so interrupts are honoured
/// between batches and at most one batch is analysed past the last sentence
/// a caller consumes.
struct SentenceAnalyses<'a, S> {
    sentences: &'a [S],
    analyzer: &'a dyn LinguisticAnalyzer,
    order: Vec<usize>,
    visited: usize,
    #[cfg(feature = "parallel")]
    ready: VecDeque<Vec<Token>>,
}

/// Sentences tokenized per rayon batch.
#[cfg(feature = "parallel")]
const ANALYSIS_BATCH: usize = 32;

impl<'a, S: AsRef<str> + Sync> SentenceAnalyses<'a, S> {
    fn new(sentences: &'a [S], analyzer: &'a dyn LinguisticAnalyzer, order: Vec<usize>) -> Self {
        Self {
            sentences,
            analyzer,
            order,
            visited: 0,
            #[cfg(feature = "parallel")]
            ready: VecDeque::new(),
        }
    }

    /// Next sentence index in traversal order with its tokens.
    fn next(&mut self) -> Result<Option<(usize, Vec<Token>)>, StegoError> {
        let Some(&idx) = self.order.get(self.visited) else {
            return Ok(None);
        };
        let tokens = self.analyse(idx)?;
        self.visited += 1;
        Ok(Some((idx, tokens)))
    }

    #[cfg(not(feature = "parallel"))]
    fn analyse(&mut self, idx: usize) -> Result<Vec<Token>, StegoError> {
        self.analyzer.tokenize(self.sentences[idx].as_ref())
    }

    #[cfg(feature = "parallel")]
    fn analyse(&mut self, idx: usize) -> Result<Vec<Token>, StegoError> {
        use rayon::prelude::*;

        if let Some(tokens) = self.ready.pop_front() {
            return Ok(tokens);
        }
        let end = (self.visited + ANALYSIS_BATCH).min(self.order.len());
        let (sentences, analyzer) = (self.sentences, self.analyzer);
        let mut batch = self.order[self.visited..end]
            .par_iter()
            .map(|&i| analyzer.tokenize(sentences[i].as_ref()))
            .collect::<Result<VecDeque<_>, _>>()?;
        trace!(first = idx, len = batch.len(), "analysed sentence batch");
        let tokens = batch.pop_front().unwrap_or_default();
        self.ready = batch;
        Ok(tokens)
    }
}

fn check_interrupt(deadline: Option<Instant>, progress: &Progress) -> Result<(), StegoError> {
    progress.check_cancelled()?;
    if deadline.is_some_and(|d| Instant::now() >= d) {
        return Err(StegoError::TimedOut);
    }
    Ok(())
}

/// Embed one bit into one analysed sentence.
///
/// Ineligible sentences and sentences without a parity-matching substitute
/// come back unchanged with `bit_carried == false`. An anchor whose parity
/// already encodes the bit carries it without any rewrite.
pub fn rewrite_sentence(
    sentence: &str,
    tokens: &[Token],
    target_bit: u8,
    analyzer: &dyn LinguisticAnalyzer,
    provider: &dyn SynonymProvider,
    config: &EmbedConfig,
) -> Result<SentenceOutcome, StegoError> {
    let Some(anchor) = select_anchor(tokens) else {
        debug!(sentence, "no anchor token; skipping sentence");
        return Ok(SentenceOutcome::skipped(sentence));
    };

    let Some(replacement) = match_parity(&anchor, target_bit, provider, config.intensity)? else {
        debug!(
            anchor = %anchor.token.text,
            bit = target_bit,
            "no synonym with matching parity; skipping sentence"
        );
        return Ok(SentenceOutcome::skipped(sentence));
    };

    if replacement == anchor.token.text {
        return Ok(SentenceOutcome::carried(sentence.to_string()));
    }

    let text = substitute(sentence, anchor.token, &replacement)?;

    if config.verify_rewrites {
        let retokenized = analyzer.tokenize(&text)?;
        let reads_back = select_anchor(&retokenized).is_some_and(|a| a.token.parity() == target_bit);
        if !reads_back {
            debug!(
                anchor = %anchor.token.text,
                replacement = %replacement,
                "rewrite does not read back the target bit; skipping sentence"
            );
            return Ok(SentenceOutcome::skipped(sentence));
        }
    }

    Ok(SentenceOutcome::carried(text))
}

/// Embed a terminated bitstream into a document.
///
/// `bits` must end with `config.terminator` at a byte boundary (as produced
/// by [`bits::encode_with`]).
///
/// # Errors
/// - [`StegoError::MalformedBitstream`] if `bits` is not terminated.
/// - [`StegoError::InsufficientCarrier`] if the sentences run out before all
///   bits are placed. No partial document is returned.
/// - [`StegoError::Cancelled`] / [`StegoError::TimedOut`] on interruption.
/// - Collaborator errors are propagated unchanged.
pub fn embed_bits<S: AsRef<str> + Sync>(
    sentences: &[S],
    bits: &[u8],
    analyzer: &dyn LinguisticAnalyzer,
    provider: &dyn SynonymProvider,
    config: &EmbedConfig,
) -> Result<Embedded, StegoError> {
    if !bits::ends_with_terminator(bits, &config.terminator) {
        return Err(StegoError::MalformedBitstream { len: bits.len() });
    }

    let bit_length = bits.len();
    let n = sentences.len();
    if n < bit_length {
        warn!(sentences = n, bits = bit_length, "document shorter than bitstream");
        return Err(StegoError::InsufficientCarrier { required: bit_length, embedded: 0 });
    }

    let progress = config.progress.clone().unwrap_or_default();
    progress.init(u32::try_from(bit_length).unwrap_or(u32::MAX));
    check_interrupt(config.deadline, &progress)?;

    let mut analyses = SentenceAnalyses::new(sentences, analyzer, config.order.indices(n));

    let mut emitted: Vec<String> = Vec::with_capacity(bit_length);
    let mut consumed = Vec::new();
    let mut carriers = Vec::with_capacity(bit_length);

    while emitted.len() < bit_length {
        check_interrupt(config.deadline, &progress)?;
        let Some((idx, tokens)) = analyses.next()? else {
            break;
        };
        consumed.push(idx);

        let target_bit = bits[emitted.len()];
        let outcome = rewrite_sentence(
            sentences[idx].as_ref(),
            &tokens,
            target_bit,
            analyzer,
            provider,
            config,
        )?;
        if !outcome.bit_carried {
            continue;
        }

        trace!(sentence = idx, bit = target_bit, position = emitted.len(), "bit embedded");
        emitted.push(outcome.text);
        carriers.push(idx);
        progress.advance();
    }

    if emitted.len() < bit_length {
        warn!(
            embedded = emitted.len(),
            required = bit_length,
            "sentences exhausted before payload was placed"
        );
        return Err(StegoError::InsufficientCarrier {
            required: bit_length,
            embedded: emitted.len(),
        });
    }
    progress.finish();

    // Carrier k goes where the extractor's k-th visit over the output lands.
    let placement = config.order.indices(bit_length);
    let mut output = vec![String::new(); bit_length];
    for (text, &slot) in emitted.into_iter().zip(&placement) {
        output[slot] = text;
    }

    info!(
        bits = bit_length,
        visited = consumed.len(),
        skipped = consumed.len() - carriers.len(),
        "watermark embedded"
    );

    Ok(Embedded {
        sentences: output,
        session: WatermarkSession::new(config.order, bit_length).with_terminator(config.terminator),
        consumed,
        carriers,
    })
}

/// Encode `payload` and embed it into a document.
///
/// # Errors
/// [`StegoError::TerminatorInPayload`] if a payload byte equals the
/// terminator byte, since extraction would stop there. Otherwise as
/// [`embed_bits`].
pub fn embed_message<S: AsRef<str> + Sync>(
    sentences: &[S],
    payload: &[u8],
    analyzer: &dyn LinguisticAnalyzer,
    provider: &dyn SynonymProvider,
    config: &EmbedConfig,
) -> Result<Embedded, StegoError> {
    if let Some(offset) = bits::find_terminator_collision(payload, &config.terminator) {
        return Err(StegoError::TerminatorInPayload { offset });
    }
    let stream = bits::encode_with(payload, &config.terminator);
    embed_bits(sentences, &stream, analyzer, provider, config)
}

/// Embed a UTF-8 text message into a document.
pub fn embed_text<S: AsRef<str> + Sync>(
    sentences: &[S],
    message: &str,
    analyzer: &dyn LinguisticAnalyzer,
    provider: &dyn SynonymProvider,
    config: &EmbedConfig,
) -> Result<Embedded, StegoError> {
    embed_message(sentences, message.as_bytes(), analyzer, provider, config)
}

/// Read the payload bitstream back out of a rewritten document.
///
/// Never calls a synonym provider. Returns the bits with the terminator
/// stripped.
///
/// # Errors
/// - [`StegoError::TruncatedExtraction`] if the sentences run out before the
///   terminator is seen.
/// - [`StegoError::Cancelled`] / [`StegoError::TimedOut`] on interruption.
pub fn extract_bits<S: AsRef<str> + Sync>(
    sentences: &[S],
    analyzer: &dyn LinguisticAnalyzer,
    config: &ExtractConfig,
) -> Result<Vec<u8>, StegoError> {
    let session = &config.session;
    let n = sentences.len();
    if session.bit_length != 0 && session.bit_length != n {
        warn!(
            sentences = n,
            expected = session.bit_length,
            "document length differs from session; traversal may not match"
        );
    }

    let progress = config.progress.clone().unwrap_or_default();
    progress.init(u32::try_from(n).unwrap_or(u32::MAX));
    check_interrupt(config.deadline, &progress)?;

    let mut analyses = SentenceAnalyses::new(sentences, analyzer, session.order.indices(n));
    let mut stream = Vec::new();

    loop {
        check_interrupt(config.deadline, &progress)?;
        let Some((idx, tokens)) = analyses.next()? else {
            break;
        };
        progress.advance();

        let Some(anchor) = select_anchor(&tokens) else {
            debug!(sentence = idx, "no anchor token; skipping sentence");
            continue;
        };
        stream.push(anchor.token.parity());

        if bits::ends_with_terminator(&stream, &session.terminator) {
            stream.truncate(stream.len() - BITS_IN_BYTE);
            progress.finish();
            info!(bits = stream.len(), "watermark extracted");
            return Ok(stream);
        }
    }

    warn!(bits_read = stream.len(), "terminator not found");
    Err(StegoError::TruncatedExtraction { bits_read: stream.len() })
}

/// Extract and decode the payload bytes.
pub fn extract_message<S: AsRef<str> + Sync>(
    sentences: &[S],
    analyzer: &dyn LinguisticAnalyzer,
    config: &ExtractConfig,
) -> Result<Vec<u8>, StegoError> {
    let stream = extract_bits(sentences, analyzer, config)?;
    bits::decode(&stream)
}

/// Extract a UTF-8 text message.
///
/// # Errors
/// [`StegoError::InvalidUtf8`] if the payload is not valid UTF-8, otherwise
/// as [`extract_bits`].
pub fn extract_text<S: AsRef<str> + Sync>(
    sentences: &[S],
    analyzer: &dyn LinguisticAnalyzer,
    config: &ExtractConfig,
) -> Result<String, StegoError> {
    let payload = extract_message(sentences, analyzer, config)?;
    String::from_utf8(payload).map_err(|_| StegoError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{DictionaryAnalyzer, Thesaurus};
    use crate::stego::linguistic::{PartOfSpeech, SynonymClass};

    fn fixtures() -> (DictionaryAnalyzer, Thesaurus) {
        let thesaurus = Thesaurus::new(11)
            .with_filler(32)
            .with_entry("cat", SynonymClass::Noun, &[("kitten", 0.7), ("feline", 0.6)])
            .with_entry("bird", SynonymClass::Noun, &[("sparrow", 0.6)])
            .with_vocabulary(SynonymClass::Noun, &["dog", "wolf", "horse", "badger"])
            .with_vocabulary(SynonymClass::Verb, &["sleeps", "runs", "hunts", "rest", "waits"]);
        let analyzer = DictionaryAnalyzer::new().with_thesaurus(&thesaurus);
        (analyzer, thesaurus)
    }

    #[test]
    fn rewrite_substitutes_subject() {
        let (analyzer, thesaurus) = fixtures();
        let sentence = "The cat sleeps by the fire.";
        let tokens = analyzer.tokenize(sentence).unwrap();
        let out = rewrite_sentence(sentence, &tokens, 0, &analyzer, &thesaurus, &EmbedConfig::default()).unwrap();
        assert!(out.bit_carried);
        assert_eq!(out.text, "The kitten sleeps by the fire.");
    }

    #[test]
    fn rewrite_noop_when_parity_matches() {
        let (analyzer, thesaurus) = fixtures();
        let sentence = "The cat sleeps.";
        let tokens = analyzer.tokenize(sentence).unwrap();
        let out = rewrite_sentence(sentence, &tokens, 1, &analyzer, &thesaurus, &EmbedConfig::default()).unwrap();
        assert!(out.bit_carried);
        assert_eq!(out.text, sentence);
    }

    #[test]
    fn rewrite_skips_ineligible() {
        let (analyzer, thesaurus) = fixtures();
        let sentence = "...";
        let tokens = analyzer.tokenize(sentence).unwrap();
        let out = rewrite_sentence(sentence, &tokens, 0, &analyzer, &thesaurus, &EmbedConfig::default()).unwrap();
        assert!(!out.bit_carried);
        assert_eq!(out.text, sentence);
    }

    #[test]
    fn rewrite_skips_when_reanalysis_disagrees() {
        // Analyzer that never finds an anchor in rewritten text.
        struct Forgetful(DictionaryAnalyzer);
        impl LinguisticAnalyzer for Forgetful {
            fn tokenize(&self, sentence: &str) -> Result<Vec<Token>, StegoError> {
                if sentence.contains("kitten") {
                    Ok(Vec::new())
                } else {
                    self.0.tokenize(sentence)
                }
            }
        }
        let (analyzer, thesaurus) = fixtures();
        let analyzer = Forgetful(analyzer);
        let sentence = "The cat sleeps.";
        let tokens = analyzer.tokenize(sentence).unwrap();

        let out = rewrite_sentence(sentence, &tokens, 0, &analyzer, &thesaurus, &EmbedConfig::default()).unwrap();
        assert!(!out.bit_carried);

        let unchecked = EmbedConfig::default().with_verification(false);
        let out = rewrite_sentence(sentence, &tokens, 0, &analyzer, &thesaurus, &unchecked).unwrap();
        assert!(out.bit_carried);
    }

    #[test]
    fn unverified_embed_keeps_parity_through_capitalization() {
        struct Sharp;
        impl SynonymProvider for Sharp {
            fn synonyms(&self, _: &str, _: SynonymClass, _: f32) -> Result<Vec<String>, StegoError> {
                Ok(vec!["ßx".to_string(), "puss".to_string()])
            }
        }
        let (analyzer, _) = fixtures();
        let analyzer = analyzer.with_words(&["ssx", "puss"], PartOfSpeech::Noun);
        let doc = vec!["Cat sleeps."; 8];
        let config = EmbedConfig::default().with_verification(false);

        let embedded = embed_message(&doc, b"", &analyzer, &Sharp, &config).unwrap();
        assert!(embedded.sentences.iter().all(|s| s == "Puss sleeps."));

        let extracted = extract_message(&embedded.sentences, &analyzer, &ExtractConfig::new(embedded.session));
        assert_eq!(extracted, Ok(Vec::new()));
    }

    #[test]
    fn embed_rejects_unterminated_bits() {
        let (analyzer, thesaurus) = fixtures();
        let doc = vec!["The cat sleeps."; 20];
        let err = embed_bits(&doc, &[1, 0, 1], &analyzer, &thesaurus, &EmbedConfig::default()).unwrap_err();
        assert!(matches!(err, StegoError::MalformedBitstream { len: 3 }));
    }

    #[test]
    fn empty_payload_roundtrip() {
        let (analyzer, thesaurus) = fixtures();
        let doc = vec!["The cat sleeps."; 8];
        let embedded = embed_message(&doc, b"", &analyzer, &thesaurus, &EmbedConfig::default()).unwrap();
        assert_eq!(embedded.sentences.len(), 8);
        let config = ExtractConfig::new(embedded.session);
        assert_eq!(extract_message(&embedded.sentences, &analyzer, &config).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn nul_byte_payload_rejected() {
        let (analyzer, thesaurus) = fixtures();
        let doc = vec!["The cat sleeps."; 40];
        let err = embed_message(&doc, b"a\0", &analyzer, &thesaurus, &EmbedConfig::default()).unwrap_err();
        assert_eq!(err, StegoError::TerminatorInPayload { offset: 1 });
    }

    #[test]
    fn cancelled_before_start() {
        let (analyzer, thesaurus) = fixtures();
        let doc = vec!["The cat sleeps."; 40];
        let progress = Progress::new();
        progress.cancel();
        let config = EmbedConfig::default().with_progress(progress);
        let err = embed_text(&doc, "A", &analyzer, &thesaurus, &config).unwrap_err();
        assert_eq!(err, StegoError::Cancelled);
    }

    #[test]
    fn expired_deadline_times_out() {
        let (analyzer, thesaurus) = fixtures();
        let doc = vec!["The cat sleeps."; 40];
        let config = EmbedConfig::default().with_deadline(Instant::now());
        let err = embed_text(&doc, "A", &analyzer, &thesaurus, &config).unwrap_err();
        assert_eq!(err, StegoError::TimedOut);

        let extract = ExtractConfig::new(WatermarkSession::for_order(TraversalOrder::Sequential))
            .with_deadline(Instant::now());
        assert_eq!(extract_bits(&doc, &analyzer, &extract).unwrap_err(), StegoError::TimedOut);
    }

    #[test]
    fn progress_reaches_total() {
        let (analyzer, thesaurus) = fixtures();
        let doc = vec!["The cat sleeps."; 16];
        let progress = Progress::new();
        let config = EmbedConfig::default().with_progress(progress.clone());
        embed_text(&doc, "A", &analyzer, &thesaurus, &config).unwrap();
        assert_eq!(progress.get(), (16, 16));
    }
}
