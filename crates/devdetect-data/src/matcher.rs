//! Signature matching.
//!
//! A signature matches when each of its tokens occurs in the User-Agent
//! after the end of the previous one. Among matching signatures the one with
//! the most token bytes wins; ties go to the signature listed first.

use std::cmp::Reverse;

/// A signature prepared for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSignature {
    /// Position in the data file, reported back to callers.
    pub index: usize,
    /// Row in the dataset's profile table.
    pub profile: usize,
    pub tokens: Vec<String>,
    pub score: usize,
}

impl CompiledSignature {
    pub fn new(index: usize, profile: usize, tokens: Vec<String>) -> Self {
        let score = tokens.iter().map(String::len).sum();
        Self {
            index,
            profile,
            tokens,
            score,
        }
    }

    /// Whether every token occurs in `input`, in order and without overlap.
    pub fn matches(&self, input: &str) -> bool {
        let mut rest = input;
        for token in &self.tokens {
            match rest.find(token.as_str()) {
                Some(position) => rest = &rest[position + token.len()..],
                None => return false,
            }
        }
        true
    }
}

/// Signatures ordered so that the first match is the best match.
#[derive(Debug, Clone, Default)]
pub struct SignatureMatcher {
    ranked: Vec<CompiledSignature>,
}

impl SignatureMatcher {
    pub fn new(mut signatures: Vec<CompiledSignature>) -> Self {
        // Stable sort keeps file order among equal scores.
        signatures.sort_by_key(|s| (Reverse(s.score), s.index));
        Self { ranked: signatures }
    }

    /// The best signature for `input`, if any matches.
    pub fn best_match(&self, input: &str) -> Option<&CompiledSignature> {
        self.ranked.iter().find(|signature| signature.matches(input))
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
