//! Candidate admissibility rules
//!
//! A candidate survives when none of the rejection predicates hold. The
//! filter consumes its input and returns the survivors in their original
//! relative order.

use crate::nlp::stopwords::StopwordFilter;
use crate::types::{CandidatePhrase, FilterConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The full text or full lemma text is a stopword
    Stopword,
    /// No tag from the required (noun) set
    MissingNoun,
    /// Carries a blacklisted tag
    BlacklistedPos,
    /// Fewer characters than `min_length`
    TooShort,
    /// More words than `max_ngrams`
    TooManyWords,
    /// A word is not alphanumeric once `valid_punct` is removed
    NonAlphanumeric,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Stopword => "stopword",
            Rejection::MissingNoun => "missing noun",
            Rejection::BlacklistedPos => "blacklisted tag",
            Rejection::TooShort => "too short",
            Rejection::TooManyWords => "too many words",
            Rejection::NonAlphanumeric => "non-alphanumeric",
        };
        f.write_str(reason)
    }
}

/// Applies [`FilterConfig`] to reconstructed candidates
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    config: FilterConfig,
}

impl CandidateFilter {
    /// Create a filter from its rules
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// The active rules
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Keep the admissible candidates, preserving order
    pub fn filter(
        &self,
        candidates: Vec<CandidatePhrase>,
        stopwords: &StopwordFilter,
    ) -> Vec<CandidatePhrase> {
        candidates
            .into_iter()
            .filter(|candidate| match self.rejection(candidate, stopwords) {
                Some(reason) => {
                    tracing::trace!(
                        phrase = %candidate.text,
                        start = candidate.start,
                        %reason,
                        "rejected candidate"
                    );
                    false
                }
                None => true,
            })
            .collect()
    }

    /// The first rule `candidate` violates, if any
    pub fn rejection(
        &self,
        candidate: &CandidatePhrase,
        stopwords: &StopwordFilter,
    ) -> Option<Rejection> {
        let config = &self.config;

        if stopwords.is_stopword(&candidate.text) || stopwords.is_stopword(&candidate.text_lemma) {
            return Some(Rejection::Stopword);
        }

        if !candidate.pos.iter().any(|&tag| config.required_pos.contains(tag)) {
            return Some(Rejection::MissingNoun);
        }

        if config.pos_blacklist.intersects(&candidate.pos) {
            return Some(Rejection::BlacklistedPos);
        }

        let char_count: usize = candidate.words.iter().map(|w| w.chars().count()).sum();
        if candidate.words.is_empty() || char_count < config.min_length {
            return Some(Rejection::TooShort);
        }

        if candidate.words.len() > config.max_ngrams {
            return Some(Rejection::TooManyWords);
        }

        if config.alnum_only
            && !candidate
                .words
                .iter()
                .all(|w| is_alphanumeric(w, &config.valid_punct))
        {
            return Some(Rejection::NonAlphanumeric);
        }

        None
    }
}

/// Whether `word` is non-empty and alphanumeric after removing `valid_punct`
pub fn is_alphanumeric(word: &str, valid_punct: &str) -> bool {
    let mut stripped = word.chars().filter(|c| !valid_punct.contains(*c)).peekable();
    stripped.peek().is_some() && stripped.all(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosTag;

    fn candidate(words: &[&str], pos: &[PosTag]) -> CandidatePhrase {
        CandidatePhrase {
            text: words.join(" "),
            text_lemma: words.join(" ").to_lowercase(),
            words: words.iter().map(|w| w.to_string()).collect(),
            lemmas: words.iter().map(|w| w.to_lowercase()).collect(),
            pos: pos.to_vec(),
            start: 0,
            end: words.len(),
        }
    }

    fn english() -> StopwordFilter {
        StopwordFilter::try_new("en").unwrap()
    }

    #[test]
    fn test_short_candidate_rejected() {
        let filter = CandidateFilter::default();
        let ai = candidate(&["AI"], &[PosTag::ProperNoun]);

        assert_eq!(
            filter.rejection(&ai, &StopwordFilter::empty()),
            Some(Rejection::TooShort)
        );
    }

    #[test]
    fn test_adjective_only_rejected() {
        let filter = CandidateFilter::default();
        let adj = candidate(
            &["remarkably", "beautiful"],
            &[PosTag::Adjective, PosTag::Adjective],
        );

        assert_eq!(filter.rejection(&adj, &english()), Some(Rejection::MissingNoun));
    }

    #[test]
    fn test_stopword_rejected() {
        let filter = CandidateFilter::default();
        let of = candidate(&["of"], &[PosTag::Noun]);

        assert_eq!(filter.rejection(&of, &english()), Some(Rejection::Stopword));
    }

    #[test]
    fn test_lemma_stopword_rejected() {
        let filter = CandidateFilter::default();
        let mut thing = candidate(&["Xyzzy"], &[PosTag::Noun]);
        thing.text_lemma = "the".to_string();

        assert_eq!(filter.rejection(&thing, &english()), Some(Rejection::Stopword));
    }

    #[test]
    fn test_blacklist() {
        let filter = CandidateFilter::new(
            FilterConfig::default().with_pos_blacklist(&[PosTag::Cardinal]),
        );
        let numeric = candidate(
            &["23", "million", "transactions"],
            &[PosTag::Cardinal, PosTag::Cardinal, PosTag::NounPlural],
        );

        assert_eq!(
            filter.rejection(&numeric, &english()),
            Some(Rejection::BlacklistedPos)
        );
        assert_eq!(CandidateFilter::default().rejection(&numeric, &english()), None);
    }

    #[test]
    fn test_max_ngrams() {
        let filter = CandidateFilter::new(FilterConfig::default().with_max_ngrams(2));
        let long = candidate(
            &["graph", "ranking", "engine"],
            &[PosTag::Noun, PosTag::Noun, PosTag::Noun],
        );

        assert_eq!(filter.rejection(&long, &english()), Some(Rejection::TooManyWords));
    }

    #[test]
    fn test_alphanumeric_check() {
        let filter = CandidateFilter::default();
        let hyphen = candidate(&["state-of-the-art", "model"], &[PosTag::Adjective, PosTag::Noun]);
        let symbol = candidate(&["C++", "compiler"], &[PosTag::Noun, PosTag::Noun]);

        assert_eq!(filter.rejection(&hyphen, &english()), None);
        assert_eq!(
            filter.rejection(&symbol, &english()),
            Some(Rejection::NonAlphanumeric)
        );

        let lenient = CandidateFilter::new(FilterConfig::default().with_alnum_only(false));
        assert_eq!(lenient.rejection(&symbol, &english()), None);
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(is_alphanumeric("graph", "-"));
        assert!(is_alphanumeric("e-mail", "-"));
        assert!(is_alphanumeric("Straße", "-"));
        assert!(!is_alphanumeric("-", "-"));
        assert!(!is_alphanumeric("", "-"));
        assert!(!is_alphanumeric("'s", "-"));
    }

    #[test]
    fn test_empty_candidate_does_not_panic() {
        let filter = CandidateFilter::default();
        let empty = CandidatePhrase {
            text: String::new(),
            text_lemma: String::new(),
            words: vec![],
            lemmas: vec![],
            pos: vec![],
            start: 0,
            end: 0,
        };

        assert!(filter.rejection(&empty, &StopwordFilter::empty()).is_some());
    }

    #[test]
    fn test_filter_preserves_order() {
        let filter = CandidateFilter::default();
        let input = vec![
            candidate(&["transactions"], &[PosTag::NounPlural]),
            candidate(&["AI"], &[PosTag::ProperNoun]),
            candidate(
                &["Bank", "of", "America"],
                &[PosTag::ProperNoun, PosTag::Preposition, PosTag::ProperNoun],
            ),
        ];

        let survivors = filter.filter(input, &english());
        let texts: Vec<&str> = survivors.iter().map(|c| c.text.as_str()).collect();

        assert_eq!(texts, vec!["transactions", "Bank of America"]);
    }
}
