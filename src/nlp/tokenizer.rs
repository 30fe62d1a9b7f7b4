//! Unicode-aware heuristic annotator
//!
//! UAX #29 word and sentence segmentation plus suffix-based Penn tag guessing
//! and a light English lemmatizer. There is no parser here, so every token's
//! dependency span is its whole sentence. For real subtrees, feed spaCy output
//! through [`AnnotatedDocument`](super::annotator::AnnotatedDocument).

use super::annotator::Annotator;
use crate::errors::Result;
use crate::types::{AnnotatedToken, DependencySpan, PosTag, Sentence};
use unicode_segmentation::UnicodeSegmentation;

/// A Unicode-aware tokenizer following UAX #29
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    /// Minimum token length to consider
    min_token_length: usize,
}

impl Tokenizer {
    /// Create a new tokenizer with default settings
    pub fn new() -> Self {
        Self {
            min_token_length: 1,
        }
    }

    /// Set minimum token length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_token_length = min_length;
        self
    }

    /// Tokenize text into sentences and annotated tokens
    pub fn tokenize(&self, text: &str) -> (Vec<Sentence>, Vec<AnnotatedToken>) {
        let mut sentences = Vec::new();
        let mut tokens = Vec::new();

        for (start, end) in self.sentence_boundaries(text) {
            let sent_text = &text[start..end];
            let sent_idx = sentences.len();
            let first = tokens.len();

            for (word_idx, word) in sent_text.unicode_words().enumerate() {
                if word.chars().count() < self.min_token_length {
                    continue;
                }

                let pos = self.guess_pos(word, word_idx == 0);
                let lemma = self.basic_lemmatize(word);
                let position = tokens.len();
                tokens.push(AnnotatedToken::new(
                    word,
                    lemma,
                    pos,
                    sent_idx,
                    position,
                    DependencySpan::single(position),
                ));
            }

            if tokens.len() == first {
                continue;
            }

            // Without a parser the subtree of every token is its sentence
            let span = DependencySpan::new(first, tokens.len() - 1);
            for token in &mut tokens[first..] {
                token.span = span;
            }

            let mut sentence = Sentence::new(sent_text.trim(), start, end, sent_idx);
            sentence.start_token = first;
            sentence.end_token = tokens.len();
            sentences.push(sentence);
        }

        (sentences, tokens)
    }

    /// Find sentence boundaries in text
    fn sentence_boundaries(&self, text: &str) -> Vec<(usize, usize)> {
        let mut boundaries = Vec::new();

        for (idx, segment) in text.split_sentence_bound_indices() {
            if !segment.trim().is_empty() {
                boundaries.push((idx, idx + segment.len()));
            }
        }

        boundaries
    }

    /// Basic heuristic Penn tagging (for when spaCy is not available)
    ///
    /// This is intentionally simple - for accurate tags, use spaCy preprocessing.
    fn guess_pos(&self, word: &str, sentence_initial: bool) -> PosTag {
        let lower = word.to_lowercase();

        if let Some(pos) = self.function_word_pos(&lower) {
            return pos;
        }

        if word
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return PosTag::Cardinal;
        }

        let capitalized = word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
        if capitalized && !sentence_initial {
            return if lower.ends_with('s') && !lower.ends_with("ss") {
                PosTag::ProperNounPlural
            } else {
                PosTag::ProperNoun
            };
        }
        if word.chars().count() > 1 && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit()) {
            // Acronyms such as "NLP" or "Q4"
            return PosTag::ProperNoun;
        }

        if lower.ends_with("est") && lower.chars().count() > 5 {
            return PosTag::AdjectiveSuperlative;
        }

        if lower.ends_with("ful")
            || lower.ends_with("less")
            || lower.ends_with("ous")
            || lower.ends_with("ive")
            || lower.ends_with("able")
            || lower.ends_with("ible")
            || lower.ends_with("al")
            || lower.ends_with("ic")
        {
            return PosTag::Adjective;
        }

        if lower.ends_with("ing") {
            return PosTag::VerbGerund;
        }
        if lower.ends_with("ed") {
            return PosTag::VerbPast;
        }
        if lower.ends_with("ize") {
            return PosTag::Verb;
        }

        if lower.ends_with("ly") {
            return PosTag::Adverb;
        }

        if lower.ends_with('s') && !lower.ends_with("ss") && lower.chars().count() > 3 {
            return PosTag::NounPlural;
        }

        if capitalized {
            // Sentence-initial capitalized word with no other cue
            return PosTag::ProperNoun;
        }

        // Default to noun (most content words are nouns)
        PosTag::Noun
    }

    fn function_word_pos(&self, lower: &str) -> Option<PosTag> {
        let pos = match lower {
            "a" | "an" | "the" | "this" | "that" | "these" | "those" | "some" | "any" | "each"
            | "every" | "no" => PosTag::Determiner,
            "my" | "your" | "his" | "her" | "its" | "our" | "their" => PosTag::PossessivePronoun,
            "and" | "or" | "but" | "nor" | "yet" => PosTag::CoordinatingConjunction,
            "of" | "in" | "for" | "on" | "with" | "at" | "from" | "by" | "about" | "as"
            | "into" | "like" | "through" | "after" | "over" | "between" | "out" | "against"
            | "during" | "without" | "before" | "under" | "around" | "among" | "near" | "if"
            | "because" | "while" | "though" | "although" | "unless" | "until" | "since" => {
                PosTag::Preposition
            }
            "to" => PosTag::To,
            "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
            | "myself" | "yourself" | "ourselves" | "themselves" => PosTag::Pronoun,
            "is" | "are" | "am" => PosTag::VerbPresent,
            "was" | "were" => PosTag::VerbPast,
            "be" | "do" => PosTag::Verb,
            "been" => PosTag::VerbPastParticiple,
            "has" | "does" => PosTag::VerbThirdPerson,
            "have" => PosTag::VerbPresent,
            "can" | "could" | "will" | "would" | "shall" | "should" | "may" | "might" | "must" => {
                PosTag::Modal
            }
            "which" | "whatever" => PosTag::WhDeterminer,
            "who" | "what" | "whom" => PosTag::WhPronoun,
            "when" | "where" | "why" | "how" => PosTag::WhAdverb,
            "not" | "very" | "also" | "too" => PosTag::Adverb,
            "there" => PosTag::Existential,
            "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
            | "ten" | "eleven" | "twelve" | "twenty" | "fifty" | "hundred" | "thousand"
            | "million" | "billion" | "trillion" | "dozen" => PosTag::Cardinal,
            _ => return None,
        };
        Some(pos)
    }

    /// Basic lemmatization (for when spaCy is not available)
    ///
    /// This handles simple English morphology. For accurate lemmas, use spaCy.
    fn basic_lemmatize(&self, word: &str) -> String {
        let lower = word.to_lowercase();

        if lower.ends_with("ies") && lower.len() > 4 {
            return format!("{}y", &lower[..lower.len() - 3]);
        }
        if lower.ends_with("es") && lower.len() > 3 {
            let stem = &lower[..lower.len() - 2];
            if stem.ends_with("ss")
                || stem.ends_with("sh")
                || stem.ends_with("ch")
                || stem.ends_with('x')
                || stem.ends_with('o')
            {
                return stem.to_string();
            }
        }
        if lower.ends_with('s') && lower.len() > 3 && !lower.ends_with("ss") {
            return lower[..lower.len() - 1].to_string();
        }
        if lower.ends_with("ing") && lower.len() > 5 {
            let stem = &lower[..lower.len() - 3];
            // Doubled consonant (running -> run)
            let chars: Vec<char> = stem.chars().collect();
            if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
                return chars[..chars.len() - 1].iter().collect();
            }
            return stem.to_string();
        }
        if lower.ends_with("ed") && lower.len() > 4 {
            if lower.ends_with("ied") {
                return format!("{}y", &lower[..lower.len() - 3]);
            }
            let stem = &lower[..lower.len() - 2];
            let chars: Vec<char> = stem.chars().collect();
            if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
                return chars[..chars.len() - 1].iter().collect();
            }
            return stem.to_string();
        }

        lower
    }
}

impl Annotator for Tokenizer {
    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>> {
        Ok(self.tokenize(text).1)
    }
}
