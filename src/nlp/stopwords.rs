//! Stopword collaborator
//!
//! Language-keyed stopword sets from the `stop-words` crate, with support for
//! custom additions and removals. Unknown languages are rejected up front.

use crate::errors::{PhraseGraphError, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use stop_words::{get, LANGUAGE};

/// A set-membership query over stopwords
///
/// Words are stored as given, grouped under their lowercase form. Lookups
/// compare lowercase forms by default; case-sensitive lookups need the exact
/// stored spelling.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Lowercase form -> spellings as added
    stopwords: FxHashMap<String, FxHashSet<String>>,
    /// Whether lookups are case-sensitive
    case_sensitive: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// Load the stopword list for a language code or name
    ///
    /// Supported: en, de, fr, es, it, pt, nl, ru, sv, no, da, fi, hu, tr, pl, ar
    pub fn try_new(language: &str) -> Result<Self> {
        let lang = Self::language(language)
            .ok_or_else(|| PhraseGraphError::unsupported_language(language))?;
        let mut filter = Self::empty();
        filter.add_stopwords(get(lang).as_slice());
        Ok(filter)
    }

    /// The English list
    pub fn english() -> Self {
        let mut filter = Self::empty();
        filter.add_stopwords(get(LANGUAGE::English).as_slice());
        filter
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashMap::default(),
            case_sensitive: false,
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let mut filter = Self::empty();
        filter.add_stopwords(words);
        filter
    }

    /// Set case sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            let word = word.as_ref();
            self.stopwords
                .entry(word.to_lowercase())
                .or_default()
                .insert(word.to_string());
        }
    }

    /// Remove stopwords from the filter
    ///
    /// Case-insensitive filters drop every spelling of the word.
    pub fn remove_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            let word = word.as_ref();
            let folded = word.to_lowercase();
            if !self.case_sensitive {
                self.stopwords.remove(&folded);
                continue;
            }
            if let Some(spellings) = self.stopwords.get_mut(&folded) {
                spellings.remove(word);
                if spellings.is_empty() {
                    self.stopwords.remove(&folded);
                }
            }
        }
    }

    /// Check if a word (or a whole phrase string) is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        match self.stopwords.get(&word.to_lowercase()) {
            Some(spellings) => !self.case_sensitive || spellings.contains(word),
            None => false,
        }
    }

    /// Get the number of distinct stopwords, ignoring case
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn language(language: &str) -> Option<LANGUAGE> {
        let lang = match language.trim().to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            _ => return None,
        };
        Some(lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::try_new("en").unwrap();

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The")); // case insensitive
        assert!(filter.is_stopword("of"));
        assert!(!filter.is_stopword("transactions"));
        assert!(!filter.is_stopword("learning"));
    }

    #[test]
    fn test_language_names_accepted() {
        assert!(StopwordFilter::try_new("English").is_ok());
        assert!(StopwordFilter::try_new("de").unwrap().is_stopword("und"));
    }

    #[test]
    fn test_unknown_language_fails_fast() {
        let err = StopwordFilter::try_new("klingon").unwrap_err();
        assert_eq!(
            err,
            PhraseGraphError::UnsupportedLanguage {
                language: "klingon".to_string()
            }
        );
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["custom", "words"]);

        assert!(filter.is_stopword("custom"));
        assert!(!filter.is_stopword("the"));

        filter.add_stopwords(&["extra"]);
        assert!(filter.is_stopword("Extra"));

        filter.remove_stopwords(&["custom"]);
        assert!(!filter.is_stopword("custom"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();

        assert!(!filter.is_stopword("the"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_case_sensitivity() {
        let filter = StopwordFilter::from_list(&["the"]).with_case_sensitive(true);

        assert!(filter.is_stopword("the"));
        assert!(!filter.is_stopword("The"));
    }

    #[test]
    fn test_case_sensitive_keeps_added_spelling() {
        let mut filter = StopwordFilter::empty().with_case_sensitive(true);
        filter.add_stopwords(&["NASA", "Inc"]);

        assert!(filter.is_stopword("NASA"));
        assert!(!filter.is_stopword("nasa"));
        assert!(filter.is_stopword("Inc"));

        filter.remove_stopwords(&["inc"]);
        assert!(filter.is_stopword("Inc"));
        filter.remove_stopwords(&["Inc"]);
        assert!(!filter.is_stopword("Inc"));
    }

    #[test]
    fn test_case_sensitive_language_list() {
        let filter = StopwordFilter::english().with_case_sensitive(true);

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("of"));
        assert!(!filter.is_stopword("The"));
    }

    #[test]
    fn test_case_insensitive_matches_any_spelling() {
        let filter = StopwordFilter::from_list(&["NASA"]);

        assert!(filter.is_stopword("nasa"));
        assert!(filter.is_stopword("NASA"));
    }
}
