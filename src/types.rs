//! Core types for rapid_phrasegraph
//!
//! This module defines the fundamental data structures used throughout the library,
//! including part-of-speech tags, annotated tokens, candidate phrases, and configuration.

use crate::errors::{PhraseGraphError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Penn Treebank part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PosTag {
    /// CC
    CoordinatingConjunction,
    /// CD
    Cardinal,
    /// DT
    Determiner,
    /// EX
    Existential,
    /// FW
    ForeignWord,
    /// IN
    Preposition,
    /// JJ
    Adjective,
    /// JJR
    AdjectiveComparative,
    /// JJS
    AdjectiveSuperlative,
    /// LS
    ListMarker,
    /// MD
    Modal,
    /// NN
    Noun,
    /// NNS
    NounPlural,
    /// NNP
    ProperNoun,
    /// NNPS
    ProperNounPlural,
    /// PDT
    Predeterminer,
    /// POS
    PossessiveEnding,
    /// PRP
    Pronoun,
    /// PRP$
    PossessivePronoun,
    /// RB
    Adverb,
    /// RBR
    AdverbComparative,
    /// RBS
    AdverbSuperlative,
    /// RP
    Particle,
    /// SYM
    Symbol,
    /// TO
    To,
    /// UH
    Interjection,
    /// VB
    Verb,
    /// VBD
    VerbPast,
    /// VBG
    VerbGerund,
    /// VBN
    VerbPastParticiple,
    /// VBP
    VerbPresent,
    /// VBZ
    VerbThirdPerson,
    /// WDT
    WhDeterminer,
    /// WP
    WhPronoun,
    /// WP$
    WhPossessive,
    /// WRB
    WhAdverb,
    /// Any punctuation tag (`.`, `,`, `:`, `HYPH`, brackets, quotes)
    Punctuation,
    /// Anything the tagger emits that is not listed above
    Other,
}

impl PosTag {
    /// Every tag, in discriminant order
    pub const ALL: [PosTag; 38] = [
        PosTag::CoordinatingConjunction,
        PosTag::Cardinal,
        PosTag::Determiner,
        PosTag::Existential,
        PosTag::ForeignWord,
        PosTag::Preposition,
        PosTag::Adjective,
        PosTag::AdjectiveComparative,
        PosTag::AdjectiveSuperlative,
        PosTag::ListMarker,
        PosTag::Modal,
        PosTag::Noun,
        PosTag::NounPlural,
        PosTag::ProperNoun,
        PosTag::ProperNounPlural,
        PosTag::Predeterminer,
        PosTag::PossessiveEnding,
        PosTag::Pronoun,
        PosTag::PossessivePronoun,
        PosTag::Adverb,
        PosTag::AdverbComparative,
        PosTag::AdverbSuperlative,
        PosTag::Particle,
        PosTag::Symbol,
        PosTag::To,
        PosTag::Interjection,
        PosTag::Verb,
        PosTag::VerbPast,
        PosTag::VerbGerund,
        PosTag::VerbPastParticiple,
        PosTag::VerbPresent,
        PosTag::VerbThirdPerson,
        PosTag::WhDeterminer,
        PosTag::WhPronoun,
        PosTag::WhPossessive,
        PosTag::WhAdverb,
        PosTag::Punctuation,
        PosTag::Other,
    ];

    /// Check if this tag is a common or proper noun
    pub fn is_noun(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::NounPlural | PosTag::ProperNoun | PosTag::ProperNounPlural
        )
    }

    /// Parse a Penn Treebank tag (as emitted by spaCy's `Token.tag_`)
    pub fn from_penn(tag: &str) -> Self {
        match tag.trim() {
            "CC" => PosTag::CoordinatingConjunction,
            "CD" => PosTag::Cardinal,
            "DT" => PosTag::Determiner,
            "EX" => PosTag::Existential,
            "FW" => PosTag::ForeignWord,
            "IN" => PosTag::Preposition,
            "JJ" => PosTag::Adjective,
            "JJR" => PosTag::AdjectiveComparative,
            "JJS" => PosTag::AdjectiveSuperlative,
            "LS" => PosTag::ListMarker,
            "MD" => PosTag::Modal,
            "NN" => PosTag::Noun,
            "NNS" => PosTag::NounPlural,
            "NNP" => PosTag::ProperNoun,
            "NNPS" => PosTag::ProperNounPlural,
            "PDT" => PosTag::Predeterminer,
            "POS" => PosTag::PossessiveEnding,
            "PRP" => PosTag::Pronoun,
            "PRP$" => PosTag::PossessivePronoun,
            "RB" => PosTag::Adverb,
            "RBR" => PosTag::AdverbComparative,
            "RBS" => PosTag::AdverbSuperlative,
            "RP" => PosTag::Particle,
            "SYM" | "$" | "#" => PosTag::Symbol,
            "TO" => PosTag::To,
            "UH" => PosTag::Interjection,
            "VB" => PosTag::Verb,
            "VBD" => PosTag::VerbPast,
            "VBG" => PosTag::VerbGerund,
            "VBN" => PosTag::VerbPastParticiple,
            "VBP" => PosTag::VerbPresent,
            "VBZ" => PosTag::VerbThirdPerson,
            "WDT" => PosTag::WhDeterminer,
            "WP" => PosTag::WhPronoun,
            "WP$" => PosTag::WhPossessive,
            "WRB" => PosTag::WhAdverb,
            "." | "," | ":" | "``" | "''" | "\"" | "-LRB-" | "-RRB-" | "HYPH" | "NFP" => {
                PosTag::Punctuation
            }
            _ => PosTag::Other,
        }
    }

    /// Get the Penn Treebank tag string for this enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::CoordinatingConjunction => "CC",
            PosTag::Cardinal => "CD",
            PosTag::Determiner => "DT",
            PosTag::Existential => "EX",
            PosTag::ForeignWord => "FW",
            PosTag::Preposition => "IN",
            PosTag::Adjective => "JJ",
            PosTag::AdjectiveComparative => "JJR",
            PosTag::AdjectiveSuperlative => "JJS",
            PosTag::ListMarker => "LS",
            PosTag::Modal => "MD",
            PosTag::Noun => "NN",
            PosTag::NounPlural => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::ProperNounPlural => "NNPS",
            PosTag::Predeterminer => "PDT",
            PosTag::PossessiveEnding => "POS",
            PosTag::Pronoun => "PRP",
            PosTag::PossessivePronoun => "PRP$",
            PosTag::Adverb => "RB",
            PosTag::AdverbComparative => "RBR",
            PosTag::AdverbSuperlative => "RBS",
            PosTag::Particle => "RP",
            PosTag::Symbol => "SYM",
            PosTag::To => "TO",
            PosTag::Interjection => "UH",
            PosTag::Verb => "VB",
            PosTag::VerbPast => "VBD",
            PosTag::VerbGerund => "VBG",
            PosTag::VerbPastParticiple => "VBN",
            PosTag::VerbPresent => "VBP",
            PosTag::VerbThirdPerson => "VBZ",
            PosTag::WhDeterminer => "WDT",
            PosTag::WhPronoun => "WP",
            PosTag::WhPossessive => "WP$",
            PosTag::WhAdverb => "WRB",
            PosTag::Punctuation => ".",
            PosTag::Other => "XX",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PosTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PosTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(PosTag::from_penn(&tag))
    }
}

// ============================================================================
// Tag sets
// ============================================================================

/// A set of POS tags backed by a bit mask over the tag discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PosTag>", into = "Vec<PosTag>")]
pub struct TagSet {
    bits: u64,
}

impl TagSet {
    /// The empty set
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Tags whose tokens become graph nodes: NN, NNS, NNP, NNPS, JJ, JJS
    pub fn graph_eligible() -> Self {
        Self::from_tags(&[
            PosTag::Noun,
            PosTag::NounPlural,
            PosTag::ProperNoun,
            PosTag::ProperNounPlural,
            PosTag::Adjective,
            PosTag::AdjectiveSuperlative,
        ])
    }

    /// Common and proper nouns: NN, NNS, NNP, NNPS
    pub fn nouns() -> Self {
        Self::from_tags(&[
            PosTag::Noun,
            PosTag::NounPlural,
            PosTag::ProperNoun,
            PosTag::ProperNounPlural,
        ])
    }

    /// Build a set from a slice of tags
    pub fn from_tags(tags: &[PosTag]) -> Self {
        tags.iter().copied().collect()
    }

    fn bit(tag: PosTag) -> u64 {
        1u64 << (tag as u8)
    }

    /// Add a tag
    pub fn insert(&mut self, tag: PosTag) {
        self.bits |= Self::bit(tag);
    }

    /// Remove a tag
    pub fn remove(&mut self, tag: PosTag) {
        self.bits &= !Self::bit(tag);
    }

    /// Check membership
    pub fn contains(&self, tag: PosTag) -> bool {
        self.bits & Self::bit(tag) != 0
    }

    /// Check whether any of `tags` is in the set
    pub fn intersects(&self, tags: &[PosTag]) -> bool {
        tags.iter().any(|&t| self.contains(t))
    }

    /// Number of tags in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over the tags in discriminant order
    pub fn iter(&self) -> impl Iterator<Item = PosTag> + '_ {
        PosTag::ALL.iter().copied().filter(|&t| self.contains(t))
    }
}

impl FromIterator<PosTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = PosTag>>(iter: I) -> Self {
        let mut set = TagSet::empty();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl From<Vec<PosTag>> for TagSet {
    fn from(tags: Vec<PosTag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<PosTag> {
    fn from(set: TagSet) -> Self {
        set.iter().collect()
    }
}

// ============================================================================
// Annotated tokens
// ============================================================================

/// Inclusive range of global token indices covered by a token's syntactic subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencySpan {
    /// Left edge (inclusive)
    pub start: usize,
    /// Right edge (inclusive)
    pub end: usize,
}

impl DependencySpan {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A span covering a single token
    pub fn single(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Check whether the span covers `position`
    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }
}

/// A token produced by the annotation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// The surface form (original text)
    pub text: String,
    /// The lemmatized form
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Sentence index this token belongs to
    pub sentence_idx: usize,
    /// Global token index, 0-based and monotonic across the whole input
    pub position: usize,
    /// Extent of the token's syntactic subtree
    pub span: DependencySpan,
}

impl AnnotatedToken {
    /// Create a new token
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PosTag,
        sentence_idx: usize,
        position: usize,
        span: DependencySpan,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            sentence_idx,
            position,
            span,
        }
    }

    /// The canonical graph key of this token
    pub fn key(&self, node_key: NodeKey) -> &str {
        match node_key {
            NodeKey::Surface => &self.text,
            NodeKey::Lemma => &self.lemma,
        }
    }
}

// ============================================================================
// Candidate phrases
// ============================================================================

/// A contiguous slice of the token sequence proposed as a keyphrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePhrase {
    /// Surface words joined with spaces
    pub text: String,
    /// Lemmas joined with spaces
    pub text_lemma: String,
    /// Per-token surface strings
    pub words: Vec<String>,
    /// Per-token lemma strings
    pub lemmas: Vec<String>,
    /// Per-token tags
    pub pos: Vec<PosTag>,
    /// Start token index (inclusive)
    pub start: usize,
    /// End token index (exclusive)
    pub end: usize,
}

/// A sentence from the input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text
    pub text: String,
    /// Start character offset in original text
    pub start: usize,
    /// End character offset in original text
    pub end: usize,
    /// Sentence index within the document
    pub index: usize,
    /// Start token index (inclusive)
    pub start_token: usize,
    /// End token index (exclusive)
    pub end_token: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
            start_token: 0,
            end_token: 0,
        }
    }
}

// ============================================================================
// Graph options
// ============================================================================

/// Which token string identifies a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKey {
    /// Surface text, case-sensitive
    #[default]
    Surface,
    /// Lemma supplied by the annotator
    Lemma,
}

impl NodeKey {
    /// Map the boolean "normalize" switch onto a key kind
    pub fn from_normalize(normalize: bool) -> Self {
        if normalize {
            NodeKey::Lemma
        } else {
            NodeKey::Surface
        }
    }
}

impl FromStr for NodeKey {
    type Err = PhraseGraphError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "surface" | "text" => Ok(NodeKey::Surface),
            "lemma" => Ok(NodeKey::Lemma),
            other => Err(PhraseGraphError::invalid_config(format!(
                "unknown normalization method '{}' (expected 'surface' or 'lemma')",
                other
            ))),
        }
    }
}

/// How the weight of a co-occurrence edge is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// Edit distance between the two node keys; a repeated proposal overwrites
    #[default]
    EditDistance,
    /// Number of times the pair co-occurred
    Cooccurrence,
    /// Every edge weighs 1.0
    Binary,
}

impl FromStr for EdgeWeighting {
    type Err = PhraseGraphError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "edit_distance" | "levenshtein" => Ok(EdgeWeighting::EditDistance),
            "cooccurrence" | "count" => Ok(EdgeWeighting::Cooccurrence),
            "binary" => Ok(EdgeWeighting::Binary),
            other => Err(PhraseGraphError::invalid_config(format!(
                "unknown edge weighting '{}'",
                other
            ))),
        }
    }
}

/// Unit over which a graph is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphScope {
    /// One graph for the whole input
    #[default]
    Document,
    /// A fresh graph for every sentence
    Sentence,
}

impl FromStr for GraphScope {
    type Err = PhraseGraphError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "document" | "doc" => Ok(GraphScope::Document),
            "sentence" => Ok(GraphScope::Sentence),
            other => Err(PhraseGraphError::invalid_config(format!(
                "unknown graph scope '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Admissibility rules applied to reconstructed candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Minimum number of characters across all words (spaces excluded)
    pub min_length: usize,
    /// Maximum number of words
    pub max_ngrams: usize,
    /// Characters tolerated inside words by the alphanumeric check
    pub valid_punct: String,
    /// Reject words that are not alphanumeric after removing `valid_punct`
    pub alnum_only: bool,
    /// A candidate must carry at least one of these tags
    pub required_pos: TagSet,
    /// A candidate must carry none of these tags
    pub pos_blacklist: TagSet,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_ngrams: 5,
            valid_punct: "-".to_string(),
            alnum_only: true,
            required_pos: TagSet::nouns(),
            pos_blacklist: TagSet::empty(),
        }
    }
}

impl FilterConfig {
    /// Builder method: set minimum character length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Builder method: set maximum word count
    pub fn with_max_ngrams(mut self, max_ngrams: usize) -> Self {
        self.max_ngrams = max_ngrams;
        self
    }

    /// Builder method: set tolerated punctuation
    pub fn with_valid_punct(mut self, valid_punct: impl Into<String>) -> Self {
        self.valid_punct = valid_punct.into();
        self
    }

    /// Builder method: toggle the alphanumeric check
    pub fn with_alnum_only(mut self, alnum_only: bool) -> Self {
        self.alnum_only = alnum_only;
        self
    }

    /// Builder method: set blacklisted tags
    pub fn with_pos_blacklist(mut self, tags: &[PosTag]) -> Self {
        self.pos_blacklist = TagSet::from_tags(tags);
        self
    }
}

/// Configuration for phrase extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Window size for co-occurrence edges
    pub window_size: usize,
    /// Surface text or lemma as the node key
    pub node_key: NodeKey,
    /// Tags whose tokens become graph nodes
    pub valid_pos: TagSet,
    /// Edge weight computation
    pub edge_weighting: EdgeWeighting,
    /// One graph per document or per sentence
    pub scope: GraphScope,
    /// Damping factor for PageRank (typically 0.85)
    pub damping: f64,
    /// Maximum iterations for PageRank convergence
    pub max_iterations: usize,
    /// Per-node convergence tolerance
    pub convergence_threshold: f64,
    /// Language code for stopwords (e.g., "en", "de", "fr")
    pub language: String,
    /// Optional additional stopwords (extends the built-in list)
    pub stopwords: Vec<String>,
    /// Candidate admissibility rules
    pub filter: FilterConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            node_key: NodeKey::Surface,
            valid_pos: TagSet::graph_eligible(),
            edge_weighting: EdgeWeighting::EditDistance,
            scope: GraphScope::Document,
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-4,
            language: "en".to_string(),
            stopwords: Vec::new(),
            filter: FilterConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(PhraseGraphError::invalid_config("window_size must be >= 1"));
        }

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(PhraseGraphError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(PhraseGraphError::invalid_config("max_iterations must be > 0"));
        }

        if self.convergence_threshold <= 0.0 {
            return Err(PhraseGraphError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        if self.filter.max_ngrams == 0 {
            return Err(PhraseGraphError::invalid_config("max_ngrams must be > 0"));
        }

        if self.language.trim().is_empty() {
            return Err(PhraseGraphError::invalid_config("language must not be empty"));
        }

        Ok(())
    }

    /// Builder method: set window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Builder method: key nodes by lemma (`true`) or surface text (`false`)
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.node_key = NodeKey::from_normalize(normalize);
        self
    }

    /// Builder method: set node key kind
    pub fn with_node_key(mut self, node_key: NodeKey) -> Self {
        self.node_key = node_key;
        self
    }

    /// Builder method: set graph-eligible tags
    pub fn with_valid_pos(mut self, tags: &[PosTag]) -> Self {
        self.valid_pos = TagSet::from_tags(tags);
        self
    }

    /// Builder method: set edge weighting
    pub fn with_edge_weighting(mut self, weighting: EdgeWeighting) -> Self {
        self.edge_weighting = weighting;
        self
    }

    /// Builder method: set graph scope
    pub fn with_scope(mut self, scope: GraphScope) -> Self {
        self.scope = scope;
        self
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: add extra stopwords
    pub fn with_stopwords(mut self, words: &[&str]) -> Self {
        self.stopwords = words.iter().map(|w| w.to_string()).collect();
        self
    }

    /// Builder method: set filter rules
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}
