//! # rapid_phrasegraph
//!
//! Keyphrase extraction from a word co-occurrence graph over
//! dependency-annotated text.
//!
//! Graph-eligible tokens (nouns and adjectives) become nodes keyed by surface
//! text or lemma. Edges join tokens that fall within a window which is
//! clamped to each token's syntactic subtree, so neighbors from another
//! clause never link. Connected components are mapped back onto contiguous
//! token spans and filtered into candidate phrases; a PageRank pass over the
//! same graph yields a word-level ranking.
//!
//! ## Features
//!
//! - **Dependency-aware windows**: spans from spaCy (or any parser) bound
//!   co-occurrence
//! - **Pluggable collaborators**: annotators, rankers and stopword lists are
//!   injected
//! - **Unicode-aware**: segmentation and edit distance work on Unicode text
//! - **Python bindings**: JSON interface via PyO3 (`python` feature)
//!
//! ```
//! use rapid_phrasegraph::PhraseExtractor;
//!
//! let extractor = PhraseExtractor::new();
//! let phrases = extractor
//!     .extract("Graph algorithms rank important words in long documents.")
//!     .unwrap();
//! for phrase in &phrases {
//!     println!("{}", phrase.text);
//! }
//! ```

pub mod distance;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod phrase;
pub mod rank;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use errors::{PhraseGraphError, Result};
pub use types::{
    AnnotatedToken, CandidatePhrase, DependencySpan, EdgeWeighting, ExtractorConfig,
    FilterConfig, GraphScope, NodeKey, PosTag, Sentence, TagSet,
};

// Re-export main functionality
pub use distance::levenshtein;
pub use graph::{
    builder::{GraphBuilder, GraphOptions},
    components::connected_components,
    csr::CsrGraph,
};
pub use nlp::{
    annotator::{AnnotatedDocument, Annotator},
    stopwords::StopwordFilter,
    tokenizer::Tokenizer,
};
pub use phrase::{
    extraction::{extract_phrases, extract_phrases_with_info, ExtractionResult, PhraseExtractor},
    filter::{CandidateFilter, Rejection},
    reconstruct::PhraseReconstructor,
};
pub use rank::{
    degree::DegreeCentrality, pagerank::PageRank, CentralityScores, RankedWord, Ranker,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
