//! End-to-end phrase extraction
//!
//! Annotate, build a call-scoped co-occurrence graph, rank its nodes,
//! reconstruct candidate spans and filter them. The extractor itself only
//! holds immutable configuration, so one instance can serve many threads.

use super::filter::CandidateFilter;
use super::reconstruct::PhraseReconstructor;
use crate::errors::{PhraseGraphError, Result};
use crate::graph::builder::{GraphBuilder, GraphOptions};
use crate::graph::csr::CsrGraph;
use crate::nlp::annotator::Annotator;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::rank::pagerank::PageRank;
use crate::rank::{ranked_words, RankedWord, Ranker};
use crate::types::{AnnotatedToken, CandidatePhrase, ExtractorConfig, GraphScope};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Result of phrase extraction including ranking info
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Surviving phrases, largest graph components first
    pub phrases: Vec<CandidatePhrase>,
    /// Word-level ranking of graph nodes
    pub keywords: Vec<RankedWord>,
    /// Candidates produced before filtering
    pub candidates_considered: usize,
    /// Whether the ranker converged
    pub converged: bool,
    /// Number of ranker iterations
    pub iterations: usize,
}

/// Keyphrase extractor over an annotator and a ranker
#[derive(Debug, Clone)]
pub struct PhraseExtractor<A = Tokenizer, R = PageRank> {
    config: ExtractorConfig,
    stopwords: StopwordFilter,
    annotator: A,
    ranker: R,
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseExtractor {
    /// Create an extractor with default config, English stopwords, the
    /// heuristic tokenizer and PageRank
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
            stopwords: StopwordFilter::english(),
            annotator: Tokenizer::new(),
            ranker: PageRank::default(),
        }
    }

    /// Create with custom config
    ///
    /// Fails on invalid settings or an unsupported stopword language.
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;

        let mut stopwords = StopwordFilter::try_new(&config.language)?;
        stopwords.add_stopwords(&config.stopwords);

        let ranker = PageRank::new()
            .with_damping(config.damping)
            .with_max_iterations(config.max_iterations)
            .with_tolerance(config.convergence_threshold);

        Ok(Self {
            config,
            stopwords,
            annotator: Tokenizer::new(),
            ranker,
        })
    }
}

impl<A, R> PhraseExtractor<A, R> {
    /// Replace the annotation collaborator
    pub fn with_annotator<B: Annotator>(self, annotator: B) -> PhraseExtractor<B, R> {
        PhraseExtractor {
            config: self.config,
            stopwords: self.stopwords,
            annotator,
            ranker: self.ranker,
        }
    }

    /// Replace the centrality measure
    pub fn with_ranker<S: Ranker>(self, ranker: S) -> PhraseExtractor<A, S> {
        PhraseExtractor {
            config: self.config,
            stopwords: self.stopwords,
            annotator: self.annotator,
            ranker,
        }
    }

    /// Replace the stopword list
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The active stopword list
    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }
}

impl<A: Annotator, R: Ranker> PhraseExtractor<A, R> {
    /// Extract filtered phrases from raw text
    pub fn extract(&self, text: &str) -> Result<Vec<CandidatePhrase>> {
        Ok(self.extract_with_info(text)?.phrases)
    }

    /// Extract phrases and keywords from raw text
    pub fn extract_with_info(&self, text: &str) -> Result<ExtractionResult> {
        let tokens = self.annotator.annotate(text)?;
        self.extract_tokens(&tokens)
    }

    /// Extract from pre-annotated tokens
    pub fn extract_tokens(&self, tokens: &[AnnotatedToken]) -> Result<ExtractionResult> {
        validate_annotation(tokens)?;

        match self.config.scope {
            GraphScope::Document => self.extract_unit(tokens),
            GraphScope::Sentence => {
                let mut merged = ExtractionResult {
                    converged: true,
                    ..Default::default()
                };
                for sentence in sentence_slices(tokens) {
                    let result = self.extract_unit(sentence)?;
                    merged.phrases.extend(result.phrases);
                    merged.keywords.extend(result.keywords);
                    merged.candidates_considered += result.candidates_considered;
                    merged.converged &= result.converged;
                    merged.iterations = merged.iterations.max(result.iterations);
                }

                merged.keywords.sort_by(|a, b| {
                    b.score
                        .partial_cmp(&a.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                for (i, word) in merged.keywords.iter_mut().enumerate() {
                    word.rank = i + 1;
                }
                Ok(merged)
            }
        }
    }

    /// Extract from many texts in parallel, each call with its own graph
    pub fn extract_batch<S>(&self, texts: &[S]) -> Vec<Result<ExtractionResult>>
    where
        S: AsRef<str> + Sync,
        A: Sync,
        R: Sync,
    {
        texts
            .par_iter()
            .map(|text| self.extract_with_info(text.as_ref()))
            .collect()
    }

    fn extract_unit(&self, tokens: &[AnnotatedToken]) -> Result<ExtractionResult> {
        let options = GraphOptions::default()
            .with_window_size(self.config.window_size)
            .with_node_key(self.config.node_key)
            .with_valid_pos(self.config.valid_pos)
            .with_edge_weighting(self.config.edge_weighting);
        let graph = GraphBuilder::from_tokens_with(tokens, &options);

        tracing::debug!(
            tokens = tokens.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built co-occurrence graph"
        );

        let csr = CsrGraph::from_builder(&graph);
        let scores = self.ranker.scores(&csr)?;
        let keywords = ranked_words(&csr, &scores)?;

        let candidates =
            PhraseReconstructor::new(self.config.window_size).reconstruct(&graph, tokens);
        let candidates_considered = candidates.len();

        let filter = CandidateFilter::new(self.config.filter.clone());
        let phrases = filter.filter(candidates, &self.stopwords);

        tracing::debug!(
            candidates = candidates_considered,
            kept = phrases.len(),
            converged = scores.converged,
            "filtered candidates"
        );

        Ok(ExtractionResult {
            phrases,
            keywords,
            candidates_considered,
            converged: scores.converged,
            iterations: scores.iterations,
        })
    }
}

/// Check collaborator output before building anything from it
///
/// Positions must run `0..n` in order and every dependency span must cover
/// its own token and stay inside the input.
pub fn validate_annotation(tokens: &[AnnotatedToken]) -> Result<()> {
    let n = tokens.len();
    let mut last_sentence = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token.position != i {
            return Err(PhraseGraphError::invalid_annotation(
                i,
                format!("expected position {}, found {}", i, token.position),
            ));
        }
        if !token.span.contains(i) {
            return Err(PhraseGraphError::invalid_annotation(
                i,
                format!(
                    "dependency span [{}, {}] does not cover the token",
                    token.span.start, token.span.end
                ),
            ));
        }
        if token.span.end >= n {
            return Err(PhraseGraphError::invalid_annotation(
                i,
                format!("dependency span ends at {} past the last token", token.span.end),
            ));
        }
        if token.sentence_idx < last_sentence {
            return Err(PhraseGraphError::invalid_annotation(
                i,
                "sentence indices must not decrease",
            ));
        }
        last_sentence = token.sentence_idx;
    }

    Ok(())
}

/// Split tokens into contiguous runs sharing a sentence index
fn sentence_slices(tokens: &[AnnotatedToken]) -> Vec<&[AnnotatedToken]> {
    let mut slices = Vec::new();
    let mut start = 0;
    for i in 1..=tokens.len() {
        if i == tokens.len() || tokens[i].sentence_idx != tokens[start].sentence_idx {
            slices.push(&tokens[start..i]);
            start = i;
        }
    }
    slices
}

/// Extract filtered phrases from pre-annotated tokens
pub fn extract_phrases(
    tokens: &[AnnotatedToken],
    config: &ExtractorConfig,
) -> Result<Vec<CandidatePhrase>> {
    Ok(extract_phrases_with_info(tokens, config)?.phrases)
}

/// Extract phrases with ranking information from pre-annotated tokens
pub fn extract_phrases_with_info(
    tokens: &[AnnotatedToken],
    config: &ExtractorConfig,
) -> Result<ExtractionResult> {
    PhraseExtractor::with_config(config.clone())?.extract_tokens(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::degree::DegreeCentrality;
    use crate::types::{DependencySpan, PosTag};

    fn tok(
        text: &str,
        lemma: &str,
        pos: PosTag,
        sentence_idx: usize,
        position: usize,
        span: (usize, usize),
    ) -> AnnotatedToken {
        AnnotatedToken::new(
            text,
            lemma,
            pos,
            sentence_idx,
            position,
            DependencySpan::new(span.0, span.1),
        )
    }

    fn make_tokens() -> Vec<AnnotatedToken> {
        vec![
            tok("Machine", "machine", PosTag::Noun, 0, 0, (0, 0)),
            tok("learning", "learning", PosTag::Noun, 0, 1, (0, 1)),
            tok("is", "be", PosTag::VerbThirdPerson, 0, 2, (0, 7)),
            tok("a", "a", PosTag::Determiner, 0, 3, (3, 3)),
            tok("subset", "subset", PosTag::Noun, 0, 4, (3, 7)),
            tok("of", "of", PosTag::Preposition, 0, 5, (5, 7)),
            tok("artificial", "artificial", PosTag::Adjective, 0, 6, (6, 6)),
            tok("intelligence", "intelligence", PosTag::Noun, 0, 7, (6, 7)),
        ]
    }

    #[test]
    fn test_extract_tokens() {
        let result = extract_phrases_with_info(&make_tokens(), &ExtractorConfig::default()).unwrap();
        let texts: Vec<&str> = result.phrases.iter().map(|p| p.text.as_str()).collect();

        assert_eq!(texts, vec!["subset of artificial intelligence", "Machine learning"]);
        assert_eq!(result.candidates_considered, 2);
        assert_eq!(result.keywords.len(), 5);
        assert!(result.converged);
    }

    #[test]
    fn test_keywords_are_ranked() {
        let result = extract_phrases_with_info(&make_tokens(), &ExtractorConfig::default()).unwrap();

        for (i, word) in result.keywords.iter().enumerate() {
            assert_eq!(word.rank, i + 1);
        }
        for pair in result.keywords.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_empty_input() {
        let result = extract_phrases_with_info(&[], &ExtractorConfig::default()).unwrap();

        assert!(result.phrases.is_empty());
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_empty_valid_pos_yields_nothing() {
        let config = ExtractorConfig::default().with_valid_pos(&[]);

        let phrases = extract_phrases(&make_tokens(), &config).unwrap();

        assert!(phrases.is_empty());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = PhraseExtractor::with_config(ExtractorConfig::default().with_window_size(0))
            .unwrap_err();
        assert!(err.is_config_error());

        let err = PhraseExtractor::with_config(ExtractorConfig::default().with_language("xx"))
            .unwrap_err();
        assert!(matches!(err, PhraseGraphError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn test_bad_positions_rejected() {
        let mut tokens = make_tokens();
        tokens[3].position = 9;

        let err = PhraseExtractor::new().extract_tokens(&tokens).unwrap_err();

        assert_eq!(
            err,
            PhraseGraphError::InvalidAnnotation {
                position: 3,
                message: "expected position 3, found 9".to_string()
            }
        );
    }

    #[test]
    fn test_span_outside_token_rejected() {
        let mut tokens = make_tokens();
        tokens[4].span = DependencySpan::new(5, 7);

        let err = PhraseExtractor::new().extract_tokens(&tokens).unwrap_err();

        assert!(matches!(err, PhraseGraphError::InvalidAnnotation { position: 4, .. }));
    }

    #[test]
    fn test_span_past_end_rejected() {
        let mut tokens = make_tokens();
        tokens[7].span = DependencySpan::new(6, 12);

        assert!(validate_annotation(&tokens).is_err());
    }

    #[test]
    fn test_extra_stopwords() {
        let config = ExtractorConfig::default().with_stopwords(&["machine learning"]);

        let phrases = extract_phrases(&make_tokens(), &config).unwrap();

        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].text, "subset of artificial intelligence");
    }

    #[test]
    fn test_sentence_scope() {
        let tokens = vec![
            tok("graph", "graph", PosTag::Noun, 0, 0, (0, 1)),
            tok("theory", "theory", PosTag::Noun, 0, 1, (0, 1)),
            tok("network", "network", PosTag::Noun, 1, 2, (2, 3)),
            tok("science", "science", PosTag::Noun, 1, 3, (2, 3)),
        ];

        let document = extract_phrases(&tokens, &ExtractorConfig::default()).unwrap();
        let sentence = extract_phrases(
            &tokens,
            &ExtractorConfig::default().with_scope(GraphScope::Sentence),
        )
        .unwrap();

        let texts: Vec<&str> = sentence.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["graph theory", "network science"]);
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_sentence_slices() {
        let tokens = vec![
            tok("a", "a", PosTag::Noun, 0, 0, (0, 0)),
            tok("b", "b", PosTag::Noun, 1, 1, (1, 1)),
            tok("c", "c", PosTag::Noun, 1, 2, (2, 2)),
        ];

        let slices = sentence_slices(&tokens);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].len(), 2);
        assert!(sentence_slices(&[]).is_empty());
    }

    #[test]
    fn test_custom_ranker() {
        let extractor = PhraseExtractor::new().with_ranker(DegreeCentrality);

        let result = extractor.extract_tokens(&make_tokens()).unwrap();

        assert_eq!(result.phrases.len(), 2);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_closure_annotator() {
        let extractor = PhraseExtractor::new().with_annotator(|_: &str| -> Result<Vec<AnnotatedToken>> {
            Ok(make_tokens())
        });

        let phrases = extractor.extract("ignored").unwrap();

        assert_eq!(phrases.len(), 2);
    }

    #[test]
    fn test_annotator_failure_propagates() {
        let extractor = PhraseExtractor::new().with_annotator(|_: &str| -> Result<Vec<AnnotatedToken>> {
            Err(PhraseGraphError::Annotator {
                message: "model not loaded".to_string(),
            })
        });

        let err = extractor.extract("anything").unwrap_err();

        assert!(matches!(err, PhraseGraphError::Annotator { .. }));
    }

    #[test]
    fn test_text_extraction_is_repeatable() {
        let extractor = PhraseExtractor::new();
        let text = "Graph algorithms rank important words. Keyphrase extraction uses graph algorithms.";

        let first = extractor.extract(text).unwrap();
        let second = extractor.extract(text).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_batch() {
        let extractor = PhraseExtractor::new();
        let texts = vec!["Graph algorithms rank words.", "", "Neural networks learn."];

        let results = extractor.extract_batch(&texts);

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(
            results[0].as_ref().unwrap(),
            &extractor.extract_with_info(texts[0]).unwrap()
        );
    }
}
