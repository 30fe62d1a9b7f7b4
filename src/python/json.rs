//! JSON interface for pre-annotated documents and batch processing
//!
//! Documents carry spaCy-style tokens (Penn tag plus `left_edge` /
//! `right_edge` subtree bounds), so the dependency clamp works on real parses
//! without any Python objects crossing the boundary.

use crate::errors::{PhraseGraphError, Result};
use crate::nlp::annotator::JsonToken;
use crate::phrase::extraction::{extract_phrases_with_info, ExtractionResult};
use crate::types::{AnnotatedToken, ExtractorConfig};
use pyo3::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Input document from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct JsonDocument {
    pub tokens: Vec<JsonToken>,
    #[serde(default)]
    pub config: Option<ExtractorConfig>,
}

/// Output phrase for JSON
#[derive(Debug, Clone, Serialize)]
pub struct JsonPhrase {
    pub text: String,
    pub lemma: String,
    pub pos: Vec<String>,
    pub start: usize,
    pub end: usize,
}

/// Output keyword for JSON
#[derive(Debug, Clone, Serialize)]
pub struct JsonKeyword {
    pub word: String,
    pub score: f64,
    pub rank: usize,
}

/// Output result for JSON
#[derive(Debug, Clone, Serialize)]
pub struct JsonResult {
    pub phrases: Vec<JsonPhrase>,
    pub keywords: Vec<JsonKeyword>,
    pub converged: bool,
    pub iterations: usize,
}

impl From<ExtractionResult> for JsonResult {
    fn from(result: ExtractionResult) -> Self {
        Self {
            phrases: result
                .phrases
                .into_iter()
                .map(|p| JsonPhrase {
                    text: p.text,
                    lemma: p.text_lemma,
                    pos: p.pos.iter().map(|t| t.as_str().to_string()).collect(),
                    start: p.start,
                    end: p.end,
                })
                .collect(),
            keywords: result
                .keywords
                .into_iter()
                .map(|k| JsonKeyword {
                    word: k.key,
                    score: k.score,
                    rank: k.rank,
                })
                .collect(),
            converged: result.converged,
            iterations: result.iterations,
        }
    }
}

/// Run one parsed document through the extractor
pub fn extract_document(doc: JsonDocument) -> Result<JsonResult> {
    let config = doc.config.unwrap_or_default();
    let tokens: Vec<AnnotatedToken> = doc.tokens.into_iter().map(AnnotatedToken::from).collect();
    Ok(extract_phrases_with_info(&tokens, &config)?.into())
}

fn to_py_err(err: PhraseGraphError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Extract keyphrases from JSON input
///
/// Args:
///     json_input: JSON string containing tokens and optional config
///
/// Returns:
///     JSON string with extracted phrases and ranked keywords
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn extract_from_json(json_input: &str) -> PyResult<String> {
    let doc: JsonDocument = serde_json::from_str(json_input)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(format!("Invalid JSON: {}", e)))?;

    let result = extract_document(doc).map_err(to_py_err)?;

    serde_json::to_string(&result)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Batch extract keyphrases from multiple documents
///
/// Args:
///     json_input: JSON string containing array of documents
///
/// Returns:
///     JSON string with array of results
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn extract_batch_from_json(py: Python<'_>, json_input: &str) -> PyResult<String> {
    let docs: Vec<JsonDocument> = serde_json::from_str(json_input)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(format!("Invalid JSON: {}", e)))?;

    let results: Vec<JsonResult> = py
        .allow_threads(|| {
            docs.into_par_iter()
                .map(extract_document)
                .collect::<Result<Vec<_>>>()
        })
        .map_err(to_py_err)?;

    serde_json::to_string(&results)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"{
        "tokens": [
            {"text": "Bank", "lemma": "Bank", "tag": "NNP", "sentence_idx": 0, "position": 0, "left_edge": 0, "right_edge": 2},
            {"text": "of", "lemma": "of", "tag": "IN", "sentence_idx": 0, "position": 1, "left_edge": 1, "right_edge": 2},
            {"text": "America", "lemma": "America", "tag": "NNP", "sentence_idx": 0, "position": 2, "left_edge": 2, "right_edge": 2},
            {"text": "processed", "lemma": "process", "tag": "VBD", "sentence_idx": 0, "position": 3, "left_edge": 0, "right_edge": 6},
            {"text": "23", "lemma": "23", "tag": "CD", "sentence_idx": 0, "position": 4, "left_edge": 4, "right_edge": 4},
            {"text": "million", "lemma": "million", "tag": "CD", "sentence_idx": 0, "position": 5, "left_edge": 4, "right_edge": 5},
            {"text": "transactions", "lemma": "transaction", "tag": "NNS", "sentence_idx": 0, "position": 6, "left_edge": 4, "right_edge": 6}
        ]
    }"#;

    #[test]
    fn test_extract_document() {
        let doc: JsonDocument = serde_json::from_str(BANK).unwrap();

        let result = extract_document(doc).unwrap();
        let texts: Vec<&str> = result.phrases.iter().map(|p| p.text.as_str()).collect();

        assert_eq!(texts, vec!["Bank of America", "transactions"]);
        assert_eq!(result.phrases[0].pos, vec!["NNP", "IN", "NNP"]);
        assert_eq!(result.keywords.len(), 3);
    }

    #[test]
    fn test_document_config() {
        let json = BANK.replacen(
            "\"tokens\"",
            "\"config\": {\"node_key\": \"lemma\"}, \"tokens\"",
            1,
        );
        let doc: JsonDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(
            doc.config.as_ref().map(|c| c.node_key),
            Some(crate::types::NodeKey::Lemma)
        );

        let result = extract_document(doc).unwrap();

        assert!(result.keywords.iter().any(|k| k.word == "transaction"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let json = BANK.replacen(
            "\"tokens\"",
            "\"config\": {\"window_size\": 0}, \"tokens\"",
            1,
        );
        let doc: JsonDocument = serde_json::from_str(&json).unwrap();

        assert!(extract_document(doc).is_err());
    }
}
