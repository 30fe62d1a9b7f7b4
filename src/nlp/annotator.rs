//! Annotation collaborator
//!
//! The extractor never tokenizes or parses on its own: it asks an
//! [`Annotator`] for tokens carrying surface text, lemma, Penn tag, sentence
//! index, global position and dependency span. Pre-parsed documents (e.g. a
//! spaCy `Doc` dumped to JSON) arrive through [`AnnotatedDocument`].

use crate::errors::{PhraseGraphError, Result};
use crate::types::{AnnotatedToken, DependencySpan, PosTag};
use serde::{Deserialize, Serialize};

/// Produces annotated tokens for a text
pub trait Annotator {
    /// Annotate `text`. Positions must be 0-based and monotonic.
    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>>;
}

impl<F> Annotator for F
where
    F: Fn(&str) -> Result<Vec<AnnotatedToken>>,
{
    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>> {
        self(text)
    }
}

/// Token as serialized by spaCy-side preprocessing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonToken {
    pub text: String,
    pub lemma: String,
    /// Penn Treebank tag (`Token.tag_`)
    pub tag: String,
    pub sentence_idx: usize,
    /// Global token index (`Token.i`)
    pub position: usize,
    /// `Token.left_edge.i`
    pub left_edge: usize,
    /// `Token.right_edge.i`
    pub right_edge: usize,
}

impl From<JsonToken> for AnnotatedToken {
    fn from(jt: JsonToken) -> Self {
        AnnotatedToken::new(
            jt.text,
            jt.lemma,
            PosTag::from_penn(&jt.tag),
            jt.sentence_idx,
            jt.position,
            DependencySpan::new(jt.left_edge, jt.right_edge),
        )
    }
}

impl From<&AnnotatedToken> for JsonToken {
    fn from(token: &AnnotatedToken) -> Self {
        Self {
            text: token.text.clone(),
            lemma: token.lemma.clone(),
            tag: token.pos.as_str().to_string(),
            sentence_idx: token.sentence_idx,
            position: token.position,
            left_edge: token.span.start,
            right_edge: token.span.end,
        }
    }
}

/// A pre-annotated document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub tokens: Vec<JsonToken>,
}

impl AnnotatedDocument {
    /// Parse a document from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(PhraseGraphError::from)
    }

    /// Convert to annotated tokens
    pub fn into_tokens(self) -> Vec<AnnotatedToken> {
        self.tokens.into_iter().map(AnnotatedToken::from).collect()
    }
}

impl From<&[AnnotatedToken]> for AnnotatedDocument {
    fn from(tokens: &[AnnotatedToken]) -> Self {
        Self {
            tokens: tokens.iter().map(JsonToken::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"{"tokens": [
            {"text": "Bank", "lemma": "Bank", "tag": "NNP", "sentence_idx": 0,
             "position": 0, "left_edge": 0, "right_edge": 2},
            {"text": "of", "lemma": "of", "tag": "IN", "sentence_idx": 0,
             "position": 1, "left_edge": 1, "right_edge": 2}
        ]}"#;

        let tokens = AnnotatedDocument::from_json(json).unwrap().into_tokens();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].pos, PosTag::ProperNoun);
        assert_eq!(tokens[0].span, DependencySpan::new(0, 2));
        assert_eq!(tokens[1].pos, PosTag::Preposition);
    }

    #[test]
    fn test_malformed_json() {
        let err = AnnotatedDocument::from_json("{\"tokens\": [").unwrap_err();
        assert!(matches!(err, PhraseGraphError::Serialization { .. }));
    }

    #[test]
    fn test_closure_annotator() {
        let annotator = |text: &str| -> Result<Vec<AnnotatedToken>> {
            Ok(text
                .split_whitespace()
                .enumerate()
                .map(|(i, w)| {
                    AnnotatedToken::new(w, w, PosTag::Noun, 0, i, DependencySpan::single(i))
                })
                .collect())
        };

        let tokens = annotator.annotate("graph ranking").unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_document_from_tokens() {
        let tokens = vec![AnnotatedToken::new(
            "cats",
            "cat",
            PosTag::NounPlural,
            0,
            0,
            DependencySpan::single(0),
        )];

        let doc = AnnotatedDocument::from(tokens.as_slice());

        assert_eq!(doc.tokens[0].tag, "NNS");
        assert_eq!(doc.into_tokens(), tokens);
    }
}
