//! Phrase reconstruction
//!
//! Walks the connected components of the co-occurrence graph and maps each
//! component's occurrence positions back onto contiguous slices of the
//! original token sequence. Ineligible tokens that fall inside a slice
//! (determiners, prepositions, numbers) become part of the phrase.

use crate::graph::builder::GraphBuilder;
use crate::graph::components::connected_components;
use crate::types::{AnnotatedToken, CandidatePhrase};

/// Rebuilds candidate phrases from a graph and the tokens it was built from
#[derive(Debug, Clone)]
pub struct PhraseReconstructor {
    /// Maximum gap between positions that still belong to one run
    window: usize,
}

impl Default for PhraseReconstructor {
    fn default() -> Self {
        Self::new(3)
    }
}

impl PhraseReconstructor {
    /// Create a reconstructor for the given window size
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Reconstruct unfiltered candidates, largest components first
    ///
    /// `tokens` must be the slice the graph was built from; positions are
    /// resolved relative to the first token's global position.
    pub fn reconstruct(
        &self,
        graph: &GraphBuilder,
        tokens: &[AnnotatedToken],
    ) -> Vec<CandidatePhrase> {
        let components = connected_components(graph);
        tracing::debug!(components = components.len(), "reconstructing phrases");

        let mut phrases = Vec::new();
        for component in components {
            if component.len() > 1 {
                let mut positions: Vec<usize> = component
                    .iter()
                    .filter_map(|&id| graph.get_node(id))
                    .flat_map(|node| node.positions.iter().copied())
                    .collect();
                positions.sort_unstable();

                for (start, end) in split_runs(&positions, self.window) {
                    phrases.extend(materialize(tokens, start, end));
                }
            } else if let Some(node) = component.first().and_then(|&id| graph.get_node(id)) {
                for &pos in &node.positions {
                    phrases.extend(materialize(tokens, pos, pos + 1));
                }
            }
        }

        phrases
    }
}

/// Split sorted positions into maximal runs whose consecutive gaps are at
/// most `window`, returned as half-open `(start, end)` spans
pub fn split_runs(positions: &[usize], window: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let Some((&first, rest)) = positions.split_first() else {
        return runs;
    };

    let mut start = first;
    let mut last = first;
    for &pos in rest {
        if pos - last > window {
            runs.push((start, last + 1));
            start = pos;
        }
        last = pos;
    }
    runs.push((start, last + 1));

    runs
}

/// Build the candidate covering global positions `[start, end)`
///
/// Returns `None` when the span is empty or falls outside `tokens`.
pub fn materialize(tokens: &[AnnotatedToken], start: usize, end: usize) -> Option<CandidatePhrase> {
    let base = tokens.first()?.position;
    if start >= end || start < base {
        return None;
    }
    let slice = tokens.get(start - base..end - base)?;

    let words: Vec<String> = slice.iter().map(|t| t.text.clone()).collect();
    let lemmas: Vec<String> = slice.iter().map(|t| t.lemma.clone()).collect();

    Some(CandidatePhrase {
        text: join_words(&words),
        text_lemma: join_words(&lemmas),
        pos: slice.iter().map(|t| t.pos).collect(),
        words,
        lemmas,
        start,
        end,
    })
}

/// Join with single spaces, attaching possessive clitics to the preceding word
pub fn join_words<S: AsRef<str>>(items: &[S]) -> String {
    repair_possessive(
        &items
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Remove whitespace directly before a standalone `'s` or `’s`
pub fn repair_possessive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut pending = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            pending.push(c);
            continue;
        }
        if !pending.is_empty() {
            if out.is_empty() || !is_clitic_at(&chars, i) {
                out.push_str(&pending);
            }
            pending.clear();
        }
        out.push(c);
    }
    out.push_str(&pending);

    out
}

fn is_clitic_at(chars: &[char], i: usize) -> bool {
    matches!(chars.get(i), Some('\'') | Some('’'))
        && matches!(chars.get(i + 1), Some('s') | Some('S'))
        && chars.get(i + 2).map_or(true, |c| c.is_whitespace())
}
