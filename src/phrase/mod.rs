//! Phrase reconstruction, filtering and the end-to-end extractor

pub mod extraction;
pub mod filter;
pub mod reconstruct;
