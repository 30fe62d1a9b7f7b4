//! NLP collaborators: annotation, tokenization and stopwords

pub mod annotator;
pub mod stopwords;
pub mod tokenizer;
