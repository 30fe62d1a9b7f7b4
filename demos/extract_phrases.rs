//! Print the keyphrases of a text
//!
//! ```text
//! cargo run --example extract_phrases -- "Bank of America processed 23 million transactions."
//! RUST_LOG=debug cargo run --example extract_phrases -- --json doc.json
//! ```

use rapid_phrasegraph::{AnnotatedDocument, PhraseExtractor};
use tracing_subscriber::EnvFilter;

const DEFAULT_TEXT: &str = "Compatibility of systems of linear constraints over the set of \
natural numbers. Criteria of compatibility of a system of linear Diophantine equations, \
strict inequations, and nonstrict inequations are considered.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let extractor = PhraseExtractor::new();

    let result = match args.as_slice() {
        [flag, path] if flag == "--json" => {
            let json = std::fs::read_to_string(path)?;
            let tokens = AnnotatedDocument::from_json(&json)?.into_tokens();
            extractor.extract_tokens(&tokens)?
        }
        [] => extractor.extract_with_info(DEFAULT_TEXT)?,
        words => extractor.extract_with_info(&words.join(" "))?,
    };

    for phrase in &result.phrases {
        println!("{}", phrase.text);
    }

    Ok(())
}
