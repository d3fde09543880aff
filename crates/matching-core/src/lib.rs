//! Normalizer, multi-algorithm name scorer, attribute-augmented scorer,
//! matcher, risk classifier, and batch engine — the retrieval-and-rank
//! core that screens a query against a `CorpusView`.

pub mod augmented;
pub mod batch;
pub mod matcher;
pub mod normalizer;
pub mod ratio;
pub mod risk;
pub mod scorer;
pub mod view;

pub use augmented::augment;
pub use batch::{BatchEngine, BatchTotals, CancellationToken, DiffReport};
pub use matcher::Matcher;
pub use normalizer::{fingerprint, generate_variations, is_corporate, normalize, tokenize};
pub use risk::{classify_outcome, classify_risk};
pub use scorer::NameScorer;
pub use view::{CorpusView, IndexedEntry};
