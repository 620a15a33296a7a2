pub mod catalog;
pub mod engine;
pub mod error;
pub mod index;
pub mod link;
pub mod ranker;
pub mod resolver;
pub mod tokenizer;
pub mod vector;

pub use catalog::{Corpus, DocId, Document};
pub use engine::{EngineConfig, IndexStats, Recommendation, RecommendationEngine};
pub use error::CatalogError;
pub use index::{CorpusIndex, IndexConfig, Vocabulary};
pub use resolver::{LevenshteinMatcher, SequenceMatcher, TitleResolver};
pub use vector::{Similarity, SparseVector, TermId};
