use crate::catalog::{Corpus, DocId, Document};
use crate::error::CatalogError;
use crate::index::{CorpusIndex, IndexConfig};
use crate::link::imdb_search_url;
use crate::ranker::rank;
use crate::resolver::{SequenceMatcher, TitleResolver, STRICT_CUTOFF, SUGGEST_CUTOFF};
use crate::vector::SparseVector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const NO_OVERVIEW: &str = "No overview available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub index: IndexConfig,
    pub default_top_n: usize,
    pub strict_cutoff: f64,
    pub suggest_cutoff: f64,
    pub max_suggestions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            default_top_n: 10,
            strict_cutoff: STRICT_CUTOFF,
            suggest_cutoff: SUGGEST_CUTOFF,
            max_suggestions: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: Option<String>,
    pub overview: Option<String>,
}

impl Recommendation {
    pub fn display_title(&self) -> &str { self.title.as_deref().unwrap_or(UNKNOWN_TITLE) }
    pub fn display_overview(&self) -> &str { self.overview.as_deref().unwrap_or(NO_OVERVIEW) }
    pub fn imdb_url(&self) -> String { imdb_search_url(self.display_title()) }
}

impl From<&Document> for Recommendation {
    fn from(doc: &Document) -> Self { Self { title: doc.title.clone(), overview: doc.overview.clone() } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub distinct_titles: usize,
    pub vocabulary_size: usize,
    pub empty_documents: usize,
    pub max_features: Option<usize>,
}

/// Read-only recommendation state: the catalog, its index, and a title resolver.
/// Built once; every query borrows it immutably.
pub struct RecommendationEngine {
    config: EngineConfig,
    corpus: Corpus,
    index: CorpusIndex,
    titles: Vec<String>,
    resolver: Box<dyn TitleResolver>,
}

impl RecommendationEngine {
    pub fn new(corpus: Corpus, config: EngineConfig) -> Self { Self::with_resolver(corpus, config, Box::new(SequenceMatcher)) }

    pub fn with_resolver(corpus: Corpus, config: EngineConfig, resolver: Box<dyn TitleResolver>) -> Self {
        let index = CorpusIndex::build(&corpus, &config.index);
        let titles = corpus.titles();
        Self { config, corpus, index, titles, resolver }
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(Corpus::from_csv_path(path)?, config))
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn corpus(&self) -> &Corpus { &self.corpus }
    pub fn index(&self) -> &CorpusIndex { &self.index }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.corpus.len(),
            distinct_titles: self.titles.len(),
            vocabulary_size: self.index.vocabulary().len(),
            empty_documents: self.index.vectors().iter().filter(|v| v.is_zero()).count(),
            max_features: self.config.index.max_features,
        }
    }

    /// Closest catalog title at the strict cutoff.
    pub fn resolve_title(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        if input.is_empty() { return None; }
        self.resolver.resolve(input, &self.titles, 1, self.config.strict_cutoff).into_iter().next()
    }

    /// "Did you mean" candidates at the loose cutoff, best first.
    pub fn suggest_titles(&self, input: &str, max: usize) -> Vec<String> {
        let input = input.trim();
        if input.is_empty() { return Vec::new(); }
        self.resolver
            .resolve(input, &self.titles, max, self.config.suggest_cutoff)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Movies whose overviews resemble the one of the best-matching title. Empty when the title
    /// cannot be resolved or its overview carries no indexed terms.
    pub fn recommend_by_title(&self, input: &str, top_n: usize) -> Vec<Recommendation> {
        let Some(title) = self.resolve_title(input) else {
            tracing::debug!(input, "no title match");
            return Vec::new();
        };
        let Some(id) = self.corpus.position_of_title(title) else { return Vec::new() };
        let Some(query) = self.index.vector(id) else { return Vec::new() };
        tracing::debug!(input, resolved = title, doc_id = id, "recommending by title");
        self.recommend_from(query, Some(id), top_n)
    }

    /// Movies whose overviews resemble free-text plot `text`.
    pub fn recommend_by_storyline(&self, text: &str, top_n: usize) -> Vec<Recommendation> {
        let query = self.index.vectorize(text.trim());
        tracing::debug!(terms = query.nnz(), "recommending by storyline");
        self.recommend_from(&query, None, top_n)
    }

    fn recommend_from(&self, query: &SparseVector, exclude: Option<DocId>, top_n: usize) -> Vec<Recommendation> {
        if query.is_zero() || top_n == 0 { return Vec::new(); }
        let ranking = rank(self.index.vectors(), query, exclude);
        self.distinct_by_title(&ranking, top_n)
    }

    /// Walk a ranking keeping the first document of each title.
    fn distinct_by_title(&self, ranking: &[(DocId, f64)], top_n: usize) -> Vec<Recommendation> {
        let mut seen: HashSet<Option<&str>> = HashSet::new();
        let mut out = Vec::with_capacity(top_n.min(ranking.len()));
        for (id, _score) in ranking {
            if out.len() >= top_n { break; }
            let Some(doc) = self.corpus.get(*id) else { continue };
            if seen.insert(doc.title.as_deref()) {
                out.push(Recommendation::from(doc));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rows: &[(Option<&str>, &str)]) -> RecommendationEngine {
        let docs = rows
            .iter()
            .map(|(t, o)| Document::new(t.map(str::to_string), Some(o.to_string())))
            .collect();
        RecommendationEngine::new(Corpus::new(docs), EngineConfig::default())
    }

    #[test]
    fn missing_titles_share_one_slot() {
        let e = engine(&[
            (Some("Heist"), "thief steals diamonds"),
            (None, "thief steals paintings"),
            (None, "thief steals cars"),
        ]);
        let recs = e.recommend_by_storyline("thief", 10);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs.iter().filter(|r| r.title.is_none()).count(), 1);
        let unknown = recs.iter().find(|r| r.title.is_none()).unwrap();
        assert_eq!(unknown.display_title(), UNKNOWN_TITLE);
    }

    #[test]
    fn top_n_zero_is_empty() {
        let e = engine(&[(Some("Heist"), "thief steals diamonds"), (Some("Caper"), "thief steals cars")]);
        assert!(e.recommend_by_title("Heist", 0).is_empty());
        assert!(e.recommend_by_storyline("thief", 0).is_empty());
    }

    #[test]
    fn stats_report_index_shape() {
        let e = engine(&[(Some("Heist"), "thief steals"), (Some("Blank"), "the of and")]);
        let stats = e.stats();
        assert_eq!(stats.num_docs, 2);
        assert_eq!(stats.distinct_titles, 2);
        assert_eq!(stats.empty_documents, 1);
        assert_eq!(stats.vocabulary_size, 3);
    }
}
