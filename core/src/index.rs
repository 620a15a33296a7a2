use crate::catalog::{Corpus, DocId};
use crate::tokenizer::{ngrams, normalize, tokens};
use crate::vector::{SparseVector, TermId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Keep at most this many terms, most frequent across the corpus first. `None` keeps all.
    pub max_features: Option<usize>,
    /// Inclusive n-gram lengths used as terms.
    pub ngram_range: (usize, usize),
}

impl Default for IndexConfig {
    fn default() -> Self { Self { max_features: Some(5000), ngram_range: (1, 2) } }
}

/// Frozen term dictionary with per-term smoothed IDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize { self.terms.len() }
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }
    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }
    pub fn idf(&self, id: TermId) -> Option<f64> { self.idf.get(id as usize).copied() }
    /// Terms ordered by id.
    pub fn terms(&self) -> &[String] { &self.terms }
}

pub struct CorpusIndex {
    config: IndexConfig,
    vocabulary: Vocabulary,
    vectors: Vec<SparseVector>,
}

struct Candidate {
    term: String,
    total: u64,
    df: u32,
}

impl CorpusIndex {
    /// Build the vocabulary and L2-normalized TF-IDF vectors for every document.
    pub fn build(corpus: &Corpus, config: &IndexConfig) -> Self {
        let (min_n, max_n) = config.ngram_range;

        // First pass: candidate terms in first-seen order with corpus counts and document frequency.
        let mut lookup: HashMap<String, usize> = HashMap::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut doc_counts: Vec<BTreeMap<usize, u32>> = Vec::with_capacity(corpus.len());
        for doc in corpus.iter() {
            let toks = tokens(&doc.clean_overview);
            let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
            for gram in ngrams(&toks, min_n, max_n) {
                let cid = match lookup.get(&gram) {
                    Some(&cid) => cid,
                    None => {
                        let cid = candidates.len();
                        lookup.insert(gram.clone(), cid);
                        candidates.push(Candidate { term: gram, total: 0, df: 0 });
                        cid
                    }
                };
                candidates[cid].total += 1;
                let c = counts.entry(cid).or_insert(0);
                if *c == 0 { candidates[cid].df += 1; }
                *c += 1;
            }
            doc_counts.push(counts);
        }

        // Keep the most frequent terms; ties go to the earlier-seen term.
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|a, b| candidates[*b].total.cmp(&candidates[*a].total).then(a.cmp(b)));
        if let Some(max) = config.max_features {
            order.truncate(max);
        }
        // Dimensions are assigned in term order so ids do not depend on frequency ties.
        order.sort_by(|a, b| candidates[*a].term.cmp(&candidates[*b].term));

        let n = corpus.len() as f64;
        let mut remap: Vec<Option<TermId>> = vec![None; candidates.len()];
        let mut vocabulary = Vocabulary::default();
        for (tid, cid) in order.into_iter().enumerate() {
            let tid = tid as TermId;
            let cand = &candidates[cid];
            remap[cid] = Some(tid);
            vocabulary.dictionary.insert(cand.term.clone(), tid);
            vocabulary.terms.push(cand.term.clone());
            vocabulary.idf.push(smoothed_idf(n, cand.df as f64));
        }

        let vectors: Vec<SparseVector> = doc_counts
            .iter()
            .map(|counts| {
                let entries = counts
                    .iter()
                    .filter_map(|(cid, tf)| remap[*cid].map(|tid| (tid, *tf as f64 * vocabulary.idf[tid as usize])))
                    .collect();
                SparseVector::from_entries(entries).l2_normalized()
            })
            .collect();

        let empty_docs = vectors.iter().filter(|v| v.is_zero()).count();
        tracing::info!(num_docs = corpus.len(), num_terms = vocabulary.len(), candidates = candidates.len(), empty_docs, "corpus index built");
        Self { config: config.clone(), vocabulary, vectors }
    }

    /// Vectorize arbitrary text against the frozen vocabulary. Unknown terms are dropped.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let clean = normalize(Some(text));
        let toks = tokens(&clean);
        let (min_n, max_n) = self.config.ngram_range;
        let entries = ngrams(&toks, min_n, max_n)
            .iter()
            .filter_map(|g| self.vocabulary.term_id(g))
            .map(|tid| (tid, self.vocabulary.idf[tid as usize]))
            .collect();
        SparseVector::from_entries(entries).l2_normalized()
    }

    pub fn config(&self) -> &IndexConfig { &self.config }
    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }
    pub fn vectors(&self) -> &[SparseVector] { &self.vectors }
    pub fn vector(&self, id: DocId) -> Option<&SparseVector> { self.vectors.get(id) }
    pub fn len(&self) -> usize { self.vectors.len() }
    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }
}

/// `ln((1 + n) / (1 + df)) + 1`
fn smoothed_idf(n: f64, df: f64) -> f64 { ((1.0 + n) / (1.0 + df)).ln() + 1.0 }
