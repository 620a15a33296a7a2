//! Fuzzy title matching.
//!
//! A [`TitleResolver`] only has to supply a similarity ratio in `[0, 1]`; candidate filtering
//! and ordering are shared. [`SequenceMatcher`] is the default and scores by longest matching
//! blocks, [`LevenshteinMatcher`] is an edit-distance alternative.

/// Cutoff used to pick the title a recommendation is based on.
pub const STRICT_CUTOFF: f64 = 0.6;
/// Cutoff used for "did you mean" suggestions.
pub const SUGGEST_CUTOFF: f64 = 0.3;

pub trait TitleResolver: Send + Sync {
    /// Similarity of `candidate` to `query` in `[0, 1]`.
    fn ratio(&self, candidate: &str, query: &str) -> f64;

    /// Up to `max_candidates` titles scoring at least `cutoff`, most similar first.
    /// Equal scores are ordered by title, descending.
    fn resolve<'a>(&self, query: &str, titles: &'a [String], max_candidates: usize, cutoff: f64) -> Vec<&'a str> {
        if max_candidates == 0 { return Vec::new(); }
        let mut scored: Vec<(f64, &str)> = titles
            .iter()
            .map(|t| (self.ratio(t, query), t.as_str()))
            .filter(|(score, _)| *score >= cutoff)
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then_with(|| b.1.cmp(a.1))
        });
        scored.into_iter().take(max_candidates).map(|(_, t)| t).collect()
    }
}

/// Ratcliff/Obershelp ratio: `2 * M / (len(a) + len(b))` where `M` counts characters in
/// recursively found longest common blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceMatcher;

impl TitleResolver for SequenceMatcher {
    fn ratio(&self, candidate: &str, query: &str) -> f64 { sequence_ratio(candidate, query) }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinMatcher;

impl TitleResolver for LevenshteinMatcher {
    fn ratio(&self, candidate: &str, query: &str) -> f64 { strsim::normalized_levenshtein(candidate, query) }
}

pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 { return 1.0; }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        if alo >= ahi || blo >= bhi { continue; }
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 { continue; }
        matched += k;
        pending.push((alo, i, blo, j));
        pending.push((i + k, ahi, j + k, bhi));
    }
    matched
}

/// Longest common block within `a[alo..ahi]` and `b[blo..bhi]`, earliest in `a` then `b` on ties.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];
    let (mut best_i, mut best_j, mut best) = (alo, blo, 0);
    for i in alo..ahi {
        for j in blo..bhi {
            let k = if a[i] == b[j] { prev[j - blo] + 1 } else { 0 };
            cur[j - blo + 1] = k;
            if k > best {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best = k;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    (best_i, best_j, best)
}
