use crate::catalog::DocId;
use crate::vector::Similarity;

/// Score every document against `query`, best first. Equal scores keep corpus order.
/// `exclude` removes that document from the ranking entirely.
pub fn rank<V: Similarity>(documents: &[V], query: &V, exclude: Option<DocId>) -> Vec<(DocId, f64)> {
    let mut scored: Vec<(DocId, f64)> = documents
        .iter()
        .enumerate()
        .filter(|(id, _)| Some(*id) != exclude)
        .map(|(id, doc)| (id, query.cosine(doc)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::SparseVector;

    fn v(entries: &[(u32, f64)]) -> SparseVector { SparseVector::from_entries(entries.to_vec()).l2_normalized() }

    #[test]
    fn orders_by_score_then_corpus_position() {
        let docs = vec![v(&[(1, 1.0)]), v(&[(0, 1.0)]), v(&[(0, 1.0), (1, 1.0)]), v(&[(0, 1.0)])];
        let ranked = rank(&docs, &v(&[(0, 1.0)]), None);
        let ids: Vec<DocId> = ranked.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 3, 2, 0]);
        assert_eq!(ranked[3].1, 0.0);
    }

    #[test]
    fn excluded_document_never_appears() {
        let docs = vec![v(&[(0, 1.0)]), v(&[(0, 1.0)]), v(&[(1, 1.0)])];
        for id in 0..docs.len() {
            let ranked = rank(&docs, &docs[id], Some(id));
            assert_eq!(ranked.len(), docs.len() - 1);
            assert!(ranked.iter().all(|(d, _)| *d != id));
        }
    }
}
