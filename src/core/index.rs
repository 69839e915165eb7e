// src/core/index.rs
use crate::core::text::tokenize;
use crate::core::types::Record;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Sparse token weights. Ordered so that float sums over a vector are
/// reproducible between runs.
pub type WeightVector = BTreeMap<String, f64>;

/// Token -> inverse document frequency.
pub type IdfTable = BTreeMap<String, f64>;

/// How a token span is turned into a weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// Normalized counts only.
    RawTf,
    /// Normalized counts scaled by IDF; tokens without an IDF entry are dropped.
    TfIdf,
}

/// Count of each token divided by the span length.
///
/// The span must not be empty.
pub fn term_frequency<S: AsRef<str>>(span: &[S]) -> WeightVector {
    let mut tf = WeightVector::new();
    for token in span {
        *tf.entry(token.as_ref().to_owned()).or_insert(0.0) += 1.0;
    }
    let len = span.len() as f64;
    for weight in tf.values_mut() {
        *weight /= len;
    }
    tf
}

/// `ln(total_docs / doc_frequency)` for every token that occurs in the corpus.
pub fn inverse_document_frequency(corpus: &[Vec<String>]) -> IdfTable {
    let mut doc_frequency: BTreeMap<&str, u32> = BTreeMap::new();
    for doc in corpus {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for token in unique {
            *doc_frequency.entry(token).or_insert(0) += 1;
        }
    }

    let total_docs = corpus.len() as f64;
    doc_frequency
        .into_iter()
        .map(|(token, df)| (token.to_owned(), (total_docs / df as f64).ln()))
        .collect()
}

/// Elementwise product of `tf` and `idf` over the tokens present in both.
pub fn tfidf(tf: &WeightVector, idf: &IdfTable) -> WeightVector {
    tf.iter()
        .filter_map(|(token, weight)| idf.get(token).map(|w| (token.clone(), weight * w)))
        .collect()
}

/// Statistics derived from the current record set.
///
/// Never edited in place: [`FrequencyIndex::build`] produces a fresh index
/// whenever the records change.
#[derive(Debug, Clone, Default)]
pub struct FrequencyIndex {
    /// Distinct tokens across all record texts, sorted.
    vocabulary: Vec<String>,
    /// Tokenized record texts, in record order.
    corpus: Vec<Vec<String>>,
    idf: IdfTable,
}

impl FrequencyIndex {
    pub fn build(records: &[Record]) -> Self {
        let corpus: Vec<Vec<String>> = records.iter().map(|r| tokenize(&r.question)).collect();
        let vocabulary: Vec<String> = corpus
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let idf = inverse_document_frequency(&corpus);

        tracing::debug!(
            records = records.len(),
            vocabulary = vocabulary.len(),
            "rebuilt frequency index"
        );

        Self {
            vocabulary,
            corpus,
            idf,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn corpus(&self) -> &[Vec<String>] {
        &self.corpus
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    /// Raw TF when there is a single document or no IDF data, TF-IDF otherwise.
    pub fn weighting(&self) -> Weighting {
        if self.corpus.len() == 1 || self.idf.is_empty() {
            Weighting::RawTf
        } else {
            Weighting::TfIdf
        }
    }

    /// Weight vector of a non-empty token span under `weighting`.
    pub fn weigh<S: AsRef<str>>(&self, span: &[S], weighting: Weighting) -> WeightVector {
        let tf = term_frequency(span);
        match weighting {
            Weighting::RawTf => tf,
            Weighting::TfIdf => tfidf(&tf, &self.idf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<Vec<String>> {
        texts.iter().map(|t| tokenize(t)).collect()
    }

    #[test]
    fn term_frequency_normalizes_by_span_length() {
        let tf = term_frequency(&["a", "b", "a", "c"]);
        assert_eq!(tf["a"], 0.5);
        assert_eq!(tf["b"], 0.25);
        assert_eq!(tf["c"], 0.25);
    }

    #[test]
    fn idf_counts_documents_not_occurrences() {
        let idf = inverse_document_frequency(&docs(&["a a b", "a c"]));
        assert_eq!(idf["a"], 0.0);
        assert!((idf["b"] - 2f64.ln()).abs() < 1e-12);
        assert!((idf["c"] - 2f64.ln()).abs() < 1e-12);
        assert!(!idf.contains_key("d"));
    }

    #[test]
    fn idf_of_empty_corpus_is_empty() {
        assert!(inverse_document_frequency(&[]).is_empty());
    }

    #[test]
    fn tfidf_drops_tokens_without_idf() {
        let tf = term_frequency(&["known", "unknown"]);
        let mut idf = IdfTable::new();
        idf.insert("known".into(), 2.0);
        let weighted = tfidf(&tf, &idf);
        assert_eq!(weighted.len(), 1);
        assert_eq!(weighted["known"], 1.0);
    }

    #[test]
    fn build_collects_sorted_vocabulary_and_corpus() {
        let records = vec![
            Record::new("Where is Paris", vec![], None),
            Record::new("where IS rome", vec![], None),
        ];
        let index = FrequencyIndex::build(&records);
        assert_eq!(index.vocabulary(), ["is", "paris", "rome", "where"]);
        assert_eq!(index.corpus()[1], ["where", "is", "rome"]);
        assert_eq!(index.weighting(), Weighting::TfIdf);
    }

    #[test]
    fn single_record_uses_raw_tf() {
        let index = FrequencyIndex::build(&[Record::new("just one", vec![], None)]);
        assert_eq!(index.weighting(), Weighting::RawTf);
        assert_eq!(FrequencyIndex::default().weighting(), Weighting::RawTf);
    }
}
