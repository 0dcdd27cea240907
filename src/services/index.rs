use crate::error::{ApiError, Result};
use crate::ml::embedder::normalize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::info;

/// Top-K similarity search over one embedding per record id. Higher
/// similarity is more similar; ordering is descending similarity with
/// ties broken by ascending id so repeated queries are deterministic.
/// The linear scan below is exact; an ANN structure can implement the
/// same trait for larger corpora.
pub trait VectorIndex: Send + Sync {
    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<(String, f32)>>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Entry {
    id: String,
    vector: Vec<f32>,
}

/// Exact cosine-similarity index backed by a flat scan. Vectors are
/// normalized at build time so similarity reduces to a dot product.
/// Immutable after `build`; a rebuild constructs a new index which the
/// owner swaps in atomically.
pub struct LinearScanIndex {
    entries: Vec<Entry>,
    dimension: usize,
}

impl LinearScanIndex {
    pub fn build(records: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let dimension = match records.first() {
            Some((_, vector)) => vector.len(),
            None => {
                return Err(ApiError::IndexBuildFailure(
                    "corpus is empty".to_string(),
                ))
            }
        };
        if dimension == 0 {
            return Err(ApiError::IndexBuildFailure(
                "embedding dimension is zero".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(records.len());
        let mut entries = Vec::with_capacity(records.len());

        for (id, vector) in records {
            if vector.len() != dimension {
                return Err(ApiError::IndexBuildFailure(format!(
                    "vector for '{}' has dimension {}, expected {}",
                    id,
                    vector.len(),
                    dimension
                )));
            }
            if !seen.insert(id.clone()) {
                return Err(ApiError::IndexBuildFailure(format!(
                    "duplicate record id '{}'",
                    id
                )));
            }
            entries.push(Entry {
                id,
                vector: normalize(&vector),
            });
        }

        info!(
            "Built vector index with {} entries of dimension {}",
            entries.len(),
            dimension
        );

        Ok(Self { entries, dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl VectorIndex for LinearScanIndex {
    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<(String, f32)>> {
        if self.entries.is_empty() {
            return Err(ApiError::IndexEmpty);
        }
        if vector.len() != self.dimension {
            return Err(ApiError::InvalidRequest(format!(
                "query vector has dimension {}, index expects {}",
                vector.len(),
                self.dimension
            )));
        }

        let query = normalize(vector);
        let mut scored: Vec<(String, f32)> = self
            .entries
            .iter()
            .map(|entry| {
                let score: f32 = entry
                    .vector
                    .iter()
                    .zip(query.iter())
                    .map(|(a, b)| a * b)
                    .sum();
                (entry.id.clone(), score)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);

        Ok(scored)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
