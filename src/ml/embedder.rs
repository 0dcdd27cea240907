use crate::error::{ApiError, Result};
use tracing::debug;

const DEFAULT_DIMENSION: usize = 384;
const DEFAULT_MAX_TEXT_CHARS: usize = 8192;

/// Maps text to a fixed-length dense vector. Implementations must be
/// deterministic: the same text always produces the same vector for a
/// fixed model version. The index and ranker only depend on this trait,
/// so the hashing model below can be swapped for a sentence-transformer
/// backend without touching the retrieval pipeline.
pub trait Embedder: Send + Sync {
    /// Embedding dimension, constant for the lifetime of the embedder.
    fn dimension(&self) -> usize;

    /// Embed one text. Fails with `EmbeddingFailure` on empty input or
    /// input longer than the configured limit.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Feature-hashing embedder: tokens and token bigrams are hashed into a
/// fixed number of buckets with a hash-derived sign, then the vector is
/// L2-normalized. Not a semantic model, but deterministic, dependency
/// free, and shaped exactly like one, which is what the pipeline needs.
pub struct HashingEmbedder {
    dimension: usize,
    max_text_chars: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION, DEFAULT_MAX_TEXT_CHARS)
    }
}

impl HashingEmbedder {
    pub fn new(dimension: usize, max_text_chars: usize) -> Self {
        Self {
            dimension,
            max_text_chars,
        }
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ApiError::EmbeddingFailure(
                "cannot embed empty text".to_string(),
            ));
        }
        if trimmed.chars().count() > self.max_text_chars {
            return Err(ApiError::EmbeddingFailure(format!(
                "text exceeds the {} character limit",
                self.max_text_chars
            )));
        }

        let tokens = Self::tokenize(trimmed);
        if tokens.is_empty() {
            return Err(ApiError::EmbeddingFailure(
                "text contains no embeddable tokens".to_string(),
            ));
        }

        let mut vector = vec![0.0f32; self.dimension];
        let mut bump = |feature: &str| {
            let hash = fnv1a(feature.as_bytes());
            let bucket = (hash % self.dimension as u64) as usize;
            // A second hash bit decides the sign so collisions tend to
            // cancel instead of pile up.
            let sign = if (hash >> 32) & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        };

        for token in &tokens {
            bump(token);
        }
        for pair in tokens.windows(2) {
            bump(&format!("{} {}", pair[0], pair[1]));
        }

        debug!(
            "Embedded {} tokens into {} dimensions",
            tokens.len(),
            self.dimension
        );

        Ok(normalize(&vector))
    }
}

/// Normalize a vector to unit length. A zero vector stays zero.
pub fn normalize(vector: &[f32]) -> Vec<f32> {
    let squared_sum: f32 = vector.iter().map(|&x| x * x).sum();
    let magnitude = squared_sum.sqrt();

    if magnitude > 0.0 {
        vector.iter().map(|&x| x / magnitude).collect()
    } else {
        vec![0.0; vector.len()]
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_is_deterministic() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("a mystery novel set in a small town").unwrap();
        let b = embedder.embed("a mystery novel set in a small town").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn embedding_has_fixed_dimension_and_unit_norm() {
        let embedder = HashingEmbedder::new(64, 1024);
        let vector = embedder.embed("dragons and ancient magic").unwrap();
        assert_eq!(vector.len(), 64);
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn similar_texts_score_higher_than_unrelated_ones() {
        let embedder = HashingEmbedder::default();
        let query = embedder.embed("a detective investigates a murder").unwrap();
        let close = embedder
            .embed("a detective investigates a brutal murder in the city")
            .unwrap();
        let far = embedder
            .embed("gardening tips for growing tomatoes at home")
            .unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
        assert!(dot(&query, &close) > dot(&query, &far));
    }

    #[test]
    fn rejects_empty_and_oversized_text() {
        let embedder = HashingEmbedder::new(32, 10);
        assert!(matches!(
            embedder.embed("   "),
            Err(ApiError::EmbeddingFailure(_))
        ));
        assert!(matches!(
            embedder.embed("this text is longer than ten characters"),
            Err(ApiError::EmbeddingFailure(_))
        ));
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
    }
}
