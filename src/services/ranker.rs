use crate::models::{BookRecord, Emotion};
use std::cmp::Ordering;

/// Final ordering stage. Candidates arrive already category-filtered and
/// in descending similarity order from the broad index query. Without a
/// tone the similarity order is simply truncated; with a tone the pool
/// is re-sorted by that emotion score descending. The sort is stable, so
/// equal emotion scores keep their similarity rank, and the tone can
/// only reorder within the already-relevant pool, never surface a
/// semantically unrelated record.
///
/// A pool smaller than `final_k` is returned whole; an empty pool is a
/// valid empty result, not an error.
pub fn rank(
    mut candidates: Vec<(BookRecord, f32)>,
    tone: Option<Emotion>,
    final_k: usize,
) -> Vec<(BookRecord, f32)> {
    if let Some(emotion) = tone {
        candidates.sort_by(|a, b| {
            b.0.emotion_score(emotion)
                .partial_cmp(&a.0.emotion_score(emotion))
                .unwrap_or(Ordering::Equal)
        });
    }
    candidates.truncate(final_k);
    candidates
}
