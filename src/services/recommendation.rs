use crate::{
    error::{ApiError, Result},
    ml::Embedder,
    models::{BookRecord, Recommendation, RecommendationRequest, RecommendationResponse},
    services::{
        filter::{category_matches, tone_emotion, tone_labels},
        index::{LinearScanIndex, VectorIndex},
        ranker::rank,
        store::RecordStore,
    },
};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

const CAPTION_DESCRIPTION_CHARS: usize = 50;
const LARGE_COVER_SUFFIX: &str = "&fife=w800";

/// Search parameters fixed at startup. `initial_top_k` is the broad
/// candidate pool pulled from the index before filtering; `final_top_k`
/// is both the default and the ceiling for the result size, and must
/// not exceed `initial_top_k`.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub initial_top_k: usize,
    pub final_top_k: usize,
    pub default_cover_url: String,
}

/// One immutable generation of the corpus: the record store and the
/// index built from it always travel together so a query never sees a
/// store/index mismatch mid-rebuild.
struct Snapshot {
    store: Arc<RecordStore>,
    index: Arc<dyn VectorIndex>,
}

/// End-to-end recommendation pipeline: embed the query, pull a broad
/// candidate pool from the vector index, hard-filter by category,
/// re-rank by tone, truncate. Safe for concurrent read-only use; a
/// rebuild constructs a fresh snapshot off to the side and swaps it in
/// atomically, so in-flight queries keep the old generation alive
/// through its `Arc` until they drain.
pub struct RecommendationService {
    embedder: Arc<dyn Embedder>,
    snapshot: RwLock<Arc<Snapshot>>,
    settings: SearchSettings,
}

impl RecommendationService {
    /// Build the first snapshot from the corpus. A failure here is
    /// fatal: the service refuses to exist without a serving index.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: RecordStore,
        settings: SearchSettings,
    ) -> Result<Self> {
        let store = Arc::new(store);
        let index = build_index(embedder.as_ref(), &store)?;
        Ok(Self {
            embedder,
            snapshot: RwLock::new(Arc::new(Snapshot {
                store,
                index: Arc::new(index),
            })),
            settings,
        })
    }

    /// Assemble a service from pre-built parts. Used by tests to inject
    /// instrumented embedders and indices.
    pub fn from_parts(
        embedder: Arc<dyn Embedder>,
        store: RecordStore,
        index: Arc<dyn VectorIndex>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            embedder,
            snapshot: RwLock::new(Arc::new(Snapshot {
                store: Arc::new(store),
                index,
            })),
            settings,
        }
    }

    pub fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidRequest(
                "query cannot be empty".to_string(),
            ));
        }
        let final_k = match request.top_k {
            Some(0) => {
                return Err(ApiError::InvalidRequest(
                    "top_k must be at least 1".to_string(),
                ))
            }
            Some(k) => k.min(self.settings.final_top_k),
            None => self.settings.final_top_k,
        };

        let snapshot = self.current_snapshot()?;
        let query_vector = self.embedder.embed(query)?;
        let matches = snapshot
            .index
            .query(&query_vector, self.settings.initial_top_k)?;

        let category = request.category.as_deref();
        let candidates: Vec<(BookRecord, f32)> = matches
            .into_iter()
            .filter_map(|(id, score)| snapshot.store.get(&id).map(|r| (r.clone(), score)))
            .filter(|(record, _)| category_matches(record, category))
            .collect();

        let ranked = rank(candidates, tone_emotion(request.tone.as_deref()), final_k);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .map(|(book, similarity_score)| Recommendation {
                cover_url: self.cover_url(&book),
                caption: caption(&book),
                book,
                similarity_score,
            })
            .collect();

        info!(
            "Query '{}' returned {} recommendations (category: {:?}, tone: {:?})",
            query,
            recommendations.len(),
            request.category,
            request.tone
        );

        Ok(RecommendationResponse {
            total_found: recommendations.len(),
            recommendations,
            query: query.to_string(),
            category: request.category.clone(),
            tone: request.tone.clone(),
        })
    }

    /// Rebuild the snapshot from a new corpus. On any failure the
    /// currently serving snapshot stays untouched and the error is
    /// reported as a recoverable warning to the caller.
    pub fn rebuild(&self, records: Vec<BookRecord>) -> Result<()> {
        let result = RecordStore::from_records(records).and_then(|store| {
            let store = Arc::new(store);
            let index = build_index(self.embedder.as_ref(), &store)?;
            Ok(Snapshot {
                store,
                index: Arc::new(index),
            })
        });

        match result {
            Ok(next) => {
                let mut guard = self
                    .snapshot
                    .write()
                    .map_err(|_| ApiError::Internal("snapshot lock poisoned".to_string()))?;
                *guard = Arc::new(next);
                info!("Swapped in rebuilt index with {} records", guard.store.len());
                Ok(())
            }
            Err(e) => {
                warn!("Index rebuild failed, keeping previous index: {}", e);
                Err(e)
            }
        }
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(self.current_snapshot()?.store.categories())
    }

    pub fn tones(&self) -> Vec<String> {
        tone_labels()
    }

    pub fn corpus_size(&self) -> Result<usize> {
        Ok(self.current_snapshot()?.store.len())
    }

    fn current_snapshot(&self) -> Result<Arc<Snapshot>> {
        self.snapshot
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| ApiError::Internal("snapshot lock poisoned".to_string()))
    }

    fn cover_url(&self, book: &BookRecord) -> String {
        match &book.thumbnail {
            Some(thumbnail) if !thumbnail.trim().is_empty() => {
                format!("{}{}", thumbnail, LARGE_COVER_SUFFIX)
            }
            _ => self.settings.default_cover_url.clone(),
        }
    }
}

fn build_index(embedder: &dyn Embedder, store: &RecordStore) -> Result<LinearScanIndex> {
    if store.is_empty() {
        return Err(ApiError::IndexBuildFailure("corpus is empty".to_string()));
    }

    let mut entries = Vec::with_capacity(store.len());
    for record in store.records() {
        let vector = embedder.embed(&record.description).map_err(|e| {
            ApiError::IndexBuildFailure(format!("embedding record '{}': {}", record.id, e))
        })?;
        entries.push((record.id.clone(), vector));
    }
    LinearScanIndex::build(entries)
}

/// Gallery caption: "Title by A and B" plus a truncated description.
fn caption(book: &BookRecord) -> String {
    let description: String = book.description.chars().take(CAPTION_DESCRIPTION_CHARS).collect();
    let description = if book.description.chars().count() > CAPTION_DESCRIPTION_CHARS {
        format!("{}...", description)
    } else {
        description
    };

    let authors: Vec<&str> = book.authors.split(';').map(str::trim).collect();
    let authors = match authors.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    };

    format!("{} by {}\n\n{}", book.title, authors, description)
}
