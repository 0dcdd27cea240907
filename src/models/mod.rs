use serde::{Deserialize, Serialize};

pub use book::{BookRecord, Emotion, TONES};

mod book;

/// Request structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// The search query to find book recommendations for
    pub query: String,
    /// Optional category filter ("All" or absent means no filter)
    #[serde(default)]
    pub category: Option<String>,
    /// Optional emotional tone ("All" or absent means no preference)
    #[serde(default)]
    pub tone: Option<String>,
    /// Optional number of recommendations to return; defaults to the
    /// configured final_top_k
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// A single recommendation: the matched record plus its similarity to
/// the query and the display fields the UI gallery consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub book: BookRecord,
    pub similarity_score: f32,
    pub cover_url: String,
    pub caption: String,
}

/// Response structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub total_found: usize,
    pub query: String,
    pub category: Option<String>,
    pub tone: Option<String>,
}
