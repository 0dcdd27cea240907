pub mod filter;
pub mod index;
pub mod ranker;
pub mod recommendation;
pub mod store;

// Re-export public types
pub use index::{LinearScanIndex, VectorIndex};
pub use recommendation::{RecommendationService, SearchSettings};
pub use store::RecordStore;
