pub mod health;
pub mod metadata;
pub mod recommendations;

pub use health::health_check;
pub use metadata::{get_categories, get_tones};
pub use recommendations::recommendations_config;
