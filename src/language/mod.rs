pub mod core;
pub mod difficulty;
pub mod selector;

// Re-export the main types for convenience
pub use self::core::{Language, WordListError};
pub use difficulty::Difficulty;
pub use selector::WordSampler;
