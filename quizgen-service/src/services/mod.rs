pub mod material;
pub mod normalizer;
pub mod prompts;
pub mod providers;
pub mod quiz;

pub use normalizer::{normalize, NormalizeError};
pub use quiz::{GenerationError, QuizGenerator};
