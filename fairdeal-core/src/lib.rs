pub mod generation;

pub use generation::{GenerationError, GenerationRequest, SuggestionGenerator};
