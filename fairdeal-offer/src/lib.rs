pub mod models;
pub mod coerce;
pub mod pricing;
pub mod prompt;
pub mod evaluator;
pub mod openai;

pub use models::{EvaluationInput, EvaluationRequest, EvaluationResult, Verdict, VerdictBasis};
pub use evaluator::{EvaluatorSettings, OfferError, OfferEvaluator};
pub use openai::{OpenAiChatConfig, OpenAiChatGenerator};
