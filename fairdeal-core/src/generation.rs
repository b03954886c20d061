use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single prompt submitted to a text-generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Upper bound on the generated length, in provider tokens
    pub max_tokens: u32,
    /// Sampling temperature; low values favour deterministic phrasing
    pub temperature: f32,
}

/// Why a generation attempt produced no usable text.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("transport error: {0}")]
    Http(String),

    #[error("provider API error: status={status}, body={body}")]
    Api { status: u16, body: String },

    #[error("provider returned invalid response: {0}")]
    InvalidResponse(String),
}

/// External text-generation capability: given a prompt, return text or fail.
///
/// Callers treat every error as recoverable; implementations make exactly one
/// attempt and never retry.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl SuggestionGenerator for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
            Ok(request.user_prompt)
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let generator: Box<dyn SuggestionGenerator> = Box::new(Echo);
        let request = GenerationRequest {
            system_prompt: "sys".to_string(),
            user_prompt: "hello".to_string(),
            max_tokens: 10,
            temperature: 0.0,
        };

        assert_eq!(generator.name(), "echo");
        assert_eq!(generator.generate(request).await.unwrap(), "hello");
    }

    #[test]
    fn test_api_error_message() {
        let err = GenerationError::Api { status: 429, body: "slow down".to_string() };
        assert_eq!(err.to_string(), "provider API error: status=429, body=slow down");
    }
}
