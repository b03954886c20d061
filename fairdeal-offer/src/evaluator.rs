use std::sync::Arc;

use fairdeal_catalog::{BenchmarkTable, CpmRange};
use fairdeal_core::{GenerationRequest, SuggestionGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce::coerce_number;
use crate::models::{EvaluationInput, EvaluationRequest, EvaluationResult, SuggestionSource, VerdictBasis};
use crate::pricing::ExpectedRange;
use crate::prompt::{build_user_prompt, fallback_suggestion, SYSTEM_PROMPT};

/// Tunables for the evaluation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorSettings {
    pub verdict_basis: VerdictBasis,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            verdict_basis: VerdictBasis::Rounded,
            max_tokens: 200,
            temperature: 0.2,
        }
    }
}

/// Offer evaluation errors
#[derive(Debug, thiserror::Error)]
pub enum OfferError {
    #[error("Invalid or missing platform. Use {accepted}")]
    InvalidPlatform { accepted: String },
}

/// Validates an offer, prices it against the benchmark table, and attaches a
/// negotiation suggestion.
pub struct OfferEvaluator {
    benchmarks: Arc<BenchmarkTable>,
    generator: Arc<dyn SuggestionGenerator>,
    settings: EvaluatorSettings,
}

impl OfferEvaluator {
    pub fn new(
        benchmarks: Arc<BenchmarkTable>,
        generator: Arc<dyn SuggestionGenerator>,
        settings: EvaluatorSettings,
    ) -> Self {
        Self { benchmarks, generator, settings }
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Validate and coerce a raw request, returning the platform's CPM range
    /// alongside the input. Only the platform can reject it.
    pub fn validate(&self, request: &EvaluationRequest) -> Result<(EvaluationInput, CpmRange), OfferError> {
        let benchmark = match request.platform.as_ref() {
            Some(Value::String(p)) => self.benchmarks.lookup(p),
            _ => None,
        };
        let Some(benchmark) = benchmark else {
            return Err(OfferError::InvalidPlatform {
                accepted: self.benchmarks.platforms().join("|"),
            });
        };

        let input = EvaluationInput {
            platform: benchmark.platform.clone(),
            followers: coerce_number(request.followers.as_ref()),
            engagement_rate: coerce_number(request.engagement_rate.as_ref()),
            offer_amount: coerce_number(request.offer_amount.as_ref()),
        };

        Ok((input, benchmark.cpm))
    }

    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult, OfferError> {
        let (input, cpm) = self.validate(request)?;

        let range = ExpectedRange::compute(&cpm, input.followers);
        let verdict = range.verdict(input.offer_amount, self.settings.verdict_basis);

        let (suggestion, source) = self.suggest(&input, &range).await;

        tracing::info!(
            platform = %input.platform,
            followers = input.followers,
            offer = input.offer_amount,
            low = range.low,
            high = range.high,
            ?verdict,
            ?source,
            "Evaluated offer"
        );

        Ok(EvaluationResult {
            platform: input.platform,
            followers: input.followers,
            engagement_rate: input.engagement_rate,
            offer_amount: input.offer_amount,
            expected_range: range.as_pair(),
            verdict,
            suggestion,
        })
    }

    /// One generation attempt; any failure or empty output yields the fallback.
    async fn suggest(&self, input: &EvaluationInput, range: &ExpectedRange) -> (String, SuggestionSource) {
        let fallback = fallback_suggestion(input);

        let request = GenerationRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: build_user_prompt(input, range),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        match self.generator.generate(request).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    tracing::warn!("Generator [{}] returned empty text, using fallback", self.generator.name());
                    (fallback, SuggestionSource::Fallback)
                } else {
                    (trimmed.to_string(), SuggestionSource::Generated)
                }
            }
            Err(e) => {
                tracing::warn!("Generator [{}] failed, using fallback: {}", self.generator.name(), e);
                (fallback, SuggestionSource::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use async_trait::async_trait;
    use fairdeal_core::GenerationError;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays a fixed outcome and records the last request it saw
    struct StubGenerator {
        outcome: Result<String, String>,
        seen: Mutex<Option<GenerationRequest>>,
    }

    impl StubGenerator {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self { outcome: Ok(text.to_string()), seen: Mutex::new(None) })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { outcome: Err("connection refused".to_string()), seen: Mutex::new(None) })
        }
    }

    #[async_trait]
    impl SuggestionGenerator for StubGenerator {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
            *self.seen.lock().unwrap() = Some(request);
            self.outcome.clone().map_err(GenerationError::Http)
        }
    }

    fn evaluator(generator: Arc<StubGenerator>) -> OfferEvaluator {
        OfferEvaluator::new(Arc::new(BenchmarkTable::default()), generator, EvaluatorSettings::default())
    }

    fn request(platform: Value, followers: Value, engagement: Value, offer: Value) -> EvaluationRequest {
        serde_json::from_value(json!({
            "platform": platform,
            "followers": followers,
            "engagementRate": engagement,
            "offerAmount": offer,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_instagram_fair_at_lower_boundary() {
        let eval = evaluator(StubGenerator::ok("  Counter at $90-$110.  "));
        let result = eval
            .evaluate(&request(json!("instagram"), json!(10000), json!(3), json!(50)))
            .await
            .unwrap();

        assert_eq!(result.expected_range, [50.0, 100.0]);
        assert_eq!(result.verdict, Verdict::Fair);
        assert_eq!(result.suggestion, "Counter at $90-$110.");
    }

    #[tokio::test]
    async fn test_instagram_under_and_over() {
        let eval = evaluator(StubGenerator::ok("tip"));

        let under = eval
            .evaluate(&request(json!("instagram"), json!(10000), json!(3), json!(40)))
            .await
            .unwrap();
        assert_eq!(under.verdict, Verdict::Undervalued);

        let over = eval
            .evaluate(&request(json!("instagram"), json!(10000), json!(3), json!(150)))
            .await
            .unwrap();
        assert_eq!(over.verdict, Verdict::Overvalued);

        let upper = eval
            .evaluate(&request(json!("instagram"), json!(10000), json!(3), json!(100)))
            .await
            .unwrap();
        assert_eq!(upper.verdict, Verdict::Fair);
    }

    #[tokio::test]
    async fn test_generation_failure_uses_fallback() {
        let eval = evaluator(StubGenerator::failing());
        let result = eval
            .evaluate(&request(json!("youtube"), json!("2000"), json!("4.5"), json!("30")))
            .await
            .unwrap();

        assert_eq!(result.expected_range, [40.0, 60.0]);
        assert_eq!(result.verdict, Verdict::Undervalued);
        assert_eq!(
            result.suggestion,
            "Based on 2000 followers and 4.5% engagement, a fair counter-offer is $60."
        );
    }

    #[tokio::test]
    async fn test_blank_generation_uses_fallback() {
        let eval = evaluator(StubGenerator::ok("   \n"));
        let result = eval
            .evaluate(&request(json!("tiktok"), json!(1000), json!(1), json!(3)))
            .await
            .unwrap();

        assert_eq!(result.expected_range, [2.5, 5.0]);
        assert_eq!(result.verdict, Verdict::Fair);
        assert!(result.suggestion.contains("$6."));
    }

    #[tokio::test]
    async fn test_bad_numbers_coerce_to_zero() {
        let eval = evaluator(StubGenerator::failing());
        let result = eval
            .evaluate(&request(json!("instagram"), json!("lots"), Value::Null, json!({"x": 1})))
            .await
            .unwrap();

        assert_eq!(result.followers, 0.0);
        assert_eq!(result.engagement_rate, 0.0);
        assert_eq!(result.offer_amount, 0.0);
        assert_eq!(result.expected_range, [0.0, 0.0]);
        assert_eq!(result.verdict, Verdict::Fair);
        assert!(result.suggestion.contains("$0."));
    }

    #[tokio::test]
    async fn test_unknown_or_missing_platform_rejected() {
        let eval = evaluator(StubGenerator::ok("tip"));

        for platform in [json!("facebook"), Value::Null, json!(42), json!("Instagram")] {
            let err = eval
                .evaluate(&request(platform, json!(1000), json!(1), json!(1)))
                .await
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid or missing platform. Use instagram|youtube|tiktok"
            );
        }

        let err = eval.evaluate(&EvaluationRequest::default()).await.unwrap_err();
        assert!(matches!(err, OfferError::InvalidPlatform { .. }));
    }

    #[test]
    fn test_validate_returns_platform_cpm() {
        let eval = evaluator(StubGenerator::ok("tip"));
        let (input, cpm) = eval
            .validate(&request(json!("youtube"), json!("2000"), json!(1), json!(5)))
            .unwrap();

        assert_eq!(input.platform, "youtube");
        assert_eq!(input.followers, 2000.0);
        assert_eq!(cpm, CpmRange::new(20.0, 30.0));
    }

    #[tokio::test]
    async fn test_rejected_request_skips_generation() {
        let generator = StubGenerator::ok("tip");
        let eval = evaluator(generator.clone());

        let _ = eval
            .evaluate(&request(json!("facebook"), json!(1000), json!(1), json!(1)))
            .await;

        assert!(generator.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generation_request_parameters() {
        let generator = StubGenerator::ok("tip");
        let eval = evaluator(generator.clone());

        eval.evaluate(&request(json!("instagram"), json!(10000), json!(3), json!(50)))
            .await
            .unwrap();

        let seen = generator.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.system_prompt, SYSTEM_PROMPT);
        assert_eq!(seen.max_tokens, 200);
        assert!((seen.temperature - 0.2).abs() < f32::EPSILON);
        assert!(seen.user_prompt.contains("$50.00 - $100.00"));
    }

    #[tokio::test]
    async fn test_exact_basis_is_configurable() {
        let table = BenchmarkTable::new([("instagram", CpmRange::new(2.5, 50.0))]).unwrap();
        let settings = EvaluatorSettings { verdict_basis: VerdictBasis::Exact, ..Default::default() };
        let eval = OfferEvaluator::new(Arc::new(table), StubGenerator::ok("tip"), settings);

        let result = eval
            .evaluate(&request(json!("instagram"), json!(1), json!(1), json!(0)))
            .await
            .unwrap();

        assert_eq!(result.expected_range, [0.0, 0.05]);
        assert_eq!(result.verdict, Verdict::Undervalued);
    }

    #[tokio::test]
    async fn test_range_ordering_holds_across_inputs() {
        let eval = evaluator(StubGenerator::failing());
        for platform in ["instagram", "youtube", "tiktok"] {
            for followers in [0, 1, 7, 999, 54_321, 10_000_000] {
                let result = eval
                    .evaluate(&request(json!(platform), json!(followers), json!(2), json!(10)))
                    .await
                    .unwrap();
                assert!(result.expected_range[0] <= result.expected_range[1]);
            }
        }
    }
}
