use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw `/analyze` body. Every field is untrusted and may be missing, null,
/// a string, or a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationRequest {
    pub platform: Option<Value>,
    pub followers: Option<Value>,
    pub engagement_rate: Option<Value>,
    pub offer_amount: Option<Value>,
}

/// Validated and coerced evaluation input. Numbers are finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationInput {
    pub platform: String,
    pub followers: f64,
    pub engagement_rate: f64,
    pub offer_amount: f64,
}

/// Offer classification relative to the expected range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Undervalued,
    Fair,
    Overvalued,
}

impl Verdict {
    /// Boundaries are inclusive of `Fair`.
    pub fn classify(offer: f64, low: f64, high: f64) -> Self {
        if offer < low {
            Verdict::Undervalued
        } else if offer > high {
            Verdict::Overvalued
        } else {
            Verdict::Fair
        }
    }
}

/// Which expected bounds the verdict is compared against
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerdictBasis {
    /// The 2-decimal values returned to the client
    #[default]
    Rounded,
    /// The unrounded CPM products
    Exact,
}

/// Where the returned suggestion came from. Logged, never serialized to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    Generated,
    Fallback,
}

/// Response payload for a successful evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub platform: String,
    pub followers: f64,
    pub engagement_rate: f64,
    pub offer_amount: f64,
    /// `[low, high]`, rounded to 2 decimals
    pub expected_range: [f64; 2],
    pub verdict: Verdict,
    pub suggestion: String,
}
