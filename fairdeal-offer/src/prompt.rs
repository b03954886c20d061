use crate::models::EvaluationInput;
use crate::pricing::ExpectedRange;

pub const SYSTEM_PROMPT: &str = "You provide concise negotiation advice for influencer deals.";

/// User prompt for the negotiation tip
pub fn build_user_prompt(input: &EvaluationInput, range: &ExpectedRange) -> String {
    format!(
        "You are an expert influencer deal negotiator. Platform: {}.\n\
         Followers: {}, engagement rate: {}%.\n\
         Brand offered: ${}.\n\
         Industry estimated range (CPM-based): ${:.2} - ${:.2}.\n\
         Give a short (1-3 sentences) negotiation tip and a suggested counter-offer range (USD). \
         Keep it actionable and concise.",
        input.platform,
        input.followers,
        input.engagement_rate,
        input.offer_amount,
        range.exact_low,
        range.exact_high,
    )
}

/// Deterministic suggestion used whenever generation is unavailable.
pub fn fallback_suggestion(input: &EvaluationInput) -> String {
    format!(
        "Based on {} followers and {}% engagement, a fair counter-offer is ${}.",
        input.followers,
        input.engagement_rate,
        counter_offer(input.offer_amount),
    )
}

/// Double the offer, rounded to the nearest whole dollar. Kept as `f64` so
/// large offers are not truncated to an integer type's range.
pub fn counter_offer(offer_amount: f64) -> f64 {
    (offer_amount * 2.0).round().min(f64::MAX)
}
