use fairdeal_catalog::CpmRange;

use crate::models::{Verdict, VerdictBasis};

/// Round to 2 decimal places, half away from zero.
///
/// At or above 1e15 an `f64` has no fractional cents left to round, and
/// scaling by 100 could overflow to infinity, so the value passes through.
pub fn round2(value: f64) -> f64 {
    if value.abs() >= 1e15 {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// Expected payment range for an audience, with both the raw and displayed bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedRange {
    pub exact_low: f64,
    pub exact_high: f64,
    pub low: f64,
    pub high: f64,
}

impl ExpectedRange {
    pub fn compute(cpm: &CpmRange, followers: f64) -> Self {
        let (exact_low, exact_high) = cpm.expected_payment(followers);
        // JSON has no infinity; saturate instead
        let exact_low = exact_low.min(f64::MAX);
        let exact_high = exact_high.min(f64::MAX);
        Self {
            exact_low,
            exact_high,
            low: round2(exact_low),
            high: round2(exact_high),
        }
    }

    pub fn verdict(&self, offer: f64, basis: VerdictBasis) -> Verdict {
        match basis {
            VerdictBasis::Rounded => Verdict::classify(offer, self.low, self.high),
            VerdictBasis::Exact => Verdict::classify(offer, self.exact_low, self.exact_high),
        }
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.low, self.high]
    }
}
