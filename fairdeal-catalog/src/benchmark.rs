use serde::{Deserialize, Serialize};

/// CPM range in USD per 1000 followers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpmRange {
    pub low: f64,
    pub high: f64,
}

impl CpmRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Expected payment bounds for an audience of `followers`, unrounded.
    pub fn expected_payment(&self, followers: f64) -> (f64, f64) {
        let mille = followers / 1000.0;
        (mille * self.low, mille * self.high)
    }

    fn validate(&self, platform: &str) -> Result<(), CatalogError> {
        let finite = self.low.is_finite() && self.high.is_finite();
        if !finite || self.low < 0.0 || self.high < self.low {
            return Err(CatalogError::InvalidRange {
                platform: platform.to_string(),
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Benchmark entry for a single platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformBenchmark {
    pub platform: String,
    pub cpm: CpmRange,
}

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid CPM range for {platform}: low={low}, high={high}")]
    InvalidRange { platform: String, low: f64, high: f64 },

    #[error("Platform identifier must not be empty")]
    EmptyPlatform,
}

/// Read-only platform → CPM lookup, built once at startup and shared by reference.
///
/// Entries keep registration order; that order is what clients see when the
/// accepted platforms are listed.
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    entries: Vec<PlatformBenchmark>,
}

impl BenchmarkTable {
    pub fn new<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, CpmRange)>,
        S: Into<String>,
    {
        let mut table: Vec<PlatformBenchmark> = Vec::new();

        for (platform, cpm) in entries {
            let platform: String = platform.into();
            let platform = platform.trim().to_lowercase();
            if platform.is_empty() {
                return Err(CatalogError::EmptyPlatform);
            }
            cpm.validate(&platform)?;

            tracing::debug!("Registered benchmark {} low={} high={}", platform, cpm.low, cpm.high);
            match table.iter_mut().find(|b| b.platform == platform) {
                Some(existing) => existing.cpm = cpm,
                None => table.push(PlatformBenchmark { platform, cpm }),
            }
        }

        Ok(Self { entries: table })
    }

    /// Exact match on the identifier. Unknown platforms yield `None`.
    pub fn lookup(&self, platform: &str) -> Option<&PlatformBenchmark> {
        self.entries.iter().find(|b| b.platform == platform)
    }

    /// Recognized identifiers in registration order
    pub fn platforms(&self) -> Vec<&str> {
        self.entries.iter().map(|b| b.platform.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        let seeds = [
            ("instagram", CpmRange::new(5.0, 10.0)),
            ("youtube", CpmRange::new(20.0, 30.0)),
            ("tiktok", CpmRange::new(2.5, 5.0)),
        ];

        let entries = seeds
            .into_iter()
            .map(|(platform, cpm)| PlatformBenchmark { platform: platform.to_string(), cpm })
            .collect();

        Self { entries }
    }
}
