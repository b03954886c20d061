use fairdeal_catalog::{BenchmarkTable, CatalogError, CpmRange};
use fairdeal_offer::{EvaluatorSettings, OpenAiChatConfig, VerdictBasis};
use fairdeal_shared::Masked;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub benchmarks: HashMap<String, CpmRange>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    pub api_key: Option<Masked<String>>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl GenerationConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_blank())
    }

    pub fn chat_config(&self) -> OpenAiChatConfig {
        OpenAiChatConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EvaluationConfig {
    pub verdict_basis: VerdictBasis,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in. Holds local secrets such as `generation.api_key`
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `FAIRDEAL__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("FAIRDEAL").separator("__"))
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("generation.api_key", env::var("OPENAI_API_KEY").ok())?
            .build()?
            .try_deserialize()
    }

    /// Built-in values used when no file or environment source sets a key.
    pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("generation.base_url", "https://api.openai.com")?
            .set_default("generation.model", "gpt-4o-mini")?
            .set_default("generation.max_tokens", 200)?
            .set_default("generation.temperature", 0.2)?
            .set_default("generation.timeout_seconds", 15)?
            .set_default("evaluation.verdict_basis", "rounded")?;

        let seeds = BenchmarkTable::default();
        for platform in seeds.platforms() {
            if let Some(entry) = seeds.lookup(platform) {
                builder = builder
                    .set_default(format!("benchmarks.{}.low", platform), entry.cpm.low)?
                    .set_default(format!("benchmarks.{}.high", platform), entry.cpm.high)?;
            }
        }

        Ok(builder)
    }

    /// Build the benchmark table. Built-in platforms keep their canonical
    /// order; additional platforms follow alphabetically.
    pub fn benchmark_table(&self) -> Result<BenchmarkTable, CatalogError> {
        let seeds = BenchmarkTable::default();
        let canonical = seeds.platforms();

        let mut extra: Vec<&String> = self
            .benchmarks
            .keys()
            .filter(|name| !canonical.contains(&name.as_str()))
            .collect();
        extra.sort();

        let ordered = canonical
            .iter()
            .filter_map(|name| self.benchmarks.get(*name).map(|cpm| (name.to_string(), *cpm)))
            .chain(extra.into_iter().filter_map(|name| self.benchmarks.get(name).map(|cpm| (name.clone(), *cpm))));

        BenchmarkTable::new(ordered)
    }

    pub fn evaluator_settings(&self) -> EvaluatorSettings {
        EvaluatorSettings {
            verdict_basis: self.evaluation.verdict_basis,
            max_tokens: self.generation.max_tokens,
            temperature: self.generation.temperature,
        }
    }
}
