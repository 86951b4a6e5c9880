pub mod defaults;
mod generation_config;
mod imaging_config;
mod observability_config;
mod pipeline_config;
mod ranking_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use generation_config::GenerationConfig;
pub use imaging_config::{ImagingConfig, StyleKind};
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use ranking_config::RankingConfig;
pub use retrieval_config::{RetrievalConfig, RetrievalStrategy};

use crate::errors::{FableError, FableResult};

/// Root configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FableConfig {
    pub generation: GenerationConfig,
    pub ranking: RankingConfig,
    pub retrieval: RetrievalConfig,
    pub imaging: ImagingConfig,
    pub pipeline: PipelineConfig,
    pub observability: ObservabilityConfig,
}

impl FableConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> FableResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| FableError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> FableResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FableError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> FableResult<String> {
        toml::to_string_pretty(self).map_err(|e| FableError::ConfigError(e.to_string()))
    }

    /// Reject values that would stall or break the pipeline.
    pub fn validate(&self) -> FableResult<()> {
        let g = &self.generation;
        if g.tokens_per_round == 0 {
            return Err(FableError::ConfigError(
                "generation.tokens_per_round must be at least 1".to_string(),
            ));
        }
        if g.max_rounds == 0 {
            return Err(FableError::ConfigError(
                "generation.max_rounds must be at least 1".to_string(),
            ));
        }
        if g.temperature.is_nan() || g.temperature <= 0.0 {
            return Err(FableError::ConfigError(format!(
                "generation.temperature must be positive, got {}",
                g.temperature
            )));
        }
        if g.top_p.is_nan() || g.top_p <= 0.0 || g.top_p > 1.0 {
            return Err(FableError::ConfigError(format!(
                "generation.top_p must be in (0, 1], got {}",
                g.top_p
            )));
        }
        if self.retrieval.images_per_story == 0 {
            return Err(FableError::ConfigError(
                "retrieval.images_per_story must be at least 1".to_string(),
            ));
        }
        if self.retrieval.lsa_max_vocabulary == 0 {
            return Err(FableError::ConfigError(
                "retrieval.lsa_max_vocabulary must be at least 1".to_string(),
            ));
        }
        if self.retrieval.buffer_multiplier == 0 {
            return Err(FableError::ConfigError(
                "retrieval.buffer_multiplier must be at least 1".to_string(),
            ));
        }
        if self.imaging.download_threads == 0 {
            return Err(FableError::ConfigError(
                "imaging.download_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
