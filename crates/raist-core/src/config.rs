//! Configuration management for the RAIST governance loop.

pub mod constants;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{CommitmentRecord, CommitmentVector};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub governance: GovernanceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Root commitments loaded before the first cycle.
    #[serde(default = "default_seeds")]
    pub seeds: Vec<SeedCommitment>,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{RAIST_ENV}.toml (environment-specific)
    /// 3. Environment variables with RAIST__ prefix, e.g.
    ///    `RAIST__GOVERNANCE__ACCEPTANCE_THRESHOLD=0.9`
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("RAIST_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(::config::Environment::with_prefix("RAIST").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults for testing/development.
    pub fn default_config() -> Self {
        Self {
            governance: GovernanceConfig::default(),
            logging: LoggingConfig::default(),
            seeds: default_seeds(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Seed records ready for insertion.
    pub fn seed_records(&self) -> CoreResult<Vec<CommitmentRecord>> {
        self.seeds.iter().map(SeedCommitment::to_record).collect()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        self.governance.validate()?;

        let mut seen = HashSet::new();
        for (idx, seed) in self.seeds.iter().enumerate() {
            if seed.id.trim().is_empty() {
                return Err(CoreError::ConfigError(format!(
                    "seeds[{}].id must not be empty",
                    idx
                )));
            }
            if !seen.insert(seed.id.as_str()) {
                return Err(CoreError::ConfigError(format!(
                    "seeds[{}].id '{}' is declared more than once",
                    idx, seed.id
                )));
            }
            seed.to_record().map_err(|e| {
                CoreError::ConfigError(format!("seeds[{}] ('{}'): {}", idx, seed.id, e))
            })?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Ethical reference and loop settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// `[transparency, integrity, stability, respect]`
    pub ideal_vector: Vec<f32>,
    pub acceptance_threshold: f32,
    pub retrieval_threshold: f32,
    pub id_prefix: String,
    /// Provenance tag for accepted records. Falls back to the generator id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            ideal_vector: constants::governance::IDEAL_VECTOR.to_vec(),
            acceptance_threshold: constants::governance::ACCEPTANCE_THRESHOLD,
            retrieval_threshold: constants::governance::RETRIEVAL_THRESHOLD,
            id_prefix: constants::governance::ID_PREFIX.to_string(),
            source_tag: None,
        }
    }
}

impl GovernanceConfig {
    /// The ideal vector as a validated [`CommitmentVector`].
    pub fn ideal(&self) -> CoreResult<CommitmentVector> {
        CommitmentVector::try_from_slice(&self.ideal_vector)
    }

    pub fn validate(&self) -> CoreResult<()> {
        let ideal = self
            .ideal()
            .map_err(|e| CoreError::ConfigError(format!("governance.ideal_vector: {}", e)))?;
        if ideal.is_zero() {
            return Err(CoreError::ConfigError(
                "governance.ideal_vector must have non-zero magnitude".into(),
            ));
        }

        validate_threshold("governance.acceptance_threshold", self.acceptance_threshold)?;
        validate_threshold("governance.retrieval_threshold", self.retrieval_threshold)?;

        if self.id_prefix.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "governance.id_prefix must not be empty".into(),
            ));
        }

        Ok(())
    }
}

fn validate_threshold(field: &str, value: f32) -> CoreResult<()> {
    use crate::config::constants::similarity::{MAX, MIN};

    if !value.is_finite() || !(MIN..=MAX).contains(&value) {
        return Err(CoreError::ConfigError(format!(
            "{} must be a finite value in [{}, {}], got {}",
            field, MIN, MAX, value
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `compact`
    pub format: String,
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            include_location: false,
        }
    }
}

/// A root commitment declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SeedCommitment {
    pub id: String,
    pub commitment_text: String,
    pub vector: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,
}

impl SeedCommitment {
    pub fn to_record(&self) -> CoreResult<CommitmentRecord> {
        let vector = CommitmentVector::try_from_slice(&self.vector)?;
        let mut record = CommitmentRecord::new(self.id.clone(), self.commitment_text.clone(), vector);
        record.query = self.query.clone();
        record.source_tag = self.source_tag.clone();
        Ok(record)
    }
}

fn default_seeds() -> Vec<SeedCommitment> {
    vec![SeedCommitment {
        id: constants::genesis::ID.to_string(),
        commitment_text: constants::genesis::TEXT.to_string(),
        vector: constants::genesis::VECTOR.to_vec(),
        query: Some(constants::genesis::QUERY.to_string()),
        source_tag: Some(constants::genesis::SOURCE_TAG.to_string()),
    }]
}
