//! Run configuration.
//!
//! Defaults reproduce the classic FRC settings. A JSON file may override any
//! subset of fields:
//!
//! ```json
//! {
//!   "window_size": 2000,
//!   "max_insert": 20000,
//!   "thresholds": { "high_outie": 0.5 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::pairing::InsertBounds;
use crate::utils::validation::{
    validate_insert_bounds, validate_threshold, ValidationError,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

/// Multipliers that decide when a window raises a feature.
///
/// Coverage thresholds scale the genome baseline, the single/spanning/outie
/// thresholds scale the window's own read coverage, and `ce_statistic` bounds
/// the absolute CE z-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureThresholds {
    pub low_coverage: f64,
    pub high_coverage: f64,
    pub low_normal: f64,
    pub high_normal: f64,
    pub high_single: f64,
    pub high_spanning: f64,
    pub high_outie: f64,
    pub ce_statistic: f64,
}

impl Default for FeatureThresholds {
    fn default() -> Self {
        Self {
            low_coverage: 1.0 / 3.0,
            high_coverage: 3.0,
            low_normal: 1.0 / 3.0,
            high_normal: 3.0,
            high_single: 0.6,
            high_spanning: 0.6,
            high_outie: 0.6,
            ce_statistic: 3.0,
        }
    }
}

impl FeatureThresholds {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidThreshold` for the first bad value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_threshold("low_coverage", self.low_coverage)?;
        validate_threshold("high_coverage", self.high_coverage)?;
        validate_threshold("low_normal", self.low_normal)?;
        validate_threshold("high_normal", self.high_normal)?;
        validate_threshold("high_single", self.high_single)?;
        validate_threshold("high_spanning", self.high_spanning)?;
        validate_threshold("high_outie", self.high_outie)?;
        validate_threshold("ce_statistic", self.ce_statistic)
    }
}

/// Parameters of one FRC run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrcConfig {
    /// Window width in bases
    pub window_size: u64,

    /// Smallest insert accepted as properly distanced
    pub min_insert: i64,

    /// Largest insert accepted as properly distanced
    pub max_insert: i64,

    /// Denominator of the coverage axis; defaults to the summed contig length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_genome_size: Option<u64>,

    pub thresholds: FeatureThresholds,
}

impl Default for FrcConfig {
    fn default() -> Self {
        Self {
            window_size: 1000,
            min_insert: 100,
            max_insert: 1_000_000,
            estimated_genome_size: None,
            thresholds: FeatureThresholds::default(),
        }
    }
}

impl FrcConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read and
    /// `ConfigError::ParseError` if it is not valid JSON.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if `json` is not a valid config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn insert_bounds(&self) -> InsertBounds {
        InsertBounds::new(self.min_insert, self.max_insert)
    }

    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_size == 0 {
            return Err(ValidationError::ZeroWindow);
        }
        validate_insert_bounds(self.min_insert, self.max_insert)?;
        if self.estimated_genome_size == Some(0) {
            return Err(ValidationError::ZeroGenomeSize);
        }
        self.thresholds.validate()
    }
}
