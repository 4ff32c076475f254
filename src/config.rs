//! Selection settings
//!
//! Settings come from defaults, an optional TOML file and command-line
//! flags, in that order of precedence (later wins).
//!
//! # Example TOML
//!
//! ```toml
//! significance_level = 0.01
//! sample_size = 898
//! taxa = 12
//! hierarchy = "hlrt2"
//! mixed_chi_square = true
//! ```

use crate::error::{ModelTestError, Result};
use crate::hierarchy::Hierarchy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest taxon count accepted for branch-length counting
pub const MAX_TAXA: u32 = 100_000;

/// Settings for one selection run
///
/// # Example
/// ```
/// use mrmodeltest::config::SelectionConfig;
///
/// let config = SelectionConfig::default();
/// assert_eq!(config.significance_level, 0.01);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// Significance level (alpha) of every hierarchy test
    ///
    /// The null model is rejected when p < alpha.
    pub significance_level: f64,

    /// Number of characters in the alignment
    ///
    /// When set (and non-zero), AICc replaces AIC.
    pub sample_size: Option<u32>,

    /// Number of taxa; adds `2 * taxa - 3` branch lengths to every
    /// parameter count
    pub taxa: Option<u32>,

    /// Run a single hierarchy instead of all four
    pub hierarchy: Option<Hierarchy>,

    /// Use the 50:50 mixed chi-square for +G and +I tests
    pub mixed_chi_square: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.01,
            sample_size: None,
            taxa: None,
            hierarchy: None,
            mixed_chi_square: true,
        }
    }
}

impl SelectionConfig {
    /// Stricter tests: simpler models survive more often
    pub fn strict() -> Self {
        Self {
            significance_level: 0.001,
            ..Self::default()
        }
    }

    /// Looser tests: richer models are accepted sooner
    pub fn permissive() -> Self {
        Self {
            significance_level: 0.05,
            ..Self::default()
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check preconditions that do not depend on the scores
    pub fn validate(&self) -> Result<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ModelTestError::Configuration(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }

        if let Some(taxa) = self.taxa {
            if taxa < 3 {
                return Err(ModelTestError::Configuration(format!(
                    "at least 3 taxa are needed to count branch lengths, got {}",
                    taxa
                )));
            }
            if taxa > MAX_TAXA {
                return Err(ModelTestError::Configuration(format!(
                    "at most {} taxa are supported, got {}",
                    MAX_TAXA, taxa
                )));
            }
        }

        Ok(())
    }

    /// Sample size for AICc, if the correction is enabled
    pub fn aicc_sample_size(&self) -> Option<u32> {
        self.sample_size.filter(|n| *n > 0)
    }

    /// Branch lengths of an unrooted binary tree on `taxa` leaves
    pub fn branch_length_count(&self) -> Result<u32> {
        match self.taxa {
            Some(taxa) if taxa >= 3 => taxa
                .checked_mul(2)
                .and_then(|n| n.checked_sub(3))
                .ok_or_else(|| {
                    ModelTestError::Configuration(format!(
                        "{} taxa overflow the branch-length count",
                        taxa
                    ))
                }),
            _ => Ok(0),
        }
    }
}
