//! CLI argument parsing for mrmodeltest

use crate::config::SelectionConfig;
use crate::hierarchy::Hierarchy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for selection results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Starting point for the selection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// alpha = 0.01
    Default,
    /// alpha = 0.001
    Strict,
    /// alpha = 0.05
    Permissive,
}

impl Preset {
    pub fn config(self) -> SelectionConfig {
        match self {
            Preset::Default => SelectionConfig::default(),
            Preset::Strict => SelectionConfig::strict(),
            Preset::Permissive => SelectionConfig::permissive(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mrmodeltest")]
#[command(version)]
#[command(
    about = "Select a nucleotide substitution model with hierarchical LRTs and AIC",
    long_about = None
)]
pub struct Cli {
    /// Likelihood scores (PAUP* output); reads stdin when omitted or "-"
    #[arg(value_name = "SCORES")]
    pub input: Option<PathBuf>,

    /// Significance level for the likelihood-ratio tests
    #[arg(short = 'a', long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Sample size (number of characters); enables AICc
    #[arg(short = 'n', long = "sample-size", value_name = "N")]
    pub sample_size: Option<u32>,

    /// Number of taxa; counts 2*taxa-3 branch lengths as parameters
    #[arg(short = 't', long = "taxa", value_name = "TAXA")]
    pub taxa: Option<u32>,

    /// Run and report a single hierarchy (default: run all four, report hLRT1)
    #[arg(long = "hierarchy", value_enum)]
    pub hierarchy: Option<Hierarchy>,

    /// Use the plain chi-square distribution for +G and +I tests
    #[arg(long = "no-mixed-chi-square")]
    pub no_mixed_chi_square: bool,

    /// Settings preset applied before the config file and flags
    #[arg(long = "preset", value_enum, default_value = "default")]
    pub preset: Preset,

    /// TOML settings file (replaces the preset; flags still override it)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Likelihood-ratio calculator: null -lnL, alternative -lnL, degrees of freedom
    #[arg(
        long = "lrt-calc",
        num_args = 3,
        value_names = ["NULL_LNL", "ALT_LNL", "DF"],
        allow_negative_numbers = true
    )]
    pub lrt_calc: Option<Vec<f64>>,

    /// AIC calculator: read "-lnL K" pairs instead of a score table
    #[arg(long = "aic-list")]
    pub aic_list: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `base`
    pub fn apply_overrides(&self, base: SelectionConfig) -> SelectionConfig {
        let mut config = base;
        if let Some(alpha) = self.alpha {
            config.significance_level = alpha;
        }
        if self.sample_size.is_some() {
            config.sample_size = self.sample_size;
        }
        if self.taxa.is_some() {
            config.taxa = self.taxa;
        }
        if self.hierarchy.is_some() {
            config.hierarchy = self.hierarchy;
        }
        if self.no_mixed_chi_square {
            config.mixed_chi_square = false;
        }
        config
    }

    /// Whether the scores come from stdin
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}
