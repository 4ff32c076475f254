//! JSON output format for selection results
//!
//! `--format json` prints one [`JsonOutput`] document.

use crate::aic::Criterion;
use crate::context::{SelectedModel, SelectionReport};
use serde::{Deserialize, Serialize};

/// Run settings as applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSettings {
    pub significance_level: f64,
    pub mixed_chi_square: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxa: Option<u32>,
    pub branch_lengths: u32,
    /// "PaupMatrix" or "RawScores"
    pub input_format: String,
}

/// One likelihood-ratio test on a hierarchy path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTest {
    pub node: String,
    pub test: String,
    pub null_model: String,
    pub alternative_model: String,
    pub delta: f64,
    pub df: i64,
    pub p_value: f64,
    pub mixed_chi_square: bool,
    pub null_rejected: bool,
}

/// Walk of one hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonHierarchy {
    pub name: String,
    pub selected: String,
    pub tests: Vec<JsonTest>,
}

/// A selected model and its estimates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSelection {
    pub model: String,
    pub neg_log_likelihood: f64,
    pub parameter_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criterion_value: Option<f64>,
    /// A, C, G, T
    pub base_frequencies: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ti_tv: Option<f64>,
    /// AC, AG, AT, CG, CT, GT
    pub rates: [f64; 6],
    pub pinv: f64,
    /// Absent without gamma; `null` for an infinite shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initially_selected: Option<String>,
}

/// hLRT results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonHlrt {
    pub reported_hierarchy: String,
    pub disagreement: bool,
    pub hierarchies: Vec<JsonHierarchy>,
    pub selection: JsonSelection,
}

/// One row of the Akaike weight table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWeight {
    pub model: String,
    pub neg_log_likelihood: f64,
    pub parameter_count: u32,
    pub value: f64,
    pub delta: f64,
    pub weight: f64,
    pub cumulative_weight: f64,
}

/// AIC / AICc results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCriterion {
    /// "AIC" or "AICc"
    pub criterion: String,
    pub selection: JsonSelection,
    /// Best model first
    pub weights: Vec<JsonWeight>,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub settings: JsonSettings,
    pub hlrt: JsonHlrt,
    pub aic: JsonCriterion,
}

impl JsonSelection {
    fn from_selected(selection: &SelectedModel) -> Self {
        let p = &selection.parameters;
        let shape = if p.has_infinite_shape() {
            Some(None)
        } else if p.has_gamma() {
            Some(Some(p.shape))
        } else {
            None
        };
        Self {
            model: selection.model.to_string(),
            neg_log_likelihood: selection.neg_log_likelihood,
            parameter_count: selection.parameter_count,
            criterion_value: selection.criterion_value,
            base_frequencies: [
                p.frequencies[0],
                p.frequencies[1],
                p.frequencies[2],
                p.freq_t_complement(),
            ],
            ti_tv: (p.ti_tv != 0.0).then_some(p.ti_tv),
            rates: p.rates,
            pinv: p.pinv,
            shape,
            initially_selected: selection.initially_selected.map(|m| m.to_string()),
        }
    }
}

impl JsonOutput {
    /// Build the document from a finished run
    pub fn from_report(report: &SelectionReport) -> Self {
        let hierarchies = report
            .hierarchies
            .iter()
            .map(|run| JsonHierarchy {
                name: run.hierarchy.to_string(),
                selected: run.outcome.selected.to_string(),
                tests: run
                    .outcome
                    .steps
                    .iter()
                    .map(|step| JsonTest {
                        node: step.label.clone(),
                        test: step.kind.to_string(),
                        null_model: step.null.to_string(),
                        alternative_model: step.alternative.to_string(),
                        delta: step.result.delta,
                        df: step.result.df,
                        p_value: step.result.p_value,
                        mixed_chi_square: step.result.mixture,
                        null_rejected: step.rejected,
                    })
                    .collect(),
            })
            .collect();

        let weights = report
            .aic
            .ranking()
            .map(|entry| JsonWeight {
                model: entry.model.to_string(),
                neg_log_likelihood: entry.neg_log_likelihood,
                parameter_count: entry.parameter_count,
                value: entry.value,
                delta: entry.delta,
                weight: entry.weight,
                cumulative_weight: entry.cumulative_weight,
            })
            .collect();

        let sample_size = match report.aic.criterion() {
            Criterion::Aicc { sample_size } => Some(sample_size),
            Criterion::Aic => None,
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "mrmodeltest-json-v1".to_string(),
            settings: JsonSettings {
                significance_level: report.config.significance_level,
                mixed_chi_square: report.config.mixed_chi_square,
                sample_size,
                taxa: report.config.taxa,
                branch_lengths: report.branch_lengths,
                input_format: format!("{:?}", report.score_format),
            },
            hlrt: JsonHlrt {
                reported_hierarchy: report.primary.to_string(),
                disagreement: report.disagreement,
                hierarchies,
                selection: JsonSelection::from_selected(&report.hlrt),
            },
            aic: JsonCriterion {
                criterion: report.aic.criterion().to_string(),
                selection: JsonSelection::from_selected(&report.aic_selection),
                weights,
            },
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
