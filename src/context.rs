//! One selection run over a score table
//!
//! [`DecisionContext`] owns the scores, the model registry and the
//! settings of a run. The registry is assembled once (including the
//! branch-length adjustment) and only borrowed afterwards by the
//! hierarchies and the AIC ranking.

use crate::aic::AicTable;
use crate::config::SelectionConfig;
use crate::error::{ModelTestError, Result};
use crate::hierarchy::{Hierarchy, WalkOutcome};
use crate::models::{ModelRegistry, SubstitutionModel};
use crate::parameters::ModelParameters;
use crate::scores::{ScoreFormat, ScoreTable};
use serde::{Deserialize, Serialize};

/// A selected model with its fit and parameter estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedModel {
    pub model: SubstitutionModel,
    pub neg_log_likelihood: f64,
    pub parameter_count: u32,

    /// AIC or AICc of the model, for criterion-based selections
    pub criterion_value: Option<f64>,

    pub parameters: ModelParameters,

    /// Model picked before +G was dropped for an infinite gamma shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initially_selected: Option<SubstitutionModel>,
}

/// Result of one hierarchy walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyRun {
    pub hierarchy: Hierarchy,
    pub outcome: WalkOutcome,
}

/// Everything a run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub config: SelectionConfig,
    pub score_format: ScoreFormat,
    pub branch_lengths: u32,

    /// Every hierarchy that was walked, in run order
    pub hierarchies: Vec<HierarchyRun>,

    /// Hierarchy whose selection is reported in detail
    pub primary: Hierarchy,

    pub hlrt: SelectedModel,

    /// More than one hierarchy ran and they picked different models
    pub disagreement: bool,

    pub aic: AicTable,
    pub aic_selection: SelectedModel,
}

impl SelectionReport {
    pub fn hierarchy_selection(&self, hierarchy: Hierarchy) -> Option<SubstitutionModel> {
        self.hierarchies
            .iter()
            .find(|run| run.hierarchy == hierarchy)
            .map(|run| run.outcome.selected)
    }
}

/// Scores, registry and settings of a run
#[derive(Debug, Clone)]
pub struct DecisionContext {
    scores: ScoreTable,
    registry: ModelRegistry,
    config: SelectionConfig,
}

impl DecisionContext {
    /// Validate settings and assemble the registry
    ///
    /// All configuration preconditions, including the AICc sample-size
    /// check, are enforced here so no test runs on a bad setup.
    pub fn new(scores: ScoreTable, config: SelectionConfig) -> Result<Self> {
        config.validate()?;

        let registry = ModelRegistry::from_likelihoods(scores.likelihoods()?)?
            .with_branch_lengths(config.branch_length_count()?)?;

        if let Some(n) = config.aicc_sample_size() {
            let k_max = registry.max_parameter_count();
            if u64::from(n) <= u64::from(k_max) + 1 {
                return Err(ModelTestError::Configuration(format!(
                    "sample size {} is too small: the richest model has {} parameters",
                    n, k_max
                )));
            }
        }

        tracing::debug!(
            "Registry ready: {} models, {} branch lengths",
            registry.len(),
            registry.branch_lengths()
        );

        Ok(Self {
            scores,
            registry,
            config,
        })
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Hierarchies to walk: the configured one, or all four
    pub fn hierarchies(&self) -> Vec<Hierarchy> {
        match self.config.hierarchy {
            Some(hierarchy) => vec![hierarchy],
            None => Hierarchy::ALL.to_vec(),
        }
    }

    /// Hierarchy whose selection is reported in detail
    pub fn primary_hierarchy(&self) -> Hierarchy {
        self.config.hierarchy.unwrap_or(Hierarchy::Hlrt1)
    }

    pub fn run_hierarchy(&self, hierarchy: Hierarchy) -> WalkOutcome {
        let outcome = hierarchy.tree().walk(&self.registry, &self.config);
        tracing::info!("{} selects {}", hierarchy, outcome.selected);
        outcome
    }

    /// Fit and parameter estimates of `model`
    pub fn select(&self, model: SubstitutionModel) -> Result<SelectedModel> {
        let fitted = self.registry.get(model);
        Ok(SelectedModel {
            model,
            neg_log_likelihood: fitted.neg_log_likelihood,
            parameter_count: fitted.parameter_count,
            criterion_value: None,
            parameters: ModelParameters::select(model, &self.scores)?,
            initially_selected: None,
        })
    }

    /// Like [`select`](Self::select), dropping +G when its shape is infinite
    pub fn select_hlrt(&self, model: SubstitutionModel) -> Result<SelectedModel> {
        let selected = self.select(model)?;
        if !selected.parameters.has_infinite_shape() {
            return Ok(selected);
        }

        let reduced = model.without_gamma();
        tracing::warn!(
            "{} was selected but its gamma shape is infinite (equal rates among sites); reporting {}",
            model,
            reduced
        );
        Ok(SelectedModel {
            initially_selected: Some(model),
            ..self.select(reduced)?
        })
    }

    pub fn rank(&self) -> Result<AicTable> {
        AicTable::compute(&self.registry, self.config.aicc_sample_size())
    }

    /// Walk the hierarchies, rank by AIC and extract both selections
    pub fn run(&self) -> Result<SelectionReport> {
        let hierarchies: Vec<HierarchyRun> = self
            .hierarchies()
            .into_iter()
            .map(|hierarchy| HierarchyRun {
                hierarchy,
                outcome: self.run_hierarchy(hierarchy),
            })
            .collect();

        let primary = self.primary_hierarchy();
        let primary_model = hierarchies
            .iter()
            .find(|run| run.hierarchy == primary)
            .map(|run| run.outcome.selected)
            .unwrap_or_else(|| self.run_hierarchy(primary).selected);

        let disagreement = hierarchies
            .iter()
            .any(|run| run.outcome.selected != primary_model);
        if disagreement {
            tracing::warn!("hLRT hierarchies disagree on the best-fit model");
        }

        let hlrt = self.select_hlrt(primary_model)?;

        let aic = self.rank()?;
        let aic_selection = SelectedModel {
            criterion_value: Some(aic.minimum()),
            ..self.select(aic.selected())?
        };

        Ok(SelectionReport {
            config: self.config.clone(),
            score_format: self.scores.format(),
            branch_lengths: self.registry.branch_lengths(),
            hierarchies,
            primary,
            hlrt,
            disagreement,
            aic,
            aic_selection,
        })
    }
}
