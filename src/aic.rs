//! Akaike Information Criterion ranking
//!
//! `AIC = 2 (-lnL + K)`, optionally corrected for small samples
//! (`AICc = AIC + 2K(K+1) / (n - K - 1)`). Models are ranked by ascending
//! criterion value and given Akaike weights
//! `w_i = exp(-d_i / 2) / sum_j exp(-d_j / 2)`, `d_i = AIC_i - min AIC`
//! (Burnham & Anderson 2002).

use crate::error::{ModelTestError, Result};
use crate::models::{ModelRegistry, SubstitutionModel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which information criterion was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    Aic,
    /// Second-order correction for sample size `n`
    Aicc { sample_size: u32 },
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Aic => f.write_str("AIC"),
            Criterion::Aicc { .. } => f.write_str("AICc"),
        }
    }
}

/// One row of the ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AicEntry {
    pub model: SubstitutionModel,
    pub neg_log_likelihood: f64,
    pub parameter_count: u32,
    /// AIC or AICc, per [`AicTable::criterion`]
    pub value: f64,
    /// Difference to the minimum
    pub delta: f64,
    pub weight: f64,
    /// Running weight sum in ranking order
    pub cumulative_weight: f64,
}

/// Criterion values, weights and ranking of all models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AicTable {
    criterion: Criterion,
    /// Entries in registry order
    entries: Vec<AicEntry>,
    /// Indices into `entries`, ascending by value (stable)
    order: Vec<usize>,
    minimum: f64,
    selected: SubstitutionModel,
}

/// `2 (-lnL + K)`
pub fn aic(neg_log_likelihood: f64, parameter_count: u32) -> f64 {
    2.0 * (neg_log_likelihood + f64::from(parameter_count))
}

/// AIC plus the small-sample correction; requires `n > K + 1`
pub fn aicc(neg_log_likelihood: f64, parameter_count: u32, sample_size: u32) -> f64 {
    let k = f64::from(parameter_count);
    let n = f64::from(sample_size);
    aic(neg_log_likelihood, parameter_count) + 2.0 * k * (k + 1.0) / (n - k - 1.0)
}

/// Index of the minimum; on exact ties the highest index wins
///
/// Returns `None` for an empty slice.
pub fn select_minimum(values: &[f64]) -> Option<usize> {
    let minimum = values.iter().copied().reduce(f64::min)?;
    let mut selected = None;
    for (i, value) in values.iter().enumerate() {
        if *value == minimum {
            selected = Some(i);
        }
    }
    selected
}

/// Akaike weights of `values`, in the same order
pub fn akaike_weights(values: &[f64]) -> Vec<f64> {
    let Some(minimum) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let relative: Vec<f64> = values
        .iter()
        .map(|v| (-(v - minimum) / 2.0).exp())
        .collect();
    let total: f64 = relative.iter().sum();
    relative.iter().map(|r| r / total).collect()
}

impl AicTable {
    /// Rank every model in `registry`
    ///
    /// With a sample size, every model must satisfy `n > K + 1`; otherwise
    /// nothing is computed and a configuration error is returned.
    pub fn compute(registry: &ModelRegistry, sample_size: Option<u32>) -> Result<Self> {
        let criterion = match sample_size {
            Some(n) => {
                let k_max = registry.max_parameter_count();
                if u64::from(n) <= u64::from(k_max) + 1 {
                    return Err(ModelTestError::Configuration(format!(
                        "AICc needs a sample size larger than K + 1 = {} for every model, got {}",
                        u64::from(k_max) + 1,
                        n
                    )));
                }
                Criterion::Aicc { sample_size: n }
            }
            None => Criterion::Aic,
        };

        let values: Vec<f64> = registry
            .iter()
            .map(|m| match criterion {
                Criterion::Aic => aic(m.neg_log_likelihood, m.parameter_count),
                Criterion::Aicc { sample_size } => {
                    aicc(m.neg_log_likelihood, m.parameter_count, sample_size)
                }
            })
            .collect();

        let selected_index = select_minimum(&values).ok_or_else(|| {
            ModelTestError::InputFormat("no models to rank".to_string())
        })?;
        let minimum = values[selected_index];
        let weights = akaike_weights(&values);

        let mut entries: Vec<AicEntry> = registry
            .iter()
            .zip(values.iter().zip(weights))
            .map(|(m, (value, weight))| AicEntry {
                model: m.model,
                neg_log_likelihood: m.neg_log_likelihood,
                parameter_count: m.parameter_count,
                value: *value,
                delta: value - minimum,
                weight,
                cumulative_weight: 0.0,
            })
            .collect();

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|a, b| entries[*a].value.total_cmp(&entries[*b].value));

        let mut cumulative = 0.0;
        for i in &order {
            cumulative += entries[*i].weight;
            entries[*i].cumulative_weight = cumulative;
        }

        let selected = entries[selected_index].model;
        tracing::info!("{} selects {} ({:.4})", criterion, selected, minimum);

        Ok(Self {
            criterion,
            entries,
            order,
            minimum,
            selected,
        })
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Best model; the last model in registry order among exact ties
    pub fn selected(&self) -> SubstitutionModel {
        self.selected
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn entry(&self, model: SubstitutionModel) -> &AicEntry {
        &self.entries[model.index()]
    }

    /// Entries in registry order
    pub fn entries(&self) -> &[AicEntry] {
        &self.entries
    }

    /// Entries from best to worst
    pub fn ranking(&self) -> impl Iterator<Item = &AicEntry> {
        self.order.iter().map(|i| &self.entries[*i])
    }
}
