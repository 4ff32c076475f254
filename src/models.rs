//! The 24 nucleotide substitution models and their registry
//!
//! Each model is a base substitution scheme (JC, F81, K80, HKY, SYM, GTR)
//! optionally extended with a proportion of invariable sites (+I) and/or
//! gamma-distributed rate variation (+G). The registry holds one fitted
//! record per model, in the fixed order used by the score table.

use crate::error::{ModelTestError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of candidate models
pub const NUM_MODELS: usize = 24;

/// Base substitution scheme, ignoring rate heterogeneity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseScheme {
    Jc,
    F81,
    K80,
    Hky,
    Sym,
    Gtr,
}

impl BaseScheme {
    /// Whether the scheme estimates unequal base frequencies
    pub fn has_unequal_frequencies(self) -> bool {
        matches!(self, BaseScheme::F81 | BaseScheme::Hky | BaseScheme::Gtr)
    }

    /// Whether the scheme estimates a single transition/transversion ratio
    pub fn has_ti_tv(self) -> bool {
        matches!(self, BaseScheme::K80 | BaseScheme::Hky)
    }

    /// Whether the scheme estimates all six exchangeability rates
    pub fn has_rate_matrix(self) -> bool {
        matches!(self, BaseScheme::Sym | BaseScheme::Gtr)
    }

    /// Free parameters of the scheme itself
    pub fn free_parameters(self) -> u32 {
        match self {
            BaseScheme::Jc => 0,
            BaseScheme::F81 => 3,
            BaseScheme::K80 => 1,
            BaseScheme::Hky => 4,
            BaseScheme::Sym => 5,
            BaseScheme::Gtr => 8,
        }
    }

    /// Scheme nesting: JC < F81 < HKY < GTR and JC < K80 < SYM < GTR, K80 < HKY
    pub fn is_nested_in(self, other: BaseScheme) -> bool {
        use BaseScheme::{Gtr, Hky, Jc, Sym, F81, K80};
        match (self, other) {
            (a, b) if a == b => true,
            (Jc, _) => true,
            (F81, Hky) | (F81, Gtr) => true,
            (K80, Hky) | (K80, Sym) | (K80, Gtr) => true,
            (Hky, Gtr) | (Sym, Gtr) => true,
            _ => false,
        }
    }

    fn label(self) -> &'static str {
        match self {
            BaseScheme::Jc => "JC",
            BaseScheme::F81 => "F81",
            BaseScheme::K80 => "K80",
            BaseScheme::Hky => "HKY",
            BaseScheme::Sym => "SYM",
            BaseScheme::Gtr => "GTR",
        }
    }
}

/// One of the 24 candidate models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubstitutionModel {
    Jc,
    JcI,
    JcG,
    JcIG,
    F81,
    F81I,
    F81G,
    F81IG,
    K80,
    K80I,
    K80G,
    K80IG,
    Hky,
    HkyI,
    HkyG,
    HkyIG,
    Sym,
    SymI,
    SymG,
    SymIG,
    Gtr,
    GtrI,
    GtrG,
    GtrIG,
}

/// Registry order; index in this table is the model index used everywhere
pub const ALL_MODELS: [SubstitutionModel; NUM_MODELS] = [
    SubstitutionModel::Jc,
    SubstitutionModel::JcI,
    SubstitutionModel::JcG,
    SubstitutionModel::JcIG,
    SubstitutionModel::F81,
    SubstitutionModel::F81I,
    SubstitutionModel::F81G,
    SubstitutionModel::F81IG,
    SubstitutionModel::K80,
    SubstitutionModel::K80I,
    SubstitutionModel::K80G,
    SubstitutionModel::K80IG,
    SubstitutionModel::Hky,
    SubstitutionModel::HkyI,
    SubstitutionModel::HkyG,
    SubstitutionModel::HkyIG,
    SubstitutionModel::Sym,
    SubstitutionModel::SymI,
    SubstitutionModel::SymG,
    SubstitutionModel::SymIG,
    SubstitutionModel::Gtr,
    SubstitutionModel::GtrI,
    SubstitutionModel::GtrG,
    SubstitutionModel::GtrIG,
];

/// name <-> variant table
const MODEL_NAMES: [(SubstitutionModel, &str); NUM_MODELS] = [
    (SubstitutionModel::Jc, "JC"),
    (SubstitutionModel::JcI, "JC+I"),
    (SubstitutionModel::JcG, "JC+G"),
    (SubstitutionModel::JcIG, "JC+I+G"),
    (SubstitutionModel::F81, "F81"),
    (SubstitutionModel::F81I, "F81+I"),
    (SubstitutionModel::F81G, "F81+G"),
    (SubstitutionModel::F81IG, "F81+I+G"),
    (SubstitutionModel::K80, "K80"),
    (SubstitutionModel::K80I, "K80+I"),
    (SubstitutionModel::K80G, "K80+G"),
    (SubstitutionModel::K80IG, "K80+I+G"),
    (SubstitutionModel::Hky, "HKY"),
    (SubstitutionModel::HkyI, "HKY+I"),
    (SubstitutionModel::HkyG, "HKY+G"),
    (SubstitutionModel::HkyIG, "HKY+I+G"),
    (SubstitutionModel::Sym, "SYM"),
    (SubstitutionModel::SymI, "SYM+I"),
    (SubstitutionModel::SymG, "SYM+G"),
    (SubstitutionModel::SymIG, "SYM+I+G"),
    (SubstitutionModel::Gtr, "GTR"),
    (SubstitutionModel::GtrI, "GTR+I"),
    (SubstitutionModel::GtrG, "GTR+G"),
    (SubstitutionModel::GtrIG, "GTR+I+G"),
];

impl SubstitutionModel {
    /// Position in the registry (0..24)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Model at a registry position
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_MODELS.get(index).copied()
    }

    /// Canonical name, e.g. `"GTR+I+G"`
    pub fn name(self) -> &'static str {
        MODEL_NAMES[self.index()].1
    }

    /// Look up a model by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        MODEL_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(model, _)| *model)
    }

    pub fn scheme(self) -> BaseScheme {
        match self.index() / 4 {
            0 => BaseScheme::Jc,
            1 => BaseScheme::F81,
            2 => BaseScheme::K80,
            3 => BaseScheme::Hky,
            4 => BaseScheme::Sym,
            _ => BaseScheme::Gtr,
        }
    }

    /// Whether the model estimates a proportion of invariable sites
    pub fn has_invariable_sites(self) -> bool {
        self.index() % 4 == 1 || self.index() % 4 == 3
    }

    /// Whether the model estimates a gamma shape parameter
    pub fn has_gamma(self) -> bool {
        self.index() % 4 >= 2
    }

    /// Build a model from its components
    pub fn compose(scheme: BaseScheme, invariable: bool, gamma: bool) -> Self {
        let offset = match (invariable, gamma) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        };
        let base = match scheme {
            BaseScheme::Jc => 0,
            BaseScheme::F81 => 4,
            BaseScheme::K80 => 8,
            BaseScheme::Hky => 12,
            BaseScheme::Sym => 16,
            BaseScheme::Gtr => 20,
        };
        ALL_MODELS[base + offset]
    }

    /// Same model with the gamma component removed
    pub fn without_gamma(self) -> Self {
        Self::compose(self.scheme(), self.has_invariable_sites(), false)
    }

    /// Free parameters excluding branch lengths
    pub fn free_parameters(self) -> u32 {
        self.scheme().free_parameters()
            + u32::from(self.has_invariable_sites())
            + u32::from(self.has_gamma())
    }

    /// Whether `self` is a constrained special case of `other`
    ///
    /// A model nests in itself; strict nesting is `nests_in && self != other`.
    pub fn is_nested_in(self, other: SubstitutionModel) -> bool {
        self.scheme().is_nested_in(other.scheme())
            && (!self.has_invariable_sites() || other.has_invariable_sites())
            && (!self.has_gamma() || other.has_gamma())
    }
}

impl fmt::Display for SubstitutionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubstitutionModel {
    type Err = ModelTestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s.trim()).ok_or_else(|| ModelTestError::UnknownModel(s.to_string()))
    }
}

impl TryFrom<String> for SubstitutionModel {
    type Error = ModelTestError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SubstitutionModel> for String {
    fn from(model: SubstitutionModel) -> Self {
        model.name().to_string()
    }
}

impl fmt::Display for BaseScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fitted record for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub model: SubstitutionModel,

    /// Negative log-likelihood (-lnL); smaller is better
    pub neg_log_likelihood: f64,

    /// Free parameters, including branch lengths when they are counted
    pub parameter_count: u32,
}

impl Model {
    pub fn name(&self) -> &'static str {
        self.model.name()
    }
}

/// Fitted records for all 24 models, in registry order
///
/// Read-only once built. Branch lengths are added through
/// [`ModelRegistry::with_branch_lengths`], which consumes the registry so
/// the adjustment can only be applied while it is still being assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRegistry {
    models: Vec<Model>,
    branch_lengths: u32,
}

impl ModelRegistry {
    /// Build the registry from per-model negative log-likelihoods
    ///
    /// A likelihood of exactly zero means the score was missing from the
    /// input and is rejected.
    pub fn from_likelihoods(likelihoods: [f64; NUM_MODELS]) -> Result<Self> {
        let mut models = Vec::with_capacity(NUM_MODELS);
        for (model, neg_log_likelihood) in ALL_MODELS.iter().zip(likelihoods) {
            if neg_log_likelihood == 0.0 {
                return Err(ModelTestError::InputFormat(format!(
                    "missing likelihood score for {}",
                    model
                )));
            }
            if !neg_log_likelihood.is_finite() {
                return Err(ModelTestError::InputFormat(format!(
                    "non-finite likelihood score for {}",
                    model
                )));
            }
            models.push(Model {
                model: *model,
                neg_log_likelihood,
                parameter_count: model.free_parameters(),
            });
        }

        Ok(Self {
            models,
            branch_lengths: 0,
        })
    }

    /// Count `count` branch lengths as free parameters of every model
    pub fn with_branch_lengths(mut self, count: u32) -> Result<Self> {
        let overflow = || {
            ModelTestError::Configuration(format!(
                "{} branch lengths overflow the parameter count",
                count
            ))
        };
        for model in &mut self.models {
            model.parameter_count = model
                .parameter_count
                .checked_add(count)
                .ok_or_else(overflow)?;
        }
        self.branch_lengths = self
            .branch_lengths
            .checked_add(count)
            .ok_or_else(overflow)?;
        Ok(self)
    }

    /// Branch lengths added to every parameter count
    pub fn branch_lengths(&self) -> u32 {
        self.branch_lengths
    }

    pub fn get(&self, model: SubstitutionModel) -> &Model {
        &self.models[model.index()]
    }

    pub fn by_index(&self, index: usize) -> Option<&Model> {
        self.models.get(index)
    }

    pub fn by_name(&self, name: &str) -> Result<&Model> {
        let model: SubstitutionModel = name.parse()?;
        Ok(self.get(model))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Largest parameter count across all models (always GTR+I+G)
    pub fn max_parameter_count(&self) -> u32 {
        self.models
            .iter()
            .map(|m| m.parameter_count)
            .max()
            .unwrap_or(0)
    }
}
