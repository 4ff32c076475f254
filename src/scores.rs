//! Raw likelihood score table and its fixed layout
//!
//! PAUP* prints one row per model: a row ordinal, the negative
//! log-likelihood, then the parameters the model estimates. The scanner
//! below flattens that output into a single sequence of numbers, so every
//! value lives at a fixed, model-determined position:
//!
//! ```text
//! [0] 1  [1] -lnL JC
//! [2] 2  [3] -lnL JC+I   [4] pinv
//! [5] 3  [6] -lnL JC+G   [7] shape
//! ...
//! [162] 24  [163] -lnL GTR+I+G  [164..=167] freqs  [168..=173] rates  [174] pinv  [175] shape
//! ```
//!
//! [`ScoreLayout`] derives those positions once from the model structure;
//! [`ScoreTable`] reads through it with bounds-checked access.

use crate::error::{ModelTestError, Result};
use crate::models::{SubstitutionModel, ALL_MODELS, NUM_MODELS};
use crate::parameters::Parameter;
use regex::Regex;
use std::io::Read;
use std::sync::OnceLock;

/// Minimum number of values a complete table must contain
pub const MIN_SCORES: usize = 175;

/// Value stored for the word `infinity` (an unbounded gamma shape)
pub const INFINITY_SCORE: f64 = 999.999;

/// Who reads a given score-table position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Row ordinal printed before each model's scores
    RowOrdinal(SubstitutionModel),
    /// Negative log-likelihood of the model
    Likelihood(SubstitutionModel),
    /// One fitted parameter of the model
    Parameter(SubstitutionModel, Parameter),
}

/// Positions of one model's block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBlock {
    pub model: SubstitutionModel,
    pub row: usize,
    pub likelihood: usize,
    pub parameters: Vec<(usize, Parameter)>,
}

/// The complete position map of a score table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLayout {
    blocks: Vec<ModelBlock>,
    slots: Vec<Slot>,
}

impl ScoreLayout {
    /// Layout of the PAUP* model-block output (176 positions)
    pub fn standard() -> &'static ScoreLayout {
        static LAYOUT: OnceLock<ScoreLayout> = OnceLock::new();
        LAYOUT.get_or_init(ScoreLayout::build)
    }

    fn build() -> Self {
        let mut blocks = Vec::with_capacity(NUM_MODELS);
        let mut slots = Vec::new();

        for model in ALL_MODELS {
            let row = slots.len();
            slots.push(Slot::RowOrdinal(model));
            let likelihood = slots.len();
            slots.push(Slot::Likelihood(model));

            let mut parameters = Vec::new();
            for parameter in Parameter::estimated_by(model) {
                parameters.push((slots.len(), parameter));
                slots.push(Slot::Parameter(model, parameter));
            }

            blocks.push(ModelBlock {
                model,
                row,
                likelihood,
                parameters,
            });
        }

        Self { blocks, slots }
    }

    /// Number of positions the layout claims
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn block(&self, model: SubstitutionModel) -> &ModelBlock {
        &self.blocks[model.index()]
    }

    pub fn likelihood_index(&self, model: SubstitutionModel) -> usize {
        self.block(model).likelihood
    }

    pub fn parameter_slots(&self, model: SubstitutionModel) -> &[(usize, Parameter)] {
        &self.block(model).parameters
    }

    /// Consumer of a position, if any
    pub fn claimant(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }
}

/// How the input announced itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScoreFormat {
    /// PAUP* matrix output (starts with the word `Tree`)
    PaupMatrix,
    /// Bare list of scores
    RawScores,
}

/// Ordered raw scores extracted from the input
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    values: Vec<f64>,
    format: ScoreFormat,
}

impl ScoreTable {
    /// Wrap already-extracted values
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        Self::with_format(values, ScoreFormat::RawScores)
    }

    fn with_format(values: Vec<f64>, format: ScoreFormat) -> Result<Self> {
        if values.len() < MIN_SCORES {
            return Err(ModelTestError::InputFormat(format!(
                "found {} scores, expected at least {} (is the PAUP* block up to date?)",
                values.len(),
                MIN_SCORES
            )));
        }
        Ok(Self { values, format })
    }

    /// Scan PAUP* output or a raw score list
    ///
    /// Numbers are read wherever a token starts with a digit; signs and
    /// punctuation are skipped. Words are ignored except `infinity`, which
    /// is stored as [`INFINITY_SCORE`].
    pub fn parse(input: &str) -> Result<Self> {
        let format = if input.starts_with('T') {
            ScoreFormat::PaupMatrix
        } else {
            ScoreFormat::RawScores
        };

        let token = Regex::new(r"[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?|[A-Za-z]\S*")
            .map_err(|e| ModelTestError::InputFormat(e.to_string()))?;

        let mut values = Vec::with_capacity(ScoreLayout::standard().len());
        for m in token.find_iter(input) {
            let text = m.as_str();
            if text.starts_with(|c: char| c.is_ascii_digit()) {
                let value = text.parse::<f64>().map_err(|e| {
                    ModelTestError::InputFormat(format!("bad number '{}': {}", text, e))
                })?;
                values.push(value);
            } else if text == "infinity" {
                values.push(INFINITY_SCORE);
            }
        }

        tracing::debug!("Read {} scores ({:?})", values.len(), format);
        Self::with_format(values, format)
    }

    /// Read and scan everything from `reader`
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    pub fn format(&self) -> ScoreFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn layout(&self) -> &'static ScoreLayout {
        ScoreLayout::standard()
    }

    /// Bounds-checked access to a raw position
    pub fn get(&self, index: usize) -> Result<f64> {
        self.values.get(index).copied().ok_or_else(|| {
            ModelTestError::InputFormat(format!(
                "score position {} requested but the table has {} values",
                index,
                self.values.len()
            ))
        })
    }

    /// Negative log-likelihood of `model`
    pub fn likelihood(&self, model: SubstitutionModel) -> Result<f64> {
        self.get(self.layout().likelihood_index(model))
    }

    /// Negative log-likelihoods of all models, in registry order
    pub fn likelihoods(&self) -> Result<[f64; NUM_MODELS]> {
        let mut ln = [0.0; NUM_MODELS];
        for (slot, model) in ln.iter_mut().zip(ALL_MODELS) {
            *slot = self.likelihood(model)?;
        }
        Ok(ln)
    }
}
