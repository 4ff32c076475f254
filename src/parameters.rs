//! Fitted parameter estimates for a selected model
//!
//! Every selection starts from the Jukes-Cantor defaults and overlays only
//! the parameters the chosen model actually estimates. Score-table
//! positions come from [`ScoreLayout`](crate::scores::ScoreLayout).

use crate::error::Result;
use crate::models::SubstitutionModel;
use crate::scores::ScoreTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated shapes above this value mean "infinity" in the score file
pub const INFINITE_SHAPE: f64 = 999.0;

/// A single estimated model parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    FreqA,
    FreqC,
    FreqG,
    FreqT,
    TiTv,
    RateAC,
    RateAG,
    RateAT,
    RateCG,
    RateCT,
    RateGT,
    Pinv,
    Shape,
}

const FREQUENCIES: [Parameter; 4] = [
    Parameter::FreqA,
    Parameter::FreqC,
    Parameter::FreqG,
    Parameter::FreqT,
];

const RATES: [Parameter; 6] = [
    Parameter::RateAC,
    Parameter::RateAG,
    Parameter::RateAT,
    Parameter::RateCG,
    Parameter::RateCT,
    Parameter::RateGT,
];

impl Parameter {
    /// Parameters `model` estimates, in score-table order
    ///
    /// Order: base frequencies, Ti/Tv, the six rates, pinv, shape.
    pub fn estimated_by(model: SubstitutionModel) -> Vec<Parameter> {
        let scheme = model.scheme();
        let mut params = Vec::with_capacity(12);
        if scheme.has_unequal_frequencies() {
            params.extend(FREQUENCIES);
        }
        if scheme.has_ti_tv() {
            params.push(Parameter::TiTv);
        }
        if scheme.has_rate_matrix() {
            params.extend(RATES);
        }
        if model.has_invariable_sites() {
            params.push(Parameter::Pinv);
        }
        if model.has_gamma() {
            params.push(Parameter::Shape);
        }
        params
    }

    pub fn label(self) -> &'static str {
        match self {
            Parameter::FreqA => "freqA",
            Parameter::FreqC => "freqC",
            Parameter::FreqG => "freqG",
            Parameter::FreqT => "freqT",
            Parameter::TiTv => "TiTv",
            Parameter::RateAC => "rAC",
            Parameter::RateAG => "rAG",
            Parameter::RateAT => "rAT",
            Parameter::RateCG => "rCG",
            Parameter::RateCT => "rCT",
            Parameter::RateGT => "rGT",
            Parameter::Pinv => "pinv",
            Parameter::Shape => "shape",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameter values of a selected model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Base frequencies A, C, G, T
    pub frequencies: [f64; 4],

    /// Transition/transversion ratio; 0 when not estimated
    pub ti_tv: f64,

    /// Relative rates AC, AG, AT, CG, CT, GT
    pub rates: [f64; 6],

    /// Gamma shape; 0 when not estimated, > 999 for infinity
    pub shape: f64,

    /// Proportion of invariable sites
    pub pinv: f64,
}

impl Default for ModelParameters {
    /// Jukes-Cantor: equal frequencies, equal rates, no rate heterogeneity
    fn default() -> Self {
        Self {
            frequencies: [0.25; 4],
            ti_tv: 0.0,
            rates: [1.0; 6],
            shape: 0.0,
            pinv: 0.0,
        }
    }
}

impl ModelParameters {
    /// Extract the estimates of `model` from the score table
    pub fn select(model: SubstitutionModel, scores: &ScoreTable) -> Result<Self> {
        let mut params = Self::default();
        for (index, parameter) in scores.layout().parameter_slots(model) {
            params.set(*parameter, scores.get(*index)?);
        }
        tracing::debug!("Extracted parameters for {}: {:?}", model, params);
        Ok(params)
    }

    pub fn set(&mut self, parameter: Parameter, value: f64) {
        match parameter {
            Parameter::FreqA => self.frequencies[0] = value,
            Parameter::FreqC => self.frequencies[1] = value,
            Parameter::FreqG => self.frequencies[2] = value,
            Parameter::FreqT => self.frequencies[3] = value,
            Parameter::TiTv => self.ti_tv = value,
            Parameter::RateAC => self.rates[0] = value,
            Parameter::RateAG => self.rates[1] = value,
            Parameter::RateAT => self.rates[2] = value,
            Parameter::RateCG => self.rates[3] = value,
            Parameter::RateCT => self.rates[4] = value,
            Parameter::RateGT => self.rates[5] = value,
            Parameter::Pinv => self.pinv = value,
            Parameter::Shape => self.shape = value,
        }
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::FreqA => self.frequencies[0],
            Parameter::FreqC => self.frequencies[1],
            Parameter::FreqG => self.frequencies[2],
            Parameter::FreqT => self.frequencies[3],
            Parameter::TiTv => self.ti_tv,
            Parameter::RateAC => self.rates[0],
            Parameter::RateAG => self.rates[1],
            Parameter::RateAT => self.rates[2],
            Parameter::RateCG => self.rates[3],
            Parameter::RateCT => self.rates[4],
            Parameter::RateGT => self.rates[5],
            Parameter::Pinv => self.pinv,
            Parameter::Shape => self.shape,
        }
    }

    /// T frequency as the complement of A, C and G
    pub fn freq_t_complement(&self) -> f64 {
        1.0 - (self.frequencies[0] + self.frequencies[1] + self.frequencies[2])
    }

    /// Equal A, C and G with T taken as their complement
    pub fn has_equal_frequencies(&self) -> bool {
        let f = self.frequencies;
        f[0] == f[1] && f[0] == f[2] && f[0] == self.freq_t_complement()
    }

    /// All six rates equal and no Ti/Tv ratio (nst=1)
    pub fn has_equal_rates(&self) -> bool {
        self.ti_tv == 0.0 && self.rates.iter().all(|r| *r == self.rates[0])
    }

    pub fn has_gamma(&self) -> bool {
        self.shape != 0.0 && !self.has_infinite_shape()
    }

    pub fn has_infinite_shape(&self) -> bool {
        self.shape > INFINITE_SHAPE
    }

    pub fn has_invariable_sites(&self) -> bool {
        self.pinv != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_jukes_cantor() {
        let params = ModelParameters::default();
        assert_eq!(params.frequencies, [0.25; 4]);
        assert_eq!(params.rates, [1.0; 6]);
        assert_eq!(params.shape, 0.0);
        assert_eq!(params.pinv, 0.0);
        assert!(params.has_equal_frequencies());
        assert!(params.has_equal_rates());
        assert!(!params.has_gamma());
        assert!(!params.has_invariable_sites());
    }

    #[test]
    fn test_estimated_parameters_per_model() {
        assert!(Parameter::estimated_by(SubstitutionModel::Jc).is_empty());
        assert_eq!(
            Parameter::estimated_by(SubstitutionModel::K80IG),
            vec![Parameter::TiTv, Parameter::Pinv, Parameter::Shape]
        );
        assert_eq!(Parameter::estimated_by(SubstitutionModel::HkyI).len(), 6);
        assert_eq!(Parameter::estimated_by(SubstitutionModel::SymG).len(), 7);
        assert_eq!(Parameter::estimated_by(SubstitutionModel::GtrIG).len(), 12);
    }

    #[test]
    fn test_set_and_get_agree() {
        let mut params = ModelParameters::default();
        let all = [
            Parameter::FreqA,
            Parameter::FreqC,
            Parameter::FreqG,
            Parameter::FreqT,
            Parameter::TiTv,
            Parameter::RateAC,
            Parameter::RateAG,
            Parameter::RateAT,
            Parameter::RateCG,
            Parameter::RateCT,
            Parameter::RateGT,
            Parameter::Pinv,
            Parameter::Shape,
        ];
        for (i, p) in all.iter().enumerate() {
            params.set(*p, i as f64 + 0.5);
        }
        for (i, p) in all.iter().enumerate() {
            assert_eq!(params.get(*p), i as f64 + 0.5, "{}", p);
        }
    }

    #[test]
    fn test_infinite_shape_is_not_gamma() {
        let params = ModelParameters {
            shape: 999.999,
            ..ModelParameters::default()
        };
        assert!(params.has_infinite_shape());
        assert!(!params.has_gamma());
    }

    #[test]
    fn test_ti_tv_breaks_equal_rates() {
        let params = ModelParameters {
            ti_tv: 2.1,
            ..ModelParameters::default()
        };
        assert!(!params.has_equal_rates());
    }

    #[test]
    fn test_equal_frequencies_ignore_stored_t() {
        let params = ModelParameters {
            frequencies: [0.25, 0.25, 0.25, 0.31],
            ..ModelParameters::default()
        };
        assert!(params.has_equal_frequencies());

        let skewed = ModelParameters {
            frequencies: [0.2, 0.2, 0.2, 0.25],
            ..ModelParameters::default()
        };
        assert!(!skewed.has_equal_frequencies());
    }

    #[test]
    fn test_freq_t_complement() {
        let params = ModelParameters {
            frequencies: [0.3, 0.2, 0.1, 0.4],
            ..ModelParameters::default()
        };
        assert!((params.freq_t_complement() - 0.4).abs() < 1e-12);
    }
}
