//! Likelihood-ratio tests between nested models
//!
//! The statistic is `delta = 2 (lnL1 - lnL0)`, computed from stored
//! negative log-likelihoods as `2 (-lnL0 - -lnL1)`. Tests on rate
//! heterogeneity (+G, +I) place the null value on the boundary of the
//! parameter space; for those the p-value comes from a 50:50 mixture of
//! chi-square distributions (Self & Liang 1987, Goldman & Whelan 2000).

use crate::models::Model;
use crate::stats::{chi_square_tail, MAX_PROB, MIN_PROB};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five hypotheses tested by the hierarchies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    /// Equal base frequencies (e.g. JC vs F81)
    EqualBaseFrequencies,
    /// Transition rate equals transversion rate (e.g. JC vs K80)
    TiEqualsTv,
    /// Equal Ti rates and equal Tv rates (e.g. HKY vs GTR)
    EqualTiAndEqualTvRates,
    /// Equal rates among sites (X vs X+G)
    EqualSiteRates,
    /// No invariable sites (X vs X+I)
    NoInvariableSites,
}

impl TestKind {
    /// Whether the null hypothesis lies on the boundary of the parameter space
    pub fn is_boundary_test(self) -> bool {
        matches!(self, TestKind::EqualSiteRates | TestKind::NoInvariableSites)
    }

    pub fn description(self) -> &'static str {
        match self {
            TestKind::EqualBaseFrequencies => "Equal base frequencies",
            TestKind::TiEqualsTv => "Ti=Tv",
            TestKind::EqualTiAndEqualTvRates => "Unequal Tv and unequal Ti",
            TestKind::EqualSiteRates => "Equal rates among sites",
            TestKind::NoInvariableSites => "No Invariable sites",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Result of one likelihood-ratio test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LrtResult {
    /// Deviance statistic 2(lnL1 - lnL0)
    pub delta: f64,

    /// Difference in free parameters
    pub df: i64,

    /// p-value under the (possibly mixed) chi-square null
    pub p_value: f64,

    /// Whether the mixed chi-square distribution was used
    pub mixture: bool,
}

impl LrtResult {
    /// Null rejected at `alpha` (move to the more complex model)
    pub fn rejects_null(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Compare a null model with the alternative that nests it
///
/// `delta <= 0` returns exactly 1.0 (no improvement). With `use_mixture`,
/// `df == 1` halves the chi2(1) tail; otherwise the tails at `df - 1` and
/// `df` are averaged.
///
/// # Panics
/// In debug builds, when `alternative` has no more parameters than `null`
/// (the pair is not nested).
///
/// # Example
/// ```
/// use mrmodeltest::lrt::likelihood_ratio_test;
/// use mrmodeltest::models::{Model, SubstitutionModel};
///
/// let jc = Model { model: SubstitutionModel::Jc, neg_log_likelihood: 1200.0, parameter_count: 0 };
/// let f81 = Model { model: SubstitutionModel::F81, neg_log_likelihood: 1200.0, parameter_count: 3 };
/// assert_eq!(likelihood_ratio_test(&jc, &f81, false).p_value, 1.0);
/// ```
pub fn likelihood_ratio_test(null: &Model, alternative: &Model, use_mixture: bool) -> LrtResult {
    let delta = 2.0 * (null.neg_log_likelihood - alternative.neg_log_likelihood);
    let df = i64::from(alternative.parameter_count) - i64::from(null.parameter_count);

    debug_assert!(
        df > 0,
        "{} does not nest {} (df = {})",
        alternative.name(),
        null.name(),
        df
    );
    if delta < 0.0 {
        tracing::warn!(
            "{} fits worse than nested {} (2(lnL1-lnL0) = {:.4})",
            alternative.name(),
            null.name(),
            delta
        );
    }

    // No improvement never rejects, including the df = 1 mixture where
    // halving the tail would otherwise report 0.5
    let p_value = if delta <= 0.0 {
        1.0
    } else if !use_mixture {
        chi_square_tail(delta, df)
    } else if df == 1 {
        chi_square_tail(delta, 1) / 2.0
    } else {
        (chi_square_tail(delta, df - 1) + chi_square_tail(delta, df)) / 2.0
    };

    LrtResult {
        delta,
        df,
        p_value,
        mixture: use_mixture,
    }
}

/// Run a hierarchy test, choosing plain or mixed chi-square by kind
pub fn run_test(kind: TestKind, null: &Model, alternative: &Model, mixed_chi_square: bool) -> LrtResult {
    let result = likelihood_ratio_test(
        null,
        alternative,
        mixed_chi_square && kind.is_boundary_test(),
    );
    tracing::debug!(
        "{}: {} vs {} delta={:.4} df={} p={}",
        kind,
        null.name(),
        alternative.name(),
        result.delta,
        result.df,
        format_p_value(result.p_value)
    );
    result
}

/// Display a p-value with the `>0.999999` / `<0.000001` conventions
pub fn format_p_value(p: f64) -> String {
    if p == 1.0 {
        format!(">{:.6}", MAX_PROB)
    } else if p < MIN_PROB {
        format!("<{:.6}", MIN_PROB)
    } else {
        format!("{:.6}", p)
    }
}
