//! Stand-alone calculators
//!
//! Two small tools that work without a full score table: a single
//! likelihood-ratio test between two scores, and AIC for an arbitrary list
//! of (-lnL, K) pairs.

use crate::aic::aic;
use crate::error::{ModelTestError, Result};
use crate::stats::chi_square_tail;
use serde::{Deserialize, Serialize};

/// Result of [`ratio_test`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioTestResult {
    /// 2 (-lnL0 - -lnL1)
    pub statistic: f64,
    pub df: i64,
    pub p_value: f64,
    pub alpha: f64,
    pub significant: bool,
}

/// Likelihood-ratio test from two positive negative-log-likelihoods
///
/// The null model can not fit better than the alternative, so its score
/// must not be smaller.
///
/// # Example
/// ```
/// use mrmodeltest::calculator::ratio_test;
///
/// let result = ratio_test(2000.0, 1990.0, 1, 0.01).unwrap();
/// assert_eq!(result.statistic, 20.0);
/// assert!(result.significant);
/// ```
pub fn ratio_test(
    null_score: f64,
    alternative_score: f64,
    df: i64,
    alpha: f64,
) -> Result<RatioTestResult> {
    if null_score < 0.0 || alternative_score < 0.0 {
        return Err(ModelTestError::InputFormat(
            "likelihood scores must be given as positive -lnL values".to_string(),
        ));
    }
    if null_score < alternative_score {
        return Err(ModelTestError::InputFormat(format!(
            "the null score ({}) cannot be smaller than the alternative score ({})",
            null_score, alternative_score
        )));
    }
    if df < 1 {
        return Err(ModelTestError::Configuration(format!(
            "degrees of freedom must be at least 1, got {}",
            df
        )));
    }

    let statistic = 2.0 * (null_score - alternative_score);
    let p_value = chi_square_tail(statistic, df);
    Ok(RatioTestResult {
        statistic,
        df,
        p_value,
        alpha,
        significant: p_value < alpha,
    })
}

/// One scored entry of an AIC list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AicListRow {
    /// 1-based position in the input
    pub number: usize,
    pub neg_log_likelihood: f64,
    pub parameters: u32,
    pub aic: f64,
}

/// AIC of every entry and the position of the smallest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AicList {
    pub rows: Vec<AicListRow>,
    /// Index into `rows`; the first of several equal minima
    pub minimum: usize,
}

impl AicList {
    pub fn best(&self) -> &AicListRow {
        &self.rows[self.minimum]
    }
}

/// AIC for each `(-lnL, K)` pair
pub fn aic_list(entries: &[(f64, u32)]) -> Result<AicList> {
    if entries.is_empty() {
        return Err(ModelTestError::InputFormat(
            "no likelihood scores to compare".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(entries.len());
    for (i, (neg_log_likelihood, parameters)) in entries.iter().enumerate() {
        if *neg_log_likelihood <= 0.0 || !neg_log_likelihood.is_finite() {
            return Err(ModelTestError::InputFormat(format!(
                "score number {} is not a positive -lnL: {}",
                i + 1,
                neg_log_likelihood
            )));
        }
        rows.push(AicListRow {
            number: i + 1,
            neg_log_likelihood: *neg_log_likelihood,
            parameters: *parameters,
            aic: aic(*neg_log_likelihood, *parameters),
        });
    }

    let mut minimum = 0;
    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.aic < rows[minimum].aic {
            minimum = i;
        }
    }

    Ok(AicList { rows, minimum })
}

/// Read whitespace-separated `-lnL K` pairs
pub fn parse_aic_list(input: &str) -> Result<Vec<(f64, u32)>> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return Err(ModelTestError::InputFormat(format!(
            "expected pairs of -lnL and K, got {} values",
            tokens.len()
        )));
    }

    tokens
        .chunks(2)
        .map(|pair| {
            let ln = pair[0].parse::<f64>().map_err(|e| {
                ModelTestError::InputFormat(format!("bad score '{}': {}", pair[0], e))
            })?;
            let k = pair[1].parse::<u32>().map_err(|e| {
                ModelTestError::InputFormat(format!("bad parameter count '{}': {}", pair[1], e))
            })?;
            if k == 0 {
                return Err(ModelTestError::InputFormat(format!(
                    "bad parameter count '{}': must be at least 1",
                    pair[1]
                )));
            }
            Ok((ln, k))
        })
        .collect()
}
