// Shared helpers for integration tests
//
// Builds score tables in the PAUP* layout from per-model likelihoods and
// parameter values, so scenarios can be described by what they mean.

#![allow(dead_code)]

use mrmodeltest::models::{BaseScheme, SubstitutionModel, ALL_MODELS, NUM_MODELS};
use mrmodeltest::parameters::Parameter;
use mrmodeltest::scores::ScoreLayout;
use std::path::PathBuf;

/// Path of a file under tests/fixtures
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Typical estimates; +I+G models get their own pinv and shape
pub fn typical_parameter(model: SubstitutionModel, parameter: Parameter) -> f64 {
    let both = model.has_invariable_sites() && model.has_gamma();
    match parameter {
        Parameter::FreqA => 0.3215,
        Parameter::FreqC => 0.1874,
        Parameter::FreqG => 0.2093,
        Parameter::FreqT => 0.2818,
        Parameter::TiTv => 2.8541,
        Parameter::RateAC => 1.2034,
        Parameter::RateAG => 4.5321,
        Parameter::RateAT => 0.8712,
        Parameter::RateCG => 1.1045,
        Parameter::RateCT => 5.0127,
        Parameter::RateGT => 1.0,
        Parameter::Pinv if both => 0.0512,
        Parameter::Pinv => 0.2134,
        Parameter::Shape if both => 0.6124,
        Parameter::Shape => 0.4876,
    }
}

/// Render a PAUP*-style score block, one row per model
pub fn render_scores<F>(likelihoods: &[f64; NUM_MODELS], parameter: F) -> String
where
    F: Fn(SubstitutionModel, Parameter) -> f64,
{
    let layout = ScoreLayout::standard();
    let mut text = String::from("Tree\t-lnL\tfreqA\tfreqC\tfreqG\tfreqT\tTRatio\tRmat\tpinv\tshape\n");
    for (i, model) in ALL_MODELS.iter().enumerate() {
        let mut row = vec![format!("{}", i + 1), format!("{:.4}", likelihoods[i])];
        for (_, p) in layout.parameter_slots(*model) {
            row.push(format!("{:.4}", parameter(*model, *p)));
        }
        text.push_str(&row.join("\t"));
        text.push('\n');
    }
    text
}

/// Which features of `truth` a candidate can express
fn captured(model: SubstitutionModel, truth: SubstitutionModel) -> u32 {
    let features = |m: SubstitutionModel| {
        let scheme = m.scheme();
        [
            scheme.has_unequal_frequencies(),
            !matches!(scheme, BaseScheme::Jc | BaseScheme::F81),
            m.has_gamma(),
            m.has_invariable_sites(),
        ]
    };
    features(model)
        .iter()
        .zip(features(truth))
        .filter(|(has, want)| **has && *want)
        .count() as u32
}

/// Likelihoods generated by `truth`: 100 units per captured feature and a
/// small, insignificant gain of 0.2 per extra parameter
pub fn likelihoods_for_truth(truth: SubstitutionModel) -> [f64; NUM_MODELS] {
    let mut ln = [0.0; NUM_MODELS];
    for (slot, model) in ln.iter_mut().zip(ALL_MODELS) {
        *slot = 6543.2101
            - 100.0 * f64::from(captured(model, truth))
            - 0.2 * f64::from(model.free_parameters());
    }
    ln
}

/// Rate heterogeneity that +I and +G explain equally well
///
/// The hierarchies split between JC+I and JC+G on this data.
pub fn likelihoods_confounded_rates() -> [f64; NUM_MODELS] {
    let mut ln = [5000.0; NUM_MODELS];
    for (slot, model) in ln.iter_mut().zip(ALL_MODELS) {
        if model.has_gamma() || model.has_invariable_sites() {
            *slot = 4900.0;
        }
    }
    ln
}

/// Every extra parameter buys a large likelihood gain
pub fn likelihoods_dominant() -> [f64; NUM_MODELS] {
    let mut ln = [0.0; NUM_MODELS];
    for (slot, model) in ln.iter_mut().zip(ALL_MODELS) {
        *slot = 9000.0 - 400.0 * f64::from(model.free_parameters());
    }
    ln
}
