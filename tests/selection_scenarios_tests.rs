//! End-to-end selection scenarios through the library API
//!
//! Score tables are rendered as PAUP* text and go through the same parser
//! the command-line tool uses.

mod utils;

use mrmodeltest::aic::Criterion;
use mrmodeltest::config::SelectionConfig;
use mrmodeltest::context::DecisionContext;
use mrmodeltest::hierarchy::Hierarchy;
use mrmodeltest::models::{SubstitutionModel, NUM_MODELS};
use mrmodeltest::parameters::{ModelParameters, Parameter};
use mrmodeltest::scores::{ScoreFormat, ScoreTable};
use mrmodeltest::ModelTestError;

fn context(text: &str, config: SelectionConfig) -> DecisionContext {
    let scores = ScoreTable::parse(text).unwrap();
    DecisionContext::new(scores, config).unwrap()
}

#[test]
fn test_fixture_selects_hky_gamma_everywhere() {
    let text = std::fs::read_to_string(utils::fixture("hky_gamma.scores")).unwrap();
    let scores = ScoreTable::parse(&text).unwrap();
    assert_eq!(scores.format(), ScoreFormat::PaupMatrix);
    assert_eq!(scores.len(), 176);

    let report = DecisionContext::new(scores, SelectionConfig::default())
        .unwrap()
        .run()
        .unwrap();

    for hierarchy in Hierarchy::ALL {
        assert_eq!(
            report.hierarchy_selection(hierarchy),
            Some(SubstitutionModel::HkyG),
            "{}",
            hierarchy
        );
    }
    assert!(!report.disagreement);
    assert_eq!(report.aic_selection.model, SubstitutionModel::HkyG);
    assert_eq!(report.aic.criterion(), Criterion::Aic);
}

#[test]
fn test_fixture_parameters_are_extracted() {
    let text = std::fs::read_to_string(utils::fixture("hky_gamma.scores")).unwrap();
    let report = context(&text, SelectionConfig::default()).run().unwrap();

    let hky = &report.hlrt;
    assert_eq!(hky.model, SubstitutionModel::HkyG);
    assert_eq!(hky.parameter_count, 5);
    assert!((hky.neg_log_likelihood - 6242.2101).abs() < 1e-9);
    assert_eq!(hky.parameters.frequencies, [0.3215, 0.1874, 0.2093, 0.2818]);
    assert_eq!(hky.parameters.ti_tv, 2.8541);
    assert_eq!(hky.parameters.rates, [1.0; 6]);
    assert_eq!(hky.parameters.shape, 0.4876);
    assert_eq!(hky.parameters.pinv, 0.0);

    // 2 (6242.2101 + 5)
    let aic = report.aic_selection.criterion_value.unwrap();
    assert!((aic - 12494.4202).abs() < 1e-6);
}

#[test]
fn test_rendered_scores_match_fixture() {
    let rendered = utils::render_scores(
        &utils::likelihoods_for_truth(SubstitutionModel::HkyG),
        utils::typical_parameter,
    );
    let fixture = std::fs::read_to_string(utils::fixture("hky_gamma.scores")).unwrap();
    assert_eq!(
        ScoreTable::parse(&rendered).unwrap().values(),
        ScoreTable::parse(&fixture).unwrap().values()
    );
}

#[test]
fn test_each_truth_model_is_recovered_by_hlrt1() {
    let truths = [
        SubstitutionModel::Jc,
        SubstitutionModel::JcIG,
        SubstitutionModel::F81I,
        SubstitutionModel::F81G,
        SubstitutionModel::K80G,
        SubstitutionModel::HkyIG,
    ];
    for truth in truths {
        let text = utils::render_scores(
            &utils::likelihoods_for_truth(truth),
            utils::typical_parameter,
        );
        let config = SelectionConfig {
            hierarchy: Some(Hierarchy::Hlrt1),
            ..SelectionConfig::default()
        };
        let report = context(&text, config).run().unwrap();
        assert_eq!(report.hlrt.model, truth, "{}", truth);
    }
}

#[test]
fn test_dominant_scenario_all_select_gtr_ig() {
    let text = utils::render_scores(&utils::likelihoods_dominant(), utils::typical_parameter);
    let report = context(&text, SelectionConfig::default()).run().unwrap();
    for run in &report.hierarchies {
        assert_eq!(run.outcome.selected, SubstitutionModel::GtrIG);
        assert!(run.outcome.steps.iter().all(|s| s.rejected));
    }
    assert_eq!(report.hlrt.model, SubstitutionModel::GtrIG);
    assert_eq!(report.aic_selection.model, SubstitutionModel::GtrIG);
    assert_eq!(report.hlrt.parameters.shape, 0.6124);
    assert_eq!(report.hlrt.parameters.pinv, 0.0512);
}

#[test]
fn test_confounded_rates_flag_disagreement() {
    let text = utils::render_scores(
        &utils::likelihoods_confounded_rates(),
        utils::typical_parameter,
    );
    let report = context(&text, SelectionConfig::default()).run().unwrap();

    assert_eq!(report.hierarchy_selection(Hierarchy::Hlrt1), Some(SubstitutionModel::JcG));
    assert_eq!(report.hierarchy_selection(Hierarchy::Hlrt2), Some(SubstitutionModel::JcI));
    assert_eq!(report.hierarchy_selection(Hierarchy::Hlrt3), Some(SubstitutionModel::JcG));
    assert_eq!(report.hierarchy_selection(Hierarchy::Hlrt4), Some(SubstitutionModel::JcI));
    assert!(report.disagreement);
    assert_eq!(report.primary, Hierarchy::Hlrt1);
    assert_eq!(report.hlrt.model, SubstitutionModel::JcG);

    // JC+I and JC+G tie exactly on AIC; the later model wins
    assert_eq!(
        report.aic.entry(SubstitutionModel::JcI).value,
        report.aic.entry(SubstitutionModel::JcG).value
    );
    assert_eq!(report.aic_selection.model, SubstitutionModel::JcG);
}

#[test]
fn test_single_hierarchy_never_disagrees() {
    let text = utils::render_scores(
        &utils::likelihoods_confounded_rates(),
        utils::typical_parameter,
    );
    let config = SelectionConfig {
        hierarchy: Some(Hierarchy::Hlrt2),
        ..SelectionConfig::default()
    };
    let report = context(&text, config).run().unwrap();
    assert_eq!(report.hierarchies.len(), 1);
    assert!(!report.disagreement);
    assert_eq!(report.hlrt.model, SubstitutionModel::JcI);
    assert_eq!(report.hlrt.parameters.pinv, 0.2134);
}

#[test]
fn test_infinite_shape_removes_gamma_from_hlrt_choice() {
    let ln = utils::likelihoods_for_truth(SubstitutionModel::HkyG);
    let mut text = utils::render_scores(&ln, |model, parameter| {
        if model == SubstitutionModel::HkyG && parameter == Parameter::Shape {
            f64::NAN
        } else {
            utils::typical_parameter(model, parameter)
        }
    });
    text = text.replace("NaN", "infinity");

    let report = context(&text, SelectionConfig::default()).run().unwrap();
    assert_eq!(report.hlrt.model, SubstitutionModel::Hky);
    assert_eq!(report.hlrt.initially_selected, Some(SubstitutionModel::HkyG));
    assert_eq!(report.hlrt.parameters.shape, 0.0);
    assert_eq!(report.hlrt.parameters.ti_tv, 2.8541);

    // AIC keeps its own choice and reports the infinite shape as estimated
    assert_eq!(report.aic_selection.model, SubstitutionModel::HkyG);
    assert!(report.aic_selection.parameters.has_infinite_shape());
}

#[test]
fn test_aicc_with_branch_lengths() {
    let text = std::fs::read_to_string(utils::fixture("hky_gamma.scores")).unwrap();
    let config = SelectionConfig {
        sample_size: Some(898),
        taxa: Some(12),
        ..SelectionConfig::default()
    };
    let report = context(&text, config).run().unwrap();
    assert_eq!(report.branch_lengths, 21);
    assert_eq!(report.aic.criterion(), Criterion::Aicc { sample_size: 898 });
    assert_eq!(report.aic_selection.model, SubstitutionModel::HkyG);
    assert_eq!(report.aic_selection.parameter_count, 26);
    assert_eq!(report.hlrt.model, SubstitutionModel::HkyG);
}

#[test]
fn test_aicc_sample_size_at_limit_is_rejected() {
    let text = std::fs::read_to_string(utils::fixture("hky_gamma.scores")).unwrap();
    let scores = ScoreTable::parse(&text).unwrap();
    // K_max = 10 + (2*4 - 3) = 15, so n = 16 is K_max + 1
    let config = SelectionConfig {
        sample_size: Some(16),
        taxa: Some(4),
        ..SelectionConfig::default()
    };
    let err = DecisionContext::new(scores, config).unwrap_err();
    assert!(matches!(err, ModelTestError::Configuration(_)));
}

#[test]
fn test_flat_scores_select_jc() {
    let text = utils::render_scores(&[2500.0; NUM_MODELS], utils::typical_parameter);
    let report = context(&text, SelectionConfig::default()).run().unwrap();
    for run in &report.hierarchies {
        assert_eq!(run.outcome.selected, SubstitutionModel::Jc);
    }
    assert_eq!(report.aic_selection.model, SubstitutionModel::Jc);
    assert_eq!(report.hlrt.parameters, ModelParameters::default());
}

#[test]
fn test_truncated_input_is_rejected() {
    let text = std::fs::read_to_string(utils::fixture("hky_gamma.scores")).unwrap();
    let truncated: String = text.lines().take(20).collect::<Vec<_>>().join("\n");
    let err = ScoreTable::parse(&truncated).unwrap_err();
    assert!(matches!(err, ModelTestError::InputFormat(_)));
}
