// Tests for the four hierarchies
//
// Scenario likelihoods are built from a "true" model: a candidate gains
// 100 log-likelihood units for each feature of the truth it can express
// (unequal frequencies, unequal Ti/Tv, gamma, invariable sites), and
// nothing for features the truth lacks.

use super::*;
use crate::config::SelectionConfig;
use crate::lrt::TestKind;
use crate::models::{BaseScheme, ModelRegistry, SubstitutionModel, ALL_MODELS, NUM_MODELS};
use std::collections::HashSet;

fn features(model: SubstitutionModel) -> [bool; 4] {
    let scheme = model.scheme();
    [
        scheme.has_unequal_frequencies(),
        !matches!(scheme, BaseScheme::Jc | BaseScheme::F81),
        model.has_gamma(),
        model.has_invariable_sites(),
    ]
}

fn registry_for_truth(truth: SubstitutionModel) -> ModelRegistry {
    let wanted = features(truth);
    let mut ln = [0.0; NUM_MODELS];
    for (slot, model) in ln.iter_mut().zip(ALL_MODELS) {
        let captured = features(model)
            .iter()
            .zip(wanted)
            .filter(|(has, want)| **has && *want)
            .count();
        *slot = 5000.0 - 100.0 * captured as f64;
    }
    ModelRegistry::from_likelihoods(ln).unwrap()
}

/// Every extra parameter buys a large likelihood gain
fn registry_dominant() -> ModelRegistry {
    let mut ln = [0.0; NUM_MODELS];
    for (slot, model) in ln.iter_mut().zip(ALL_MODELS) {
        *slot = 9000.0 - 400.0 * f64::from(model.free_parameters());
    }
    ModelRegistry::from_likelihoods(ln).unwrap()
}

fn registry_flat() -> ModelRegistry {
    ModelRegistry::from_likelihoods([3210.5; NUM_MODELS]).unwrap()
}

#[test]
fn test_each_tree_has_23_tests_and_24_distinct_leaves() {
    for hierarchy in Hierarchy::ALL {
        let tree = hierarchy.tree();
        assert_eq!(tree.test_nodes().len(), 23, "{}", hierarchy);

        let leaves = tree.leaves();
        assert_eq!(leaves.len(), NUM_MODELS, "{}", hierarchy);
        let distinct: HashSet<_> = leaves.iter().collect();
        assert_eq!(distinct.len(), NUM_MODELS, "{}", hierarchy);
    }
}

#[test]
fn test_labels_run_a_to_x_in_pre_order() {
    let expected: Vec<&str> = "ABCDEFGHIJKLMNOPQRSTUVX"
        .split("")
        .filter(|s| !s.is_empty())
        .collect();
    for hierarchy in Hierarchy::ALL {
        let labels: Vec<&str> = hierarchy.tree().test_nodes().iter().map(|n| n.label).collect();
        assert_eq!(labels, expected, "{}", hierarchy);
    }
}

#[test]
fn test_every_comparison_is_strictly_nested() {
    for hierarchy in Hierarchy::ALL {
        for node in hierarchy.tree().test_nodes() {
            assert!(
                node.null.is_nested_in(node.alternative),
                "{} node {}: {} vs {}",
                hierarchy,
                node.label,
                node.null,
                node.alternative
            );
            assert!(
                node.alternative.free_parameters() > node.null.free_parameters(),
                "{} node {}",
                hierarchy,
                node.label
            );
        }
    }
}

#[test]
fn test_boundary_kinds_compare_rate_heterogeneity() {
    for hierarchy in Hierarchy::ALL {
        for node in hierarchy.tree().test_nodes() {
            match node.kind {
                TestKind::EqualSiteRates => {
                    assert!(!node.null.has_gamma() && node.alternative.has_gamma());
                }
                TestKind::NoInvariableSites if !(hierarchy == Hierarchy::Hlrt3 && node.label == "L") => {
                    assert!(!node.null.has_invariable_sites());
                    assert!(node.alternative.has_invariable_sites());
                }
                _ => {}
            }
        }
    }
}

#[test]
fn test_hlrt3_node_l_keeps_published_test_kind() {
    let node = Hierarchy::Hlrt3
        .tree()
        .test_nodes()
        .into_iter()
        .find(|n| n.label == "L")
        .unwrap();
    assert_eq!(node.kind, TestKind::NoInvariableSites);
    assert_eq!(node.null, SubstitutionModel::JcG);
    assert_eq!(node.alternative, SubstitutionModel::F81G);
}

#[test]
fn test_path_to_hky_gamma_in_hlrt1() {
    let path = Hierarchy::Hlrt1
        .tree()
        .path_to(SubstitutionModel::HkyG)
        .unwrap();
    assert_eq!(
        path,
        vec![("A", true), ("B", true), ("C", false), ("G", true), ("H", false)]
    );
}

#[test]
fn test_path_to_every_leaf_replays_with_walk_with() {
    for hierarchy in Hierarchy::ALL {
        let tree = hierarchy.tree();
        for model in ALL_MODELS {
            let path = tree.path_to(model).unwrap();
            let mut decisions = path.iter();
            let (selected, visited) = tree.walk_with(|node| {
                let (label, rejected) = decisions.next().unwrap();
                assert_eq!(node.label, *label);
                *rejected
            });
            assert_eq!(selected, model, "{}", hierarchy);
            assert_eq!(visited.len(), path.len());
        }
    }
}

#[test]
fn test_all_reject_selects_gtr_ig() {
    for hierarchy in Hierarchy::ALL {
        let (selected, _) = hierarchy.tree().walk_with(|_| true);
        assert_eq!(selected, SubstitutionModel::GtrIG, "{}", hierarchy);
    }
}

#[test]
fn test_all_accept_selects_jc() {
    for hierarchy in Hierarchy::ALL {
        let (selected, _) = hierarchy.tree().walk_with(|_| false);
        assert_eq!(selected, SubstitutionModel::Jc, "{}", hierarchy);
    }
}

#[test]
fn test_dominant_likelihoods_select_gtr_ig() {
    let registry = registry_dominant();
    let config = SelectionConfig::default();
    for hierarchy in Hierarchy::ALL {
        let outcome = hierarchy.tree().walk(&registry, &config);
        assert_eq!(outcome.selected, SubstitutionModel::GtrIG, "{}", hierarchy);
        assert!(outcome.steps.iter().all(|s| s.rejected));
    }
}

#[test]
fn test_flat_likelihoods_select_jc() {
    let registry = registry_flat();
    let config = SelectionConfig::default();
    for hierarchy in Hierarchy::ALL {
        let outcome = hierarchy.tree().walk(&registry, &config);
        assert_eq!(outcome.selected, SubstitutionModel::Jc, "{}", hierarchy);
        for step in &outcome.steps {
            assert_eq!(step.result.delta, 0.0);
            assert_eq!(step.result.p_value, 1.0);
            assert!(!step.rejected);
        }
    }
}

#[test]
fn test_all_hierarchies_recover_hky_gamma() {
    let registry = registry_for_truth(SubstitutionModel::HkyG);
    let config = SelectionConfig::default();
    for hierarchy in Hierarchy::ALL {
        let outcome = hierarchy.tree().walk(&registry, &config);
        assert_eq!(outcome.selected, SubstitutionModel::HkyG, "{}", hierarchy);
    }
}

#[test]
fn test_hlrt1_steps_for_hky_gamma() {
    let registry = registry_for_truth(SubstitutionModel::HkyG);
    let outcome = Hierarchy::Hlrt1
        .tree()
        .walk(&registry, &SelectionConfig::default());

    let labels: Vec<&str> = outcome.steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B", "C", "G", "H"]);

    let gamma_step = &outcome.steps[3];
    assert_eq!(gamma_step.kind, TestKind::EqualSiteRates);
    assert!(gamma_step.result.mixture);
    assert_eq!(gamma_step.result.df, 1);
    assert!((gamma_step.result.delta - 200.0).abs() < 1e-9);

    let freq_step = &outcome.steps[0];
    assert!(!freq_step.result.mixture);
    assert_eq!(freq_step.result.df, 3);
}

#[test]
fn test_hlrt3_node_l_uses_mixture() {
    let registry = registry_for_truth(SubstitutionModel::F81G);
    let outcome = Hierarchy::Hlrt3
        .tree()
        .walk(&registry, &SelectionConfig::default());
    assert_eq!(outcome.selected, SubstitutionModel::F81G);
    let step = outcome.steps.iter().find(|s| s.label == "L").unwrap();
    assert!(step.result.mixture);
    assert_eq!(step.result.df, 3);
}

#[test]
fn test_mixture_can_be_disabled() {
    let registry = registry_for_truth(SubstitutionModel::HkyG);
    let config = SelectionConfig {
        mixed_chi_square: false,
        ..SelectionConfig::default()
    };
    let outcome = Hierarchy::Hlrt1.tree().walk(&registry, &config);
    assert!(outcome.steps.iter().all(|s| !s.result.mixture));
}

#[test]
fn test_hierarchy_names() {
    let names: Vec<String> = Hierarchy::ALL.iter().map(|h| h.to_string()).collect();
    assert_eq!(names, vec!["hLRT1", "hLRT2", "hLRT3", "hLRT4"]);
    let json = serde_json::to_string(&Hierarchy::Hlrt2).unwrap();
    assert_eq!(json, "\"hlrt2\"");
}
