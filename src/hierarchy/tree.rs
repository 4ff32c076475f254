// Decision trees of nested-model tests
//
// A hierarchy is a value: internal nodes carry one likelihood-ratio test
// and two children, leaves carry the selected model. One walker runs any
// tree, so the four hierarchies differ only in their data.

use crate::config::SelectionConfig;
use crate::lrt::{run_test, LrtResult, TestKind};
use crate::models::{ModelRegistry, SubstitutionModel};
use serde::{Deserialize, Serialize};

/// A node of a hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionNode {
    Test(Box<TestNode>),
    Leaf(SubstitutionModel),
}

/// An internal node: one nested-model comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestNode {
    /// Node label as printed in the published hierarchy figure
    pub label: &'static str,
    pub kind: TestKind,
    pub null: SubstitutionModel,
    pub alternative: SubstitutionModel,
    /// Followed when the null is rejected (p < alpha)
    pub on_reject: DecisionNode,
    /// Followed when the null is not rejected
    pub on_accept: DecisionNode,
}

/// Build an internal node
pub fn test(
    label: &'static str,
    kind: TestKind,
    null: SubstitutionModel,
    alternative: SubstitutionModel,
    on_reject: DecisionNode,
    on_accept: DecisionNode,
) -> DecisionNode {
    DecisionNode::Test(Box::new(TestNode {
        label,
        kind,
        null,
        alternative,
        on_reject,
        on_accept,
    }))
}

/// Build a leaf
pub fn leaf(model: SubstitutionModel) -> DecisionNode {
    DecisionNode::Leaf(model)
}

/// One executed test on a root-to-leaf path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStep {
    pub label: String,
    pub kind: TestKind,
    pub null: SubstitutionModel,
    pub alternative: SubstitutionModel,
    pub null_neg_log_likelihood: f64,
    pub alternative_neg_log_likelihood: f64,
    pub result: LrtResult,
    pub rejected: bool,
}

/// Walk result: the selected model and the tests that led to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkOutcome {
    pub selected: SubstitutionModel,
    pub steps: Vec<TestStep>,
}

/// A complete hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    root: DecisionNode,
}

impl DecisionTree {
    pub fn new(root: DecisionNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    /// Follow the tree, asking `reject` at every internal node
    ///
    /// Returns the leaf reached and the nodes visited with their decisions.
    pub fn walk_with<F>(&self, mut reject: F) -> (SubstitutionModel, Vec<(&TestNode, bool)>)
    where
        F: FnMut(&TestNode) -> bool,
    {
        let mut node = &self.root;
        let mut path = Vec::new();
        loop {
            match node {
                DecisionNode::Leaf(model) => return (*model, path),
                DecisionNode::Test(test) => {
                    let rejected = reject(test);
                    path.push((test.as_ref(), rejected));
                    node = if rejected {
                        &test.on_reject
                    } else {
                        &test.on_accept
                    };
                }
            }
        }
    }

    /// Run the hierarchy against fitted models
    pub fn walk(&self, registry: &ModelRegistry, config: &SelectionConfig) -> WalkOutcome {
        let mut steps = Vec::new();
        let (selected, _) = self.walk_with(|node| {
            let null = registry.get(node.null);
            let alternative = registry.get(node.alternative);
            let result = run_test(node.kind, null, alternative, config.mixed_chi_square);
            let rejected = result.rejects_null(config.significance_level);
            steps.push(TestStep {
                label: node.label.to_string(),
                kind: node.kind,
                null: node.null,
                alternative: node.alternative,
                null_neg_log_likelihood: null.neg_log_likelihood,
                alternative_neg_log_likelihood: alternative.neg_log_likelihood,
                result,
                rejected,
            });
            rejected
        });

        WalkOutcome { selected, steps }
    }

    /// Internal nodes in pre-order (reject branch first)
    pub fn test_nodes(&self) -> Vec<&TestNode> {
        let mut nodes = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let DecisionNode::Test(test) = node {
                nodes.push(test.as_ref());
                stack.push(&test.on_accept);
                stack.push(&test.on_reject);
            }
        }
        nodes
    }

    /// Leaves in pre-order (reject branch first)
    pub fn leaves(&self) -> Vec<SubstitutionModel> {
        let mut leaves = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                DecisionNode::Leaf(model) => leaves.push(*model),
                DecisionNode::Test(test) => {
                    stack.push(&test.on_accept);
                    stack.push(&test.on_reject);
                }
            }
        }
        leaves
    }

    /// Decisions leading from the root to `model`, if it is a leaf
    pub fn path_to(&self, model: SubstitutionModel) -> Option<Vec<(&'static str, bool)>> {
        fn search(
            node: &DecisionNode,
            target: SubstitutionModel,
            path: &mut Vec<(&'static str, bool)>,
        ) -> bool {
            match node {
                DecisionNode::Leaf(m) => *m == target,
                DecisionNode::Test(test) => {
                    path.push((test.label, true));
                    if search(&test.on_reject, target, path) {
                        return true;
                    }
                    path.pop();
                    path.push((test.label, false));
                    if search(&test.on_accept, target, path) {
                        return true;
                    }
                    path.pop();
                    false
                }
            }
        }

        let mut path = Vec::new();
        search(&self.root, model, &mut path).then_some(path)
    }
}
