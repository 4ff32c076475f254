// Hierarchical likelihood-ratio tests (hLRTs)
//
// Posada, D. & Crandall, K. A. (2001). Selecting the best-fit model of
// nucleotide substitution. Systematic Biology 50:580-601.
//
// Four fixed decision trees walk the 24 models with pairwise nested-model
// tests. They differ in test order and in whether they start from the
// simplest (JC) or the richest (GTR+I+G) model, so they can disagree.

mod catalog;
mod tree;

pub use tree::{leaf, test, DecisionNode, DecisionTree, TestNode, TestStep, WalkOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// One of the four published hierarchies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Hierarchy {
    Hlrt1,
    Hlrt2,
    Hlrt3,
    Hlrt4,
}

impl Hierarchy {
    pub const ALL: [Hierarchy; 4] = [
        Hierarchy::Hlrt1,
        Hierarchy::Hlrt2,
        Hierarchy::Hlrt3,
        Hierarchy::Hlrt4,
    ];

    /// The decision tree, built once per process
    pub fn tree(self) -> &'static DecisionTree {
        static TREES: OnceLock<[DecisionTree; 4]> = OnceLock::new();
        let trees = TREES.get_or_init(|| {
            [
                catalog::hlrt1(),
                catalog::hlrt2(),
                catalog::hlrt3(),
                catalog::hlrt4(),
            ]
        });
        &trees[self.position()]
    }

    fn position(self) -> usize {
        match self {
            Hierarchy::Hlrt1 => 0,
            Hierarchy::Hlrt2 => 1,
            Hierarchy::Hlrt3 => 2,
            Hierarchy::Hlrt4 => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Hierarchy::Hlrt1 => "hLRT1",
            Hierarchy::Hlrt2 => "hLRT2",
            Hierarchy::Hlrt3 => "hLRT3",
            Hierarchy::Hlrt4 => "hLRT4",
        }
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
