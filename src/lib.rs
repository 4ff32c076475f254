//! MrModeltest - nucleotide substitution model selection
//!
//! This library selects a best-fit model among the 24 JC/F81/K80/HKY/SYM/GTR
//! variants (each optionally +I, +G, +I+G) from their likelihood scores,
//! with hierarchical likelihood-ratio tests and with AIC/AICc.

pub mod aic;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod hierarchy;
pub mod json_output;
pub mod lrt;
pub mod models;
pub mod parameters;
pub mod report;
pub mod scores;
pub mod stats;

pub use context::{DecisionContext, SelectionReport};
pub use error::{ModelTestError, Result};
