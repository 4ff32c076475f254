//! Plain-text report
//!
//! Layout follows the classic MrModeltest output: run settings, the test
//! trace of each hierarchy, the selected model with its parameters,
//! ready-to-paste PAUP* and MrBayes blocks, then the AIC selection and the
//! Akaike weight table.

use crate::aic::{AicTable, Criterion};
use crate::calculator::{AicList, RatioTestResult};
use crate::context::{SelectedModel, SelectionReport};
use crate::hierarchy::{Hierarchy, TestStep};
use crate::lrt::format_p_value;

const PROGRAM: &str = "MrModeltest";
const RULE: &str = "---------------------------------------------------------------";
const WIDE_RULE: &str =
    "-------------------------------------------------------------------------------------------------";

/// Which procedure picked a model, for block headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMethod {
    Hlrt,
    Criterion(Criterion),
}

impl SelectionMethod {
    fn label(self) -> String {
        match self {
            SelectionMethod::Hlrt => "hLRT".to_string(),
            SelectionMethod::Criterion(criterion) => criterion.to_string(),
        }
    }
}

fn banner(title: &str) -> String {
    format!("\n{}\n*{:^61}*\n{}\n", RULE, title, RULE)
}

/// Complete text report of a run
pub fn format_report(report: &SelectionReport) -> String {
    let mut out = String::new();

    out.push_str(&format_settings(report));

    out.push_str(&banner("HIERARCHICAL LIKELIHOOD RATIO TESTS (hLRTs)"));
    for run in &report.hierarchies {
        out.push_str(&format!("\n ** Hierarchical Likelihood Ratio Tests ({}) **\n", run.hierarchy));
        for step in &run.outcome.steps {
            out.push_str(&format_step(step));
        }
        out.push_str(&format!("\n {} model = {}\n", run.hierarchy, run.outcome.selected));
    }

    if let Some(initial) = report.hlrt.initially_selected {
        out.push_str(&format!(
            "\nWARNING: Although the model {} was initially selected, gamma (G) was removed \
             because the estimated shape equals infinity, which implies equal rates among sites.\n",
            initial
        ));
    }
    if report.disagreement {
        out.push_str(&format_disagreement(report));
    }

    out.push_str(&format_selection(&report.hlrt, SelectionMethod::Hlrt));
    out.push_str(&paup_block(&report.hlrt, SelectionMethod::Hlrt));
    out.push_str(&mrbayes_block(&report.hlrt, SelectionMethod::Hlrt));

    let criterion = report.aic.criterion();
    let title = match criterion {
        Criterion::Aic => "AKAIKE INFORMATION CRITERION (AIC)",
        Criterion::Aicc { .. } => "SECOND ORDER AKAIKE INFORMATION CRITERION (AICc)",
    };
    out.push_str(&banner(title));
    let method = SelectionMethod::Criterion(criterion);
    out.push_str(&format_selection(&report.aic_selection, method));
    out.push_str(&paup_block(&report.aic_selection, method));
    out.push_str(&mrbayes_block(&report.aic_selection, method));

    out.push_str(&format_weights(&report.aic));
    out
}

fn format_settings(report: &SelectionReport) -> String {
    let mut out = String::from("\nRun settings\n");
    match report.aic.criterion() {
        Criterion::Aicc { sample_size } => {
            out.push_str(" Using the AICc correction\n");
            out.push_str(&format!("   sample size = {}\n", sample_size));
        }
        Criterion::Aic => out.push_str(" Using the standard AIC (not the AICc)\n"),
    }
    match report.config.taxa {
        Some(taxa) if report.branch_lengths > 0 => {
            out.push_str(" Using branch lengths as parameters\n");
            out.push_str(&format!(
                "   number of taxa = {} ({} branch lengths)\n",
                taxa, report.branch_lengths
            ));
        }
        _ => out.push_str(" Not using branch lengths as parameters\n"),
    }
    if report.hierarchies.len() == Hierarchy::ALL.len() {
        out.push_str(" Running all four hierarchies for the hLRT\n");
        out.push_str(&format!(
            " Printed parameter values are from the {} hierarchy\n",
            report.primary
        ));
    } else {
        out.push_str(&format!(
            " Printing results based on the {} hierarchy\n",
            report.primary
        ));
    }
    out.push_str(&format!(
        " Significance level (alpha) = {}\n",
        report.config.significance_level
    ));
    if !report.config.mixed_chi_square {
        out.push_str(" Not using the mixed chi-square distribution\n");
    }
    out
}

/// One test of a hierarchy walk
pub fn format_step(step: &TestStep) -> String {
    let mut out = format!("\n {} [{}]", step.kind, step.label);
    out.push_str(&format!(
        "\n   Null model = {:<9}\t\t  -lnL0 = {:.4}",
        step.null.name(),
        step.null_neg_log_likelihood
    ));
    out.push_str(&format!(
        "\n   Alternative model = {:<9}\t  -lnL1 = {:.4}",
        step.alternative.name(),
        step.alternative_neg_log_likelihood
    ));
    out.push_str(&format!(
        "\n   2(lnL1-lnL0) = {:9.4}\t\t      df = {}",
        step.result.delta, step.result.df
    ));
    if step.result.mixture {
        out.push_str("\n   Using mixed chi-square distribution");
    }
    out.push_str(&format!("\n   P-value = {}", format_p_value(step.result.p_value)));
    out.push_str(if step.rejected {
        "  (null rejected)\n"
    } else {
        "\n"
    });
    out
}

fn format_disagreement(report: &SelectionReport) -> String {
    let mut out = String::from("\n --\n");
    out.push_str(" ATTENTION: The choice based on hLRT can be sensitive for the specific\n");
    out.push_str("            hierarchy used. If selected models differ, you need to\n");
    out.push_str("            make the choice!\n\n");
    for run in &report.hierarchies {
        let marker = if run.hierarchy == report.primary {
            " (reported)"
        } else {
            ""
        };
        out.push_str(&format!(
            "            Model selected by {}{}: {}\n",
            run.hierarchy, marker, run.outcome.selected
        ));
    }
    out.push_str(" --\n");
    out
}

/// Selected model, its fit and its parameter estimates
pub fn format_selection(selection: &SelectedModel, method: SelectionMethod) -> String {
    let p = &selection.parameters;
    let mut out = format!("\n Model selected: {}\n", selection.model);
    out.push_str(&format!("   -lnL = \t{:7.4}\n", selection.neg_log_likelihood));
    out.push_str(&format!("    K = \t{}\n", selection.parameter_count));
    if let Some(value) = selection.criterion_value {
        out.push_str(&format!("    {} = \t{:7.4}\n", method.label(), value));
    }

    out.push_str("   Base frequencies:\n");
    if p.has_equal_frequencies() {
        out.push_str("     Equal frequencies\n");
    } else {
        let labels = ["freqA", "freqC", "freqG"];
        for (label, value) in labels.iter().zip(p.frequencies) {
            out.push_str(&format!("     {} = \t{:7.4}\n", label, value));
        }
        out.push_str(&format!("     freqT = \t{:7.4}\n", p.freq_t_complement()));
    }

    out.push_str("   Substitution model:\n");
    if p.has_equal_rates() {
        out.push_str("     All rates equal\n");
    } else if p.ti_tv != 0.0 {
        out.push_str(&format!("     Ti/tv ratio =\t{:7.4}\n", p.ti_tv));
    } else {
        out.push_str("     Rate matrix\n");
        let labels = ["rAC", "rAG", "rAT", "rCG", "rCT", "rGT"];
        for (label, value) in labels.iter().zip(p.rates) {
            out.push_str(&format!("     {} = \t{:7.4}\n", label, value));
        }
    }

    out.push_str("   Among-site rate variation\n");
    if p.has_invariable_sites() {
        out.push_str(&format!(
            "     Proportion of invariable sites (I) = {:.4}\n",
            p.pinv
        ));
        out.push_str("     Variable sites (G)\n");
    } else {
        out.push_str("     Proportion of invariable sites = 0\n");
    }
    if p.has_infinite_shape() {
        out.push_str("     Equal rates for all sites (shape parameter = infinity)\n");
    } else if p.has_gamma() {
        out.push_str(&format!(
            "     Gamma distribution shape parameter = {:.4}\n",
            p.shape
        ));
    } else {
        out.push_str("     Equal rates for all sites\n");
    }
    out
}

/// PAUP* `Lset` block with the estimated parameter values
pub fn paup_block(selection: &SelectedModel, method: SelectionMethod) -> String {
    let p = &selection.parameters;
    let mut out = String::from("\n--\n\nPAUP* Commands Block:");
    out.push_str(" If you want to implement the previous estimates as likelihood settings in PAUP*,");
    out.push_str(" attach the next block of commands after the data in your PAUP file:\n");
    out.push_str(&format!(
        "\n[!\nLikelihood settings from best-fit model ({}) selected by {} in {} {}\n]",
        selection.model,
        method.label(),
        PROGRAM,
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("\nBEGIN PAUP;\n\tLset  Base=");

    if p.has_equal_frequencies() {
        out.push_str("equal");
    } else {
        let [fa, fc, fg, _] = p.frequencies;
        out.push_str(&format!("({:.4} {:.4} {:.4})", fa, fc, fg));
    }

    if p.has_equal_rates() {
        out.push_str("  Nst=1");
    } else if p.ti_tv != 0.0 {
        out.push_str(&format!("  Nst=2  TRatio={:.4}", p.ti_tv));
    } else {
        let r = p.rates;
        out.push_str(&format!(
            "  Nst=6  Rmat=({:.9} {:.9} {:.9} {:.9} {:.9})",
            r[0], r[1], r[2], r[3], r[4]
        ));
    }

    out.push_str("  Rates=");
    if p.has_gamma() {
        out.push_str(&format!("gamma  Shape={:.4}", p.shape));
    } else {
        out.push_str("equal");
    }

    out.push_str("  Pinvar=");
    if p.has_invariable_sites() {
        out.push_str(&format!("{:.4}", p.pinv));
    } else {
        out.push('0');
    }
    out.push_str(";\nEND;\n\n--\n");
    out
}

/// MrBayes `Lset`/`Prset` block describing the model form
pub fn mrbayes_block(selection: &SelectedModel, method: SelectionMethod) -> String {
    let p = &selection.parameters;
    let mut out = String::from("\nMrBayes Commands Block:");
    out.push_str(" If you want to implement a \"best\" model in MrBayes,");
    out.push_str(" attach the next block of commands after the data in your NEXUS file:\n");
    out.push_str(&format!(
        "\n[!\nMrBayes settings for the best-fit model ({}) selected by {} in {} {}\n]",
        selection.model,
        method.label(),
        PROGRAM,
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("\nBEGIN MRBAYES;\n\n\tLset");

    if p.has_equal_rates() {
        out.push_str("  nst=1");
    } else if p.ti_tv != 0.0 {
        out.push_str("  nst=2");
    } else {
        out.push_str("  nst=6");
    }

    let rates = match (p.has_invariable_sites(), p.has_gamma()) {
        (false, false) => "equal",
        (false, true) => "gamma",
        (true, false) => "propinv",
        (true, true) => "invgamma",
    };
    out.push_str(&format!("  rates={};\n", rates));

    if p.has_equal_frequencies() {
        out.push_str("\tPrset statefreqpr=fixed(equal);");
    } else {
        out.push_str("\tPrset statefreqpr=dirichlet(1,1,1,1);");
    }
    out.push_str("\nEND;\n\n--\n");
    out
}

/// Akaike weight table, best model first
pub fn format_weights(table: &AicTable) -> String {
    let mut out = String::from("\n ** MODEL SELECTION UNCERTAINTY : Akaike Weights **\n\n");
    out.push_str(&format!(
        "Model\t\t-lnL\t\tK\t {}\t\t delta\t\tWeight\t\tCumWeight\n",
        table.criterion()
    ));
    out.push_str(WIDE_RULE);
    out.push('\n');
    for entry in table.ranking() {
        let weight = if entry.weight > 0.0001 {
            format!("{:8.4}", entry.weight)
        } else {
            format!("{:8.2e}", entry.weight)
        };
        out.push_str(&format!(
            "{:<10}\t{:10.4}\t{:2}\t{:10.4}\t{:9.4}\t{}\t{:7.4}\n",
            entry.model.name(),
            entry.neg_log_likelihood,
            entry.parameter_count,
            entry.value,
            entry.delta,
            weight,
            entry.cumulative_weight
        ));
    }
    out.push_str(WIDE_RULE);
    out.push_str("\n-lnL:\t\tnegative log likelihood");
    out.push_str("\n K:\t\tnumber of estimated (free) parameters");
    out.push_str(&format!(
        "\n {}:\t\tAkaike Information Criterion{}",
        table.criterion(),
        if matches!(table.criterion(), Criterion::Aicc { .. }) {
            " (second order)"
        } else {
            ""
        }
    ));
    out.push_str("\n delta:\t\tAkaike difference");
    out.push_str("\n weight:\tAkaike weight");
    out.push_str("\n cumWeight:\tcumulative Akaike weight\n");
    out
}

/// Result of the stand-alone likelihood-ratio calculator
pub fn format_ratio_test(result: &RatioTestResult) -> String {
    let mut out =
        String::from("\n_________________________ Results of Ratio Calculator _______________________\n");
    out.push_str(&format!("\nThe ratio is {:.6}\n", result.statistic));
    out.push_str(&format!(
        "\nThe probability of observing this ratio likelihood test statistic under a correct null model is {:.6}\n",
        result.p_value
    ));
    if result.significant {
        out.push_str(&format!(
            "\nThis is significant at the alpha level of {:.4}\n",
            result.alpha
        ));
    } else {
        out.push_str(&format!(
            "\nThis is not significant at the alpha level of {:.4}\n",
            result.alpha
        ));
    }
    out
}

/// Result of the stand-alone AIC calculator
pub fn format_aic_list(list: &AicList) -> String {
    let mut out =
        String::from("\n_________________________ Results of AIC Calculator _______________________\n");
    out.push_str("\nNumber\t\tLikelihood\t\tParameters\t\tAIC\n");
    for row in &list.rows {
        out.push_str(&format!(
            "{:2}\t{:15.5}\t{:5}\t{:15.5}\n",
            row.number, row.neg_log_likelihood, row.parameters, row.aic
        ));
    }
    let best = list.best();
    out.push_str(&format!(
        "\n A minimum AIC value ({:.6}) corresponds to the score number {} ({:.6})\n",
        best.aic, best.number, best.neg_log_likelihood
    ));
    out
}
