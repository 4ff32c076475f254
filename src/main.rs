use anyhow::{Context, Result};
use clap::Parser;
use mrmodeltest::calculator::{aic_list, parse_aic_list, ratio_test};
use mrmodeltest::cli::{Cli, OutputFormat};
use mrmodeltest::config::SelectionConfig;
use mrmodeltest::context::DecisionContext;
use mrmodeltest::json_output::JsonOutput;
use mrmodeltest::report;
use mrmodeltest::scores::ScoreTable;
use std::io::{IsTerminal, Read};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn read_input(args: &Cli) -> Result<String> {
    let mut input = String::new();
    if args.reads_stdin() {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            anyhow::bail!(
                "No input file. Usage: mrmodeltest SCORES or mrmodeltest < SCORES (see --help)"
            );
        }
        stdin
            .lock()
            .read_to_string(&mut input)
            .context("Failed to read scores from stdin")?;
    } else if let Some(path) = &args.input {
        input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    Ok(input)
}

fn load_config(args: &Cli) -> Result<SelectionConfig> {
    let base = match &args.config {
        Some(path) => SelectionConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => args.preset.config(),
    };
    let config = args.apply_overrides(base);
    config.validate()?;
    Ok(config)
}

fn run_lrt_calc(values: &[f64], config: &SelectionConfig, format: OutputFormat) -> Result<()> {
    let [null, alternative, df] = values else {
        anyhow::bail!("--lrt-calc needs exactly three values: NULL_LNL ALT_LNL DF");
    };
    if df.fract() != 0.0 {
        anyhow::bail!("Degrees of freedom must be a whole number, got {}", df);
    }
    let result = ratio_test(*null, *alternative, *df as i64, config.significance_level)?;
    match format {
        OutputFormat::Text => print!("{}", report::format_ratio_test(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn run_aic_list(input: &str, format: OutputFormat) -> Result<()> {
    let pairs = parse_aic_list(input)?;
    let list = aic_list(&pairs)?;
    match format {
        OutputFormat::Text => print!("{}", report::format_aic_list(&list)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&list)?),
    }
    Ok(())
}

fn run_selection(input: &str, config: SelectionConfig, format: OutputFormat) -> Result<()> {
    let scores = ScoreTable::parse(input)?;
    let context = DecisionContext::new(scores, config)?;
    let selection = context.run()?;
    match format {
        OutputFormat::Text => print!("{}", report::format_report(&selection)),
        OutputFormat::Json => println!("{}", JsonOutput::from_report(&selection).to_json()?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;

    if let Some(values) = &args.lrt_calc {
        return run_lrt_calc(values, &config, args.format);
    }

    let input = read_input(&args)?;
    if args.aic_list {
        run_aic_list(&input, args.format)
    } else {
        run_selection(&input, config, args.format)
    }
}
