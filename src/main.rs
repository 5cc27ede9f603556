use anyhow::{Context, Result};
use clap::Parser;
use opcost::cli::{Cli, Command};
use opcost::config::AnalysisConfig;
use opcost::dataset::Dataset;
use opcost::filter::OperationFilter;
use opcost::lut::CostTable;
use opcost::report::{DistributionReport, ScalingReport};
use opcost::scaling::fit_cost_model;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(strategy) = cli.bins {
        config.bin_strategy = strategy;
    }
    Ok(config)
}

fn load_dataset(input: &Path, filter: Option<&str>) -> Result<Dataset> {
    let dataset = Dataset::load(input)
        .with_context(|| format!("Failed to read measurements from {}", input.display()))?;
    match filter {
        Some(expr) => {
            let filter = OperationFilter::from_expr(expr)
                .with_context(|| format!("Invalid --filter expression '{}'", expr))?;
            Ok(dataset.select(&filter))
        }
        None => Ok(dataset),
    }
}

fn validated(config: AnalysisConfig) -> Result<AnalysisConfig> {
    config.validate().context("Invalid analysis settings")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    let mut config = load_config(&cli)?;

    match cli.command {
        Command::Lut {
            input,
            output,
            format,
            trim,
            filter,
        } => {
            let config = validated(config)?;
            let dataset = load_dataset(&input, filter.as_deref())?;
            let table = CostTable::build(&dataset, &config, trim)
                .context("Failed to aggregate measurements")?;

            let rendered = table.render(format)?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }

            table
                .write_json(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }

        Command::Fit {
            opcode,
            input,
            max_input_size,
            verbose,
        } => {
            if let Some(limit) = max_input_size {
                config.fit_max_input_size = limit;
            }
            let config = validated(config)?;
            let dataset = load_dataset(&input, None)?;
            let model = fit_cost_model(&dataset, &opcode, &config)
                .with_context(|| format!("Failed to fit cost model for {}", opcode))?;

            if verbose {
                println!("input_size  instruction_delta_per_op");
                for (size, cost) in &model.points {
                    println!("{:>10}  {:.4}", size, cost);
                }
                println!("r² = {:.6}", model.fit.r_squared);
            }
            println!("{}", model);
        }

        Command::PlotDist {
            input,
            out,
            filter,
            columns,
        } => {
            if let Some(columns) = columns {
                config.distribution_columns = columns;
            }
            let config = validated(config)?;
            let dataset = load_dataset(&input, filter.as_deref())?;
            let report = DistributionReport::build(&dataset, &config)
                .context("Failed to build distribution report")?;
            report
                .write(&out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            eprintln!("Wrote {}", out.display());
        }

        Command::PlotScaling {
            input,
            out,
            filter,
            columns,
        } => {
            if let Some(columns) = columns {
                config.scaling_columns = columns;
            }
            let config = validated(config)?;
            let dataset = load_dataset(&input, filter.as_deref())?;
            let report = ScalingReport::build(&dataset, &config)
                .context("Failed to build scaling report")?;
            report
                .write(&out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            eprintln!("Wrote {}", out.display());
        }
    }

    Ok(())
}
