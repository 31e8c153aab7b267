use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::file::ingest::ingest_file;
use engine_config::{inference::InferenceTables, templates::TemplateRegistry};
use engine_processing::transform::mapper::LaborDefaults;
use engine_runtime::execution::{
    RunContext,
    batch::{BatchRequest, run_manifest},
    conversion::{ConversionRequest, OutputPaths, run_conversion},
    enrichment::{EnrichmentRequest, run_enrichment},
};
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "pricebook", version = "0.1.0", about = "Pricebook ingestion and conversion")]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Directory holding config/ and samples/"
    )]
    root: PathBuf,

    #[arg(
        long,
        global = true,
        help = "TOML file overriding brand tokens, category sheets or field candidates"
    )]
    inference: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { source } => {
            let result = ingest_file(&source)?;
            output::print_analysis(&result);
        }
        Commands::Convert {
            source,
            template_type,
            crosswalk,
            template_path,
            markup_profile,
            labor_cost_default,
            labor_rate_default,
            output_csv,
            output_workbook,
            qa_json,
            manual_review_csv,
        } => {
            let ctx = run_context(cli.root, cli.inference)?;
            let request = ConversionRequest::new(source, template_type, markup_profile)
                .with_crosswalk(crosswalk)
                .with_template(template_path)
                .with_labor(LaborDefaults {
                    cost: labor_cost_default,
                    rate: labor_rate_default,
                })
                .with_outputs(OutputPaths {
                    normalized_csv: output_csv,
                    workbook: output_workbook,
                    qa_json,
                    manual_review_csv,
                });
            let outcome = run_conversion(&request, &ctx)?;
            output::print_conversion(&outcome);
        }
        Commands::ConvertAll {
            manifest,
            markup_profile,
            labor_cost_default,
            labor_rate_default,
            out_dir,
            consolidated_qa,
        } => {
            let ctx = run_context(cli.root, cli.inference)?;
            let request = BatchRequest {
                manifest,
                markup_profile,
                out_dir,
                consolidated_qa,
                labor: LaborDefaults {
                    cost: labor_cost_default,
                    rate: labor_rate_default,
                },
            };
            let report = run_manifest(&request, &ctx)?;
            output::print_batch(&report, &request.consolidated_qa);
        }
        Commands::Enrich {
            input_csv,
            domains_config,
            output_csv,
            qa_json,
            sleep_ms,
        } => {
            let request = EnrichmentRequest {
                input_csv,
                output_csv,
                qa_json,
                domains_config,
                pause: Duration::from_millis(sleep_ms),
            };
            let report = run_enrichment(&request)?;
            output::print_enrichment(&report, &request.output_csv, &request.qa_json)?;
        }
    }

    Ok(())
}

fn run_context(root: PathBuf, inference: Option<PathBuf>) -> Result<RunContext, CliError> {
    let tables = match inference {
        Some(path) => InferenceTables::from_file(&path)?,
        None => InferenceTables::default(),
    };
    Ok(RunContext::new(TemplateRegistry::new(root), tables))
}
