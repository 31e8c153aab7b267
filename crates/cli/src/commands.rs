use clap::Subcommand;
use engine_config::templates::TemplateType;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a source file and report what the parser recovered
    Analyze {
        #[arg(help = "Source pricebook (xlsx, csv, txt, ...)")]
        source: PathBuf,
    },
    /// Convert one source pricebook into a customer template
    Convert {
        source: PathBuf,

        #[arg(long, help = "single_part, bundle or supplier_loader")]
        template_type: TemplateType,

        #[arg(long, help = "Crosswalk CSV; defaults to the template type's crosswalk")]
        crosswalk: Option<PathBuf>,

        #[arg(long, help = "Base workbook; defaults to the template type's template")]
        template_path: Option<PathBuf>,

        #[arg(long, default_value = "config/markup/default_global_tiered_markup.json")]
        markup_profile: PathBuf,

        #[arg(long)]
        labor_cost_default: Option<Decimal>,

        #[arg(long)]
        labor_rate_default: Option<Decimal>,

        #[arg(long, default_value = "out/converted/output.csv")]
        output_csv: PathBuf,

        #[arg(long, default_value = "out/converted/output.xlsx")]
        output_workbook: PathBuf,

        #[arg(long, default_value = "out/qa/run_report.json")]
        qa_json: PathBuf,

        #[arg(long, default_value = "out/qa/manual_review.csv")]
        manual_review_csv: PathBuf,
    },
    /// Convert every customer listed in a manifest
    ConvertAll {
        #[arg(long, default_value = "config/mappings/customer_manifest.csv")]
        manifest: PathBuf,

        #[arg(long, default_value = "config/markup/default_global_tiered_markup.json")]
        markup_profile: PathBuf,

        #[arg(long)]
        labor_cost_default: Option<Decimal>,

        #[arg(long)]
        labor_rate_default: Option<Decimal>,

        #[arg(long, default_value = "out")]
        out_dir: PathBuf,

        #[arg(long, default_value = "out/qa/consolidated.json")]
        consolidated_qa: PathBuf,
    },
    /// Append manufacturer web data to a normalized CSV
    Enrich {
        input_csv: PathBuf,

        #[arg(long, default_value = "config/enrichment/manufacturer_domains.json")]
        domains_config: PathBuf,

        #[arg(long, default_value = "out/enriched/enriched.csv")]
        output_csv: PathBuf,

        #[arg(long, default_value = "out/qa/enrichment.json")]
        qa_json: PathBuf,

        #[arg(long, default_value_t = 100, help = "Pause between lookups in milliseconds")]
        sleep_ms: u64,
    },
}
