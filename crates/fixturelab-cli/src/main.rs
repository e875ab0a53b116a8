use clap::{Parser, Subcommand, ValueEnum};
use fixturelab_core::xml::{builder, parser};
use fixturelab_core::{
    collect_records, run_pipeline, LocalMergeService, MergeMode, PipelineConfig, RecordComparator,
    RecordSchema, ReportRenderer, StubMutator,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fixturelab")]
#[command(about = "Pricing test-data fixture pipeline", long_about = None)]
struct Cli {
    /// Tag of the record-list container element
    #[arg(long, default_value = "sheet", global = true)]
    list_tag: String,

    /// Tag of one record within the list
    #[arg(long, default_value = "row", global = true)]
    record_tag: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Append the reference root to every record
    Records,
    /// Append reference children to the base root
    Root,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: convert, enrich, stub, merge, compare, report
    Run {
        /// Base record-list XML document
        #[arg(short, long)]
        base: PathBuf,

        /// Reference data JSON
        #[arg(short, long)]
        reference: PathBuf,

        /// Directory for output artifacts
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Probability that a non-empty field text is blanked in the stub
        #[arg(short, long, default_value_t = 0.3)]
        probability: f64,

        /// Seed of the stub mutation
        #[arg(short, long)]
        seed: u64,

        /// Top-level key of the reference JSON to convert
        #[arg(long, default_value = "rarFullPostCodeResponse")]
        root_key: String,

        /// Reference field holding serialized JSON needing a secondary parse
        #[arg(long, default_value = "factors")]
        inline_field: String,
    },
    /// Merge a reference document into a base document locally
    Merge {
        #[arg(short, long)]
        base: PathBuf,

        #[arg(short, long)]
        reference: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Mode::Records)]
        mode: Mode,
    },
    /// Blank a random subset of field texts in a document
    Stub {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, default_value_t = 0.3)]
        probability: f64,

        #[arg(short, long)]
        seed: u64,
    },
    /// Compare two documents and write the HTML report
    Compare {
        #[arg(short, long)]
        actual: PathBuf,

        #[arg(short, long)]
        expected: PathBuf,

        #[arg(short, long)]
        report: PathBuf,

        /// Also print the comparison result as JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let schema = RecordSchema::new(&cli.list_tag, &cli.record_tag);

    if let Err(err) = run(cli.command, schema) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(command: Commands, schema: RecordSchema) -> fixturelab_core::Result<()> {
    match command {
        Commands::Run {
            base,
            reference,
            out_dir,
            probability,
            seed,
            root_key,
            inline_field,
        } => {
            let mut config = PipelineConfig::new(&base, &reference, &out_dir);
            config.blank_probability = probability;
            config.seed = seed;
            config.schema = schema.clone();
            config.reference_root_key = root_key;
            config.inline_json_field = Some(inline_field);

            let service = LocalMergeService::new(schema);
            let artifacts = run_pipeline(&config, &service)?;

            println!("Reference XML: {}", artifacts.reference_xml.display());
            println!("Enriched:      {}", artifacts.enriched.display());
            println!("Expected stub: {}", artifacts.expected.display());
            println!("Actual:        {}", artifacts.actual.display());
            println!("Report:        {}", artifacts.report.display());
            println!(
                "Summary: {} tags, {} passed, {} failed",
                artifacts.summary.total_tags, artifacts.summary.passed, artifacts.summary.failed
            );
        }
        Commands::Merge {
            base,
            reference,
            output,
            mode,
        } => {
            let mut base_doc = parser::parse_bytes(&fs::read(&base)?)?;
            let reference_doc = parser::parse_bytes(&fs::read(&reference)?)?;

            let merge_mode = match mode {
                Mode::Records => MergeMode::Records,
                Mode::Root => MergeMode::RootAppend,
            };
            let merged = fixturelab_core::merge(&mut base_doc, &reference_doc, merge_mode, &schema)?;
            fs::write(&output, builder::serialize_bytes(&base_doc)?)?;
            println!("Merged {merged} node(s) -> {}", output.display());
        }
        Commands::Stub {
            input,
            output,
            probability,
            seed,
        } => {
            let mut doc = parser::parse_bytes(&fs::read(&input)?)?;
            let blanked = StubMutator::new(seed).blank_fields(&mut doc, probability);
            fs::write(&output, builder::serialize_bytes(&doc)?)?;
            println!("Blanked {blanked} field(s) -> {}", output.display());
        }
        Commands::Compare {
            actual,
            expected,
            report,
            json,
        } => {
            let actual_doc = parser::parse_bytes(&fs::read(&actual)?)?;
            let expected_doc = parser::parse_bytes(&fs::read(&expected)?)?;

            let comparison = RecordComparator::new(schema.clone()).compare(&actual_doc, &expected_doc);
            let actual_records = collect_records(&actual_doc, &schema);
            ReportRenderer::write_html(&comparison, &actual_records, &report)?;

            if json {
                println!("{}", comparison.to_json());
            } else {
                println!(
                    "Compared {} tags: {} passed, {} failed",
                    comparison.summary.total_tags,
                    comparison.summary.passed,
                    comparison.summary.failed
                );
            }
            println!("Report: {}", report.display());
        }
    }
    Ok(())
}
