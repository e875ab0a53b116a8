use super::comparator::{collect_records, RecordComparator};
use super::convert::convert_reference;
use super::merger;
use super::mutator::StubMutator;
use super::report::ReportRenderer;
use super::result::ComparisonSummary;
use super::schema::RecordSchema;
use super::service::MergeService;
use crate::error::Result;
use crate::xml::{builder, parser};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a pipeline run needs, injected explicitly. Paths in
/// particular are never taken from ambient working-directory state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base tree of test scenarios (the record-list document).
    pub base_path: PathBuf,
    /// Reference data as nested key/value JSON.
    pub reference_path: PathBuf,
    /// Directory for all output artifacts; created if missing.
    pub output_dir: PathBuf,
    /// Probability that a non-empty field text is blanked in the stub.
    pub blank_probability: f64,
    /// Seed of the stub mutation; required so runs are reproducible.
    pub seed: u64,
    pub schema: RecordSchema,
    /// Top-level key of the reference JSON to convert.
    pub reference_root_key: String,
    /// Field under the root key holding serialized JSON needing a
    /// secondary parse.
    pub inline_json_field: Option<String>,
}

impl PipelineConfig {
    pub fn new(base_path: &Path, reference_path: &Path, output_dir: &Path) -> Self {
        Self {
            base_path: base_path.to_path_buf(),
            reference_path: reference_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            blank_probability: 0.3,
            seed: 0,
            schema: RecordSchema::default(),
            reference_root_key: "rarFullPostCodeResponse".to_string(),
            inline_json_field: Some("factors".to_string()),
        }
    }
}

/// Paths of the artifacts a completed run produced, plus the aggregate
/// comparison counts.
#[derive(Debug, Clone)]
pub struct PipelineArtifacts {
    pub reference_xml: PathBuf,
    pub enriched: PathBuf,
    pub expected: PathBuf,
    pub actual: PathBuf,
    pub report: PathBuf,
    pub summary: ComparisonSummary,
}

/// Run the whole fixture pipeline: convert reference data, enrich locally,
/// produce expected (service merge + stub mutation) and actual (service
/// merge) fixtures, compare, and render the report.
///
/// Single-threaded and synchronous; each stage fully materializes its
/// artifact before the next reads it, and any error aborts the run with
/// nothing retried.
pub fn run_pipeline(
    config: &PipelineConfig,
    service: &dyn MergeService,
) -> Result<PipelineArtifacts> {
    fs::create_dir_all(&config.output_dir)?;

    let base_bytes = fs::read(&config.base_path)?;
    let reference_json = fs::read_to_string(&config.reference_path)?;

    // Step 1: reference JSON -> XML.
    let reference_doc = convert_reference(
        &reference_json,
        &config.reference_root_key,
        config.inline_json_field.as_deref(),
    )?;
    let reference_bytes = builder::serialize_bytes(&reference_doc)?;
    let reference_xml = config.output_dir.join("formatted_reference.xml");
    fs::write(&reference_xml, &reference_bytes)?;

    // Step 2a: local enrichment merge.
    let mut enriched_doc = parser::parse_bytes(&base_bytes)?;
    merger::merge_records(&mut enriched_doc, &reference_doc, &config.schema)?;
    let enriched = config.output_dir.join("enriched.xml");
    fs::write(&enriched, builder::serialize_bytes(&enriched_doc)?)?;

    // Step 2b: expected fixture via the merge service, then stub mutation.
    let expected_bytes = service.merge(&base_bytes, &reference_bytes)?;
    let mut expected_doc = parser::parse_bytes(&expected_bytes)?;
    StubMutator::new(config.seed).blank_fields(&mut expected_doc, config.blank_probability);
    let expected = config.output_dir.join("expected.xml");
    fs::write(&expected, builder::serialize_bytes(&expected_doc)?)?;

    // Step 3: actual fixture, an independent service merge of the same
    // inputs.
    let actual_bytes = service.merge(&base_bytes, &reference_bytes)?;
    let actual = config.output_dir.join("actual.xml");
    fs::write(&actual, &actual_bytes)?;

    // Step 4: compare and render.
    let actual_doc = parser::parse_bytes(&actual_bytes)?;
    let comparison = RecordComparator::new(config.schema.clone()).compare(&actual_doc, &expected_doc);
    let actual_records = collect_records(&actual_doc, &config.schema);
    let report = config.output_dir.join("comparison_report.html");
    ReportRenderer::write_html(&comparison, &actual_records, &report)?;

    Ok(PipelineArtifacts {
        reference_xml,
        enriched,
        expected,
        actual,
        report,
        summary: comparison.summary,
    })
}
