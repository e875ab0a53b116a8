//! End-to-end pipeline tests against the in-process merge service.

use fixturelab_core::{run_pipeline, FixtureError, LocalMergeService, PipelineConfig, RecordSchema};
use std::fs;
use tempfile::TempDir;

const BASE_XML: &str = "<root><sheet>\
                        <row><price>100</price></row>\
                        <row><price>200</price></row>\
                        </sheet></root>";
const REFERENCE_JSON: &str = r#"{"lookup": {"bonus": 5, "factors": "{\"alpha\": 1.5}"}}"#;

fn write_inputs(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let base = dir.path().join("pricing_testdata.xml");
    let reference = dir.path().join("reference.json");
    fs::write(&base, BASE_XML).unwrap();
    fs::write(&reference, REFERENCE_JSON).unwrap();
    (base, reference)
}

fn config(dir: &TempDir) -> PipelineConfig {
    let (base, reference) = write_inputs(dir);
    let mut config = PipelineConfig::new(&base, &reference, &dir.path().join("out"));
    config.reference_root_key = "lookup".to_string();
    config.inline_json_field = Some("factors".to_string());
    config
}

#[test]
fn pipeline_produces_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.seed = 42;
    cfg.blank_probability = 0.3;

    let service = LocalMergeService::new(RecordSchema::default());
    let artifacts = run_pipeline(&cfg, &service).unwrap();

    for path in [
        &artifacts.reference_xml,
        &artifacts.enriched,
        &artifacts.expected,
        &artifacts.actual,
        &artifacts.report,
    ] {
        assert!(path.is_file(), "missing artifact {}", path.display());
    }

    let report = fs::read_to_string(&artifacts.report).unwrap();
    assert!(report.contains("Part 1: Summary"));
    assert!(report.contains("Part 3: Actual Result"));
}

#[test]
fn blank_probability_zero_yields_clean_run() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.blank_probability = 0.0;

    let service = LocalMergeService::new(RecordSchema::default());
    let artifacts = run_pipeline(&cfg, &service).unwrap();

    assert_eq!(artifacts.summary.failed, 0);
    assert_eq!(artifacts.summary.passed, artifacts.summary.total_tags);
    assert!(artifacts.summary.total_tags > 0);
}

#[test]
fn blank_probability_one_fails_every_nonempty_field() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.blank_probability = 1.0;
    cfg.seed = 7;

    let service = LocalMergeService::new(RecordSchema::default());
    let artifacts = run_pipeline(&cfg, &service).unwrap();

    // Per row: price, bonus, factors/alpha carry text; the lookup and
    // factors containers flatten to "" on both sides and pass.
    assert_eq!(artifacts.summary.total_tags, 10);
    assert_eq!(artifacts.summary.failed, 6);
    assert_eq!(artifacts.summary.passed, 4);
}

#[test]
fn same_seed_produces_identical_expected_fixture() {
    let service = LocalMergeService::new(RecordSchema::default());

    let dir_a = TempDir::new().unwrap();
    let mut cfg_a = config(&dir_a);
    cfg_a.seed = 1234;
    cfg_a.blank_probability = 0.5;
    let a = run_pipeline(&cfg_a, &service).unwrap();

    let dir_b = TempDir::new().unwrap();
    let mut cfg_b = config(&dir_b);
    cfg_b.seed = 1234;
    cfg_b.blank_probability = 0.5;
    let b = run_pipeline(&cfg_b, &service).unwrap();

    assert_eq!(
        fs::read_to_string(&a.expected).unwrap(),
        fs::read_to_string(&b.expected).unwrap()
    );
    assert_eq!(a.summary, b.summary);
}

#[test]
fn local_and_service_merges_agree() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.blank_probability = 0.0;

    let service = LocalMergeService::new(RecordSchema::default());
    let artifacts = run_pipeline(&cfg, &service).unwrap();

    use fixturelab_core::xml::parser::parse_bytes;
    let enriched = parse_bytes(&fs::read(&artifacts.enriched).unwrap()).unwrap();
    let actual = parse_bytes(&fs::read(&artifacts.actual).unwrap()).unwrap();
    assert!(enriched.subtree_eq(enriched.root().unwrap(), &actual, actual.root().unwrap()));
}

#[test]
fn service_failure_aborts_the_run() {
    struct FailingService;
    impl fixturelab_core::MergeService for FailingService {
        fn merge(&self, _base: &[u8], _reference: &[u8]) -> fixturelab_core::Result<Vec<u8>> {
            Err(FixtureError::service(500, "connection refused"))
        }
    }

    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    let err = run_pipeline(&cfg, &FailingService).unwrap_err();
    assert!(matches!(err, FixtureError::Service { status: 500, .. }));
    // The step never produced its artifact.
    assert!(!dir.path().join("out").join("expected.xml").exists());
}

#[test]
fn base_without_record_list_aborts_with_structure_error() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("bad.xml");
    let reference = dir.path().join("reference.json");
    fs::write(&base, "<root><nothing/></root>").unwrap();
    fs::write(&reference, REFERENCE_JSON).unwrap();

    let mut cfg = PipelineConfig::new(&base, &reference, &dir.path().join("out"));
    cfg.reference_root_key = "lookup".to_string();

    let service = LocalMergeService::new(RecordSchema::default());
    let err = run_pipeline(&cfg, &service).unwrap_err();
    assert!(matches!(err, FixtureError::Structure { .. }));
}
