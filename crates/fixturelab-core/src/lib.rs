pub mod error;
pub mod fixture;
pub mod xml;

pub use error::{FixtureError, Result};

pub use fixture::{
    collect_records, convert_reference, merge, merge_records, merge_root, run_pipeline,
    ComparisonReport, ComparisonSummary, FieldMap, FieldOutcome, LocalMergeService, MergeMode,
    MergeService, PipelineArtifacts, PipelineConfig, RecordComparator, RecordFailure,
    RecordSchema, ReportRenderer, StubMutator,
};
