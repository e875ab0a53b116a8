mod comparator;
mod convert;
mod field_map;
mod merger;
mod mutator;
mod pipeline;
mod report;
mod result;
mod schema;
mod service;

pub use comparator::{collect_records, RecordComparator};
pub use convert::convert_reference;
pub use field_map::FieldMap;
pub use merger::{merge, merge_records, merge_root, MergeMode};
pub use mutator::StubMutator;
pub use pipeline::{run_pipeline, PipelineArtifacts, PipelineConfig};
pub use report::ReportRenderer;
pub use result::{ComparisonReport, ComparisonSummary, FieldOutcome, RecordFailure};
pub use schema::RecordSchema;
pub use service::{LocalMergeService, MergeService};
