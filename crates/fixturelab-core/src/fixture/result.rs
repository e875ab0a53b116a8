use serde::{Deserialize, Serialize};

/// One failing field within a record. A recorded outcome is always a
/// failure; matching fields only show up in the aggregate counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutcome {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

/// One record with at least one failing field. `record` is 1-based, the
/// position of the record pair in the aligned lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub record: usize,
    pub fields: Vec<FieldOutcome>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_tags: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub failures: Vec<RecordFailure>,
    pub summary: ComparisonSummary,
}

impl ComparisonReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every compared field matched.
    pub fn is_clean(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
