use serde::{Deserialize, Serialize};

/// Shape of the record-list container a merge base is expected to carry.
///
/// The conventional fixture layout is a `<sheet>` element directly under the
/// root whose children are `<row>` records, but both tags are configurable
/// per pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Tag of the record-list container element.
    pub list_tag: String,

    /// Tag of one record within the list.
    pub record_tag: String,
}

impl RecordSchema {
    pub fn new(list_tag: &str, record_tag: &str) -> Self {
        Self {
            list_tag: list_tag.to_string(),
            record_tag: record_tag.to_string(),
        }
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::new("sheet", "row")
    }
}
