use super::field_map::FieldMap;
use super::result::{ComparisonReport, FieldOutcome, RecordFailure};
use super::schema::RecordSchema;
use crate::xml::XmlDocument;

/// Field-level comparison of two fixture trees.
///
/// Records are collected by a descendant search for the record tag anywhere
/// in the document (no container required) and aligned positionally; if the
/// counts differ, comparison stops at the shorter length and the extras are
/// ignored. A field mismatch is data, not an error, so `compare` is
/// infallible and never mutates its inputs.
pub struct RecordComparator {
    schema: RecordSchema,
}

impl RecordComparator {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }

    pub fn compare(&self, actual: &XmlDocument, expected: &XmlDocument) -> ComparisonReport {
        let actual_records = collect_records(actual, &self.schema);
        let expected_records = collect_records(expected, &self.schema);

        let mut report = ComparisonReport::new();

        for (i, (a_map, e_map)) in actual_records.iter().zip(expected_records.iter()).enumerate() {
            let mut failed_fields = Vec::new();

            // Only the expected side drives the walk: actual-only fields are
            // never reported as extra.
            for (field, e_val) in e_map.iter() {
                report.summary.total_tags += 1;
                let a_val = a_map.get(field).unwrap_or("");
                if a_val == e_val {
                    report.summary.passed += 1;
                } else {
                    report.summary.failed += 1;
                    failed_fields.push(FieldOutcome {
                        field: field.to_string(),
                        expected: e_val.to_string(),
                        actual: a_val.to_string(),
                    });
                }
            }

            if !failed_fields.is_empty() {
                report.failures.push(RecordFailure {
                    record: i + 1,
                    fields: failed_fields,
                });
            }
        }

        report
    }
}

/// Flatten every record found anywhere in the document, in document order.
pub fn collect_records(doc: &XmlDocument, schema: &RecordSchema) -> Vec<FieldMap> {
    let Some(root) = doc.root() else {
        return Vec::new();
    };
    doc.descendant_elements_by_tag(root, &schema.record_tag)
        .map(|record| FieldMap::from_record(doc, record))
        .collect()
}
