use super::merger;
use super::schema::RecordSchema;
use crate::error::{FixtureError, Result};
use crate::xml::{builder, parser};

/// Contract of the external merge endpoint: two documents in, one merged
/// document out as bytes. The remote service takes the two documents as
/// named multipart parts and answers with XML on success, a client-error
/// status for parse/structure problems, and a server-error status
/// otherwise. Implementations surface every non-success as
/// [`FixtureError::Service`]; the pipeline does not retry.
pub trait MergeService {
    fn merge(&self, base: &[u8], reference: &[u8]) -> Result<Vec<u8>>;
}

/// In-process implementation of the merge contract, running the same record
/// merge the service performs. Exists so service-produced fixtures can be
/// cross-checked against a local merge without a network in the loop.
pub struct LocalMergeService {
    schema: RecordSchema,
}

impl LocalMergeService {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }
}

impl MergeService for LocalMergeService {
    fn merge(&self, base: &[u8], reference: &[u8]) -> Result<Vec<u8>> {
        // Status mapping mirrors the endpoint: malformed input and missing
        // record list are client errors, anything else a server error.
        let mut base_doc = parser::parse_bytes(base)
            .map_err(|e| FixtureError::service(400, format!("Invalid XML format: {e}")))?;
        let reference_doc = parser::parse_bytes(reference)
            .map_err(|e| FixtureError::service(400, format!("Invalid XML format: {e}")))?;

        merger::merge_records(&mut base_doc, &reference_doc, &self.schema).map_err(|e| match e {
            FixtureError::Structure { message } => FixtureError::service(400, message),
            other => FixtureError::service(500, other.to_string()),
        })?;

        builder::serialize_bytes(&base_doc)
            .map_err(|e| FixtureError::service(500, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> LocalMergeService {
        LocalMergeService::new(RecordSchema::default())
    }

    #[test]
    fn merges_and_returns_xml_bytes() {
        let base = b"<root><sheet><row><price>100</price></row></sheet></root>";
        let reference = b"<lookup><bonus>5</bonus></lookup>";

        let merged = service().merge(base, reference).unwrap();
        let doc = parser::parse_bytes(&merged).unwrap();
        let root = doc.root().unwrap();
        let row = doc.descendant_elements_by_tag(root, "row").next().unwrap();
        let tags: Vec<_> = doc
            .children(row)
            .filter_map(|c| doc.tag(c).map(str::to_string))
            .collect();
        assert_eq!(tags, ["price", "lookup"]);
    }

    #[test]
    fn missing_record_list_is_a_client_error() {
        let err = service()
            .merge(b"<root><other/></root>", b"<lookup/>")
            .unwrap_err();
        match err {
            FixtureError::Service { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("<sheet>"));
            }
            other => panic!("expected Service error, got {other}"),
        }
    }

    #[test]
    fn malformed_base_is_a_client_error() {
        let err = service().merge(b"<root><broken>", b"<lookup/>").unwrap_err();
        match err {
            FixtureError::Service { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("Invalid XML format"));
            }
            other => panic!("expected Service error, got {other}"),
        }
    }

    #[test]
    fn local_merge_matches_direct_merge() {
        let base = b"<root><sheet><row><price>100</price></row></sheet></root>";
        let reference = b"<lookup><bonus>5</bonus></lookup>";

        let via_service = parser::parse_bytes(&service().merge(base, reference).unwrap()).unwrap();

        let mut direct = parser::parse_bytes(base).unwrap();
        let reference_doc = parser::parse_bytes(reference).unwrap();
        merger::merge_records(&mut direct, &reference_doc, &RecordSchema::default()).unwrap();

        assert!(direct.subtree_eq(
            direct.root().unwrap(),
            &via_service,
            via_service.root().unwrap()
        ));
    }
}
