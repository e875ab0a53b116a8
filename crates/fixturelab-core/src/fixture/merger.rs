use super::schema::RecordSchema;
use crate::error::{FixtureError, Result};
use crate::xml::XmlDocument;
use serde::{Deserialize, Serialize};

/// How reference data is grafted onto a base document. Always an explicit
/// choice of the caller, never inferred from document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeMode {
    /// Append a deep copy of the reference root to every record of the
    /// base document's record list.
    Records,
    /// Append a deep copy of every top-level child of the reference root
    /// directly to the base root. No record-list shape required.
    RootAppend,
}

pub fn merge(
    base: &mut XmlDocument,
    reference: &XmlDocument,
    mode: MergeMode,
    schema: &RecordSchema,
) -> Result<usize> {
    match mode {
        MergeMode::Records => merge_records(base, reference, schema),
        MergeMode::RootAppend => merge_root(base, reference),
    }
}

/// Enrichment merge: grafts an independent deep copy of the reference root
/// onto every record as its last child. Existing children keep their order.
/// All-or-nothing: a base without the record-list shape fails before any
/// record is touched. Returns the number of records enriched.
pub fn merge_records(
    base: &mut XmlDocument,
    reference: &XmlDocument,
    schema: &RecordSchema,
) -> Result<usize> {
    let base_root = base
        .root()
        .ok_or_else(|| FixtureError::structure("base document is empty"))?;
    let reference_root = reference
        .root()
        .ok_or_else(|| FixtureError::structure("reference document is empty"))?;

    let list = base
        .elements_by_tag(base_root, &schema.list_tag)
        .next()
        .ok_or_else(|| {
            FixtureError::structure(format!(
                "base document does not contain <{}> element",
                schema.list_tag
            ))
        })?;

    let records: Vec<_> = base.elements_by_tag(list, &schema.record_tag).collect();
    for &record in &records {
        let _ = base.copy_subtree_from(reference, reference_root, record);
    }

    Ok(records.len())
}

/// Root-level append for documents without a record list: every top-level
/// child of the reference root is deep-copied onto the base root.
/// Returns the number of children appended.
pub fn merge_root(base: &mut XmlDocument, reference: &XmlDocument) -> Result<usize> {
    let base_root = base
        .root()
        .ok_or_else(|| FixtureError::structure("base document is empty"))?;
    let reference_root = reference
        .root()
        .ok_or_else(|| FixtureError::structure("reference document is empty"))?;

    let children: Vec<_> = reference.children(reference_root).collect();
    for &child in &children {
        let _ = base.copy_subtree_from(reference, child, base_root);
    }

    Ok(children.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::parse;

    fn reference() -> XmlDocument {
        parse("<lookup><bonus>5</bonus><region>EU</region></lookup>").unwrap()
    }

    #[test]
    fn merge_records_appends_copy_to_every_record() {
        let mut base = parse(
            "<root><sheet>\
             <row><price>100</price></row>\
             <row><price>200</price></row>\
             </sheet></root>",
        )
        .unwrap();
        let reference = reference();

        let merged = merge_records(&mut base, &reference, &RecordSchema::default()).unwrap();
        assert_eq!(merged, 2);

        let root = base.root().unwrap();
        let sheet = base.elements_by_tag(root, "sheet").next().unwrap();
        for row in base.elements_by_tag(sheet, "row").collect::<Vec<_>>() {
            let children: Vec<_> = base.children(row).collect();
            assert_eq!(children.len(), 2);
            assert_eq!(base.tag(children[0]), Some("price"));
            assert!(base.subtree_eq(
                *children.last().unwrap(),
                &reference,
                reference.root().unwrap()
            ));
        }
    }

    #[test]
    fn merge_records_fails_without_record_list() {
        let mut base = parse("<root><other/></root>").unwrap();
        let err = merge_records(&mut base, &reference(), &RecordSchema::default()).unwrap_err();
        assert!(matches!(err, FixtureError::Structure { .. }));
        assert!(err.to_string().contains("<sheet>"));
    }

    #[test]
    fn merge_records_with_empty_list_is_a_noop() {
        let mut base = parse("<root><sheet/></root>").unwrap();
        let merged = merge_records(&mut base, &reference(), &RecordSchema::default()).unwrap();
        assert_eq!(merged, 0);
    }

    #[test]
    fn merge_root_appends_top_level_children() {
        let mut base = parse("<config><env>test</env></config>").unwrap();
        let appended = merge_root(&mut base, &reference()).unwrap();
        assert_eq!(appended, 2);

        let root = base.root().unwrap();
        let tags: Vec<_> = base
            .children(root)
            .filter_map(|c| base.tag(c).map(str::to_string))
            .collect();
        assert_eq!(tags, ["env", "bonus", "region"]);
    }

    #[test]
    fn merge_mode_dispatches_explicitly() {
        let mut base = parse("<root><sheet><row/></sheet></root>").unwrap();
        let n = merge(
            &mut base,
            &reference(),
            MergeMode::Records,
            &RecordSchema::default(),
        )
        .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn custom_schema_tags_are_honored() {
        let mut base = parse("<root><cases><case/></cases></root>").unwrap();
        let schema = RecordSchema::new("cases", "case");
        let merged = merge_records(&mut base, &reference(), &schema).unwrap();
        assert_eq!(merged, 1);
    }
}
