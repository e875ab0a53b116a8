use crate::error::{FixtureError, Result};
use crate::xml::{XmlDocument, XmlNodeData};
use indextree::NodeId;
use serde_json::Value;

/// Convert nested key/value reference data into a fixture tree: object key
/// becomes a child element, scalar becomes text, array items become
/// repeated `<item>` children.
///
/// `root_key` names the top-level object to convert. `inline_json_field`
/// optionally names one field directly under that object whose value is a
/// string of serialized JSON; it gets a secondary parse and expands into a
/// subtree. If the secondary parse fails the string stays as plain text.
pub fn convert_reference(
    json_text: &str,
    root_key: &str,
    inline_json_field: Option<&str>,
) -> Result<XmlDocument> {
    let mut data: Value = serde_json::from_str(json_text)?;

    let root_value = data
        .get_mut(root_key)
        .ok_or_else(|| FixtureError::structure(format!("reference data has no \"{root_key}\" key")))?;

    if let (Some(field), Some(obj)) = (inline_json_field, root_value.as_object_mut()) {
        if let Some(inline) = obj.get_mut(field) {
            if let Some(text) = inline.as_str() {
                if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                    *inline = parsed;
                }
            }
        }
    }

    let mut doc = XmlDocument::new();
    let root = doc.add_root(XmlNodeData::element(root_key));
    append_value(&mut doc, root, root_value);
    Ok(doc)
}

fn append_value(doc: &mut XmlDocument, parent: NodeId, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child_value) in map {
                let child = doc.add_child(parent, XmlNodeData::element(key));
                append_value(doc, child, child_value);
            }
        }
        Value::Array(items) => {
            for item in items {
                let child = doc.add_child(parent, XmlNodeData::element("item"));
                append_value(doc, child, item);
            }
        }
        Value::String(s) => {
            doc.add_child(parent, XmlNodeData::text(s));
        }
        Value::Number(n) => {
            doc.add_child(parent, XmlNodeData::text(&n.to_string()));
        }
        Value::Bool(b) => {
            doc.add_child(parent, XmlNodeData::text(if *b { "true" } else { "false" }));
        }
        Value::Null => {}
    }
}
