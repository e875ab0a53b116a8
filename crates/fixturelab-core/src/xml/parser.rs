use super::arena::XmlDocument;
use super::node::{Attribute, XmlNodeData};
use crate::error::{FixtureError, Result};

pub fn parse(xml: &str) -> Result<XmlDocument> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| FixtureError::XmlParse {
        message: e.to_string(),
        location: format!("line {}", e.pos().row),
    })?;

    let mut xml_doc = XmlDocument::new();
    build_tree(doc.root_element(), &mut xml_doc, None);
    Ok(xml_doc)
}

pub fn parse_bytes(bytes: &[u8]) -> Result<XmlDocument> {
    let text = std::str::from_utf8(bytes).map_err(|e| FixtureError::XmlParse {
        message: e.to_string(),
        location: "input".to_string(),
    })?;
    parse(text)
}

fn build_tree(node: roxmltree::Node, doc: &mut XmlDocument, parent: Option<indextree::NodeId>) {
    let node_data = match node.node_type() {
        roxmltree::NodeType::Element => {
            let attributes: Vec<Attribute> = node
                .attributes()
                .map(|attr| Attribute::new(attr.name(), attr.value()))
                .collect();
            XmlNodeData::Element {
                name: node.tag_name().name().to_string(),
                attributes,
            }
        }
        roxmltree::NodeType::Text => {
            // Whitespace-only text nodes are formatting artifacts of
            // pretty-printed fixtures, not field values.
            match node.text() {
                Some(text) if !text.trim().is_empty() => XmlNodeData::Text(text.to_string()),
                _ => return,
            }
        }
        roxmltree::NodeType::Comment => match node.text() {
            Some(text) => XmlNodeData::Comment(text.to_string()),
            None => return,
        },
        roxmltree::NodeType::PI => XmlNodeData::ProcessingInstruction {
            target: node
                .pi()
                .map(|pi| pi.target.to_string())
                .unwrap_or_default(),
            data: node
                .pi()
                .and_then(|pi| pi.value.map(|s| s.to_string()))
                .unwrap_or_default(),
        },
        _ => return,
    };

    let new_id = match parent {
        Some(parent_id) => doc.add_child(parent_id, node_data),
        None => doc.add_root(node_data),
    };

    for child in node.children() {
        build_tree(child, doc, Some(new_id));
    }
}
