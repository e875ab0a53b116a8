use super::arena::XmlDocument;
use super::node::XmlNodeData;
use crate::error::{FixtureError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

pub fn serialize(doc: &XmlDocument) -> Result<String> {
    let bytes = serialize_bytes(doc)?;
    String::from_utf8(bytes).map_err(|e| FixtureError::XmlWrite(e.to_string()))
}

pub fn serialize_bytes(doc: &XmlDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| FixtureError::XmlWrite(e.to_string()))?;

    if let Some(root_id) = doc.root() {
        write_node(doc, root_id, &mut writer)?;
    }

    Ok(writer.into_inner().into_inner())
}

fn write_node<W: std::io::Write>(
    doc: &XmlDocument,
    node_id: indextree::NodeId,
    writer: &mut Writer<W>,
) -> Result<()> {
    let Some(node_data) = doc.get(node_id) else {
        return Ok(());
    };

    match node_data {
        XmlNodeData::Element { name, attributes } => {
            let mut elem = BytesStart::new(name.as_str());
            for attr in attributes {
                elem.push_attribute((attr.name.as_str(), attr.value.as_str()));
            }

            let children: Vec<_> = doc.children(node_id).collect();
            if children.is_empty() {
                writer
                    .write_event(Event::Empty(elem))
                    .map_err(|e| FixtureError::XmlWrite(e.to_string()))?;
            } else {
                writer
                    .write_event(Event::Start(elem))
                    .map_err(|e| FixtureError::XmlWrite(e.to_string()))?;
                for child_id in children {
                    write_node(doc, child_id, writer)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(name.as_str())))
                    .map_err(|e| FixtureError::XmlWrite(e.to_string()))?;
            }
        }
        XmlNodeData::Text(text) => {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| FixtureError::XmlWrite(e.to_string()))?;
        }
        XmlNodeData::Comment(text) => {
            writer
                .write_event(Event::Comment(BytesText::new(text)))
                .map_err(|e| FixtureError::XmlWrite(e.to_string()))?;
        }
        XmlNodeData::ProcessingInstruction { target, data } => {
            let pi_content = if data.is_empty() {
                target.clone()
            } else {
                format!("{} {}", target, data)
            };
            writer
                .write_event(Event::PI(quick_xml::events::BytesPI::new(&pi_content)))
                .map_err(|e| FixtureError::XmlWrite(e.to_string()))?;
        }
    }

    Ok(())
}
