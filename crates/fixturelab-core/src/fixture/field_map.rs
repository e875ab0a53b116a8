use crate::xml::XmlDocument;
use indextree::NodeId;
use std::collections::HashMap;

/// Flattened view of one record: field name (descendant tag) to text value.
///
/// Fields keep the order in which their tag was first observed during the
/// preorder walk. A duplicate tag overwrites the stored value in place:
/// last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten every descendant element of `record` except the record
    /// itself. An element without a text child contributes the empty string.
    pub fn from_record(doc: &XmlDocument, record: NodeId) -> Self {
        let mut map = Self::new();
        for id in doc.descendants(record).skip(1) {
            if let Some(tag) = doc.tag(id) {
                let value = doc.text(id).unwrap_or("");
                map.insert(tag, value);
            }
        }
        map
    }

    pub fn insert(&mut self, field: &str, value: &str) {
        match self.index.get(field).copied() {
            Some(i) => value.clone_into(&mut self.entries[i].1),
            None => {
                self.index.insert(field.to_string(), self.entries.len());
                self.entries.push((field.to_string(), value.to_string()));
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.index.get(field).map(|&i| self.entries[i].1.as_str())
    }

    /// Fields in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
