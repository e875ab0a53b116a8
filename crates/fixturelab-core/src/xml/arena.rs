use super::node::XmlNodeData;
use indextree::{Arena, NodeId};

/// Arena-backed XML document. Single owner per parse; subtrees are copied,
/// never aliased, when grafted between documents.
#[derive(Debug)]
pub struct XmlDocument {
    arena: Arena<XmlNodeData>,
    root: Option<NodeId>,
}

impl XmlDocument {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&XmlNodeData> {
        self.arena.get(id).map(|node| node.get())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut XmlNodeData> {
        self.arena.get_mut(id).map(|node| node.get_mut())
    }

    pub fn add_root(&mut self, data: XmlNodeData) -> NodeId {
        let id = self.arena.new_node(data);
        self.root = Some(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, data: XmlNodeData) -> NodeId {
        let child = self.arena.new_node(data);
        parent.append(child, &mut self.arena);
        child
    }

    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        parent.children(&self.arena)
    }

    /// Preorder traversal of the subtree rooted at `node`, including `node`.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    /// Tag of `node` if it is an element.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.get(node).and_then(|data| data.name())
    }

    /// Direct children of `parent` that are elements with the given tag.
    pub fn elements_by_tag<'a>(
        &'a self,
        parent: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(parent).filter(move |&child_id| {
            self.get(child_id)
                .and_then(|data| data.name())
                .map(|n| n == tag)
                .unwrap_or(false)
        })
    }

    /// Every element in the subtree of `node` (preorder) with the given tag,
    /// including `node` itself if it matches.
    pub fn descendant_elements_by_tag<'a>(
        &'a self,
        node: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(node).filter(move |&id| {
            self.get(id)
                .and_then(|data| data.name())
                .map(|n| n == tag)
                .unwrap_or(false)
        })
    }

    /// Text content of an element: its first text child, if any.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.children(node)
            .find_map(|child| self.get(child).and_then(|data| data.text_content()))
    }

    /// Replace the text content of an element in place. An element with no
    /// text child is left untouched; the mutator only blanks existing text.
    pub fn set_text(&mut self, node: NodeId, value: &str) {
        let text_child = self
            .children(node)
            .find(|&child| self.get(child).map(|d| d.is_text()).unwrap_or(false));
        if let Some(child) = text_child {
            if let Some(text) = self.get_mut(child).and_then(|d| d.text_content_mut()) {
                value.clone_into(text);
            }
        }
    }

    /// Deep-copy the subtree rooted at `src` in `source` and append the copy
    /// as the last child of `parent` in this document. Returns the id of the
    /// copied root, or `None` if `src` does not belong to `source`.
    pub fn copy_subtree_from(
        &mut self,
        source: &XmlDocument,
        src: NodeId,
        parent: NodeId,
    ) -> Option<NodeId> {
        let data = source.get(src)?.clone();
        let copy = self.add_child(parent, data);
        let children: Vec<_> = source.children(src).collect();
        for child in children {
            // Children of a valid node are valid by construction.
            let _ = self.copy_subtree_from(source, child, copy);
        }
        Some(copy)
    }

    /// Structural equality of two subtrees, ignoring node identity: same
    /// node data and same ordered children throughout.
    pub fn subtree_eq(&self, a: NodeId, other: &XmlDocument, b: NodeId) -> bool {
        match (self.get(a), other.get(b)) {
            (Some(da), Some(db)) if da == db => {}
            _ => return false,
        }
        let a_children: Vec<_> = self.children(a).collect();
        let b_children: Vec<_> = other.children(b).collect();
        if a_children.len() != b_children.len() {
            return false;
        }
        a_children
            .iter()
            .zip(b_children.iter())
            .all(|(&ca, &cb)| self.subtree_eq(ca, other, cb))
    }
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}
