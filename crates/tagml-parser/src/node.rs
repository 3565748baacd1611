//! The parsed node tree.
//!
//! Nodes live in a [`Document`] arena: each node owns its place in one
//! flat `Vec`, children and parents are [`NodeId`] indices, and ownership
//! is strictly top-down (the parent link is navigation only, never a
//! lifetime). [`NodeRef`] is the cheap read handle handed to callers once
//! parsing has finished.
//!
//! Type-name and property-name lookups are case-insensitive linear scans;
//! documents are small configuration files, so no index is kept. Storage
//! preserves the original case and document order.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// One attribute of a node: an immutable name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Arena storage for one node.
#[derive(Debug)]
struct NodeData {
    type_name: String,
    parent: Option<NodeId>,
    properties: Vec<Property>,
    children: Vec<NodeId>,
    loose_inner: String,
}

/// A parsed document: a synthetic root node owning the whole tree.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Reserved type name of the synthetic root node.
    pub const ROOT_TYPE: &'static str = "~ROOT";

    /// A document containing only the root node.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                type_name: Self::ROOT_TYPE.to_string(),
                parent: None,
                properties: Vec::new(),
                children: Vec::new(),
                loose_inner: String::new(),
            }],
        }
    }

    /// The root node; every parsed node is reachable from here.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: NodeId(0),
        }
    }

    /// Read handle for an arbitrary node.
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    pub(crate) fn type_name(&self, id: NodeId) -> &str {
        &self.data(id).type_name
    }

    /// Allocate a node under `parent` and attach it as the last child.
    pub(crate) fn add_child(&mut self, parent: NodeId, type_name: String) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            type_name,
            parent: Some(parent),
            properties: Vec::new(),
            children: Vec::new(),
            loose_inner: String::new(),
        });
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    pub(crate) fn add_property(&mut self, id: NodeId, property: Property) {
        self.nodes[id.0 as usize].properties.push(property);
    }

    pub(crate) fn append_loose_inner(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0 as usize].loose_inner.push_str(text);
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }
}

/// A read-only handle to one node of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The type (tag name) of this node, original case preserved.
    /// Not a unique identifier.
    pub fn type_name(&self) -> &'a str {
        &self.doc.data(self.id).type_name
    }

    /// Case-insensitive type check.
    pub fn is_type(&self, type_name: &str) -> bool {
        self.type_name().eq_ignore_ascii_case(type_name)
    }

    /// The node this one was nested in; `None` only for the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc.data(self.id).parent.map(|id| self.doc.get(id))
    }

    /// All properties, in document order.
    pub fn properties(&self) -> &'a [Property] {
        &self.doc.data(self.id).properties
    }

    /// First property with a case-insensitively matching name.
    pub fn property(&self, name: &str) -> Option<&'a Property> {
        self.properties()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// All children, in document order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        doc.data(self.id).children.iter().map(move |id| doc.get(*id))
    }

    /// Children whose type case-insensitively matches, in document order.
    pub fn children_of_type(&self, type_name: &str) -> Vec<NodeRef<'a>> {
        self.children().filter(|c| c.is_type(type_name)).collect()
    }

    /// First child whose type case-insensitively matches.
    pub fn child_of_type(&self, type_name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.is_type(type_name))
    }

    /// All text that appeared directly inside this node (not inside any
    /// nested tag), concatenated in document order.
    pub fn loose_inner(&self) -> &'a str {
        &self.doc.data(self.id).loose_inner
    }

    /// Printable tree dump: one line per node, children indented by four
    /// more spaces than their parent.
    pub fn tree_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.collect_tree_lines(&mut lines, 0);
        lines
    }

    fn collect_tree_lines(&self, lines: &mut Vec<String>, depth: usize) {
        lines.push(format!("{}{}", "    ".repeat(depth), self));
        for child in self.children() {
            child.collect_tree_lines(lines, depth + 1);
        }
    }
}

/// Single-line rendering: an open tag with its properties, the loose
/// inner text, and a matching close tag.
impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.type_name())?;
        for property in self.properties() {
            write!(f, " {}=\"{}\"", property.name, property.value)?;
        }
        write!(f, ">{}</{}>", self.loose_inner(), self.type_name())
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({:?}, {})", self.id, self)
    }
}

/// Recursive `{type, properties, inner, children}` object, for
/// machine-readable output.
impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children: Vec<NodeRef<'_>> = self.children().collect();

        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("type", self.type_name())?;
        state.serialize_field("properties", self.properties())?;
        state.serialize_field("inner", self.loose_inner())?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A small hand-built tree:
    /// root -> Config(depth=3) -> Entry(path=/tmp), Entry(path=/var)
    fn sample() -> Document {
        let mut doc = Document::new();
        let root = doc.root().id();

        let config = doc.add_child(root, "Config".to_string());
        doc.add_property(config, Property::new("depth", "3"));

        let first = doc.add_child(config, "Entry".to_string());
        doc.add_property(first, Property::new("path", "/tmp"));

        let second = doc.add_child(config, "Entry".to_string());
        doc.add_property(second, Property::new("path", "/var"));

        doc.append_loose_inner(config, "hello");
        doc.append_loose_inner(config, " world");

        doc
    }

    // =========================================================================
    // Types and lookups
    // =========================================================================

    #[test]
    fn test_root_type() {
        let doc = Document::new();
        assert_eq!(doc.root().type_name(), Document::ROOT_TYPE);
        assert!(doc.root().is_type("~root"));
        assert!(doc.root().parent().is_none());
    }

    #[test]
    fn test_is_type_case_insensitive() {
        let doc = sample();
        let config = doc.root().child_of_type("CONFIG").unwrap();
        assert!(config.is_type("config"));
        assert!(config.is_type("Config"));
        assert!(!config.is_type("configs"));
    }

    #[test]
    fn test_property_lookup_case_insensitive() {
        let doc = sample();
        let config = doc.root().child_of_type("config").unwrap();
        assert_eq!(config.property("DEPTH").unwrap().value, "3");
        assert!(config.property("width").is_none());
    }

    #[test]
    fn test_property_lookup_first_match() {
        let mut doc = Document::new();
        let root = doc.root().id();
        let node = doc.add_child(root, "a".to_string());
        doc.add_property(node, Property::new("Key", "first"));
        doc.add_property(node, Property::new("key", "second"));

        assert_eq!(doc.get(node).property("KEY").unwrap().value, "first");
    }

    #[test]
    fn test_properties_preserve_order_and_case() {
        let doc = sample();
        let config = doc.root().child_of_type("config").unwrap();
        let names: Vec<&str> = config.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["depth"]);
        assert_eq!(config.type_name(), "Config");
    }

    // =========================================================================
    // Children and parents
    // =========================================================================

    #[test]
    fn test_children_in_document_order() {
        let doc = sample();
        let config = doc.root().child_of_type("config").unwrap();
        let paths: Vec<&str> = config
            .children()
            .map(|c| c.property("path").unwrap().value.as_str())
            .collect();
        assert_eq!(paths, vec!["/tmp", "/var"]);
    }

    #[test]
    fn test_children_of_type() {
        let doc = sample();
        let config = doc.root().child_of_type("config").unwrap();
        assert_eq!(config.children_of_type("ENTRY").len(), 2);
        assert_eq!(config.children_of_type("other").len(), 0);
    }

    #[test]
    fn test_child_of_type_first_match() {
        let doc = sample();
        let config = doc.root().child_of_type("config").unwrap();
        let entry = config.child_of_type("entry").unwrap();
        assert_eq!(entry.property("path").unwrap().value, "/tmp");
    }

    #[test]
    fn test_parent_link() {
        let doc = sample();
        let config = doc.root().child_of_type("config").unwrap();
        let entry = config.child_of_type("entry").unwrap();
        assert!(entry.parent().unwrap().is_type("config"));
        assert!(config.parent().unwrap().is_type(Document::ROOT_TYPE));
    }

    // =========================================================================
    // Loose inner text
    // =========================================================================

    #[test]
    fn test_loose_inner_appends_in_order() {
        let doc = sample();
        let config = doc.root().child_of_type("config").unwrap();
        assert_eq!(config.loose_inner(), "hello world");
    }

    #[test]
    fn test_loose_inner_empty_by_default() {
        let doc = sample();
        let entry = doc.root().child_of_type("config").unwrap().child_of_type("entry").unwrap();
        assert_eq!(entry.loose_inner(), "");
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn test_display_rendering() {
        let doc = sample();
        let entry = doc.root().child_of_type("config").unwrap().child_of_type("entry").unwrap();
        assert_eq!(entry.to_string(), "<Entry path=\"/tmp\"></Entry>");
    }

    #[test]
    fn test_tree_lines_indent_accumulates() {
        let doc = sample();
        let lines = doc.root().tree_lines();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("<~ROOT>"));
        assert!(lines[1].starts_with("    <Config"));
        assert!(lines[2].starts_with("        <Entry path=\"/tmp\""));
        assert!(lines[3].starts_with("        <Entry path=\"/var\""));
    }

    #[test]
    fn test_serialize_to_json() {
        let doc = sample();
        let value = serde_json::to_value(doc.root()).unwrap();

        assert_eq!(value["type"], "~ROOT");
        assert_eq!(value["children"][0]["type"], "Config");
        assert_eq!(value["children"][0]["properties"][0]["name"], "depth");
        assert_eq!(value["children"][0]["inner"], "hello world");
        assert_eq!(value["children"][0]["children"][1]["properties"][0]["value"], "/var");
    }
}
