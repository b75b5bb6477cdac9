//! Arena document tree with deterministic serialization.

use serde::Serialize;

/// Handle to a node in a [`Document`] arena. Only meaningful together with
/// the document that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

/// One attribute, order-preserved. `value` is `None` for bare attributes
/// (`<input disabled>`), distinct from an explicit empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// Element payload: tag name exactly as written in the source, attributes in
/// source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
}

impl Element {
    /// Attribute lookup by ASCII case-insensitive name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Whitespace-separated class list, exact case.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Synthetic root; never serialized.
    Document,
    Element(Element),
    /// Raw text, entities left undecoded so serialization round-trips.
    Text(String),
    /// Comment contents without the `<!--`/`-->` delimiters.
    Comment(String),
    /// Raw contents of a `<!...>` or `<?...>` declaration.
    Doctype(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// A parsed document: flat node arena rooted at [`Document::root`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

/// Void elements per HTML5: no children, no closing tag.
pub(crate) fn is_void(name: &str) -> bool {
    name.eq_ignore_ascii_case("area")
        || name.eq_ignore_ascii_case("base")
        || name.eq_ignore_ascii_case("br")
        || name.eq_ignore_ascii_case("col")
        || name.eq_ignore_ascii_case("embed")
        || name.eq_ignore_ascii_case("hr")
        || name.eq_ignore_ascii_case("img")
        || name.eq_ignore_ascii_case("input")
        || name.eq_ignore_ascii_case("link")
        || name.eq_ignore_ascii_case("meta")
        || name.eq_ignore_ascii_case("param")
        || name.eq_ignore_ascii_case("source")
        || name.eq_ignore_ascii_case("track")
        || name.eq_ignore_ascii_case("wbr")
}

impl Document {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn push_node(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id) {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Tag name of an element node, case preserved.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    /// All element nodes in document order (pre-order depth-first).
    ///
    /// Node ids are allocated in parse order, which for a single-pass parser
    /// is exactly pre-order, so a linear arena walk suffices.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(index, node)| {
            matches!(node.data, NodeData::Element(_)).then_some(NodeId(index))
        })
    }

    /// Elements whose tag name equals `name` byte-for-byte, in document
    /// order. Case-sensitive: `<LI>` and `<li>` are distinct tag types here.
    pub fn elements_named(&self, name: &str) -> Vec<NodeId> {
        self.elements()
            .filter(|id| self.tag_name(*id) == Some(name))
            .collect()
    }

    /// Serialize one element and its descendants back into markup.
    ///
    /// Deterministic: stored tag casing and attribute order, double-quoted
    /// attribute values, raw text emitted as stored. Void elements get no
    /// closing tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Document => {
                for child in self.children(id) {
                    self.write_node(*child, out);
                }
            }
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for attr in &element.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    if let Some(value) = &attr.value {
                        out.push_str("=\"");
                        out.push_str(value);
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void(&element.name) {
                    return;
                }
                for child in self.children(id) {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            }
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            NodeData::Doctype(raw) => {
                out.push('<');
                out.push_str(raw);
                out.push('>');
            }
        }
    }
}
