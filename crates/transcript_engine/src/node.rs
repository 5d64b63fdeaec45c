use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;

/// Owned, isolated copy of a message subtree. Sanitization walks this copy
/// only; the parsed source document is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsolatedNode {
    Element(IsolatedElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedElement {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<IsolatedNode>,
}

impl IsolatedElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Class attribute; missing attributes read as empty.
    pub fn class(&self) -> &str {
        self.attr("class").unwrap_or("")
    }

    pub fn class_contains(&self, needle: &str) -> bool {
        self.class().contains(needle)
    }

    /// First descendant element with the given tag, depth-first.
    pub fn find_descendant(&self, tag: &str) -> Option<&IsolatedElement> {
        for child in &self.children {
            if let IsolatedNode::Element(element) = child {
                if element.tag == tag {
                    return Some(element);
                }
                if let Some(found) = element.find_descendant(tag) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// Deep-copies a source node into an isolated tree.
pub fn isolate(element: ElementRef) -> IsolatedElement {
    let value = element.value();
    let mut copy = IsolatedElement {
        tag: value.name().to_ascii_lowercase(),
        attrs: value
            .attrs()
            .map(|(key, val)| (key.to_string(), val.to_string()))
            .collect(),
        children: Vec::new(),
    };
    for child in element.children() {
        copy_node(child, &mut copy.children);
    }
    copy
}

fn copy_node(node: NodeRef<'_, Node>, out: &mut Vec<IsolatedNode>) {
    match node.value() {
        Node::Text(text) => out.push(IsolatedNode::Text((**text).to_string())),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                out.push(IsolatedNode::Element(isolate(element)));
            }
        }
        // Comments and other node kinds carry no transcript content.
        _ => {}
    }
}

/// Raw text content of a live source node.
pub(crate) fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

/// Attribute read with empty-string default; absence never aborts a
/// heuristic.
pub(crate) fn attr_of<'a>(element: ElementRef<'a>, name: &str) -> &'a str {
    element.value().attr(name).unwrap_or("")
}

/// True when `outer` is a proper ancestor of `inner`.
pub(crate) fn contains(outer: ElementRef, inner: ElementRef) -> bool {
    inner.ancestors().any(|node| node.id() == outer.id())
}
