use std::fmt;

/// Namespace URI qualifying element names in a page document.
///
/// The empty URI stands for "no namespace".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The unqualified namespace
    pub fn none() -> Self {
        Self::default()
    }

    pub fn uri(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a qualified name in this namespace
    pub fn name(&self, local: &str) -> QName {
        QName::new(self.clone(), local)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Namespace-qualified tag identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    namespace: Namespace,
    local: String,
}

impl QName {
    pub fn new(namespace: Namespace, local: impl Into<String>) -> Self {
        Self {
            namespace,
            local: local.into(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_none() {
            f.write_str(&self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}

/// A single attribute. Keys are kept exactly as written, prefix included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// A child of an element: either a nested element or a run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// Generic element node: tag identity, ordered attributes and ordered children.
///
/// This is the owning tree. Typed views such as [`crate::Outline`] borrow an
/// `Element` and never own one beyond construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: QName,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.add_child(child);
        self
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn namespace(&self) -> &Namespace {
        self.name.namespace()
    }

    pub fn local_name(&self) -> &str {
        self.name.local_name()
    }

    /// Check tag identity against a namespace and local name
    pub fn is(&self, namespace: &Namespace, local: &str) -> bool {
        self.name.namespace() == namespace && self.name.local_name() == local
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.key == key)
            .map(|attribute| attribute.value.as_str())
    }

    /// Set an attribute, replacing an existing value in place or appending a new one
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|attribute| attribute.key == key) {
            Some(attribute) => attribute.value = value,
            None => self.attributes.push(Attribute {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|attribute| attribute.key == key)?;
        Some(self.attributes.remove(index).value)
    }

    /// Read an attribute as a decimal number.
    ///
    /// Any precision is accepted; missing, unparsable and non-finite values yield `None`.
    pub fn decimal_attribute(&self, key: &str) -> Option<f64> {
        self.attribute(key).and_then(parse_decimal)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Direct child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements with the given name
    pub fn elements_named<'a>(&'a self, name: &'a QName) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name() == name)
    }

    /// The `index`-th direct child element with the given name
    pub fn nth_element_named_mut(&mut self, name: &QName, index: usize) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(|child| match child {
                Node::Element(element) if element.name() == name => Some(element),
                _ => None,
            })
            .nth(index)
    }

    /// First direct child element with the given name
    pub fn element(&self, name: &QName) -> Option<&Element> {
        self.elements().find(|element| element.name() == name)
    }

    pub fn element_mut(&mut self, name: &QName) -> Option<&mut Element> {
        self.nth_element_named_mut(name, 0)
    }

    /// The element stored at `index` in the child list, if that child is an element
    pub fn element_at_mut(&mut self, index: usize) -> Option<&mut Element> {
        match self.children.get_mut(index) {
            Some(Node::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Insert a child ahead of every existing child
    pub fn add_first(&mut self, child: impl Into<Node>) {
        self.children.insert(0, child.into());
    }

    /// Append an element and hand back a reference to it in its new home
    pub fn push_element(&mut self, element: Element) -> &mut Element {
        self.children.push(Node::Element(element));
        self.element_at_index(self.children.len() - 1)
    }

    /// First direct child element named `name`, appending one built by `create` if absent
    pub fn element_or_insert_with(
        &mut self,
        name: &QName,
        create: impl FnOnce() -> Element,
    ) -> &mut Element {
        let existing = self.children.iter().position(|child| match child {
            Node::Element(element) => element.name() == name,
            Node::Text(_) => false,
        });
        match existing {
            Some(index) => self.element_at_index(index),
            None => self.push_element(create()),
        }
    }

    fn element_at_index(&mut self, index: usize) -> &mut Element {
        match &mut self.children[index] {
            Node::Element(element) => element,
            Node::Text(_) => unreachable!("child {index} is known to be an element"),
        }
    }

    /// All descendant elements in document order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Visit `self` and every descendant element mutably, parents before children
    pub fn visit_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.visit_mut(visit);
            }
        }
    }

    /// Concatenated text of every descendant text node
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Pre-order iterator over descendant elements
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        while let Some(children) = self.stack.last_mut() {
            match children.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(Node::Text(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Tolerant decimal parse used for layout attributes
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
