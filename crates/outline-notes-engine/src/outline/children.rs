use std::borrow::{Borrow, BorrowMut};

use crate::models::{Element, Namespace};
use crate::outline::names::{OE, OE_CHILDREN};
use crate::outline::paragraph::Paragraph;

/// Content to place in a block: plain text or a prebuilt element
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Element(Element),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Content::Element(element)
    }
}

/// View over an `OEChildren` element: the ordered blocks of an outline.
///
/// Blocks are appended at the end or amended in place by index; order is
/// reading order.
#[derive(Debug, Clone)]
pub struct OeChildren<E> {
    element: E,
}

impl OeChildren<Element> {
    pub fn new(namespace: &Namespace) -> Self {
        Self {
            element: Element::new(namespace.name(OE_CHILDREN)),
        }
    }

    pub fn into_element(self) -> Element {
        self.element
    }
}

impl<E: Borrow<Element>> OeChildren<E> {
    pub fn wrap(element: E) -> Option<Self> {
        let inner: &Element = element.borrow();
        (inner.local_name() == OE_CHILDREN).then_some(Self { element })
    }

    pub(crate) fn wrap_unchecked(element: E) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        self.element.borrow()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<&Element>> {
        let name = self.element().namespace().name(OE);
        self.element()
            .elements()
            .filter(move |element| element.name() == &name)
            .map(Paragraph::wrap_unchecked)
    }

    pub fn len(&self) -> usize {
        self.paragraphs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: BorrowMut<Element>> OeChildren<E> {
    fn element_mut(&mut self) -> &mut Element {
        self.element.borrow_mut()
    }

    /// Append `content` as a new block at the end
    pub fn append(&mut self, content: impl Into<Content>) -> Paragraph<&mut Element> {
        let block = Paragraph::from_content(self.element().namespace(), content);
        Paragraph::wrap_unchecked(self.element_mut().push_element(block.into_element()))
    }

    pub fn paragraph_mut(&mut self, index: usize) -> Option<Paragraph<&mut Element>> {
        let name = self.element().namespace().name(OE);
        self.element_mut()
            .nth_element_named_mut(&name, index)
            .map(Paragraph::wrap_unchecked)
    }

    /// Add `content` to the existing block at `index`.
    ///
    /// Text becomes a new span; elements are appended as-is. Returns `None`
    /// when there is no block at that index.
    pub fn amend(
        &mut self,
        index: usize,
        content: impl Into<Content>,
    ) -> Option<Paragraph<&mut Element>> {
        let mut paragraph = self.paragraph_mut(index)?;
        match content.into() {
            Content::Text(text) => {
                paragraph.append_text(text);
            }
            Content::Element(element) => paragraph.append_element(element),
        }
        Some(paragraph)
    }

    /// Append when `index` is `None`, otherwise amend the block at `index`
    pub fn add_content(
        &mut self,
        content: impl Into<Content>,
        index: Option<usize>,
    ) -> Option<Paragraph<&mut Element>> {
        match index {
            None => Some(self.append(content)),
            Some(index) => self.amend(index, content),
        }
    }
}
