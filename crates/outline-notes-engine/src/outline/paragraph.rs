use std::borrow::{Borrow, BorrowMut};

use crate::models::{Element, Namespace};
use crate::outline::children::Content;
use crate::outline::names::{OE, SELECTED, T};

/// Selection state written to the `selected` attribute of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    Partial,
    Unselected,
}

impl Selection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::All => "all",
            Selection::Partial => "partial",
            Selection::Unselected => "none",
        }
    }

    /// Interpret a `selected` attribute value. Unknown values count as partial.
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "all" => Selection::All,
            "none" => Selection::Unselected,
            _ => Selection::Partial,
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, Selection::Unselected)
    }
}

/// Whether an element carries a `selected` attribute other than `none`
pub fn is_selected(element: &Element) -> bool {
    element
        .attribute(SELECTED)
        .is_some_and(|value| Selection::from_attribute(value).is_selected())
}

/// View over an `OE` element: one block of content inside an outline
#[derive(Debug, Clone)]
pub struct Paragraph<E> {
    element: E,
}

impl Paragraph<Element> {
    /// A new block holding a single text span
    pub fn new(namespace: &Namespace, text: impl Into<String>) -> Self {
        let span = Element::new(namespace.name(T)).with_child(text.into());
        Self::with_content(namespace, span)
    }

    /// A new block holding arbitrary structured content
    pub fn with_content(namespace: &Namespace, content: Element) -> Self {
        Self {
            element: Element::new(namespace.name(OE)).with_child(content),
        }
    }

    /// A new block for text or structured content
    pub fn from_content(namespace: &Namespace, content: impl Into<Content>) -> Self {
        match content.into() {
            Content::Text(text) => Self::new(namespace, text),
            Content::Element(element) => Self::with_content(namespace, element),
        }
    }

    pub fn into_element(self) -> Element {
        self.element
    }
}

impl<E: Borrow<Element>> Paragraph<E> {
    /// Wrap an existing `OE` element
    pub fn wrap(element: E) -> Option<Self> {
        let inner: &Element = element.borrow();
        (inner.local_name() == OE).then_some(Self { element })
    }

    pub(crate) fn wrap_unchecked(element: E) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        self.element.borrow()
    }

    /// The `T` spans of this block, in order
    pub fn spans(&self) -> impl Iterator<Item = &Element> {
        let name = self.element().namespace().name(T);
        self.element()
            .elements()
            .filter(move |element| element.name() == &name)
    }

    pub fn text(&self) -> String {
        self.element().text()
    }
}

impl<E: BorrowMut<Element>> Paragraph<E> {
    fn element_mut(&mut self) -> &mut Element {
        self.element.borrow_mut()
    }

    /// Append a text span, returning its index among the block's spans
    pub fn append_text(&mut self, text: impl Into<String>) -> usize {
        let index = self.spans().count();
        let name = self.element().namespace().name(T);
        self.element_mut()
            .add_child(Element::new(name).with_child(text.into()));
        index
    }

    pub fn append_element(&mut self, content: Element) {
        self.element_mut().add_child(content);
    }

    /// Mark the span at `index` with a selection state.
    ///
    /// Returns false when there is no span at that index.
    pub fn set_span_selection(&mut self, index: usize, selection: Selection) -> bool {
        let name = self.element().namespace().name(T);
        match self.element_mut().nth_element_named_mut(&name, index) {
            Some(span) => {
                span.set_attribute(SELECTED, selection.as_str());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ns() -> Namespace {
        Namespace::new("urn:one")
    }

    #[test]
    fn test_new_paragraph_holds_one_span() {
        let paragraph = Paragraph::new(&ns(), "Sidenote: ");

        assert_eq!(paragraph.element().name(), &ns().name(OE));
        assert_eq!(paragraph.spans().count(), 1);
        assert_eq!(paragraph.text(), "Sidenote: ");
    }

    #[test]
    fn test_append_text_returns_span_index() {
        let mut paragraph = Paragraph::new(&ns(), "first");

        assert_eq!(paragraph.append_text("second"), 1);
        assert_eq!(paragraph.append_text("third"), 2);
        assert_eq!(paragraph.text(), "firstsecondthird");
    }

    #[test]
    fn test_set_span_selection() {
        let mut paragraph = Paragraph::new(&ns(), "first");
        let index = paragraph.append_text("⋯");

        assert!(paragraph.set_span_selection(index, Selection::All));
        assert!(!paragraph.set_span_selection(5, Selection::All));

        let selected: Vec<Option<&str>> = paragraph
            .spans()
            .map(|span| span.attribute(SELECTED))
            .collect();
        assert_eq!(selected, vec![None, Some("all")]);
    }

    #[test]
    fn test_wrap_rejects_other_elements() {
        let element = Element::new(ns().name("T"));
        assert!(Paragraph::wrap(&element).is_none());

        let element = Element::new(ns().name(OE));
        assert!(Paragraph::wrap(&element).is_some());
    }

    #[test]
    fn test_selection_attribute_values() {
        assert_eq!(Selection::from_attribute("all"), Selection::All);
        assert_eq!(Selection::from_attribute("none"), Selection::Unselected);
        assert_eq!(Selection::from_attribute("partial"), Selection::Partial);
        assert!(!Selection::Unselected.is_selected());
        assert_eq!(Selection::Unselected.as_str(), "none");
    }
}
