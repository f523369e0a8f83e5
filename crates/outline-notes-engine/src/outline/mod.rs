/*!
 * # Outline model
 *
 * Typed views over the generic page tree. An **Outline** is a positioned,
 * sized content region directly under the page root:
 *
 * ```text
 * Outline
 * ├── Size       width="…" height="…"   (optional, always first when created)
 * ├── Position   x="…" y="…"            (optional, always first when created)
 * └── OEChildren
 *     └── OE     one block per paragraph, in reading order
 *         └── T  text span, may carry selected="all|partial|none"
 * ```
 *
 * Views hold a `Borrow<Element>` (or `BorrowMut<Element>`): the same type
 * serves an owned, freshly built outline (`Outline<Element>`), a read-only
 * view into a document (`Outline<&Element>`) and a mutating one
 * (`Outline<&mut Element>`). Element names created through a view share the
 * namespace of the element it wraps.
 */

pub mod children;
pub mod names;
pub mod paragraph;
pub mod selection;

use std::borrow::{Borrow, BorrowMut};

use crate::models::geometry::{format_coordinate, truncate_coordinate};
use crate::models::{Bounds, Element, Namespace, NamespaceNotSet, Point, Size, page_namespace};

pub use children::{Content, OeChildren};
pub use paragraph::{Paragraph, Selection};

use names::{HEIGHT, OE, OE_CHILDREN, OUTLINE, POSITION, SIZE, T, WIDTH, X, Y};

#[derive(Debug, Clone)]
pub struct Outline<E> {
    element: E,
}

impl Outline<Element> {
    /// A new empty outline in the current page namespace.
    ///
    /// Fails when [`page_namespace::set`] has not been called on this thread.
    pub fn new() -> Result<Self, NamespaceNotSet> {
        Ok(Self::with_namespace(&page_namespace::current()?))
    }

    /// A new empty outline in `namespace`, holding an empty `OEChildren`
    pub fn with_namespace(namespace: &Namespace) -> Self {
        let element = Element::new(namespace.name(OUTLINE))
            .with_child(OeChildren::new(namespace).into_element());
        Self { element }
    }

    /// A new outline built from existing content.
    ///
    /// An `Outline` element donates its children; an `OEChildren` element
    /// becomes the container; anything else is added as a new block.
    pub fn from_content(namespace: &Namespace, mut content: Element) -> Self {
        let kind = content.local_name().to_string();
        match kind.as_str() {
            OUTLINE => {
                let mut outline = Self {
                    element: Element::new(namespace.name(OUTLINE)),
                };
                for child in content.children_mut().drain(..) {
                    outline.element.add_child(child);
                }
                outline.container_mut();
                outline
            }
            OE_CHILDREN => Self {
                element: Element::new(namespace.name(OUTLINE)).with_child(content),
            },
            OE => {
                let mut outline = Self::with_namespace(namespace);
                outline.container_mut().add_child(content);
                outline
            }
            _ => {
                let mut outline = Self::with_namespace(namespace);
                outline.add_content(content);
                outline
            }
        }
    }

    pub fn into_element(self) -> Element {
        self.element
    }
}

impl<E: Borrow<Element>> Outline<E> {
    /// Wrap an existing `Outline` element
    pub fn wrap(element: E) -> Option<Self> {
        let inner: &Element = element.borrow();
        (inner.local_name() == OUTLINE).then_some(Self { element })
    }

    pub fn element(&self) -> &Element {
        self.element.borrow()
    }

    pub fn namespace(&self) -> &Namespace {
        self.element().namespace()
    }

    /// Detach a copy of this outline from the document it views
    pub fn cloned(&self) -> Outline<Element> {
        Outline {
            element: self.element().clone(),
        }
    }

    fn metadata(&self, local: &str) -> Option<&Element> {
        self.element().element(&self.namespace().name(local))
    }

    fn coordinate(&self, metadata: &str, attribute: &str) -> i32 {
        self.metadata(metadata)
            .and_then(|element| element.decimal_attribute(attribute))
            .map(truncate_coordinate)
            .unwrap_or(0)
    }

    pub fn position_x(&self) -> i32 {
        self.coordinate(POSITION, X)
    }

    pub fn position_y(&self) -> i32 {
        self.coordinate(POSITION, Y)
    }

    pub fn position(&self) -> Point {
        Point::new(self.position_x(), self.position_y())
    }

    pub fn width(&self) -> i32 {
        self.coordinate(SIZE, WIDTH)
    }

    pub fn height(&self) -> i32 {
        self.coordinate(SIZE, HEIGHT)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn positional_data(&self) -> Bounds {
        Bounds::from_parts(self.position(), self.size())
    }

    /// Whether `(x, y)` lies inside this outline's box, edges included
    pub fn overlaps_point(&self, x: i32, y: i32) -> bool {
        overlap_point(self, x, y)
    }

    pub fn overlaps<F: Borrow<Element>>(&self, other: &Outline<F>) -> bool {
        overlap(self, other)
    }

    /// Region-level selection marker on the outline element itself
    pub fn is_selected(&self) -> bool {
        paragraph::is_selected(self.element())
    }

    pub fn content(&self) -> Option<OeChildren<&Element>> {
        self.metadata(OE_CHILDREN).and_then(OeChildren::wrap)
    }

    /// Every `T` span under this outline whose `selected` attribute is not `none`
    pub fn selected_text_nodes(&self) -> Vec<&Element> {
        let name = self.namespace().name(T);
        self.element()
            .descendants()
            .filter(|element| element.name() == &name && paragraph::is_selected(element))
            .collect()
    }

    /// Text of the selected spans in document order, one span per line
    pub fn selected_text(&self) -> String {
        self.selected_text_nodes()
            .iter()
            .map(|element| element.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<E: BorrowMut<Element>> Outline<E> {
    fn element_mut(&mut self) -> &mut Element {
        self.element.borrow_mut()
    }

    /// Create or update `Position`. Both coordinates are always written.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let position = self.metadata_mut(POSITION);
        position.set_attribute(X, format_coordinate(x));
        position.set_attribute(Y, format_coordinate(y));
    }

    /// Create or update `Size`.
    ///
    /// `width` is always written. `height` is written only when positive; a
    /// zero height leaves any existing value alone.
    pub fn set_size(&mut self, width: i32, height: i32) {
        let size = self.metadata_mut(SIZE);
        size.set_attribute(WIDTH, format_coordinate(width));
        if height > 0 {
            size.set_attribute(HEIGHT, format_coordinate(height));
        }
    }

    /// Metadata child `local`, inserted ahead of all content when missing
    fn metadata_mut(&mut self, local: &str) -> &mut Element {
        let name = self.namespace().name(local);
        let element = self.element_mut();
        if element.element(&name).is_none() {
            element.add_first(Element::new(name.clone()));
        }
        element
            .element_mut(&name)
            .unwrap_or_else(|| unreachable!("{local} was just inserted"))
    }

    pub fn set_positional_data(&mut self, bounds: Bounds) {
        self.set_position(bounds.x, bounds.y);
        self.set_size(bounds.width, bounds.height);
    }

    /// The content container, created at the end if the outline lacks one
    pub fn content_mut(&mut self) -> OeChildren<&mut Element> {
        OeChildren::wrap_unchecked(self.container_mut())
    }

    fn container_mut(&mut self) -> &mut Element {
        let name = self.namespace().name(OE_CHILDREN);
        self.element_mut()
            .element_or_insert_with(&name, || Element::new(name.clone()))
    }

    /// Append a new block holding `content` to the end of the outline
    pub fn add_content(&mut self, content: impl Into<Content>) -> Paragraph<&mut Element> {
        let block = Paragraph::from_content(self.namespace(), content);
        Paragraph::wrap_unchecked(self.container_mut().push_element(block.into_element()))
    }
}

/// Point-in-box test: closed interval on both axes
pub fn overlap_point<E: Borrow<Element>>(outline: &Outline<E>, x: i32, y: i32) -> bool {
    outline.positional_data().contains(x, y)
}

/// Corner-point overlap between two outlines.
///
/// True when either outline's position lies inside the other's box. Boxes
/// that cross without a corner inside the other are not reported.
pub fn overlap<A: Borrow<Element>, B: Borrow<Element>>(a: &Outline<A>, b: &Outline<B>) -> bool {
    a.positional_data().corners_overlap(&b.positional_data())
}
