//! Where a new note goes on the page, and what it says.
//!
//! A note lands to the right of the reference outline. An outline already
//! covering the anchor point is reused so notes for the same region stack up
//! in one box; otherwise a new outline is created slightly closer in.

use std::borrow::BorrowMut;

use crate::models::{Bounds, Element, Node, Point};
use crate::outline::names::OUTLINE;
use crate::outline::selection::deselect_all;
use crate::outline::{Outline, Selection};

/// Horizontal gap between a reference outline and a new note box
pub const HORIZONTAL_OFFSET: i32 = 30;

/// Glyph marking where the user continues typing
pub const PLACEHOLDER: &str = "⋯";

/// How the anchor's vertical coordinate is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    /// Top edge of the reference outline
    #[default]
    ReferenceTop,
    /// Line of the caret inside the reference outline
    Caret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOptions {
    pub horizontal_offset: i32,
    pub vertical_anchor: VerticalAnchor,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            horizontal_offset: HORIZONTAL_OFFSET,
            vertical_anchor: VerticalAnchor::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("No outline at child index {0} of the page")]
    MissingOutline(usize),
}

impl PlacementOptions {
    pub fn with_horizontal_offset(mut self, offset: i32) -> Self {
        self.horizontal_offset = offset;
        self
    }

    pub fn with_vertical_anchor(mut self, anchor: VerticalAnchor) -> Self {
        self.vertical_anchor = anchor;
        self
    }

    /// Point checked for an existing note box: two offsets right of the
    /// reference, level with its top.
    ///
    /// Page-wide notes always anchor to the reference top.
    pub fn anchor(&self, reference: Bounds, overall: bool) -> Result<Point, PlacementError> {
        if self.vertical_anchor == VerticalAnchor::Caret && !overall {
            return Err(PlacementError::NotImplemented("caret-relative note placement"));
        }
        let x = reference
            .x
            .saturating_add(reference.width)
            .saturating_add(self.horizontal_offset.saturating_mul(2));
        Ok(Point::new(x, reference.y))
    }

    /// Origin of a freshly created note box: one offset right of the reference
    fn new_box_origin(&self, reference: Bounds, anchor: Point) -> Point {
        let x = reference
            .x
            .saturating_add(reference.width)
            .saturating_add(self.horizontal_offset);
        Point::new(x, anchor.y)
    }
}

/// Destination chosen for a note
#[derive(Debug, Clone)]
pub enum NoteBox {
    /// Outline already on the page, by index in the root's child list
    Existing(usize),
    /// Positioned outline not yet attached to the page
    New(Outline<Element>),
}

/// Text of a note: its label and an optional quote prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteText<'a> {
    pub label: &'a str,
    pub quote: &'a str,
}

/// Result of placing a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the destination outline among the root's children
    pub outline_index: usize,
    pub created: bool,
    pub position: Point,
}

/// Index of the first outline directly under `root` whose box contains `point`
pub fn find_overlapping(root: &Element, point: Point) -> Option<usize> {
    let name = root.namespace().name(OUTLINE);
    root.children().iter().position(|child| match child {
        Node::Element(element) if element.name() == &name => Outline::wrap(element)
            .is_some_and(|outline| outline.overlaps_point(point.x, point.y)),
        _ => false,
    })
}

/// Pick an existing outline near `reference` or build a new one
pub fn setup_note_box(
    root: &Element,
    reference: Bounds,
    overall: bool,
    options: &PlacementOptions,
) -> Result<NoteBox, PlacementError> {
    let anchor = options.anchor(reference, overall)?;
    if let Some(index) = find_overlapping(root, anchor) {
        log::debug!("Reusing outline {index} at anchor ({}, {})", anchor.x, anchor.y);
        return Ok(NoteBox::Existing(index));
    }

    let origin = options.new_box_origin(reference, anchor);
    let mut outline = Outline::with_namespace(root.namespace());
    outline.set_position(origin.x, origin.y);
    log::debug!("Creating note outline at ({}, {})", origin.x, origin.y);
    Ok(NoteBox::New(outline))
}

/// Append the note as a new block and select its placeholder
pub fn write_note<E: BorrowMut<Element>>(outline: &mut Outline<E>, note: &NoteText) {
    let mut block = outline.add_content(format!("{}: ", note.label));
    if !note.quote.is_empty() {
        block.append_text(note.quote);
    }
    let placeholder = block.append_text(PLACEHOLDER);
    block.set_span_selection(placeholder, Selection::All);
}

/// Place a note for the outline at `reference` into the page under `root`.
///
/// Every existing selection is cleared first, so afterwards the placeholder
/// is the only selected span on the page.
pub fn place_note(
    root: &mut Element,
    reference: Bounds,
    overall: bool,
    note: &NoteText,
    options: &PlacementOptions,
) -> Result<Placement, PlacementError> {
    let note_box = setup_note_box(root, reference, overall, options)?;
    deselect_all(root);

    let (outline_index, created) = match note_box {
        NoteBox::Existing(index) => (index, false),
        NoteBox::New(outline) => {
            root.add_child(outline.into_element());
            (root.children().len() - 1, true)
        }
    };

    let element = root
        .element_at_mut(outline_index)
        .ok_or(PlacementError::MissingOutline(outline_index))?;
    let mut outline =
        Outline::wrap(element).ok_or(PlacementError::MissingOutline(outline_index))?;
    write_note(&mut outline, note);

    Ok(Placement {
        outline_index,
        created,
        position: outline.position(),
    })
}
