//! Adding notes to a page.
//!
//! [`AddNoteCommand`] ties the pieces together: it opens a page session,
//! checks that an outline is selected, quotes the selection, places the note
//! with [`place_note`] and commits the page.

pub mod commands;
pub mod note_type;
pub mod notifier;
pub mod placement;
pub mod quote;

pub use commands::{AddNoteCommand, CommandError, NoteOutcome};
pub use note_type::{NoteType, NoteTypeInfo, UnknownNoteType};
pub use notifier::{LogNotifier, Notifier, RecordingNotifier};
pub use placement::{
    HORIZONTAL_OFFSET, NoteBox, NoteText, PLACEHOLDER, Placement, PlacementError, PlacementOptions,
    VerticalAnchor, find_overlapping, place_note, setup_note_box,
};
pub use quote::{quote_selection, quote_text};
