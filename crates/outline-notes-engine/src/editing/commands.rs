use crate::editing::placement::{NoteText, Placement, PlacementError, PlacementOptions, place_note};
use crate::editing::quote::quote_selection;
use crate::editing::{NoteType, Notifier};
use crate::io::{ConnectionError, PageConnection, PageSession};
use crate::models::page_namespace;
use crate::outline::selection::find_selected_outline;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Could not open page: {0}")]
    Open(#[source] ConnectionError),
    #[error("{0}")]
    Precondition(String),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("Could not place note: {0}")]
    Placement(#[from] PlacementError),
    #[error("Could not save page: {0}")]
    Commit(#[source] ConnectionError),
}

pub const NOT_A_PAGE: &str = "Notes can only be added to a page";
pub const NOTHING_SELECTED: &str = "Select some text in an outline first";

/// What an add-note run changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOutcome {
    pub note_type: NoteType,
    pub placement: Placement,
    pub quoted: bool,
}

/// Adds a labelled note next to the selected outline and commits the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddNoteCommand {
    options: PlacementOptions,
    quote: bool,
}

impl Default for AddNoteCommand {
    fn default() -> Self {
        Self {
            options: PlacementOptions::default(),
            quote: true,
        }
    }
}

impl AddNoteCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: PlacementOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether to prefix the note with the selected text
    pub fn with_quote(mut self, quote: bool) -> Self {
        self.quote = quote;
        self
    }

    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    /// Run the command against one page.
    ///
    /// Nothing is committed unless the note was placed. The connection is
    /// released on every path.
    pub fn execute<C: PageConnection + ?Sized>(
        &self,
        connection: &mut C,
        note_type: NoteType,
        notifier: &mut dyn Notifier,
    ) -> Result<NoteOutcome, CommandError> {
        let result = self.run(connection, note_type, notifier);
        if let Err(err) = &result {
            log::error!("Failed to add {note_type}: {err}");
        }
        result
    }

    fn run<C: PageConnection + ?Sized>(
        &self,
        connection: &mut C,
        note_type: NoteType,
        notifier: &mut dyn Notifier,
    ) -> Result<NoteOutcome, CommandError> {
        let mut session = PageSession::open(connection).map_err(|err| {
            notifier.display(&format!("Could not open page: {err}"));
            CommandError::Open(err)
        })?;

        if !session.document().is_page() {
            notifier.display(NOT_A_PAGE);
            return Err(CommandError::Precondition(NOT_A_PAGE.to_string()));
        }
        page_namespace::set(session.document().namespace().clone());

        let Some(reference) = find_selected_outline(session.document().root()) else {
            notifier.display(NOTHING_SELECTED);
            return Err(CommandError::Precondition(NOTHING_SELECTED.to_string()));
        };

        if note_type == NoteType::InLineAdditionNote {
            log::info!("In-line addition notes are not supported yet");
            return Err(CommandError::NotImplemented("in-line addition notes"));
        }

        let info = note_type.info();
        let bounds = reference.positional_data();
        let quote = if self.quote {
            quote_selection(Some(&reference), notifier)
        } else {
            String::new()
        };

        let note = NoteText {
            label: info.label,
            quote: &quote,
        };
        let placement = place_note(
            session.document_mut().root_mut(),
            bounds,
            info.overall,
            &note,
            &self.options,
        )?;

        session.commit().map_err(|err| {
            notifier.display(&format!("Could not save page: {err}"));
            CommandError::Commit(err)
        })?;

        let quoted = !quote.is_empty();
        log::info!(
            "Added {} {} quoting.",
            info.label,
            if quoted { "with" } else { "without" }
        );
        Ok(NoteOutcome {
            note_type,
            placement,
            quoted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::RecordingNotifier;
    use crate::editing::placement::{PLACEHOLDER, VerticalAnchor};
    use crate::editing::quote::QUOTE_WITHOUT_SELECTION;
    use crate::io::MemoryPageConnection;
    use crate::models::Point;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const PAGE: &str = r#"<one:Page xmlns:one="urn:one">
  <one:Outline selected="partial">
    <one:Position x="100.0" y="50.0"/>
    <one:Size width="200.0" height="40.0"/>
    <one:OEChildren><one:OE><one:T selected="all">quoted words</one:T></one:OE></one:OEChildren>
  </one:Outline>
</one:Page>"#;

    fn note_text(connection: &MemoryPageConnection) -> String {
        let document = connection.document().unwrap();
        let outline = document
            .root()
            .elements()
            .last()
            .and_then(crate::outline::Outline::wrap)
            .unwrap();
        outline
            .content()
            .unwrap()
            .paragraphs()
            .last()
            .unwrap()
            .text()
    }

    #[rstest]
    #[case(NoteType::Sidenote, "Sidenote: ")]
    #[case(NoteType::EditingNote, "Editing note: ")]
    #[case(NoteType::OverallEditingNote, "OVERALL EDITING NOTE: ")]
    #[case(NoteType::AdditionNote, "Add note: ")]
    fn test_add_note_with_quote(#[case] note_type: NoteType, #[case] label: &str) {
        let mut connection = MemoryPageConnection::new(PAGE);
        let mut notifier = RecordingNotifier::new();

        let outcome = AddNoteCommand::new()
            .execute(&mut connection, note_type, &mut notifier)
            .unwrap();

        assert!(outcome.quoted);
        assert!(outcome.placement.created);
        assert_eq!(outcome.placement.position, Point::new(330, 50));
        assert_eq!(
            note_text(&connection),
            format!("{label}\"quoted words\" -> {PLACEHOLDER}")
        );
        assert!(notifier.is_empty());
        assert_eq!(connection.commits(), 1);
        assert_eq!(connection.releases(), 1);
    }

    #[test]
    fn test_add_note_without_quote() {
        let mut connection = MemoryPageConnection::new(PAGE);
        let mut notifier = RecordingNotifier::new();

        let outcome = AddNoteCommand::new()
            .with_quote(false)
            .execute(&mut connection, NoteType::Sidenote, &mut notifier)
            .unwrap();

        assert!(!outcome.quoted);
        assert_eq!(note_text(&connection), format!("Sidenote: {PLACEHOLDER}"));
    }

    #[test]
    fn test_empty_selection_still_adds_note() {
        let page = PAGE.replace(r#"<one:T selected="all">"#, "<one:T>");
        let mut connection = MemoryPageConnection::new(page);
        let mut notifier = RecordingNotifier::new();

        let outcome = AddNoteCommand::new()
            .execute(&mut connection, NoteType::Sidenote, &mut notifier)
            .unwrap();

        assert!(!outcome.quoted);
        assert_eq!(notifier.messages(), [QUOTE_WITHOUT_SELECTION]);
        assert_eq!(connection.commits(), 1);
    }

    #[test]
    fn test_no_selected_outline_aborts_without_commit() {
        let page = PAGE.replace(r#" selected="partial""#, "");
        let mut connection = MemoryPageConnection::new(page);
        let mut notifier = RecordingNotifier::new();

        let result = AddNoteCommand::new().execute(&mut connection, NoteType::Sidenote, &mut notifier);

        assert!(matches!(result, Err(CommandError::Precondition(_))));
        assert_eq!(notifier.messages(), [NOTHING_SELECTED]);
        assert_eq!(connection.commits(), 0);
        assert_eq!(connection.releases(), 1);
    }

    #[test]
    fn test_non_page_root_aborts_without_commit() {
        let mut connection = MemoryPageConnection::new(r#"<one:Section xmlns:one="urn:one"/>"#);
        let mut notifier = RecordingNotifier::new();

        let result = AddNoteCommand::new().execute(&mut connection, NoteType::Sidenote, &mut notifier);

        assert!(matches!(result, Err(CommandError::Precondition(_))));
        assert_eq!(notifier.messages(), [NOT_A_PAGE]);
        assert_eq!(connection.commits(), 0);
    }

    #[test]
    fn test_in_line_note_is_not_implemented() {
        let mut connection = MemoryPageConnection::new(PAGE);
        let mut notifier = RecordingNotifier::new();

        let result = AddNoteCommand::new().execute(
            &mut connection,
            NoteType::InLineAdditionNote,
            &mut notifier,
        );

        assert!(matches!(result, Err(CommandError::NotImplemented(_))));
        assert_eq!(connection.commits(), 0);
        assert_eq!(connection.xml(), PAGE);
    }

    #[test]
    fn test_caret_anchor_is_not_implemented() {
        let mut connection = MemoryPageConnection::new(PAGE);
        let mut notifier = RecordingNotifier::new();
        let options = PlacementOptions::default().with_vertical_anchor(VerticalAnchor::Caret);

        let result = AddNoteCommand::new()
            .with_options(options)
            .execute(&mut connection, NoteType::Sidenote, &mut notifier);

        assert!(matches!(
            result,
            Err(CommandError::Placement(PlacementError::NotImplemented(_)))
        ));
        assert_eq!(connection.commits(), 0);
    }

    #[test]
    fn test_rejected_commit_is_reported() {
        let mut connection = MemoryPageConnection::new(PAGE).reject_commits();
        let mut notifier = RecordingNotifier::new();

        let result = AddNoteCommand::new().execute(&mut connection, NoteType::Sidenote, &mut notifier);

        assert!(matches!(result, Err(CommandError::Commit(_))));
        assert_eq!(notifier.messages().len(), 1);
        assert!(notifier.messages()[0].starts_with("Could not save page"));
        assert_eq!(connection.releases(), 1);
        assert_eq!(connection.xml(), PAGE);
    }

    #[test]
    fn test_malformed_page_is_reported() {
        let mut connection = MemoryPageConnection::new("<one:Page");
        let mut notifier = RecordingNotifier::new();

        let result = AddNoteCommand::new().execute(&mut connection, NoteType::Sidenote, &mut notifier);

        assert!(matches!(result, Err(CommandError::Open(_))));
        assert_eq!(notifier.messages().len(), 1);
    }
}
