use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of annotation a user can attach to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteType {
    Sidenote,
    EditingNote,
    OverallEditingNote,
    AdditionNote,
    InLineAdditionNote,
}

/// Display data for a note type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTypeInfo {
    pub note_type: NoteType,
    /// Prefix written at the start of the note block
    pub label: &'static str,
    /// The note applies to the whole page rather than a selection
    pub overall: bool,
}

impl NoteType {
    pub const ALL: [NoteType; 5] = [
        NoteType::Sidenote,
        NoteType::EditingNote,
        NoteType::OverallEditingNote,
        NoteType::AdditionNote,
        NoteType::InLineAdditionNote,
    ];

    pub fn info(&self) -> NoteTypeInfo {
        let label = match self {
            NoteType::Sidenote => "Sidenote",
            NoteType::EditingNote => "Editing note",
            NoteType::OverallEditingNote => "OVERALL EDITING NOTE",
            NoteType::AdditionNote => "Add note",
            NoteType::InLineAdditionNote => "In-line add note",
        };
        NoteTypeInfo {
            note_type: *self,
            label,
            overall: matches!(self, NoteType::OverallEditingNote),
        }
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }

    /// Command-line name, e.g. `editing-note`
    pub fn name(&self) -> &'static str {
        match self {
            NoteType::Sidenote => "sidenote",
            NoteType::EditingNote => "editing-note",
            NoteType::OverallEditingNote => "overall-editing-note",
            NoteType::AdditionNote => "addition-note",
            NoteType::InLineAdditionNote => "in-line-addition-note",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown note type: {0}")]
pub struct UnknownNoteType(pub String);

impl FromStr for NoteType {
    type Err = UnknownNoteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteType::ALL
            .into_iter()
            .find(|note_type| note_type.name() == s)
            .ok_or_else(|| UnknownNoteType(s.to_string()))
    }
}
