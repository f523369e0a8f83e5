//! XML codec for page documents.
//!
//! Reading resolves every element to its namespace URI through
//! `quick_xml::NsReader`; writing maps URIs back to the prefixes declared in
//! scope so a document survives a read/write cycle with its prefixes intact.

mod reader;
mod writer;

pub use reader::parse_document;
pub use writer::write_document;

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown namespace prefix: {0}")]
    UnknownPrefix(String),
    #[error("Document has no root element")]
    MissingRoot,
    #[error("Document has more than one root element")]
    MultipleRoots,
    #[error("Unexpected end of document inside <{0}>")]
    Unclosed(String),
}
