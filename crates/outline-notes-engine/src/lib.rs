pub mod editing;
pub mod io;
pub mod models;
pub mod outline;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::*;
pub use io::*;
pub use models::{Bounds, Element, Namespace, Node, PageDocument, Point, QName, Size};
pub use outline::{Outline, Paragraph, Selection, overlap, overlap_point};
pub use parsing::XmlError;
