pub mod geometry;
pub mod page_document;
pub mod page_namespace;
pub mod tree;

pub use geometry::{Bounds, Point, Size};
pub use page_document::{PAGE, PageDocument};
pub use page_namespace::{NamespaceNotSet, ONENOTE_2013};
pub use tree::{Attribute, Descendants, Element, Namespace, Node, QName, parse_decimal};
