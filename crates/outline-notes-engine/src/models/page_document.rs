use std::str::FromStr;

use crate::models::tree::{Element, Namespace};
use crate::parsing::{XmlError, parse_document, write_document};

/// Local name of the document root
pub const PAGE: &str = "Page";

/// An in-memory page document, owned by whoever opened it
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    root: Element,
}

impl PageDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        parse_document(xml)
    }

    pub fn to_xml(&self) -> Result<String, XmlError> {
        write_document(self)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// The page namespace, taken from the root element
    pub fn namespace(&self) -> &Namespace {
        self.root.namespace()
    }

    /// Whether the root is a `Page` element in its own namespace
    pub fn is_page(&self) -> bool {
        self.root.local_name() == PAGE
    }
}

impl FromStr for PageDocument {
    type Err = XmlError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        Self::parse(xml)
    }
}
