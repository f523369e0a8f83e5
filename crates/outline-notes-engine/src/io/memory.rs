use crate::io::{ConnectionError, PageConnection};
use crate::models::PageDocument;

/// A page held as an XML string in memory.
///
/// Counts opens, commits and releases so callers can check the session
/// discipline; can be told to refuse commits.
#[derive(Debug, Default)]
pub struct MemoryPageConnection {
    xml: String,
    reject_commits: bool,
    opens: usize,
    commits: usize,
    releases: usize,
}

impl MemoryPageConnection {
    pub fn new(xml: impl Into<String>) -> Self {
        Self {
            xml: xml.into(),
            ..Self::default()
        }
    }

    /// Make every later commit fail
    pub fn reject_commits(mut self) -> Self {
        self.reject_commits = true;
        self
    }

    /// The page as last committed
    pub fn xml(&self) -> &str {
        &self.xml
    }

    pub fn document(&self) -> Result<PageDocument, ConnectionError> {
        Ok(PageDocument::parse(&self.xml)?)
    }

    pub fn opens(&self) -> usize {
        self.opens
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn releases(&self) -> usize {
        self.releases
    }
}

impl PageConnection for MemoryPageConnection {
    fn open(&mut self) -> Result<PageDocument, ConnectionError> {
        self.opens += 1;
        self.document()
    }

    fn commit(&mut self, document: &PageDocument) -> Result<(), ConnectionError> {
        if self.reject_commits {
            return Err(ConnectionError::Rejected("page is read-only".to_string()));
        }
        self.xml = document.to_xml()?;
        self.commits += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}
