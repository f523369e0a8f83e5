mod memory;
mod session;

pub use memory::MemoryPageConnection;
pub use session::PageSession;

use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::PageDocument;
use crate::parsing::XmlError;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Page not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid page document: {0}")]
    Document(#[from] XmlError),
    #[error("Invalid pages directory: {0}")]
    InvalidPagesDir(String),
    #[error("Page could not be saved: {0}")]
    Rejected(String),
}

/// Access to one page document held by the host.
///
/// A connection is acquired per command through [`PageSession`], which
/// guarantees `release` runs on every exit path.
pub trait PageConnection {
    /// Read the page into memory
    fn open(&mut self) -> Result<PageDocument, ConnectionError>;

    /// Persist the whole page
    fn commit(&mut self, document: &PageDocument) -> Result<(), ConnectionError>;

    /// Give the page back to the host. Called once per session.
    fn release(&mut self) {}
}

/// A page stored as an XML file under a pages directory
#[derive(Debug, Clone)]
pub struct FilePageConnection {
    pages_root: PathBuf,
    page: RelativePathBuf,
}

impl FilePageConnection {
    pub fn new(pages_root: impl Into<PathBuf>, page: impl Into<RelativePathBuf>) -> Self {
        Self {
            pages_root: pages_root.into(),
            page: page.into(),
        }
    }

    pub fn page(&self) -> &RelativePath {
        &self.page
    }
}

impl PageConnection for FilePageConnection {
    fn open(&mut self) -> Result<PageDocument, ConnectionError> {
        let content = read_page(&self.page, &self.pages_root)?;
        Ok(PageDocument::parse(&content)?)
    }

    fn commit(&mut self, document: &PageDocument) -> Result<(), ConnectionError> {
        let content = document.to_xml()?;
        write_page(&self.page, &self.pages_root, &content)
    }

    fn release(&mut self) {
        log::debug!("Released page {}", self.page);
    }
}

/// Read a page file and return its content
pub fn read_page(relative_path: &RelativePath, pages_root: &Path) -> Result<String, ConnectionError> {
    let absolute_path = relative_path.to_path(pages_root);
    if !absolute_path.exists() {
        return Err(ConnectionError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(ConnectionError::Io)
}

/// Write content to a page file
pub fn write_page(
    relative_path: &RelativePath,
    pages_root: &Path,
    content: &str,
) -> Result<(), ConnectionError> {
    let absolute_path = relative_path.to_path(pages_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(ConnectionError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(ConnectionError::Io)
}

/// Scan for page files in the pages directory, returned relative to it
pub fn scan_pages(pages_root: &Path) -> Result<Vec<RelativePathBuf>, ConnectionError> {
    validate_pages_dir(pages_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(pages_root, &mut files)?;

    let mut pages: Vec<RelativePathBuf> = files
        .iter()
        .filter_map(|file| file.strip_prefix(pages_root).ok())
        .filter_map(|relative| RelativePathBuf::from_path(relative).ok())
        .collect();
    pages.sort();
    Ok(pages)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ConnectionError> {
    let entries = fs::read_dir(dir).map_err(ConnectionError::Io)?;

    for entry in entries {
        let entry = entry.map_err(ConnectionError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "xml"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_pages_dir(path: &Path) -> Result<(), ConnectionError> {
    if !path.exists() || !path.is_dir() {
        return Err(ConnectionError::InvalidPagesDir(
            "pages directory not found".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_pages_dir};

    const PAGE: &str = r#"<?xml version="1.0"?><one:Page xmlns:one="urn:one"><one:Outline/></one:Page>"#;

    #[test]
    fn test_scan_pages_finds_nested_xml_only() {
        // Given a pages directory with pages, a nested page and other files
        let pages_dir = create_test_pages_dir();
        create_test_file(&pages_dir, "first.xml", PAGE);
        create_test_file(&pages_dir, "notes.txt", "not a page");
        let sub_dir = pages_dir.path().join("section");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("second.xml"), PAGE).unwrap();

        // When scanning for pages
        let pages = scan_pages(pages_dir.path()).unwrap();

        // Then only the XML pages are found, relative to the root
        assert_eq!(
            pages,
            vec![
                RelativePathBuf::from("first.xml"),
                RelativePathBuf::from("section/second.xml")
            ]
        );
    }

    #[test]
    fn test_scan_invalid_pages_directory() {
        let result = scan_pages(Path::new("/this/path/does/not/exist"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("pages directory"));
    }

    #[test]
    fn test_read_page_not_found() {
        let pages_dir = create_test_pages_dir();
        let result = read_page(RelativePath::new("missing.xml"), pages_dir.path());
        assert!(matches!(result, Err(ConnectionError::NotFound(_))));
    }

    #[test]
    fn test_write_page_creates_parent_directories() {
        let pages_dir = create_test_pages_dir();
        let relative_path = RelativePath::new("section/sub/page.xml");

        write_page(relative_path, pages_dir.path(), PAGE).unwrap();

        assert_eq!(read_page(relative_path, pages_dir.path()).unwrap(), PAGE);
        assert!(pages_dir.path().join("section").join("sub").is_dir());
    }

    #[test]
    fn test_file_connection_round_trip() {
        let pages_dir = create_test_pages_dir();
        create_test_file(&pages_dir, "page.xml", PAGE);
        let mut connection = FilePageConnection::new(pages_dir.path(), "page.xml");

        let mut document = connection.open().unwrap();
        document.root_mut().set_attribute("name", "Renamed");
        connection.commit(&document).unwrap();

        let reopened = connection.open().unwrap();
        assert_eq!(reopened.root().attribute("name"), Some("Renamed"));
    }

    #[test]
    fn test_file_connection_rejects_malformed_page() {
        let pages_dir = create_test_pages_dir();
        create_test_file(&pages_dir, "broken.xml", "<one:Page>");
        let mut connection = FilePageConnection::new(pages_dir.path(), "broken.xml");

        assert!(matches!(
            connection.open(),
            Err(ConnectionError::Document(_))
        ));
    }

    #[test]
    fn test_validate_pages_dir() {
        let pages_dir = create_test_pages_dir();
        assert!(validate_pages_dir(pages_dir.path()).is_ok());
        assert!(matches!(
            validate_pages_dir(Path::new("/nonexistent/path")),
            Err(ConnectionError::InvalidPagesDir(_))
        ));
    }
}
