use crate::io::{ConnectionError, PageConnection};
use crate::models::PageDocument;

/// Exclusive, scoped access to one page document.
///
/// The page is read on [`PageSession::open`] and the connection is released
/// when the session drops, whether or not [`PageSession::commit`] ran. Edits
/// that are never committed are discarded with the session.
pub struct PageSession<'c, C: PageConnection + ?Sized> {
    connection: &'c mut C,
    document: PageDocument,
}

impl<'c, C: PageConnection + ?Sized> PageSession<'c, C> {
    pub fn open(connection: &'c mut C) -> Result<Self, ConnectionError> {
        match connection.open() {
            Ok(document) => Ok(Self {
                connection,
                document,
            }),
            Err(err) => {
                connection.release();
                Err(err)
            }
        }
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut PageDocument {
        &mut self.document
    }

    /// Write the whole in-memory page back through the connection
    pub fn commit(&mut self) -> Result<(), ConnectionError> {
        self.connection.commit(&self.document)
    }
}

impl<C: PageConnection + ?Sized> Drop for PageSession<'_, C> {
    fn drop(&mut self) {
        self.connection.release();
    }
}
