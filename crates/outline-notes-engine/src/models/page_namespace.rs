//! Current page namespace for constructors whose namespace is implied.
//!
//! Commands run single-threaded, so the value is held per thread. Set it once
//! after opening a page and before building views with the implied constructors.

use std::cell::RefCell;

use crate::models::tree::Namespace;

/// Namespace used by OneNote 2013 and later page documents
pub const ONENOTE_2013: &str = "http://schemas.microsoft.com/office/onenote/2013/onenote";

thread_local! {
    static CURRENT: RefCell<Option<Namespace>> = const { RefCell::new(None) };
}

#[derive(Debug, thiserror::Error)]
#[error("Page namespace has not been set")]
pub struct NamespaceNotSet;

pub fn set(namespace: Namespace) {
    CURRENT.with(|current| *current.borrow_mut() = Some(namespace));
}

pub fn clear() {
    CURRENT.with(|current| *current.borrow_mut() = None);
}

pub fn current() -> Result<Namespace, NamespaceNotSet> {
    CURRENT.with(|current| current.borrow().clone().ok_or(NamespaceNotSet))
}
