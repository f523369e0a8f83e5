use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use super::XmlError;
use crate::models::{Element, Namespace, Node, PageDocument, QName};

/// Parse a page document.
///
/// Whitespace-only text between elements is dropped; CDATA sections become
/// plain text nodes.
pub fn parse_document(xml: &str) -> Result<PageDocument, XmlError> {
    let mut reader = NsReader::from_str(xml);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(start) => {
                let namespace = resolve_namespace(resolved)?;
                open.push(start_element(namespace, &start)?);
            }
            Event::Empty(start) => {
                let namespace = resolve_namespace(resolved)?;
                let element = start_element(namespace, &start)?;
                attach(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml verifies that end tags match their start tags
                if let Some(element) = open.pop() {
                    attach(&mut open, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if let Some(parent) = open.last_mut()
                    && !text.trim().is_empty()
                {
                    parent.add_child(Node::Text(text.into_owned()));
                }
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)?;
                if let Some(parent) = open.last_mut() {
                    parent.add_child(Node::Text(text.to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(XmlError::Unclosed(unclosed.name().to_string()));
    }

    root.map(PageDocument::new).ok_or(XmlError::MissingRoot)
}

fn resolve_namespace(resolved: ResolveResult<'_>) -> Result<Namespace, XmlError> {
    match resolved {
        ResolveResult::Bound(namespace) => Ok(Namespace::new(
            String::from_utf8_lossy(namespace.0).into_owned(),
        )),
        ResolveResult::Unbound => Ok(Namespace::none()),
        ResolveResult::Unknown(prefix) => Err(XmlError::UnknownPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn start_element(namespace: Namespace, start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let local = std::str::from_utf8(start.local_name().into_inner())?;
    let mut element = Element::new(QName::new(namespace, local));

    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?;
        let value = attribute.unescape_value()?;
        element.set_attribute(key, value.into_owned());
    }

    Ok(element)
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(parent) => {
            parent.add_child(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::MultipleRoots),
    }
}
