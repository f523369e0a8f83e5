use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::XmlError;
use crate::models::{Element, Namespace, Node, PageDocument};

/// Serialize a page document, declaration first, without added indentation.
pub fn write_document(document: &PageDocument) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let mut scopes = Scopes::default();
    write_element(&mut writer, document.root(), &mut scopes)?;

    let bytes = writer.into_inner();
    Ok(String::from_utf8(bytes).map_err(|err| err.utf8_error())?)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    scopes: &mut Scopes,
) -> Result<(), XmlError> {
    scopes.enter(element);
    let (tag, declaration) = scopes.qualify(element.namespace(), element.local_name());

    let mut start = BytesStart::new(tag.as_str());
    if let Some(uri) = &declaration {
        start.push_attribute(("xmlns", uri.as_str()));
    }
    for attribute in element.attributes() {
        start.push_attribute((attribute.key.as_str(), attribute.value.as_str()));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        for child in element.children() {
            match child {
                Node::Element(child) => write_element(writer, child, scopes)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
    }

    scopes.leave();
    Ok(())
}

/// Namespace declarations in effect, innermost frame last.
///
/// Each frame holds `(prefix, uri)` pairs; `None` is the default namespace.
#[derive(Default)]
struct Scopes {
    frames: Vec<Vec<(Option<String>, String)>>,
}

impl Scopes {
    fn enter(&mut self, element: &Element) {
        let frame = element
            .attributes()
            .iter()
            .filter_map(|attribute| {
                if attribute.key == "xmlns" {
                    Some((None, attribute.value.clone()))
                } else {
                    attribute
                        .key
                        .strip_prefix("xmlns:")
                        .map(|prefix| (Some(prefix.to_string()), attribute.value.clone()))
                }
            })
            .collect();
        self.frames.push(frame);
    }

    fn leave(&mut self) {
        self.frames.pop();
    }

    /// Tag name for `local` in `namespace`, plus a default namespace
    /// declaration to add when no binding for the namespace is in scope.
    fn qualify(&mut self, namespace: &Namespace, local: &str) -> (String, Option<String>) {
        match self.prefix_for(namespace.uri()) {
            Some(Some(prefix)) => (format!("{prefix}:{local}"), None),
            Some(None) => (local.to_string(), None),
            None => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.push((None, namespace.uri().to_string()));
                }
                (local.to_string(), Some(namespace.uri().to_string()))
            }
        }
    }

    /// Find the visible binding for `uri`. Bindings shadowed by an inner
    /// declaration of the same prefix are skipped.
    fn prefix_for(&self, uri: &str) -> Option<Option<String>> {
        let mut shadowed: Vec<&Option<String>> = Vec::new();
        for frame in self.frames.iter().rev() {
            for (prefix, bound) in frame {
                if shadowed.contains(&prefix) {
                    continue;
                }
                if bound == uri {
                    return Some(prefix.clone());
                }
            }
            shadowed.extend(frame.iter().map(|(prefix, _)| prefix));
        }
        // No declaration at all means the default namespace is the empty one
        if uri.is_empty() && !shadowed.contains(&&None) {
            return Some(None);
        }
        None
    }
}
