use crate::io::{PageConnection, PageSession};
use crate::models::Element;
use crate::outline::Outline;
use crate::outline::names::{OUTLINE, SELECTED};
use crate::outline::paragraph::is_selected;

/// Remove every `selected` attribute from `root` and its descendants
pub fn deselect_all(root: &mut Element) {
    root.visit_mut(&mut |element| {
        element.remove_attribute(SELECTED);
    });
}

/// First outline under `root`, at any depth, carrying a region-level selection
pub fn find_selected_outline(root: &Element) -> Option<Outline<&Element>> {
    let name = root.namespace().name(OUTLINE);
    root.descendants()
        .filter(|element| element.name() == &name)
        .find(|element| is_selected(element))
        .and_then(Outline::wrap)
}

/// Open the page behind `connection` and return a detached copy of the
/// selected outline.
///
/// A failed connection and a page without a selected outline both yield
/// `None`; neither is an error for callers.
pub fn current_outline<C: PageConnection + ?Sized>(connection: &mut C) -> Option<Outline<Element>> {
    let session = match PageSession::open(connection) {
        Ok(session) => session,
        Err(err) => {
            log::debug!("No current outline, page could not be opened: {err}");
            return None;
        }
    };
    find_selected_outline(session.document().root()).map(|outline| outline.cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryPageConnection;
    use crate::models::PageDocument;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<one:Page xmlns:one="urn:one">
  <one:Outline>
    <one:Position x="1.0" y="1.0"/>
  </one:Outline>
  <one:Outline selected="partial">
    <one:Position x="100.0" y="50.0"/>
    <one:OEChildren>
      <one:OE><one:T selected="all">picked</one:T></one:OE>
    </one:OEChildren>
  </one:Outline>
</one:Page>"#;

    #[test]
    fn test_find_selected_outline() {
        let document = PageDocument::parse(PAGE).unwrap();

        let outline = find_selected_outline(document.root()).unwrap();

        assert_eq!(outline.position_x(), 100);
        assert_eq!(outline.selected_text(), "picked");
    }

    #[test]
    fn test_find_selected_outline_ignores_none() {
        let document =
            PageDocument::parse(r#"<Page><Outline selected="none"/><Outline/></Page>"#).unwrap();

        assert!(find_selected_outline(document.root()).is_none());
    }

    #[test]
    fn test_deselect_all() {
        let mut document = PageDocument::parse(PAGE).unwrap();

        deselect_all(document.root_mut());

        assert!(find_selected_outline(document.root()).is_none());
        assert!(
            document
                .root()
                .descendants()
                .all(|element| element.attribute(SELECTED).is_none())
        );
    }

    #[test]
    fn test_current_outline_from_connection() {
        let mut connection = MemoryPageConnection::new(PAGE);

        let outline = current_outline(&mut connection).unwrap();

        assert_eq!(outline.position_y(), 50);
        assert_eq!(connection.releases(), 1);
        assert_eq!(connection.commits(), 0);
    }

    #[test]
    fn test_current_outline_is_absent_when_connection_fails() {
        let mut connection = MemoryPageConnection::new("<not closed");

        assert!(current_outline(&mut connection).is_none());
        assert_eq!(connection.releases(), 1);
    }

    #[test]
    fn test_current_outline_is_absent_without_selection() {
        let mut connection = MemoryPageConnection::new("<Page><Outline/></Page>");

        assert!(current_outline(&mut connection).is_none());
    }
}
