use std::borrow::Borrow;

use crate::editing::Notifier;
use crate::models::Element;
use crate::outline::Outline;

pub const NOTHING_TO_QUOTE: &str = "Nothing selected to quote";
pub const QUOTE_WITHOUT_SELECTION: &str = "Can't quote without a selection!";

/// Wrap text as a note prefix: `"text" -> `. Empty text has no quote.
pub fn quote_text(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| format!("\"{text}\" -> "))
}

/// Quote the selected text of `outline` for use as a note prefix.
///
/// A missing outline or an empty selection is reported through `notifier`
/// and yields an empty string so the caller can carry on without a quote.
pub fn quote_selection<E: Borrow<Element>>(
    outline: Option<&Outline<E>>,
    notifier: &mut dyn Notifier,
) -> String {
    let Some(outline) = outline else {
        log::warn!("No outline found to quote from");
        notifier.display(NOTHING_TO_QUOTE);
        return String::new();
    };

    match quote_text(&outline.selected_text()) {
        Some(quote) => quote,
        None => {
            notifier.display(QUOTE_WITHOUT_SELECTION);
            String::new()
        }
    }
}
