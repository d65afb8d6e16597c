//! Rendering
//!
//! Pure functions that turn the quote list into values ready for display,
//! and the [`DisplayPort`] trait that puts them on a screen. Nothing in here
//! writes to storage; recording the last viewed index is left to the caller.

use rand::Rng;
use serde::Serialize;

use crate::models::{FilterSelection, Quote};

/// Message shown when there is nothing to pick a random quote from
pub const NO_QUOTES_MESSAGE: &str = "No quotes available.";

/// Message shown when a category filter matches nothing
pub const NO_CATEGORY_QUOTES_MESSAGE: &str = "No quotes available for this category.";

/// A quote prepared for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedQuote {
    pub text: String,
    pub category: String,
}

impl From<&Quote> for RenderedQuote {
    fn from(quote: &Quote) -> Self {
        Self {
            text: quote.text().to_string(),
            category: quote.category().to_string(),
        }
    }
}

/// Result of a random pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The list was empty
    Empty,
    /// A quote and its index in the list
    Quote { quote: RenderedQuote, index: usize },
}

/// Anything that can show rendered quotes to the user
pub trait DisplayPort {
    /// Show a single quote
    fn show_quote(&mut self, quote: &RenderedQuote);

    /// Show a filtered view (never called with an empty slice)
    fn show_quotes(&mut self, quotes: &[RenderedQuote]);

    /// Show a placeholder message instead of quotes
    fn show_empty(&mut self, message: &str);

    /// Show a status notification (sync results, confirmations)
    fn notify(&mut self, message: &str);
}

/// Pick one quote uniformly at random
pub fn render_random<R: Rng + ?Sized>(quotes: &[Quote], rng: &mut R) -> Rendered {
    if quotes.is_empty() {
        return Rendered::Empty;
    }
    let index = rng.gen_range(0..quotes.len());
    Rendered::Quote {
        quote: RenderedQuote::from(&quotes[index]),
        index,
    }
}

/// All quotes passing the selection, in list order
pub fn render_filtered(quotes: &[Quote], selection: &FilterSelection) -> Vec<RenderedQuote> {
    quotes
        .iter()
        .filter(|q| selection.matches(q))
        .map(RenderedQuote::from)
        .collect()
}

/// Send a random pick to a display
pub fn display_random(display: &mut dyn DisplayPort, rendered: &Rendered) {
    match rendered {
        Rendered::Empty => display.show_empty(NO_QUOTES_MESSAGE),
        Rendered::Quote { quote, .. } => display.show_quote(quote),
    }
}

/// Send a filtered view to a display
pub fn display_filtered(display: &mut dyn DisplayPort, quotes: &[RenderedQuote]) {
    if quotes.is_empty() {
        display.show_empty(NO_CATEGORY_QUOTES_MESSAGE);
    } else {
        display.show_quotes(quotes);
    }
}

/// Display that records everything it is asked to show
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingDisplay {
    pub shown: Vec<Vec<RenderedQuote>>,
    pub empty: Vec<String>,
    pub notices: Vec<String>,
}

#[cfg(test)]
impl DisplayPort for RecordingDisplay {
    fn show_quote(&mut self, quote: &RenderedQuote) {
        self.shown.push(vec![quote.clone()]);
    }

    fn show_quotes(&mut self, quotes: &[RenderedQuote]) {
        self.shown.push(quotes.to_vec());
    }

    fn show_empty(&mut self, message: &str) {
        self.empty.push(message.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quotes() -> Vec<Quote> {
        vec![
            Quote::new("a", "Life").unwrap(),
            Quote::new("b", "Motivation").unwrap(),
            Quote::new("c", "Life").unwrap(),
        ]
    }

    #[test]
    fn test_render_random_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(render_random(&[], &mut rng), Rendered::Empty);
    }

    #[test]
    fn test_render_random_index_matches_quote() {
        let list = quotes();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            match render_random(&list, &mut rng) {
                Rendered::Quote { quote, index } => {
                    assert!(index < list.len());
                    assert_eq!(quote, RenderedQuote::from(&list[index]));
                }
                Rendered::Empty => panic!("non-empty list rendered as empty"),
            }
        }
    }

    #[test]
    fn test_render_random_reaches_every_index() {
        let list = quotes();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 3];

        for _ in 0..200 {
            if let Rendered::Quote { index, .. } = render_random(&list, &mut rng) {
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_render_filtered_all_is_full_list() {
        let list = quotes();
        let rendered = render_filtered(&list, &FilterSelection::All);
        let texts: Vec<_> = rendered.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_render_filtered_category_preserves_order() {
        let list = quotes();
        let rendered = render_filtered(&list, &FilterSelection::Category("Life".into()));
        let texts: Vec<_> = rendered.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_render_filtered_no_match_is_empty() {
        let list = quotes();
        assert!(render_filtered(&list, &FilterSelection::Category("Nope".into())).is_empty());
    }

    #[test]
    fn test_display_helpers_pick_messages() {
        let mut display = RecordingDisplay::default();

        display_random(&mut display, &Rendered::Empty);
        display_filtered(&mut display, &[]);

        assert_eq!(
            display.empty,
            vec![NO_QUOTES_MESSAGE, NO_CATEGORY_QUOTES_MESSAGE]
        );
        assert!(display.shown.is_empty());
    }
}
