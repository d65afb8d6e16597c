//! Quote command handlers

use anyhow::Result;

use quotebook_core::presenter::{self, NO_CATEGORY_QUOTES_MESSAGE, NO_QUOTES_MESSAGE};
use quotebook_core::{FilterSelection, Quote, Rendered, RenderedQuote, Session};

use crate::output::Output;

/// Show one random quote
pub fn random(session: &mut Session<Output>, output: &Output) -> Result<()> {
    match session.show_random() {
        Rendered::Quote { quote, .. } => output.print_quote(&quote),
        Rendered::Empty => output.print_empty(NO_QUOTES_MESSAGE),
    }
    Ok(())
}

/// List quotes for the saved selection, or a one-off category
///
/// A category given here does not change the saved filter.
pub fn list(session: &mut Session<Output>, category: Option<String>, output: &Output) -> Result<()> {
    let view = match category {
        Some(category) => {
            presenter::render_filtered(session.quotes(), &FilterSelection::parse(&category))
        }
        None => session.show_filtered(),
    };

    print_view(&view, output);
    Ok(())
}

/// Save a new selection and show the resulting view
pub fn filter(session: &mut Session<Output>, category: String, output: &Output) -> Result<()> {
    let view = session.filter(FilterSelection::parse(&category));

    if !output.is_json() {
        output.success(&format!("Filter set to {}", session.selection()));
    }
    print_view(&view, output);
    Ok(())
}

/// List categories in first-appearance order with their counts
pub fn categories(session: &Session<Output>, output: &Output) -> Result<()> {
    let counts = category_counts(session.quotes(), session.categories());
    output.print_categories(&counts);
    Ok(())
}

/// Add a quote, persist it and push it to the remote
pub async fn add(
    session: &mut Session<Output>,
    text: String,
    category: String,
    output: &Output,
) -> Result<()> {
    let quote = session.add_quote(&text, &category).await?;

    if output.is_json() {
        output.print_quote(&RenderedQuote::from(&quote));
    } else {
        output.success(&format!("Quote added to {}", quote.category()));
    }
    Ok(())
}

fn print_view(view: &[RenderedQuote], output: &Output) {
    if view.is_empty() {
        output.print_empty(NO_CATEGORY_QUOTES_MESSAGE);
    } else {
        output.print_quotes(view);
    }
}

pub(crate) fn category_counts(quotes: &[Quote], categories: Vec<String>) -> Vec<(String, usize)> {
    categories
        .into_iter()
        .map(|name| {
            let count = quotes.iter().filter(|q| q.category() == name).count();
            (name, count)
        })
        .collect()
}
