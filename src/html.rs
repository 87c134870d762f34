use std::sync::LazyLock;

use scraper::{Html, Selector};

#[allow(clippy::unwrap_used)]
static SEL_H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// Visible text of an HTML fragment, all text nodes concatenated.
pub fn get_text(fragment: &str) -> String {
    Html::parse_fragment(fragment).root_element().text().collect()
}

/// Collapses every whitespace run into a single space and trims both ends.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first `<h1>`, which the status panel uses for the headline.
pub fn headline(fragment: &str) -> Option<String> {
    let html = Html::parse_fragment(fragment);
    let h1 = html.select(&SEL_H1).next()?;
    Some(squash(&h1.text().collect::<String>()))
}
