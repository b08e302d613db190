use scraper::{Html, Selector};

/// Text of the first non-empty `<title>`, whitespace-collapsed. Used as the
/// tab caption.
pub fn extract_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let doc = Html::parse_document(html);
    doc.select(&selector)
        .map(|node| {
            node.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .find(|title| !title.is_empty())
}
