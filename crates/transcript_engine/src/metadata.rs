use scraper::{Html, Selector};

/// Titles the page shell uses before a conversation is named.
const GENERIC_TITLES: &[&str] = &["chatgpt", "new chat", "untitled", "chat"];

const TITLE_FALLBACK: &str = "Conversation with ChatGPT";

const TITLE_SELECTORS: [&str; 4] = [
    "h1",
    "[class*=\"conversation-title\"]",
    "[data-testid*=\"conversation-title\"]",
    "title",
];

/// Conversation heading for the exported document. Generic shell titles
/// are skipped; the fallback never fails.
pub fn conversation_title(document: &Html) -> String {
    for raw in TITLE_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        // Visually hidden headings are screen-reader duplicates.
        let candidate = document.select(&selector).find(|element| {
            raw != "h1" || !element.value().attr("class").unwrap_or("").contains("hidden")
        });
        let Some(element) = candidate else {
            continue;
        };
        let text = element.text().collect::<String>();
        let trimmed = text.trim();
        if trimmed.is_empty()
            || GENERIC_TITLES
                .iter()
                .any(|generic| generic.eq_ignore_ascii_case(trimmed))
        {
            continue;
        }
        return trimmed.to_string();
    }
    TITLE_FALLBACK.to_string()
}

/// Page title used for the export filename; `None` when absent or empty.
pub fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<String>();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
