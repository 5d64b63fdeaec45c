use export_logging::export_debug;
use scraper::{ElementRef, Selector};

use crate::node;

pub(crate) const MIN_CONTENT_CHARS: usize = 30;
pub(crate) const MAX_CONTENT_CHARS: usize = 100_000;
const MIN_CONTENT_TOKENS: usize = 5;

const COMPOSER_SELECTOR: &str = "input[type=\"text\"], textarea";

/// A candidate transcript turn that survived validation.
#[derive(Debug, Clone, Copy)]
pub struct TurnCandidate<'a> {
    pub node: ElementRef<'a>,
    pub original_index: usize,
}

/// Filters candidate nodes by content shape, then collapses nested
/// survivors into single top-level turns. Document order is preserved.
pub fn consolidate<'a>(nodes: &[ElementRef<'a>]) -> Vec<TurnCandidate<'a>> {
    let filtered: Vec<ElementRef<'a>> = nodes
        .iter()
        .copied()
        .filter(|element| keep_node(*element))
        .collect();

    // De-nesting runs against the filtered set, not the raw candidates: a
    // rejected outer node must not suppress a valid inner one.
    filtered
        .iter()
        .copied()
        .filter(|element| {
            !filtered
                .iter()
                .any(|other| other.id() != element.id() && node::contains(*other, *element))
        })
        .enumerate()
        .map(|(original_index, node)| TurnCandidate {
            node,
            original_index,
        })
        .collect()
}

fn keep_node(element: ElementRef<'_>) -> bool {
    let text = node::text_of(element);
    let trimmed = text.trim();
    let length = trimmed.chars().count();
    if length < MIN_CONTENT_CHARS || length > MAX_CONTENT_CHARS {
        export_debug!("Rejecting candidate with {length} characters of text");
        return false;
    }

    // An active text-input control means this is the live composer, not a
    // message.
    if has_descendant(element, COMPOSER_SELECTOR) {
        return false;
    }

    // Transient placeholders never carry a finished turn.
    if has_class_token(element, "typing") || has_class_token(element, "loading") {
        return false;
    }

    if trimmed.split_whitespace().count() < MIN_CONTENT_TOKENS {
        return false;
    }

    true
}

fn has_descendant(element: ElementRef<'_>, selector: &str) -> bool {
    Selector::parse(selector)
        .map(|sel| element.select(&sel).next().is_some())
        .unwrap_or(false)
}

fn has_class_token(element: ElementRef<'_>, token: &str) -> bool {
    element.value().classes().any(|class| class == token)
}
