use std::collections::HashSet;

use export_logging::{export_info, export_warn};
use scraper::{ElementRef, Html, Selector};

struct TurnPattern {
    selector: &'static str,
    /// Generic patterns over-match; drop hits nested inside another hit.
    top_level_only: bool,
}

/// Structural patterns from most specific (explicit speaker-role marker)
/// to least specific (generic grouping markers). First non-empty match
/// set wins.
const TURN_PATTERNS: &[TurnPattern] = &[
    TurnPattern {
        selector: "div[data-message-author-role]",
        top_level_only: false,
    },
    TurnPattern {
        selector: "article[data-testid*=\"conversation-turn\"]",
        top_level_only: false,
    },
    TurnPattern {
        selector: "div[data-testid=\"conversation-turn\"]",
        top_level_only: false,
    },
    TurnPattern {
        selector: "[class~=\"group/conversation-turn\"]",
        top_level_only: false,
    },
    TurnPattern {
        selector: "div[class*=\"group\"]",
        top_level_only: true,
    },
];

const CONTAINER_SELECTOR: &str = "[role=\"main\"], main, .conversation, [class*=\"conversation\"]";

/// Locates candidate message nodes, in document order, possibly none.
///
/// Specific markers are far more reliable than generic ones, so the cascade
/// prefers them whenever present; documents lacking them still get a usable
/// approximation from the container fallback.
pub fn find_candidate_nodes(document: &Html) -> Vec<ElementRef<'_>> {
    for pattern in TURN_PATTERNS {
        let Ok(selector) = Selector::parse(pattern.selector) else {
            continue;
        };
        let mut matches: Vec<ElementRef<'_>> = document.select(&selector).collect();
        if pattern.top_level_only {
            matches = retain_top_level(matches);
        }
        if !matches.is_empty() {
            export_info!(
                "Using pattern `{}`, found {} candidate messages",
                pattern.selector,
                matches.len()
            );
            return matches;
        }
    }
    container_fallback(document)
}

fn retain_top_level(matches: Vec<ElementRef<'_>>) -> Vec<ElementRef<'_>> {
    let ids: HashSet<_> = matches.iter().map(|element| element.id()).collect();
    matches
        .into_iter()
        .filter(|element| !element.ancestors().any(|node| ids.contains(&node.id())))
        .collect()
}

/// Last resort: direct children of the first recognized content container.
fn container_fallback(document: &Html) -> Vec<ElementRef<'_>> {
    let Ok(selector) = Selector::parse(CONTAINER_SELECTOR) else {
        return Vec::new();
    };
    let Some(container) = document.select(&selector).next() else {
        export_warn!("No content container recognized; nothing to scan");
        return Vec::new();
    };
    let children: Vec<ElementRef<'_>> = container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|element| matches!(element.value().name(), "div" | "article"))
        .collect();
    export_info!(
        "Fallback: found {} potential messages in the content container",
        children.len()
    );
    children
}
