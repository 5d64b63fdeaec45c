use scraper::{ElementRef, Selector};
use transcript_core::Sender;

use crate::node;
use crate::validate::TurnCandidate;

const OPENER_WINDOW_CHARS: usize = 200;
const STRUCTURED_MIN_CHARS: usize = 200;
const SHORT_TURN_CHARS: usize = 100;
const LONG_TURN_CHARS: usize = 300;

/// Phrases an assistant-style answer tends to open with.
const ASSISTANT_OPENERS: &[&str] = &[
    "i understand",
    "i can help",
    "here's",
    "i'll",
    "let me",
    "i'd be happy",
    "certainly",
    "of course",
];

/// Phrases a user-style request tends to open with.
const USER_OPENERS: &[&str] = &[
    "can you",
    "please help",
    "how do i",
    "i need",
    "i want",
    "help me",
    "could you",
];

struct TurnContext<'a, 'b> {
    node: ElementRef<'a>,
    index: usize,
    all: &'b [TurnCandidate<'a>],
}

type Rule = fn(&TurnContext<'_, '_>) -> Option<Sender>;

/// Ordered heuristic cascade, most reliable first. The final positional
/// fallback is applied outside the table so the cascade is total.
const RULES: &[Rule] = &[
    explicit_role,
    avatar_hint,
    opener_phrase,
    structural_shape,
    relative_length,
];

/// Infers the speaker for one candidate turn. Never fails; when every
/// heuristic abstains the position parity decides.
pub fn classify_sender(candidate: &TurnCandidate<'_>, all: &[TurnCandidate<'_>]) -> Sender {
    let ctx = TurnContext {
        node: candidate.node,
        index: candidate.original_index,
        all,
    };
    RULES
        .iter()
        .find_map(|rule| rule(&ctx))
        .unwrap_or(if ctx.index % 2 == 0 {
            Sender::User
        } else {
            Sender::Assistant
        })
}

/// An explicit speaker-role marker is authoritative.
fn explicit_role(ctx: &TurnContext<'_, '_>) -> Option<Sender> {
    let role = ctx.node.value().attr("data-message-author-role")?;
    Some(if role == "user" {
        Sender::User
    } else {
        Sender::Assistant
    })
}

fn avatar_hint(ctx: &TurnContext<'_, '_>) -> Option<Sender> {
    let selector = Selector::parse("img").ok()?;
    for avatar in ctx.node.select(&selector) {
        let alt = node::attr_of(avatar, "alt").to_lowercase();
        let src = node::attr_of(avatar, "src").to_lowercase();
        let classes = node::attr_of(avatar, "class").to_lowercase();

        if alt.contains("user") || src.contains("user") || classes.contains("user") {
            return Some(Sender::User);
        }
        if alt.contains("chatgpt")
            || alt.contains("assistant")
            || alt.contains("gpt")
            || src.contains("assistant")
            || src.contains("chatgpt")
            || classes.contains("assistant")
        {
            return Some(Sender::Assistant);
        }
    }
    None
}

fn opener_phrase(ctx: &TurnContext<'_, '_>) -> Option<Sender> {
    let text = node::text_of(ctx.node);
    let opening: String = text
        .trim_start()
        .to_lowercase()
        .chars()
        .take(OPENER_WINDOW_CHARS)
        .collect();
    if ASSISTANT_OPENERS
        .iter()
        .any(|phrase| opening.starts_with(phrase))
    {
        return Some(Sender::Assistant);
    }
    if USER_OPENERS.iter().any(|phrase| opening.starts_with(phrase)) {
        return Some(Sender::User);
    }
    None
}

/// Long, structured answers skew toward the assistant role.
fn structural_shape(ctx: &TurnContext<'_, '_>) -> Option<Sender> {
    let code = Selector::parse("pre, code").ok()?;
    let lists = Selector::parse("ul, ol, li").ok()?;
    let has_code = ctx.node.select(&code).next().is_some();
    let has_lists = ctx.node.select(&lists).next().is_some();
    let long = node::text_of(ctx.node).chars().count() > STRUCTURED_MIN_CHARS;
    (has_code && has_lists && long).then_some(Sender::Assistant)
}

/// A short turn followed by a long one reads as question/answer, and the
/// other way around.
fn relative_length(ctx: &TurnContext<'_, '_>) -> Option<Sender> {
    if ctx.index == 0 {
        return None;
    }
    let previous = node::text_of(ctx.all[ctx.index - 1].node).chars().count();
    let current = node::text_of(ctx.node).chars().count();
    if previous < SHORT_TURN_CHARS && current > LONG_TURN_CHARS {
        return Some(Sender::Assistant);
    }
    if previous > LONG_TURN_CHARS && current < SHORT_TURN_CHARS {
        return Some(Sender::User);
    }
    None
}
