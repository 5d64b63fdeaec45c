use url::Url;

use crate::node::{IsolatedElement, IsolatedNode};

const IMAGE_PLACEHOLDER: &str = "[Image or Canvas]";

/// Class-attribute fragments marking transient UI controls.
const CHROME_CLASS_HINTS: &[&str] = &["copy", "edit", "regenerate"];

/// Schemes that execute or embed code; anchors using them stay plain text.
const UNSAFE_SCHEMES: &[&str] = &["javascript", "data", "vbscript"];

/// Converts one isolated message subtree into clean Markdown text.
///
/// Relative hrefs are resolved against `base_url` when one is available;
/// the source document is never touched.
pub fn sanitize_message(root: &IsolatedElement, base_url: Option<&Url>) -> String {
    let mut out = MarkdownBuilder::new();
    visit_children(root, &mut out, false, base_url);
    cleanup_text(out.finish().trim())
}

fn visit_children(
    element: &IsolatedElement,
    out: &mut MarkdownBuilder,
    inside_code: bool,
    base: Option<&Url>,
) {
    for child in &element.children {
        match child {
            IsolatedNode::Text(text) => out.append_text(text),
            IsolatedNode::Element(el) => visit_element(el, out, inside_code, base),
        }
    }
}

fn visit_element(
    element: &IsolatedElement,
    out: &mut MarkdownBuilder,
    inside_code: bool,
    base: Option<&Url>,
) {
    if is_chrome(element) {
        return;
    }
    match element.tag.as_str() {
        "pre" => out.push_code_fence(&code_language(element), &code_text(element)),
        "img" | "canvas" => out.append_text(IMAGE_PLACEHOLDER),
        "a" if !inside_code => visit_anchor(element, out, base),
        "code" => visit_children(element, out, true, base),
        "br" => out.ensure_newline(),
        "li" => {
            out.ensure_newline();
            visit_children(element, out, inside_code, base);
            out.ensure_newline();
        }
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" => {
            out.ensure_blank_line();
            visit_children(element, out, inside_code, base);
            out.ensure_blank_line();
        }
        "div" | "section" | "article" | "header" | "footer" | "nav" | "figure" | "figcaption"
        | "table" | "tr" | "td" | "th" | "ul" | "ol" | "address" => {
            out.ensure_newline();
            visit_children(element, out, inside_code, base);
            out.ensure_newline();
        }
        "script" | "style" | "noscript" | "iframe" | "template" => {
            // Never transcript content.
        }
        _ => visit_children(element, out, inside_code, base),
    }
}

fn is_chrome(element: &IsolatedElement) -> bool {
    if matches!(element.tag.as_str(), "button" | "svg") {
        return true;
    }
    CHROME_CLASS_HINTS
        .iter()
        .any(|hint| element.class_contains(hint))
}

/// Extracts `<lang>` from the first `language-<alnum>` marker on the
/// block's `code` child. Malformed or absent markers yield an untagged
/// fence.
fn code_language(pre: &IsolatedElement) -> String {
    pre.find_descendant("code")
        .and_then(|code| language_tag(code.class()))
        .unwrap_or_default()
}

fn language_tag(class: &str) -> Option<String> {
    for (pos, _) in class.match_indices("language-") {
        let tail = &class[pos + "language-".len()..];
        let lang: String = tail
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if !lang.is_empty() {
            return Some(lang);
        }
    }
    None
}

/// Rendered text of a code block, verbatim except for removed UI chrome.
fn code_text(pre: &IsolatedElement) -> String {
    let mut out = String::new();
    collect_verbatim_text(pre, &mut out);
    out.trim().to_string()
}

fn collect_verbatim_text(element: &IsolatedElement, out: &mut String) {
    for child in &element.children {
        match child {
            IsolatedNode::Text(text) => out.push_str(text),
            IsolatedNode::Element(el) => {
                if !is_chrome(el) {
                    collect_verbatim_text(el, out);
                }
            }
        }
    }
}

fn visit_anchor(element: &IsolatedElement, out: &mut MarkdownBuilder, base: Option<&Url>) {
    let raw_href = element.attr("href").map(str::trim).unwrap_or("");
    // Empty hrefs and same-page fragments stay as plain text, as do
    // unsafe or unresolvable targets below.
    if raw_href.is_empty() || raw_href.starts_with('#') {
        visit_children(element, out, false, base);
        return;
    }
    let Some(href) = resolve_href(raw_href, base) else {
        visit_children(element, out, false, base);
        return;
    };

    let text = anchor_text(element);
    let text = if text.is_empty() { href.as_str() } else { &text };
    out.append_text(&format!(
        "[{}]({})",
        escape_link_text(text),
        escape_href(&href)
    ));
}

/// Collapsed link text; embeds inside the anchor read as their
/// placeholder, matching the substitution order of the sanitizer.
fn anchor_text(element: &IsolatedElement) -> String {
    let mut raw = String::new();
    collect_anchor_text(element, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_anchor_text(element: &IsolatedElement, out: &mut String) {
    for child in &element.children {
        match child {
            IsolatedNode::Text(text) => out.push_str(text),
            IsolatedNode::Element(el) => {
                if is_chrome(el) {
                    continue;
                }
                if matches!(el.tag.as_str(), "img" | "canvas") {
                    out.push_str(IMAGE_PLACEHOLDER);
                } else {
                    collect_anchor_text(el, out);
                }
            }
        }
    }
}

fn resolve_href(raw: &str, base: Option<&Url>) -> Option<String> {
    let resolved = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => base?.join(raw).ok()?,
    };
    if UNSAFE_SCHEMES
        .iter()
        .any(|scheme| resolved.scheme().eq_ignore_ascii_case(scheme))
    {
        return None;
    }
    Some(resolved.into())
}

fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '[' => escaped.push_str("\\["),
            ']' => escaped.push_str("\\]"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keeps the Markdown link syntax intact regardless of href content.
fn escape_href(href: &str) -> String {
    href.replace('\\', "%5C").replace(')', "%29")
}

/// Accumulates flowing text with collapsed whitespace and explicit
/// block boundaries.
struct MarkdownBuilder {
    out: String,
    last: Option<char>,
}

impl MarkdownBuilder {
    fn new() -> Self {
        Self {
            out: String::new(),
            last: None,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if self.last == Some(' ') || self.last == Some('\n') {
                    continue;
                }
                self.push(' ');
            } else {
                self.push(ch);
            }
        }
    }

    fn ensure_newline(&mut self) {
        if self.last == Some('\n') || self.out.is_empty() {
            return;
        }
        self.push('\n');
    }

    fn ensure_blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.push('\n');
        }
    }

    fn push_code_fence(&mut self, language: &str, code: &str) {
        self.ensure_blank_line();
        self.push_verbatim(&format!("```{language}\n{code}\n```"));
        self.ensure_blank_line();
    }

    fn push(&mut self, ch: char) {
        self.out.push(ch);
        self.last = Some(ch);
    }

    fn push_verbatim(&mut self, text: &str) {
        self.out.push_str(text);
        self.last = text.chars().last().or(self.last);
    }
}

/// Final text cleanup: conditional backslash escaping, newline-run
/// collapsing, and unescaping of HTML entities that leaked through
/// upstream rendering.
fn cleanup_text(text: &str) -> String {
    let escaped = escape_bare_backslashes(text);
    let collapsed = collapse_newline_runs(&escaped);
    collapsed
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Escapes a backslash only when it is not already escaping Markdown
/// punctuation, so intentional escapes are not doubled.
fn escape_bare_backslashes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '\\' && !matches!(chars.get(i + 1).copied(), Some('\\' | '*' | '_' | '`')) {
            out.push_str("\\\\");
        } else {
            out.push(c);
        }
    }
    out
}

/// Collapses any run of 3+ consecutive newlines to exactly 2.
fn collapse_newline_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            continue;
        }
        if run > 0 {
            out.push_str(if run >= 2 { "\n\n" } else { "\n" });
            run = 0;
        }
        out.push(c);
    }
    if run > 0 {
        out.push_str(if run >= 2 { "\n\n" } else { "\n" });
    }
    out
}
