use pretty_assertions::assert_eq;
use scraper::{Html, Selector};
use transcript_engine::{isolate, sanitize_message, IsolatedElement};
use url::Url;

fn isolated(inner_html: &str) -> IsolatedElement {
    let html = format!(r#"<html><body><div id="m">{inner_html}</div></body></html>"#);
    let document = Html::parse_document(&html);
    let selector = Selector::parse("#m").unwrap();
    let element = document.select(&selector).next().unwrap();
    isolate(element)
}

fn sanitize(inner_html: &str) -> String {
    sanitize_message(&isolated(inner_html), None)
}

#[test]
fn code_block_becomes_a_language_tagged_fence() {
    let out = sanitize(r#"<p>Look:</p><pre><code class="language-python">print(1)</code></pre>"#);
    assert_eq!(out, "Look:\n\n```python\nprint(1)\n```");
}

#[test]
fn missing_language_marker_yields_an_untagged_fence() {
    let out = sanitize("<pre><code>let x = 1;</code></pre>");
    assert_eq!(out, "```\nlet x = 1;\n```");
}

#[test]
fn code_text_is_kept_verbatim() {
    let out = sanitize(
        "<pre><code class=\"language-rust\">fn main() {\n    println!(\"hi\");\n}</code></pre>",
    );
    assert!(out.starts_with("```rust\n"));
    assert!(out.contains("    println!(\"hi\");"));
}

#[test]
fn chrome_inside_a_code_block_is_excluded_from_the_fence() {
    let out = sanitize(
        r#"<pre><code class="language-sh">echo hi</code><button class="copy-btn">Copy</button></pre>"#,
    );
    assert_eq!(out, "```sh\necho hi\n```");
}

#[test]
fn images_and_canvases_become_placeholders() {
    let out = sanitize(r#"<p>Before <img src="x.png"> after <canvas></canvas></p>"#);
    assert_eq!(out, "Before [Image or Canvas] after [Image or Canvas]");
}

#[test]
fn ui_chrome_is_removed() {
    let out = sanitize(
        r#"<div>Keep this sentence intact.<button>Copy</button><svg></svg><span class="copy-code">Copy code</span></div>"#,
    );
    assert_eq!(out, "Keep this sentence intact.");
}

#[test]
fn unsafe_scheme_links_stay_plain_text() {
    for href in [
        "javascript:alert(1)",
        "JAVASCRIPT:alert(1)",
        "data:text/html,hi",
        "vbscript:msgbox",
    ] {
        let out = sanitize(&format!(r#"<p>Click <a href="{href}">here</a> now</p>"#));
        assert_eq!(out, "Click here now", "href {href} must not convert");
    }
}

#[test]
fn fragment_and_empty_hrefs_stay_plain_text() {
    let out = sanitize(r##"<p><a href="#top">Jump</a> and <a href="">Nothing</a> stay</p>"##);
    assert_eq!(out, "Jump and Nothing stay");
}

#[test]
fn safe_links_convert_to_markdown() {
    let out = sanitize(r#"<p>See <a href="https://example.com/docs">the docs</a> for more</p>"#);
    assert_eq!(out, "See [the docs](https://example.com/docs) for more");
}

#[test]
fn empty_link_text_falls_back_to_the_href() {
    let out = sanitize(r#"<p>Ref: <a href="https://example.com/x"></a></p>"#);
    assert_eq!(out, "Ref: [https://example.com/x](https://example.com/x)");
}

#[test]
fn link_text_and_href_are_escaped() {
    let out = sanitize(r#"<p><a href="https://example.com/a)b">see [notes] here</a></p>"#);
    assert_eq!(out, "[see \\\\[notes\\\\] here](https://example.com/a%29b)");
}

#[test]
fn anchors_inside_inline_code_are_not_converted() {
    let out =
        sanitize(r#"<p>Run <code>curl <a href="https://example.com/api">endpoint</a></code> now</p>"#);
    assert_eq!(out, "Run curl endpoint now");
}

#[test]
fn relative_hrefs_resolve_against_the_source_url() {
    let base = Url::parse("https://chat.openai.com/c/123").unwrap();
    let root = isolated(r#"<p><a href="/c/abc">prior chat</a></p>"#);
    let out = sanitize_message(&root, Some(&base));
    assert_eq!(out, "[prior chat](https://chat.openai.com/c/abc)");
}

#[test]
fn unresolvable_relative_hrefs_stay_plain_text() {
    let out = sanitize(r#"<p><a href="/c/abc">prior chat</a></p>"#);
    assert_eq!(out, "prior chat");
}

#[test]
fn bare_backslashes_are_escaped_but_markdown_escapes_are_kept() {
    let out = sanitize("<p>a\\b and c\\*d</p>");
    assert_eq!(out, "a\\\\b and c\\*d");
}

#[test]
fn newline_runs_collapse_to_exactly_two() {
    let out = sanitize("<pre>first\n\n\n\nsecond</pre>");
    assert_eq!(out, "```\nfirst\n\nsecond\n```");
}

#[test]
fn leaked_html_entities_are_unescaped() {
    let out = sanitize("<p>1 &amp;lt; 2 &amp;amp; 3 &amp;gt; 1</p>");
    assert_eq!(out, "1 < 2 & 3 > 1");
}
