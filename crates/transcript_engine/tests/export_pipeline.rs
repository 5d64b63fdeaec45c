use pretty_assertions::assert_eq;
use transcript_engine::{export_conversation, ExportError};

#[test]
fn full_document_renders_the_expected_layout() {
    let html = r#"<html>
<head><title>Borrow checker help - ChatGPT</title></head>
<body>
<h1>Borrow checker help</h1>
<main>
<div data-message-author-role="user">Can you explain why the borrow checker rejects my loop over a vector?</div>
<div data-message-author-role="assistant">Certainly, the loop holds an immutable borrow while you try to push, and the two borrows cannot overlap.</div>
</main>
</body></html>"#;

    let rendered = export_conversation(html, "https://chat.openai.com/c/abc", "2024-05-01")
        .expect("two valid messages");

    assert_eq!(rendered.message_count, 2);
    assert_eq!(
        rendered.filename,
        "Borrow checker help - ChatGPT (2024-05-01).md"
    );

    let expected = "# Borrow checker help\n\
\n\
**Date:** 2024-05-01\n\
**Source:** [chat.openai.com](https://chat.openai.com/c/abc)\n\
\n\
---\n\
\n\
### **You**\n\
\n\
Can you explain why the borrow checker rejects my loop over a vector?\n\
\n\
---\n\
\n\
### **ChatGPT**\n\
\n\
Certainly, the loop holds an immutable borrow while you try to push, and the two borrows cannot overlap.\n\
\n\
---\n";
    assert_eq!(rendered.markdown, expected);
}

#[test]
fn duplicate_content_is_dropped_before_correction() {
    let repeated = "The very same answer body, repeated verbatim by the page shell below.";
    let html = format!(
        r#"<html><body><main>
<div data-message-author-role="user">A question that is long enough to pass every validation rule.</div>
<div data-message-author-role="assistant">{repeated}</div>
<div data-message-author-role="assistant">{repeated}</div>
</main></body></html>"#
    );

    let rendered =
        export_conversation(&html, "https://chat.openai.com/c/dup", "2024-05-01").unwrap();

    assert_eq!(rendered.message_count, 2);
    assert_eq!(rendered.markdown.matches(repeated).count(), 1);
}

#[test]
fn empty_result_is_the_defined_terminal_state() {
    let html = "<html><body><main><div>too short</div></main></body></html>";
    assert_eq!(
        export_conversation(html, "https://chat.openai.com/", "2024-05-01"),
        Err(ExportError::NoMessages)
    );
}

#[test]
fn document_without_any_container_also_reports_no_messages() {
    let html = "<html><body><p>just a paragraph of prose, nothing conversational</p></body></html>";
    assert_eq!(
        export_conversation(html, "https://chat.openai.com/", "2024-05-01"),
        Err(ExportError::NoMessages)
    );
}

#[test]
fn corrector_runs_on_the_classified_sequence() {
    // Both turns carry the assistant role marker and comparable lengths,
    // so the repair pass flips the second one.
    let html = r#"<html><body><main>
<div data-message-author-role="assistant">First answer fragment with a comfortable middle length to it.</div>
<div data-message-author-role="assistant">Second answer fragment, also of a comfortable middle length.</div>
</main></body></html>"#;

    let rendered =
        export_conversation(html, "https://chat.openai.com/c/fix", "2024-05-01").unwrap();

    let chatgpt_at = rendered.markdown.find("### **ChatGPT**").unwrap();
    let you_at = rendered.markdown.find("### **You**").unwrap();
    assert!(chatgpt_at < you_at, "second same-sender turn must flip");
}

#[test]
fn missing_title_falls_back_in_heading_and_filename() {
    let html = r#"<html><body><main>
<div data-message-author-role="user">A question that is long enough to pass every validation rule.</div>
<div data-message-author-role="assistant">An answer that is long enough to pass every validation rule.</div>
</main></body></html>"#;

    let rendered =
        export_conversation(html, "https://chat.openai.com/c/abc", "2024-05-01").unwrap();

    assert!(rendered.markdown.starts_with("# Conversation with ChatGPT\n"));
    assert_eq!(rendered.filename, "ChatGPT_Conversation_2024-05-01.md");
}
