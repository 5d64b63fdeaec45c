use url::Url;

use crate::message::ConversationExport;

const FALLBACK_SOURCE_LABEL: &str = "chat.openai.com";

/// Assembles the final Markdown document: title heading, date and source
/// lines, then one `### **<sender>**` section per message, separated by
/// horizontal rules.
pub fn render_markdown(export: &ConversationExport) -> String {
    let mut lines = Vec::with_capacity(4 + export.messages.len() * 3);
    lines.push(format!("# {}\n", export.title));
    lines.push(format!("**Date:** {}", export.date));
    lines.push(format!(
        "**Source:** [{}]({})\n",
        source_label(&export.source_url),
        export.source_url
    ));
    lines.push("---\n".to_string());

    for message in &export.messages {
        lines.push(format!("### **{}**\n", message.sender));
        lines.push(message.content.clone());
        lines.push("\n---\n".to_string());
    }

    lines.join("\n")
}

fn source_label(source_url: &str) -> String {
    Url::parse(source_url)
        .ok()
        .and_then(|url| url.host_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| FALLBACK_SOURCE_LABEL.to_string())
}
