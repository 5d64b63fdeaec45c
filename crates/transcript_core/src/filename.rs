/// Export filename: the sanitized page title suffixed with the export date
/// in parentheses, or `ChatGPT_Conversation_<date>.md` when no usable title
/// exists.
pub fn export_filename(page_title: Option<&str>, date: &str) -> String {
    let sanitized = page_title.map(sanitize_title).unwrap_or_default();
    if sanitized.is_empty() {
        format!("ChatGPT_Conversation_{date}.md")
    } else {
        format!("{sanitized} ({date}).md")
    }
}

fn sanitize_title(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| !is_forbidden(*c)).collect();
    // Collapse whitespace runs and trim in one go.
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
}
