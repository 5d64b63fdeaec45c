use std::fmt;

/// Inferred author of one transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn opposite(self) -> Self {
        match self {
            Sender::User => Sender::Assistant,
            Sender::Assistant => Sender::User,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "You"),
            Sender::Assistant => write!(f, "ChatGPT"),
        }
    }
}

/// One sanitized transcript turn. `content` is immutable after
/// sanitization; `sender` may be rewritten once by sequence repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub sender: Sender,
    pub content: String,
    pub original_index: usize,
    pub fingerprint: String,
}

impl ExtractedMessage {
    pub fn new(sender: Sender, content: String, original_index: usize) -> Self {
        let fingerprint = fingerprint(&content);
        Self {
            sender,
            content,
            original_index,
            fingerprint,
        }
    }
}

/// Duplicate-detection key: the first 100 characters of the
/// whitespace-collapsed content.
pub fn fingerprint(content: &str) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(100).collect()
}

/// Terminal artifact consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationExport {
    pub title: String,
    pub date: String,
    pub source_url: String,
    pub messages: Vec<ExtractedMessage>,
}
