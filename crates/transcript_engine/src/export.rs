use std::collections::HashSet;

use export_logging::{export_debug, export_info};
use scraper::Html;
use url::Url;

use transcript_core::{
    export_filename, render_markdown, repair_sender_sequence, ConversationExport, ExtractedMessage,
};

use crate::classify::classify_sender;
use crate::metadata;
use crate::node;
use crate::sanitize::sanitize_message;
use crate::scan::find_candidate_nodes;
use crate::validate::{consolidate, MAX_CONTENT_CHARS, MIN_CONTENT_CHARS};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExportError {
    /// Defined terminal state, not a crash: the document yielded no usable
    /// messages and no artifact is produced.
    #[error("no conversation messages found in the document")]
    NoMessages,
}

/// One fully rendered export, ready to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExport {
    pub markdown: String,
    pub filename: String,
    pub message_count: usize,
}

/// Runs the whole pipeline over an already-rendered document.
///
/// `export_date` is the ISO-8601 date stamped into the document and the
/// filename; `source_url` labels the `**Source:**` line and resolves
/// relative links. The run is synchronous and side-effect free; saving is
/// the caller's step.
pub fn export_conversation(
    html: &str,
    source_url: &str,
    export_date: &str,
) -> Result<RenderedExport, ExportError> {
    let document = Html::parse_document(html);
    let base_url = Url::parse(source_url).ok();

    let nodes = find_candidate_nodes(&document);
    let candidates = consolidate(&nodes);
    if candidates.is_empty() {
        return Err(ExportError::NoMessages);
    }
    export_info!("Processing {} messages", candidates.len());

    // Per-run accumulator; exports must not interfere with each other.
    let mut seen_fingerprints = HashSet::new();
    let mut messages: Vec<ExtractedMessage> = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let sender = classify_sender(candidate, &candidates);
        let isolated = node::isolate(candidate.node);
        let content = sanitize_message(&isolated, base_url.as_ref());

        let length = content.chars().count();
        if length < MIN_CONTENT_CHARS || length > MAX_CONTENT_CHARS {
            export_debug!(
                "Skipping message {}: content out of bounds after sanitization",
                candidate.original_index
            );
            continue;
        }

        let message = ExtractedMessage::new(sender, content, candidate.original_index);
        if !seen_fingerprints.insert(message.fingerprint.clone()) {
            export_debug!(
                "Skipping message {}: duplicate content",
                candidate.original_index
            );
            continue;
        }
        messages.push(message);
    }

    if messages.is_empty() {
        return Err(ExportError::NoMessages);
    }

    let repaired = repair_sender_sequence(&mut messages);
    if repaired > 0 {
        export_info!("Adjusted {repaired} consecutive same-sender pairs");
    }

    let export = ConversationExport {
        title: metadata::conversation_title(&document),
        date: export_date.to_string(),
        source_url: source_url.to_string(),
        messages,
    };
    let markdown = render_markdown(&export);
    let filename = export_filename(metadata::page_title(&document).as_deref(), export_date);
    let message_count = export.messages.len();
    export_info!("Export completed: {message_count} messages exported");

    Ok(RenderedExport {
        markdown,
        filename,
        message_count,
    })
}
