//! Transcript core: pure message model, sequence repair and rendering.
mod correct;
mod filename;
mod message;
mod render;

pub use correct::repair_sender_sequence;
pub use filename::export_filename;
pub use message::{fingerprint, ConversationExport, ExtractedMessage, Sender};
pub use render::render_markdown;
