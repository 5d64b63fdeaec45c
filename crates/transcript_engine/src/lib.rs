//! Transcript engine: locates, sanitizes and classifies conversation
//! messages inside a rendered document and assembles the Markdown export.
mod classify;
mod decode;
mod export;
mod metadata;
mod node;
mod persist;
mod sanitize;
mod scan;
mod validate;

pub use classify::classify_sender;
pub use decode::{decode_document, DecodeError, DecodedDocument};
pub use export::{export_conversation, ExportError, RenderedExport};
pub use metadata::{conversation_title, page_title};
pub use node::{isolate, IsolatedElement, IsolatedNode};
pub use persist::{ensure_output_dir, save_export, SaveError};
pub use sanitize::sanitize_message;
pub use scan::find_candidate_nodes;
pub use validate::{consolidate, TurnCandidate};
