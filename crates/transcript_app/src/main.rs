//! Command-line exporter: reads an already-rendered conversation page and
//! writes a speaker-attributed Markdown transcript next to it.
mod config;
mod logging;

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use transcript_engine::{decode_document, export_conversation, save_export, ExportError};

const DEFAULT_SOURCE_URL: &str = "https://chat.openai.com/";

fn main() -> Result<()> {
    logging::initialize(logging::LogDestination::Terminal);

    let mut args = env::args().skip(1);
    let Some(input_path) = args.next() else {
        bail!("usage: transcript_app <rendered-page.html> [source-url]");
    };
    let source_url = args
        .next()
        .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());

    let settings = config::load_run_config();

    let bytes = fs::read(&input_path).with_context(|| format!("reading {input_path}"))?;
    let decoded = decode_document(&bytes).context("decoding input document")?;
    log::info!(
        "Decoded {} bytes as {}",
        bytes.len(),
        decoded.encoding_label
    );

    let export_date = Utc::now().format("%Y-%m-%d").to_string();
    match export_conversation(&decoded.html, &source_url, &export_date) {
        Ok(rendered) => {
            let path = save_export(&settings.output_dir, &rendered.filename, &rendered.markdown)?;
            println!(
                "Export completed: {} messages written to {}",
                rendered.message_count,
                path.display()
            );
            Ok(())
        }
        Err(ExportError::NoMessages) => {
            // Defined terminal state, not a failure of the run itself.
            log::warn!("No messages survived extraction");
            eprintln!("No messages found. The page structure may have changed.");
            Ok(())
        }
    }
}
