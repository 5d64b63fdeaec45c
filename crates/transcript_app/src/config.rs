use std::fs;
use std::path::PathBuf;

use export_logging::export_warn;
use serde::Deserialize;

const CONFIG_FILENAME: &str = ".transcript_export.ron";

/// Optional per-run settings; everything defaults when the file is absent.
/// This is read-only configuration, never written back.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Reads `.transcript_export.ron` from the working directory. A missing
/// file means defaults; a malformed one is reported and ignored.
pub fn load_run_config() -> RunConfig {
    let content = match fs::read_to_string(CONFIG_FILENAME) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return RunConfig::default();
        }
        Err(err) => {
            export_warn!("Failed to read {CONFIG_FILENAME}: {err}");
            return RunConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            export_warn!("Failed to parse {CONFIG_FILENAME}: {err}");
            RunConfig::default()
        }
    }
}
