use anyhow::{Context, Result};
use quran_model::{OutputDocument, Passage};
use std::fs;
use std::path::{Path, PathBuf};

/// Default destination, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "data/quran.json";

/// What [`persist`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Written { path: PathBuf, bytes: u64 },
    /// Nothing was collected, so no file was created or overwritten.
    Skipped,
}

impl PersistOutcome {
    /// File size in megabytes (MiB), `0.0` when skipped.
    pub fn size_mb(&self) -> f64 {
        match self {
            PersistOutcome::Written { bytes, .. } => *bytes as f64 / 1024.0 / 1024.0,
            PersistOutcome::Skipped => 0.0,
        }
    }
}

/// Write all passages as one JSON document.
///
/// Creates the parent directory if it doesn't exist. An empty collection
/// leaves the filesystem untouched.
pub fn persist(passages: &[Passage], path: &Path) -> Result<PersistOutcome> {
    if passages.is_empty() {
        tracing::warn!(path = %path.display(), "No passages to write");
        return Ok(PersistOutcome::Skipped);
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let document = OutputDocument::new(passages.to_vec());
    let json = document.to_json_pretty()?;
    fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;

    let bytes = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    tracing::info!(path = %path.display(), passages = passages.len(), bytes, "Wrote passages JSON");

    Ok(PersistOutcome::Written {
        path: path.to_path_buf(),
        bytes,
    })
}

/// Read a previously written document back.
pub fn load(path: &Path) -> Result<OutputDocument> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    OutputDocument::from_json(&contents)
        .with_context(|| format!("{} is not a passages document", path.display()))
}
