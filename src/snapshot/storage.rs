use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use crate::fetch::Dataset;

pub const SCORES_FILE: &str = "scores.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PARTICIPANTS_FILE: &str = "participants.json";

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Serialize a value to a JSON file atomically
///
/// Uses atomic-write-file so a reader never sees a half-written file.
/// Creates the parent directory if it doesn't exist.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

/// Load a snapshot directory.
///
/// `scores.json` and `categories.json` are required; a missing
/// `participants.json` yields an empty participant list.
pub fn load_snapshot(dir: &Path) -> Result<Dataset> {
    if !dir.is_dir() {
        anyhow::bail!(
            "Snapshot directory not found at {}. Run `competency-scores fetch --phase <id>` first",
            dir.display()
        );
    }

    let scores = read_json(&dir.join(SCORES_FILE))?;
    let categories = read_json(&dir.join(CATEGORIES_FILE))?;

    let participants_path = dir.join(PARTICIPANTS_FILE);
    let participants = if participants_path.exists() {
        read_json(&participants_path)?
    } else {
        Vec::new()
    };

    Ok(Dataset {
        scores,
        categories,
        participants,
    })
}

/// Write all three snapshot files into `dir`
pub fn save_snapshot(dir: &Path, dataset: &Dataset) -> Result<()> {
    write_json(&dir.join(SCORES_FILE), &dataset.scores)?;
    write_json(&dir.join(CATEGORIES_FILE), &dataset.categories)?;
    write_json(&dir.join(PARTICIPANTS_FILE), &dataset.participants)?;
    Ok(())
}
