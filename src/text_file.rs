// text_file.rs - Overlay Text Source
//
// Reading the initial overlay text and writing edits back to the watched file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};

/// Text shown when the source file is missing or unreadable
pub fn placeholder(path: &Path) -> String {
    format!(
        "No text loaded, use the settings window or put text to '{}'",
        path.display()
    )
}

/// Read the whole file, or the placeholder when it cannot be read
pub fn load_text(path: &Path) -> String {
    if !path.exists() {
        info!("Text file {:?} does not exist", path);
        return placeholder(path);
    }
    match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            error!("Failed to read text file {:?}: {}", path, e);
            placeholder(path)
        }
    }
}

/// Overwrite the file with `content`
pub fn save_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write text file {:?}", path))?;
    info!("Saved {} bytes to {:?}", content.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let text = load_text(&path);
        assert!(text.starts_with("No text loaded"));
        assert!(text.contains("absent.txt"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.txt");
        save_text(&path, "héllo\nwörld").unwrap();
        assert_eq!(load_text(&path), "héllo\nwörld");
    }
}
