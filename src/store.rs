use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Raw HTML snapshot read. A missing file is fatal; the caller decides how to
/// name the record that should have been there.
pub fn read_html(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("no file found at {}", path.display()))
}

pub fn write_text(path: &Path, body: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))
}

/// Pretty-printed (2-space) JSON, written to a temp file and renamed over the
/// destination so an interrupted write never leaves a truncated dataset.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize json for {}", path.display()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    Ok(())
}
