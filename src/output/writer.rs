// Tue Jan 20 2026 - Alex

use crate::structure::{LayoutError, LayoutResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Replaces `path` with `text`. A failed write leaves the previous file in place.
pub fn write_artifact(text: &str, path: &Path) -> LayoutResult<()> {
    let tmp = temp_path(path);
    let result = fs::write(&tmp, text).and_then(|_| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(LayoutError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    log::info!("Writing {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
