//! Zip archive extraction.
//!
//! Extraction goes through a temporary sibling directory and is renamed into
//! place only once every entry has been written, so a failure partway
//! through never leaves a partial destination behind.

use nitro_action_core::{Error, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

/// Extract a zip archive fully into `dest`.
pub fn extract_zip(data: &[u8], dest: &Path) -> Result<()> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| Error::tool_acquisition(format!("failed to open zip: {}", e)))?;

    let temp_dir = dest.with_file_name(format!(
        ".{}.tmp",
        dest.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("extract")
    ));

    // Clean up any previous failed extraction
    if temp_dir.exists() {
        std::fs::remove_dir_all(&temp_dir)?;
    }
    std::fs::create_dir_all(&temp_dir)?;

    let extract_result = (|| -> Result<()> {
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::tool_acquisition(format!("failed to read zip entry: {}", e)))?;

            let outpath = match file.enclosed_name() {
                Some(path) => temp_dir.join(path),
                None => continue,
            };

            if file.is_dir() {
                std::fs::create_dir_all(&outpath)?;
            } else {
                if let Some(parent) = outpath.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let mut content = Vec::new();
                file.read_to_end(&mut content)?;
                std::fs::write(&outpath, &content)?;

                #[cfg(unix)]
                if let Some(mode) = file.unix_mode() {
                    use std::os::unix::fs::PermissionsExt;
                    let mut perms = std::fs::metadata(&outpath)?.permissions();
                    perms.set_mode(mode);
                    std::fs::set_permissions(&outpath, perms)?;
                }
            }
        }
        Ok(())
    })();

    if let Err(e) = extract_result {
        let _ = std::fs::remove_dir_all(&temp_dir);
        return Err(e);
    }

    // Atomic move: remove destination if it exists, then rename temp to dest
    if dest.exists() {
        std::fs::remove_dir_all(dest)?;
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::rename(&temp_dir, dest)?;

    debug!(dest = %dest.display(), "Extracted archive");
    Ok(())
}
