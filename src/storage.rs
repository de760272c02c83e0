//! Document persistence.
//!
//! Writes go through a sibling temp file plus rename so a failed write
//! never leaves a half-written document behind. New directories get an
//! `_index.md` placeholder so the renderer can produce a browseable
//! section page.

use crate::content::ContentError;
use std::{fs, path::Path};

/// Persist a serialized document.
///
/// Missing parent directories are created. With `overwrite` disabled an
/// existing target fails with `FileConflict` and nothing is touched.
pub fn write(path: &Path, content: &str, overwrite: bool) -> Result<(), ContentError> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|err| ContentError::DirectoryCreateFailed(parent.to_path_buf(), err))?;
        let placeholder = parent.join("_index.md");
        fs::write(&placeholder, "")
            .map_err(|err| ContentError::FileWriteFailed(placeholder.clone(), err))?;
    }

    if path.exists() && !overwrite {
        return Err(ContentError::FileConflict(path.to_path_buf()));
    }

    let tmp = path.with_extension("md.tmp");
    if let Err(err) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(ContentError::FileWriteFailed(path.to_path_buf(), err));
    }
    fs::rename(&tmp, path).map_err(|err| {
        let _ = fs::remove_file(&tmp);
        ContentError::FileWriteFailed(path.to_path_buf(), err)
    })
}

/// Remove a rendered artifact. Failure (including an already-missing file)
/// is terminal for the delete operation.
pub fn remove_artifact(path: &Path) -> Result<(), ContentError> {
    fs::remove_file(path).map_err(|err| ContentError::UnlinkFailed(path.to_path_buf(), err))
}

// ============================================================================
// Tests
// ============================================================================
