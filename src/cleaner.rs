use std::fs;
use std::path::Path;

/// Checks a submitted folder name against the same rule the scanner uses,
/// plus a path-separator check so a crafted name can never escape the
/// modules directory.
#[must_use]
pub fn is_valid_folder_name(name: &str) -> bool {
    // "." and ".." pass the prefix rule but resolve to the modules
    // directory itself or its parent
    name.starts_with('.')
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

/// Deletes the requested folders under `base` and returns how many were
/// actually removed.
///
/// CSRF and permission checks have already happened by the time this runs.
/// Each name is re-validated independently of the scan that produced the
/// listing: trimmed, required to start with a dot, and rejected if it
/// contains a path separator. Deletions are best-effort and independent;
/// a folder that is already gone or fails to delete is skipped without
/// aborting the rest of the batch.
pub fn delete_folders(base: &Path, requested_names: &[String]) -> usize {
    let mut success_count = 0;

    for raw_name in requested_names {
        let name = raw_name.trim();

        if !is_valid_folder_name(name) {
            log::debug!("rejected folder name {name:?}");
            continue;
        }

        let full_path = base.join(name);
        if !full_path.is_dir() {
            log::debug!("skipping {name}: not an existing directory");
            continue;
        }

        match fs::remove_dir_all(&full_path) {
            Ok(()) => success_count += 1,
            Err(e) => log::warn!("failed to delete {}: {e}", full_path.display()),
        }
    }

    success_count
}
