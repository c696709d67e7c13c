use crate::types::FolderEntry;
use chrono::{DateTime, Local};
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Scans the modules directory for immediate subdirectories whose name
/// starts with a dot. A missing or unreadable directory means there is
/// nothing to clean, so it yields an empty list instead of an error.
#[must_use]
pub fn find_hidden_folders(path: &Path) -> Vec<FolderEntry> {
    if !path.is_dir() {
        return Vec::new();
    }

    let mut folders: Vec<FolderEntry> = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if !name.starts_with('.') {
                return None;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log::debug!("skipping {name}: cannot read metadata: {e}");
                    return None;
                }
            };

            // Use UNIX_EPOCH as fallback instead of now() to avoid falsely marking
            // folders as "recent" when we can't read their modification time
            let modified: DateTime<Local> =
                metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into();

            Some(FolderEntry { name, modified })
        })
        .collect();

    // Filesystem order is not deterministic across platforms
    folders.sort_by(|a, b| a.name.cmp(&b.name));
    folders
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_only_dot_prefixed_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".OldModule")).unwrap();
        fs::create_dir(dir.path().join("RegularModule")).unwrap();
        fs::write(dir.path().join(".hidden_file"), "not a directory").unwrap();

        let folders = find_hidden_folders(dir.path());
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, ".OldModule");
    }

    #[test]
    fn test_missing_directory_yields_empty_list() {
        let folders = find_hidden_folders(Path::new("/nonexistent/modules/path"));
        assert!(folders.is_empty());
    }

    #[test]
    fn test_path_to_file_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "content").unwrap();

        assert!(find_hidden_folders(&file).is_empty());
    }

    #[test]
    fn test_no_recursion_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Nested")).unwrap();
        fs::create_dir(dir.path().join("Nested").join(".deep")).unwrap();

        assert!(find_hidden_folders(dir.path()).is_empty());
    }

    #[test]
    fn test_output_is_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".Zeta")).unwrap();
        fs::create_dir(dir.path().join(".Alpha")).unwrap();
        fs::create_dir(dir.path().join(".Mid")).unwrap();

        let names: Vec<String> = find_hidden_folders(dir.path())
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec![".Alpha", ".Mid", ".Zeta"]);
    }

    #[test]
    fn test_modified_time_comes_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".OldModule");
        fs::create_dir(&target).unwrap();

        let expected: DateTime<Local> =
            fs::metadata(&target).unwrap().modified().unwrap().into();

        let folders = find_hidden_folders(dir.path());
        assert_eq!(folders[0].modified, expected);
    }
}
