use chrono::{DateTime, Local};

/// One orphaned module folder found by the scanner.
/// Invariant: `name` starts with a dot.
#[derive(Debug, Clone)]
pub struct FolderEntry {
    pub name: String,
    pub modified: DateTime<Local>,
}
