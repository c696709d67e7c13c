use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Optional host configuration, read from a `KEY=VALUE` dot-file.
/// Missing file or missing keys simply fall back to defaults.
#[derive(Debug, Default)]
pub struct CleanerConfig {
    pub modules_dir: Option<String>,
    pub action_url: Option<String>,
    pub permissions: Vec<String>,
}

impl CleanerConfig {
    #[must_use]
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let mut map = HashMap::new();

        for line in content.lines() {
            if let Some((k, v)) = line.split_once('=') {
                let key = k.trim();
                let val = v.trim().trim_matches('"');
                map.insert(key, val);
            }
        }

        let permissions = map
            .get("PERMISSIONS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(CleanerConfig {
            modules_dir: map.get("MODULES_DIR").map(ToString::to_string),
            action_url: map.get("ACTION_URL").map(ToString::to_string),
            permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cleaner_config");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "MODULES_DIR=\"/srv/cms/site/modules\"").unwrap();
        writeln!(file, "ACTION_URL=/admin/setup/module-cleaner/delete/").unwrap();
        writeln!(file, "PERMISSIONS=module-admin, site-admin").unwrap();

        let cfg = CleanerConfig::load(&path).unwrap();
        assert_eq!(cfg.modules_dir.as_deref(), Some("/srv/cms/site/modules"));
        assert_eq!(
            cfg.action_url.as_deref(),
            Some("/admin/setup/module-cleaner/delete/")
        );
        assert_eq!(cfg.permissions, vec!["module-admin", "site-admin"]);
    }

    #[test]
    fn test_missing_file_returns_none() {
        assert!(CleanerConfig::load(Path::new("/nonexistent/.cleaner_config")).is_none());
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cleaner_config");
        fs::write(&path, "# comment only\n").unwrap();

        let cfg = CleanerConfig::load(&path).unwrap();
        assert!(cfg.modules_dir.is_none());
        assert!(cfg.action_url.is_none());
        assert!(cfg.permissions.is_empty());
    }
}
