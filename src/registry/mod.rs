pub mod header;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::WalkDir;

use crate::registry::header::extract_declared_name;

/// Page templates bundled with the plugin, discovered once at startup.
///
/// Maps the absolute path of each declaring file to its display name.
/// The mapping is immutable after construction; refreshing it means
/// building a new registry.
#[derive(Debug, Default)]
pub struct PageTemplateRegistry {
    entries: BTreeMap<PathBuf, String>,
}

impl PageTemplateRegistry {
    /// Scan `root` recursively for files declaring a template name.
    ///
    /// A missing or unreadable root is not fatal: the registry comes back
    /// empty and the plugin simply offers no custom page templates.
    /// Individual unreadable files are skipped.
    pub fn scan(root: &Path, exclude: &GlobSet) -> Self {
        let mut entries = BTreeMap::new();

        if !root.is_dir() {
            tracing::warn!(
                "template pages directory {} is missing, registering no page templates",
                root.display()
            );
            return Self { entries };
        }

        for entry in WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let rel = path.strip_prefix(root).unwrap_or(path);
            if exclude.is_match(rel) {
                continue;
            }

            let contents = match std::fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::debug!("skipping unreadable {}: {e}", path.display());
                    continue;
                }
            };

            if let Some(name) = extract_declared_name(&contents) {
                entries.insert(path.to_path_buf(), name);
            }
        }

        Self { entries }
    }

    /// Full path -> display-name mapping, for merging into the host's
    /// page template listing.
    pub fn entries(&self) -> &BTreeMap<PathBuf, String> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Validate a previously persisted selection against the registry.
    ///
    /// The on-disk check runs again here: the filesystem may have changed
    /// since the selection was saved. Unknown or vanished paths resolve
    /// to `None`, which callers treat as "fall through to the host
    /// default" rather than an error.
    pub fn resolve_assigned(&self, selected: &Path) -> Option<&Path> {
        let (path, _) = self.entries.get_key_value(selected)?;
        if path.exists() {
            Some(path.as_path())
        } else {
            tracing::warn!(
                "assigned page template {} no longer exists on disk, using host default",
                path.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::GlobSetBuilder;

    fn no_excludes() -> GlobSet {
        GlobSetBuilder::new().build().unwrap()
    }

    fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn scan_finds_declaring_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let foo = write(
            dir.path(),
            "a/foo.php",
            "<?php /* Template Name: Foo Page */\n",
        );
        write(dir.path(), "a/b/bar.txt", "no header here\n");

        let registry = PageTemplateRegistry::scan(dir.path(), &no_excludes());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries()[&foo], "Foo Page");
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let registry =
            PageTemplateRegistry::scan(Path::new("/nonexistent/pages"), &no_excludes());
        assert!(registry.is_empty());
    }

    #[test]
    fn scan_skips_excluded_globs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "keep.php", "Template Name: Keep\n");
        write(dir.path(), "drafts/skip.php", "Template Name: Skip\n");

        let exclude = {
            let mut builder = GlobSetBuilder::new();
            builder.add(globset::Glob::new("drafts/**").unwrap());
            builder.build().unwrap()
        };

        let registry = PageTemplateRegistry::scan(dir.path(), &exclude);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.entries().values().next().map(String::as_str),
            Some("Keep")
        );
    }

    #[test]
    fn resolve_assigned_known_and_existing() {
        let dir = tempfile::tempdir().unwrap();
        let page = write(dir.path(), "page.php", "Template Name: Page\n");

        let registry = PageTemplateRegistry::scan(dir.path(), &no_excludes());
        assert_eq!(registry.resolve_assigned(&page), Some(page.as_path()));
    }

    #[test]
    fn resolve_assigned_unknown_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "page.php", "Template Name: Page\n");

        let registry = PageTemplateRegistry::scan(dir.path(), &no_excludes());
        assert!(registry
            .resolve_assigned(Path::new("/somewhere/else.php"))
            .is_none());
    }

    #[test]
    fn resolve_assigned_vanished_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let page = write(dir.path(), "page.php", "Template Name: Page\n");

        let registry = PageTemplateRegistry::scan(dir.path(), &no_excludes());
        std::fs::remove_file(&page).unwrap();
        assert!(registry.resolve_assigned(&page).is_none());
    }
}
