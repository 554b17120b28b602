use std::path::PathBuf;

use sha2::{Digest, Sha256};

/// Directories and identity of the active theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDirs {
    /// Active (child) theme directory.
    pub stylesheet_dir: PathBuf,
    /// Parent theme directory. Equal to `stylesheet_dir` when the active
    /// theme is not a child theme.
    pub template_dir: PathBuf,
    /// Root under which themes are installed.
    pub theme_root: PathBuf,
    /// Active theme slug.
    pub stylesheet: String,
}

impl ThemeDirs {
    pub fn is_child_theme(&self) -> bool {
        self.stylesheet_dir != self.template_dir
    }
}

/// Cache key for the themes-scoped page-template listing.
///
/// Derived from the theme root and active theme slug so each theme gets
/// its own entry; the truncated hex digest keeps keys short.
pub fn theme_cache_key(theme: &ThemeDirs) -> String {
    let mut hasher = Sha256::new();
    hasher.update(theme.theme_root.to_string_lossy().as_bytes());
    hasher.update(b"/");
    hasher.update(theme.stylesheet.as_bytes());
    let digest = hasher.finalize();
    let hash: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
    format!("page_templates-{hash}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(stylesheet: &str) -> ThemeDirs {
        ThemeDirs {
            stylesheet_dir: PathBuf::from("/themes").join(stylesheet),
            template_dir: PathBuf::from("/themes/parent"),
            theme_root: PathBuf::from("/themes"),
            stylesheet: stylesheet.to_string(),
        }
    }

    #[test]
    fn cache_key_deterministic() {
        assert_eq!(theme_cache_key(&theme("child")), theme_cache_key(&theme("child")));
    }

    #[test]
    fn cache_key_differs_by_stylesheet() {
        assert_ne!(theme_cache_key(&theme("child")), theme_cache_key(&theme("other")));
    }

    #[test]
    fn cache_key_has_page_templates_prefix() {
        assert!(theme_cache_key(&theme("child")).starts_with("page_templates-"));
    }

    #[test]
    fn child_theme_detected_by_distinct_dirs() {
        let t = theme("child");
        assert!(t.is_child_theme());

        let parent_only = ThemeDirs {
            stylesheet_dir: PathBuf::from("/themes/parent"),
            template_dir: PathBuf::from("/themes/parent"),
            theme_root: PathBuf::from("/themes"),
            stylesheet: "parent".to_string(),
        };
        assert!(!parent_only.is_child_theme());
    }
}
