use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::hooks::FilterHooks;
use crate::host::theme::ThemeDirs;

/// Priority slots for the three standard tiers. Lower is searched first.
pub const CHILD_THEME_PRIORITY: u32 = 1;
pub const PARENT_THEME_PRIORITY: u32 = 10;
pub const PLUGIN_PRIORITY: u32 = 100;

/// Compute the ordered directory list for template part lookup.
///
/// The plugin's bundled parts sit at the lowest priority. When a theme
/// override directory is configured, the parent theme is checked before
/// the plugin and the child theme before both, so a theme inheriting
/// from a parent can overload a single file. The child tier is skipped
/// when child and parent resolve to the same directory, so a non-child
/// setup does not check the active theme twice.
///
/// The search-path filter hook runs on the priority map before the order
/// is fixed; `BTreeMap` keeps tiers sorted by priority number throughout.
pub fn compute_search_paths(
    plugin_parts_dir: &Path,
    theme_override_dir: &str,
    theme: &ThemeDirs,
    hooks: &FilterHooks,
) -> Vec<PathBuf> {
    let mut tiers = BTreeMap::new();
    tiers.insert(PLUGIN_PRIORITY, plugin_parts_dir.to_path_buf());

    if !theme_override_dir.is_empty() {
        tiers.insert(
            PARENT_THEME_PRIORITY,
            theme.template_dir.join(theme_override_dir),
        );
        if theme.is_child_theme() {
            tiers.insert(
                CHILD_THEME_PRIORITY,
                theme.stylesheet_dir.join(theme_override_dir),
            );
        }
    }

    let tiers = hooks.apply_search_paths(tiers);

    tiers.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_theme() -> ThemeDirs {
        ThemeDirs {
            stylesheet_dir: PathBuf::from("/themes/child"),
            template_dir: PathBuf::from("/themes/parent"),
            theme_root: PathBuf::from("/themes"),
            stylesheet: "child".to_string(),
        }
    }

    fn plain_theme() -> ThemeDirs {
        ThemeDirs {
            stylesheet_dir: PathBuf::from("/themes/parent"),
            template_dir: PathBuf::from("/themes/parent"),
            theme_root: PathBuf::from("/themes"),
            stylesheet: "parent".to_string(),
        }
    }

    #[test]
    fn child_theme_yields_three_tiers_in_priority_order() {
        let paths = compute_search_paths(
            Path::new("/plugin/template-parts"),
            "my-plugin",
            &child_theme(),
            &FilterHooks::new("test"),
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/themes/child/my-plugin"),
                PathBuf::from("/themes/parent/my-plugin"),
                PathBuf::from("/plugin/template-parts"),
            ]
        );
    }

    #[test]
    fn same_child_and_parent_yields_two_tiers() {
        let paths = compute_search_paths(
            Path::new("/plugin/template-parts"),
            "my-plugin",
            &plain_theme(),
            &FilterHooks::new("test"),
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/themes/parent/my-plugin"),
                PathBuf::from("/plugin/template-parts"),
            ]
        );
    }

    #[test]
    fn empty_override_dir_disables_theme_tiers() {
        let paths = compute_search_paths(
            Path::new("/plugin/template-parts"),
            "",
            &child_theme(),
            &FilterHooks::new("test"),
        );
        assert_eq!(paths, vec![PathBuf::from("/plugin/template-parts")]);
    }

    #[test]
    fn filter_inserted_tier_lands_in_priority_position() {
        let mut hooks = FilterHooks::new("test");
        hooks.set_search_path_filter(|mut tiers| {
            tiers.insert(50, PathBuf::from("/mu-plugin/parts"));
            tiers
        });

        let paths = compute_search_paths(
            Path::new("/plugin/template-parts"),
            "my-plugin",
            &plain_theme(),
            &hooks,
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/themes/parent/my-plugin"),
                PathBuf::from("/mu-plugin/parts"),
                PathBuf::from("/plugin/template-parts"),
            ]
        );
    }
}
