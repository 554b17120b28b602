use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};

/// Configuration for a [`PageTemplateLoader`](crate::loader::PageTemplateLoader).
///
/// Every field has a default, so a plugin that is happy with the standard
/// layout can start from `LoaderConfig::default()` and override nothing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// Namespace under which this loader's hooks are identified.
    /// Defaults to the plugin directory name when left empty.
    #[serde(default)]
    pub filter_prefix: String,

    /// Directory name inside themes where template part overrides live,
    /// e.g. `"your-plugin-templates"`. Empty disables the theme tiers.
    #[serde(default)]
    pub theme_template_directory: String,

    /// Directory under the plugin root scanned for page templates.
    #[serde(default = "default_template_pages_directory")]
    pub plugin_template_pages_directory: String,

    /// Directory under the plugin root holding bundled template parts.
    #[serde(default = "default_template_parts_directory")]
    pub plugin_template_parts_directory: String,

    /// Filename suffix appended to candidate names (default: ".php").
    #[serde(default = "default_templates_suffix")]
    pub templates_suffix: String,

    /// Glob patterns excluded from the page template scan.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_template_pages_directory() -> String {
    "template-pages".to_string()
}

fn default_template_parts_directory() -> String {
    "template-parts".to_string()
}

fn default_templates_suffix() -> String {
    ".php".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            filter_prefix: String::new(),
            theme_template_directory: String::new(),
            plugin_template_pages_directory: default_template_pages_directory(),
            plugin_template_parts_directory: default_template_parts_directory(),
            templates_suffix: default_templates_suffix(),
            exclude: Vec::new(),
        }
    }
}

/// Load and validate a LoaderConfig from a TOML file.
pub fn load_config(path: &Path) -> Result<LoaderConfig> {
    if !path.exists() {
        return Err(LoaderError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| LoaderError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;

    let config: LoaderConfig =
        toml::from_str(&content).map_err(|e| LoaderError::ConfigParse { source: e })?;

    config.validate()?;

    Ok(config)
}

impl LoaderConfig {
    /// Validate the config for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if !self.templates_suffix.starts_with('.') {
            return Err(LoaderError::ConfigInvalid {
                reason: format!(
                    "templates_suffix must start with '.', got {:?}",
                    self.templates_suffix
                ),
            });
        }

        self.build_exclude_set().map(|_| ())
    }

    /// Compile the exclude globs into a single matcher.
    pub fn build_exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| LoaderError::GlobPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| LoaderError::GlobPattern {
            pattern: "<combined>".into(),
            source: e,
        })
    }
}
