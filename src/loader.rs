use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::hooks::FilterHooks;
use crate::host::cache::ThemeCache;
use crate::host::context::ContextHandle;
use crate::host::include::TemplateIncluder;
use crate::host::meta::{PostId, PostMetadata};
use crate::host::theme::{theme_cache_key, ThemeDirs};
use crate::registry::PageTemplateRegistry;
use crate::resolver::TemplateResolver;

/// How long a repopulated themes-cache entry stays live.
const PAGE_TEMPLATE_CACHE_TTL: Duration = Duration::from_secs(1800);

/// Ties the page template registry and the part resolver together and
/// exposes the three host extension points: the admin listing merge, the
/// save-time cache registration, and the render-time template selection.
///
/// The host adapter wires these methods into its own dispatch; this type
/// never talks to the host directly.
pub struct PageTemplateLoader {
    theme: ThemeDirs,
    registry: PageTemplateRegistry,
    resolver: TemplateResolver,
}

impl PageTemplateLoader {
    /// Build a loader for the plugin rooted at `plugin_dir`.
    ///
    /// Scans the plugin's template pages immediately; a missing pages
    /// directory degrades to an empty registry rather than failing
    /// plugin initialization. Config problems do fail: they are author
    /// mistakes, not runtime conditions.
    pub fn new(
        plugin_dir: &Path,
        theme: ThemeDirs,
        mut config: LoaderConfig,
        context: ContextHandle,
        includer: Box<dyn TemplateIncluder>,
    ) -> Result<Self> {
        config.validate()?;

        if config.filter_prefix.is_empty() {
            config.filter_prefix = plugin_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        }

        let exclude = config.build_exclude_set()?;
        let pages_dir = plugin_dir.join(&config.plugin_template_pages_directory);
        let registry = PageTemplateRegistry::scan(&pages_dir, &exclude);

        let hooks = FilterHooks::new(config.filter_prefix.clone());
        let resolver =
            TemplateResolver::new(&config, plugin_dir, theme.clone(), hooks, context, includer);

        Ok(Self {
            theme,
            registry,
            resolver,
        })
    }

    pub fn registry(&self) -> &PageTemplateRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut TemplateResolver {
        &mut self.resolver
    }

    pub fn theme(&self) -> &ThemeDirs {
        &self.theme
    }

    /// Listing extension point: merge this plugin's page templates into a
    /// host-provided path -> display-name listing. Plugin entries win on
    /// key collisions.
    pub fn merge_page_templates(
        &self,
        mut listing: BTreeMap<PathBuf, String>,
    ) -> BTreeMap<PathBuf, String> {
        listing.extend(
            self.registry
                .entries()
                .iter()
                .map(|(path, name)| (path.clone(), name.clone())),
        );
        listing
    }

    /// Save-time extension point: refresh the themes-scoped page-template
    /// cache entry so the host lists this plugin's templates even though
    /// their files live outside the theme.
    ///
    /// Deletes the current entry, then re-adds the host's listing merged
    /// with the registry under a TTL. The save payload passes through
    /// untouched.
    pub fn register_in_theme_cache<C, S>(
        &self,
        cache: &mut C,
        current_listing: BTreeMap<PathBuf, String>,
        save_data: S,
    ) -> S
    where
        C: ThemeCache,
    {
        let key = theme_cache_key(&self.theme);
        cache.delete(&key);

        let merged = self.merge_page_templates(current_listing);
        cache.add(&key, merged, PAGE_TEMPLATE_CACHE_TTL);

        save_data
    }

    /// Render-time extension point: swap in the item's assigned custom
    /// template, or keep the host's default choice.
    ///
    /// Every failure mode (no item, nothing assigned, unknown path, file
    /// vanished since selection) falls through to `default`. Nothing is
    /// written to render output from here; diagnostics go to the log.
    pub fn select_template(
        &self,
        post: Option<PostId>,
        meta: &dyn PostMetadata,
        default: PathBuf,
    ) -> PathBuf {
        let Some(post) = post else {
            return default;
        };

        let Some(assigned) = meta.assigned_template(post) else {
            return default;
        };

        match self.registry.resolve_assigned(&assigned) {
            Some(path) => path.to_path_buf(),
            None => default,
        }
    }

    /// Resolve and optionally include the best part for a slug. See
    /// [`TemplateResolver::get_template_part`].
    pub fn get_template_part(
        &mut self,
        slug: &str,
        variant: Option<&str>,
        load: bool,
    ) -> Result<Option<PathBuf>> {
        self.resolver.get_template_part(slug, variant, load)
    }

    /// Expose caller data to templates. See
    /// [`TemplateResolver::set_template_data`].
    pub fn set_template_data(&mut self, data: Value, var_name: Option<&str>) -> &mut Self {
        self.resolver.set_template_data(data, var_name);
        self
    }

    /// Remove all exposed caller data. See
    /// [`TemplateResolver::unset_template_data`].
    pub fn unset_template_data(&mut self) -> &mut Self {
        self.resolver.unset_template_data();
        self
    }
}
