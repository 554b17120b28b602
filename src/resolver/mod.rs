pub mod paths;

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::hooks::FilterHooks;
use crate::host::context::{ContextHandle, RenderContext};
use crate::host::include::TemplateIncluder;
use crate::host::theme::ThemeDirs;
use crate::resolver::paths::compute_search_paths;

/// Variable name data is exposed under when the caller does not pick one.
const DEFAULT_DATA_VAR: &str = "data";

/// Resolves logical (slug, variant) template part requests to files,
/// searching theme override tiers before the plugin's bundled parts.
pub struct TemplateResolver {
    parts_dir: PathBuf,
    theme_override_dir: String,
    templates_suffix: String,
    theme: ThemeDirs,
    hooks: FilterHooks,
    context: ContextHandle,
    includer: Box<dyn TemplateIncluder>,
    /// First-candidate name -> located path. Only hits are recorded.
    path_cache: HashMap<String, PathBuf>,
    /// Tier list, computed (and filtered) once on first use.
    search_paths: Option<Vec<PathBuf>>,
    /// Every name data has been bound under, the default included.
    data_var_names: Vec<String>,
}

impl TemplateResolver {
    pub fn new(
        config: &LoaderConfig,
        plugin_dir: &Path,
        theme: ThemeDirs,
        hooks: FilterHooks,
        context: ContextHandle,
        includer: Box<dyn TemplateIncluder>,
    ) -> Self {
        Self {
            parts_dir: plugin_dir.join(&config.plugin_template_parts_directory),
            theme_override_dir: config.theme_template_directory.clone(),
            templates_suffix: config.templates_suffix.clone(),
            theme,
            hooks,
            context,
            includer,
            path_cache: HashMap::new(),
            search_paths: None,
            data_var_names: vec![DEFAULT_DATA_VAR.to_string()],
        }
    }

    pub fn hooks(&self) -> &FilterHooks {
        &self.hooks
    }

    /// Hooks installed here are honored by the next tier computation;
    /// once a lookup has run, the tier list is fixed for this resolver.
    pub fn hooks_mut(&mut self) -> &mut FilterHooks {
        &mut self.hooks
    }

    /// Candidate filenames for a slug and optional variant, most specific
    /// first, after the candidate filter hook has run.
    pub fn candidate_names(&self, slug: &str, variant: Option<&str>) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(variant) = variant {
            names.push(format!("{slug}-{variant}{}", self.templates_suffix));
        }
        names.push(format!("{slug}{}", self.templates_suffix));

        self.hooks.apply_candidates(names, slug, variant)
    }

    /// The ordered tier list, computed on first use and then stable for
    /// the resolver's lifetime.
    pub fn search_paths(&mut self) -> &[PathBuf] {
        self.ensure_search_paths();
        self.search_paths.as_deref().unwrap_or(&[])
    }

    fn ensure_search_paths(&mut self) {
        if self.search_paths.is_none() {
            self.search_paths = Some(compute_search_paths(
                &self.parts_dir,
                &self.theme_override_dir,
                &self.theme,
                &self.hooks,
            ));
        }
    }

    /// Find the highest-priority existing file among the candidates.
    ///
    /// The first candidate doubles as the cache key. Hits are memoized
    /// for the resolver's lifetime and skip the filesystem entirely on
    /// repeat lookups; misses are not cached, so a part that appears on
    /// disk later is picked up by a subsequent call. With `load` set, a
    /// located file is handed to the host includer (`once` selects
    /// include-once semantics) before returning.
    pub fn locate(
        &mut self,
        candidates: &[String],
        load: bool,
        once: bool,
    ) -> Result<Option<PathBuf>> {
        let Some(cache_key) = candidates.first().cloned() else {
            return Ok(None);
        };

        let located = match self.path_cache.get(&cache_key).cloned() {
            Some(hit) => Some(hit),
            None => {
                self.ensure_search_paths();
                let tiers = self.search_paths.as_deref().unwrap_or(&[]);

                let mut found = None;
                'candidates: for name in candidates {
                    let name = name.trim_start_matches('/');
                    if name.is_empty() {
                        continue;
                    }
                    for tier in tiers {
                        let probe = tier.join(name);
                        if probe.exists() {
                            found = Some(probe);
                            break 'candidates;
                        }
                    }
                }

                if let Some(path) = &found {
                    self.path_cache.insert(cache_key, path.clone());
                }
                found
            }
        };

        if load {
            if let Some(path) = &located {
                self.includer.include(path, once)?;
            }
        }

        Ok(located)
    }

    /// Resolve and optionally include the best matching part for a slug.
    ///
    /// Fires the part-request observer before building candidates, so
    /// callers can hook per-request side effects the way the host's
    /// template actions work.
    pub fn get_template_part(
        &mut self,
        slug: &str,
        variant: Option<&str>,
        load: bool,
    ) -> Result<Option<PathBuf>> {
        self.hooks.notify_part_request(slug, variant);
        let candidates = self.candidate_names(slug, variant);
        self.locate(&candidates, load, false)
    }

    /// Expose `data` to templates under `var_name` (default `"data"`).
    ///
    /// Chainable. Every non-default name is tracked so
    /// [`unset_template_data`](Self::unset_template_data) can remove the
    /// full set later, however many times each was bound.
    pub fn set_template_data(&mut self, data: Value, var_name: Option<&str>) -> &mut Self {
        let var_name = var_name.unwrap_or(DEFAULT_DATA_VAR);
        self.context.borrow_mut().insert_var(var_name, data);

        if var_name != DEFAULT_DATA_VAR {
            self.data_var_names.push(var_name.to_string());
        }

        self
    }

    /// Remove every name ever bound from the render context, each exactly
    /// once. Also runs on drop, so bindings cannot outlive the resolver
    /// on any exit path.
    pub fn unset_template_data(&mut self) -> &mut Self {
        remove_bindings(&mut self.context.borrow_mut(), &self.data_var_names);
        self
    }
}

fn remove_bindings(ctx: &mut RenderContext, names: &[String]) {
    let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    for name in unique {
        ctx.remove_var(name);
    }
}

impl Drop for TemplateResolver {
    fn drop(&mut self) {
        // The context may be borrowed by the code unwinding us; skipping
        // cleanup then is better than a second panic.
        if let Ok(mut ctx) = self.context.try_borrow_mut() {
            remove_bindings(&mut ctx, &self.data_var_names);
        }
    }
}
