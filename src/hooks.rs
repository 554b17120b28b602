use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Rewrites the candidate filename list for a (slug, variant) request.
/// Receives the default list, most specific first, and returns the list
/// actually searched.
pub type CandidateFilter = Box<dyn Fn(Vec<String>, &str, Option<&str>) -> Vec<String>>;

/// Rewrites the priority -> directory tier map before the search order is
/// fixed. Lower keys are searched first.
pub type SearchPathFilter = Box<dyn Fn(BTreeMap<u32, PathBuf>) -> BTreeMap<u32, PathBuf>>;

/// Observes each template part request before resolution runs.
pub type PartRequestObserver = Box<dyn Fn(&str, Option<&str>)>;

/// Extensibility points for one loader, namespaced by its filter prefix.
///
/// Callers inject plain closures instead of registering globally named
/// events, so two plugins embedding this crate cannot collide. Every
/// hook defaults to identity (filters) or no-op (observer).
#[derive(Default)]
pub struct FilterHooks {
    prefix: String,
    candidates: Option<CandidateFilter>,
    search_paths: Option<SearchPathFilter>,
    part_request: Option<PartRequestObserver>,
}

impl FilterHooks {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_candidate_filter(
        &mut self,
        filter: impl Fn(Vec<String>, &str, Option<&str>) -> Vec<String> + 'static,
    ) -> &mut Self {
        self.candidates = Some(Box::new(filter));
        self
    }

    pub fn set_search_path_filter(
        &mut self,
        filter: impl Fn(BTreeMap<u32, PathBuf>) -> BTreeMap<u32, PathBuf> + 'static,
    ) -> &mut Self {
        self.search_paths = Some(Box::new(filter));
        self
    }

    pub fn set_part_request_observer(
        &mut self,
        observer: impl Fn(&str, Option<&str>) + 'static,
    ) -> &mut Self {
        self.part_request = Some(Box::new(observer));
        self
    }

    pub fn apply_candidates(
        &self,
        names: Vec<String>,
        slug: &str,
        variant: Option<&str>,
    ) -> Vec<String> {
        match &self.candidates {
            Some(filter) => {
                tracing::debug!("{}: candidate filter applied for slug {slug}", self.prefix);
                filter(names, slug, variant)
            }
            None => names,
        }
    }

    pub fn apply_search_paths(&self, tiers: BTreeMap<u32, PathBuf>) -> BTreeMap<u32, PathBuf> {
        match &self.search_paths {
            Some(filter) => {
                tracing::debug!("{}: search path filter applied", self.prefix);
                filter(tiers)
            }
            None => tiers,
        }
    }

    pub fn notify_part_request(&self, slug: &str, variant: Option<&str>) {
        if let Some(observer) = &self.part_request {
            observer(slug, variant);
        }
    }
}

impl fmt::Debug for FilterHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterHooks")
            .field("prefix", &self.prefix)
            .field("candidates", &self.candidates.is_some())
            .field("search_paths", &self.search_paths.is_some())
            .field("part_request", &self.part_request.is_some())
            .finish()
    }
}
