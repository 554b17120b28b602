//! Page template discovery and template part resolution for plugins that
//! embed into a content-management host.
//!
//! Two pieces do the work:
//!
//! - [`PageTemplateRegistry`] scans a plugin-local directory tree once at
//!   startup for files declaring a `Template Name:` header and publishes
//!   a path -> display-name mapping the host's page-creation UI can
//!   merge in.
//! - [`TemplateResolver`] maps a logical (slug, variant) part request to
//!   candidate filenames and searches an ordered tier list (child theme,
//!   parent theme, plugin default) for the first existing file,
//!   memoizing hits.
//!
//! [`PageTemplateLoader`] composes both and exposes the three extension
//! points a host adapter wires into its dispatch: the admin listing
//! merge, the save-time cache registration, and the render-time template
//! selection. Host globals are modeled as explicit collaborators under
//! [`host`]; extensibility filters are injected closures under
//! [`hooks`].

pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod loader;
pub mod registry;
pub mod resolver;

pub use config::{load_config, LoaderConfig};
pub use error::{LoaderError, Result};
pub use hooks::FilterHooks;
pub use host::{
    ContextHandle, MemoryMetadata, MemoryThemeCache, NoopIncluder, PostMetadata, RenderContext,
    TemplateIncluder, ThemeCache, ThemeDirs,
};
pub use loader::PageTemplateLoader;
pub use registry::PageTemplateRegistry;
pub use resolver::TemplateResolver;
