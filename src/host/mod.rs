//! Surfaces of the host the loader collaborates with.
//!
//! The host's global mutable state (render query vars, themes object
//! cache, post metadata) is modeled as explicit objects and traits so a
//! plugin embeds without reaching into globals, and so everything here is
//! testable with in-memory stand-ins.

pub mod cache;
pub mod context;
pub mod include;
pub mod meta;
pub mod theme;

pub use cache::{MemoryThemeCache, ThemeCache};
pub use context::{ContextHandle, RenderContext};
pub use include::{NoopIncluder, RecordingIncluder, TemplateIncluder};
pub use meta::{MemoryMetadata, PostId, PostMetadata};
pub use theme::{theme_cache_key, ThemeDirs};
