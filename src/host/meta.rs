use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Content-item identifier in the host.
pub type PostId = u64;

/// Read-only view of the host's per-item metadata store.
pub trait PostMetadata {
    /// The page template path the author assigned to this item, if any.
    fn assigned_template(&self, post: PostId) -> Option<PathBuf>;
}

/// Map-backed [`PostMetadata`] for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct MemoryMetadata {
    assignments: HashMap<PostId, PathBuf>,
}

impl MemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, post: PostId, template: impl AsRef<Path>) {
        self.assignments.insert(post, template.as_ref().to_path_buf());
    }

    pub fn clear_assignment(&mut self, post: PostId) {
        self.assignments.remove(&post);
    }
}

impl PostMetadata for MemoryMetadata {
    fn assigned_template(&self, post: PostId) -> Option<PathBuf> {
        self.assignments.get(&post).cloned()
    }
}
