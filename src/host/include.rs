use std::path::{Path, PathBuf};

use crate::error::Result;

/// Host collaborator that loads a located template file into the render.
///
/// Resolution and inclusion are separate concerns: the resolver finds the
/// path, the host decides what including it means.
pub trait TemplateIncluder {
    /// Include `path` into the current render. `once` requests
    /// include-once semantics.
    fn include(&mut self, path: &Path, once: bool) -> Result<()>;
}

/// Discards include requests. Useful when only resolution is wanted.
#[derive(Debug, Default)]
pub struct NoopIncluder;

impl TemplateIncluder for NoopIncluder {
    fn include(&mut self, _path: &Path, _once: bool) -> Result<()> {
        Ok(())
    }
}

/// Records include requests for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingIncluder {
    pub included: Vec<(PathBuf, bool)>,
}

impl TemplateIncluder for RecordingIncluder {
    fn include(&mut self, path: &Path, once: bool) -> Result<()> {
        self.included.push((path.to_path_buf(), once));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_includer_tracks_calls() {
        let mut includer = RecordingIncluder::default();
        includer.include(Path::new("/a/part.php"), false).unwrap();
        includer.include(Path::new("/a/page.php"), true).unwrap();
        assert_eq!(
            includer.included,
            vec![
                (PathBuf::from("/a/part.php"), false),
                (PathBuf::from("/a/page.php"), true),
            ]
        );
    }
}
