//! Batch Processing Module
//!
//! Provides utilities for batch file processing with proper error handling:
//! file discovery and the per-run success/failure counters.

use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the regular files directly inside `dir` whose name ends in
/// `.<extension>` (case-sensitive, `extension` given without the dot). Subdirectories are not
/// entered. The result is sorted so runs log in a stable order.
pub fn collect_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                match err.path() {
                    Some(path) => {
                        tracing::warn!("⚠️ Failed to access {}: {}", path.display(), err)
                    }
                    None => tracing::warn!("⚠️ WalkDir error: {}", err),
                }
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_exact_extension(e.path(), extension))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}

/// True when the file name ends in `.<extension>`, compared byte for byte.
/// A name that is only the suffix (`.mp4`) matches too.
pub fn has_exact_extension(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.as_encoded_bytes();
    let ext = extension.as_bytes();
    name.len() > ext.len() && name.ends_with(ext) && name[name.len() - ext.len() - 1] == b'.'
}

/// Counters for one run. `total == succeeded + failed` holds after every call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(serialize_with = "crate::serde_paths::lossy_errors")]
    pub errors: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn fail(&mut self, path: PathBuf, error: String) {
        self.total += 1;
        self.failed += 1;
        self.errors.push((path, error));
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_collect_files_exact_extension_only() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("clip_b.mp4"));
        touch(&dir.path().join("clip_a.mp4"));
        touch(&dir.path().join("upper.MP4"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("clip.mp4.bak"));
        touch(&dir.path().join("mp4"));

        let files = collect_files(dir.path(), "mp4");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["clip_a.mp4", "clip_b.mp4"]);
    }

    #[test]
    fn test_collect_files_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        touch(&nested.join("deep.mp4"));
        fs::create_dir(dir.path().join("folder.mp4")).unwrap();
        touch(&dir.path().join("top.mp4"));

        let files = collect_files(dir.path(), "mp4");
        assert_eq!(files, vec![dir.path().join("top.mp4")]);
    }

    #[test]
    fn test_collect_files_includes_suffix_only_name() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join(".mp4"));
        touch(&dir.path().join("clip.mp4"));

        let files = collect_files(dir.path(), "mp4");
        assert_eq!(
            files,
            vec![dir.path().join(".mp4"), dir.path().join("clip.mp4")]
        );
    }

    #[test]
    fn test_collect_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(collect_files(dir.path(), "mp4").is_empty());
    }

    #[test]
    fn test_has_exact_extension() {
        assert!(has_exact_extension(Path::new("/a/b.mp4"), "mp4"));
        assert!(!has_exact_extension(Path::new("/a/b.Mp4"), "mp4"));
        assert!(!has_exact_extension(Path::new("/a/b"), "mp4"));
        assert!(has_exact_extension(Path::new("/a/.mp4"), "mp4"));
        assert!(has_exact_extension(Path::new("/a/b..mp4"), "mp4"));
        assert!(!has_exact_extension(Path::new("/a/mp4"), "mp4"));
        assert!(!has_exact_extension(Path::new("/a/bmp4"), "mp4"));
        assert!(!has_exact_extension(Path::new("/a/b.mp4.bak"), "mp4"));
    }

    #[test]
    fn test_batch_result_new() {
        let result = BatchResult::new();
        assert_eq!(result.total, 0);
        assert_eq!(result.succeeded, 0);
        assert_eq!(result.failed, 0);
        assert!(result.errors.is_empty());
        assert!(!result.has_failures());
    }

    #[test]
    fn test_batch_result_mixed() {
        let mut result = BatchResult::new();
        result.success();
        result.fail(PathBuf::from("clip_b.mp4"), "exit status 1".to_string());

        assert_eq!(result.total, 2);
        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors[0].0, PathBuf::from("clip_b.mp4"));
        assert!(result.has_failures());
        assert!((result.success_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_empty() {
        let result = BatchResult::new();
        assert!(
            (result.success_rate() - 100.0).abs() < 0.01,
            "Empty batch should have 100% success rate"
        );
    }

    mod props {
        use super::super::BatchResult;
        use proptest::prelude::*;
        use std::path::PathBuf;

        proptest! {
            #[test]
            fn prop_total_equals_sum(outcomes in proptest::collection::vec(any::<bool>(), 0..200)) {
                let mut result = BatchResult::new();
                for (i, ok) in outcomes.iter().enumerate() {
                    if *ok {
                        result.success();
                    } else {
                        result.fail(PathBuf::from(format!("f{}.mp4", i)), "E".to_string());
                    }
                }
                prop_assert_eq!(result.total, outcomes.len());
                prop_assert_eq!(result.total, result.succeeded + result.failed);
                prop_assert_eq!(result.errors.len(), result.failed);
            }
        }
    }
}
