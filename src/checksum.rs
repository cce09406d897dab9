//! SHA-1 manifest of the loadgen source tree.

use std::fs;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use thiserror::Error;
use tracing::debug;

/// Subdirectories scanned in addition to the source root itself.
pub const TRACKED_SUBDIRS: [&str; 2] = ["bindings", "demos"];

/// Error category for manifest construction
#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("failed to list {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One manifest line: the digest of a file plus its root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub digest: String,
    pub path: String,
}

/// SHA-1 digests of the immediate files under the source root and its
/// tracked subdirectories.
#[derive(Debug, Clone, Default)]
pub struct ChecksumManifest {
    entries: Vec<ManifestEntry>,
}

impl ChecksumManifest {
    /// Builds the manifest for `root`.
    ///
    /// Listing is non-recursive: only the immediate children of the
    /// tracked subdirectories and of the root itself are considered.
    /// Relative paths carry a leading slash and are sorted bytewise before
    /// hashing so the manifest is stable across platforms. Anything that
    /// is not a regular file is skipped after sorting.
    pub fn for_root(root: &Path) -> Result<Self, ChecksumError> {
        let mut names = Vec::new();
        for sub in TRACKED_SUBDIRS {
            for name in list_names(&root.join(sub))? {
                names.push(format!("/{sub}/{name}"));
            }
        }
        for name in list_names(root)? {
            names.push(format!("/{name}"));
        }
        names.sort();

        let mut entries = Vec::new();
        for rel in names {
            let full = root.join(&rel[1..]);
            if !full.is_file() {
                continue;
            }
            let data = fs::read(&full).map_err(|source| ChecksumError::ReadFile {
                path: full.clone(),
                source,
            })?;
            entries.push(ManifestEntry {
                digest: hex::encode(Sha1::digest(&data)),
                path: rel,
            });
        }
        debug!(files = entries.len(), "hashed loadgen source tree");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Renders the manifest payload: one `<digest> <path>` line per file,
    /// without a trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.digest);
            out.push(' ');
            out.push_str(&entry.path);
            out.push('\n');
        }
        out.pop();
        out
    }
}

fn list_names(dir: &Path) -> Result<Vec<String>, ChecksumError> {
    let listing = fs::read_dir(dir).map_err(|source| ChecksumError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut names = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|source| ChecksumError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree_with_tracked_subdirs() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("bindings")).unwrap();
        fs::create_dir(dir.path().join("demos")).unwrap();
        dir
    }

    #[test]
    fn empty_tree_renders_empty_payload() {
        let dir = tree_with_tracked_subdirs();
        let manifest = ChecksumManifest::for_root(dir.path()).unwrap();
        assert!(manifest.entries().is_empty());
        assert_eq!(manifest.render(), "");
    }

    #[test]
    fn known_content_hashes_to_known_digest() {
        let dir = tree_with_tracked_subdirs();
        fs::write(dir.path().join("loadgen.h"), b"abc").unwrap();
        let manifest = ChecksumManifest::for_root(dir.path()).unwrap();
        assert_eq!(
            manifest.render(),
            "a9993e364706816aba3e25717850c26c9cd0d89d /loadgen.h"
        );
    }

    #[test]
    fn empty_file_hashes_to_empty_digest() {
        let dir = tree_with_tracked_subdirs();
        fs::write(dir.path().join("empty.cc"), b"").unwrap();
        let manifest = ChecksumManifest::for_root(dir.path()).unwrap();
        assert_eq!(
            manifest.entries()[0].digest,
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn entries_sort_bytewise_across_directories() {
        let dir = tree_with_tracked_subdirs();
        fs::write(dir.path().join("c.txt"), b"c").unwrap();
        fs::write(dir.path().join("bindings/b.cc"), b"b").unwrap();
        fs::write(dir.path().join("demos/a.py"), b"a").unwrap();
        let manifest = ChecksumManifest::for_root(dir.path()).unwrap();
        let paths: Vec<&str> = manifest
            .entries()
            .iter()
            .map(|entry| entry.path.as_str())
            .collect();
        assert_eq!(paths, vec!["/bindings/b.cc", "/c.txt", "/demos/a.py"]);
    }

    #[test]
    fn render_joins_lines_without_trailing_newline() {
        let dir = tree_with_tracked_subdirs();
        fs::write(dir.path().join("a.cc"), b"a").unwrap();
        fs::write(dir.path().join("b.cc"), b"b").unwrap();
        let rendered = ChecksumManifest::for_root(dir.path()).unwrap().render();
        assert_eq!(rendered.lines().count(), 2);
        assert!(!rendered.ends_with('\n'));
    }

    #[test]
    fn listing_is_not_recursive() {
        let dir = tree_with_tracked_subdirs();
        fs::create_dir(dir.path().join("bindings/python")).unwrap();
        fs::write(dir.path().join("bindings/python/api.py"), b"x").unwrap();
        fs::write(dir.path().join("bindings/api.cc"), b"y").unwrap();
        let manifest = ChecksumManifest::for_root(dir.path()).unwrap();
        let paths: Vec<&str> = manifest
            .entries()
            .iter()
            .map(|entry| entry.path.as_str())
            .collect();
        assert_eq!(paths, vec!["/bindings/api.cc"]);
    }

    #[test]
    fn subdirectories_themselves_are_skipped() {
        let dir = tree_with_tracked_subdirs();
        let manifest = ChecksumManifest::for_root(dir.path()).unwrap();
        // "bindings" and "demos" show up in the root listing but are not
        // regular files.
        assert!(manifest.entries().is_empty());
    }

    #[test]
    fn missing_tracked_subdir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("demos")).unwrap();
        let err = ChecksumManifest::for_root(dir.path()).unwrap_err();
        match err {
            ChecksumError::ListDir { path, .. } => {
                assert!(path.ends_with("bindings"));
            }
            other => panic!("expected ListDir, got {other:?}"),
        }
    }
}
