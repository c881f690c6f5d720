use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::StatsError;

/// A kubeconfig file describing how to reach one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDescriptor {
    path: PathBuf,
}

impl ClusterDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ClusterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Lists every regular file directly under `root` or one subdirectory deep.
///
/// Entries are sorted by file name at each level and a subdirectory's files
/// take the subdirectory's place in the order. Anything deeper is ignored.
pub fn discover_descriptors(root: &Path) -> Result<Vec<ClusterDescriptor>, StatsError> {
    let meta = std::fs::metadata(root).map_err(|e| StatsError::descriptor_dir(root, e))?;
    if !meta.is_dir() {
        return Err(StatsError::descriptor_dir(root, "not a directory"));
    }

    let mut descriptors = Vec::new();
    let walker = WalkDir::new(root).min_depth(1).max_depth(2).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(StatsError::descriptor_dir(root, err)),
            Err(err) => {
                tracing::warn!(root = %root.display(), "skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_file() {
            descriptors.push(ClusterDescriptor::new(entry.into_path()));
        }
    }

    tracing::debug!(root = %root.display(), count = descriptors.len(), "discovered kubeconfigs");
    Ok(descriptors)
}
