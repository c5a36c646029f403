use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::app::Result;

/// Snapshot of the filenames already present in the output directory.
///
/// Read once at startup and only mutated in-memory when a download
/// completes within the same run. Membership is exact filename equality;
/// there is no content hashing.
#[derive(Debug, Default)]
pub struct OwnershipIndex {
    names: HashSet<String>,
}

impl OwnershipIndex {
    /// List the destination directory, creating it if absent.
    pub fn scan(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;

        let mut names = HashSet::new();
        for dirent in fs::read_dir(dir)? {
            let dirent = dirent?;
            if dirent.file_type()?.is_file() {
                names.insert(dirent.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(Self { names })
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.names.contains(filename)
    }

    /// Record a filename fetched during this run.
    pub fn insert(&mut self, filename: String) {
        self.names.insert(filename);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
