//! Files an operation applies to

use std::path::{Path, PathBuf};

/// One file or an ordered list of files.
///
/// Targets are always appended after every flag, in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single file
    File(PathBuf),
    /// Several files, order preserved
    Files(Vec<PathBuf>),
}

impl Target {
    /// Argument tokens for this target
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::File(path) => vec![path_token(path)],
            Self::Files(paths) => paths.iter().map(|p| path_token(p)).collect(),
        }
    }

    /// Number of files
    pub fn len(&self) -> usize {
        match self {
            Self::File(_) => 1,
            Self::Files(paths) => paths.len(),
        }
    }

    /// True when a file list is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn path_token(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for Target {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<&str> for Target {
    fn from(path: &str) -> Self {
        Self::File(PathBuf::from(path))
    }
}

impl From<String> for Target {
    fn from(path: String) -> Self {
        Self::File(PathBuf::from(path))
    }
}

impl From<Vec<PathBuf>> for Target {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::Files(paths)
    }
}

impl From<&[&str]> for Target {
    fn from(paths: &[&str]) -> Self {
        Self::Files(paths.iter().map(PathBuf::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Target {
    fn from(paths: [&str; N]) -> Self {
        Self::Files(paths.iter().map(PathBuf::from).collect())
    }
}
