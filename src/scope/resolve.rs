//! Path resolution: what tracked file(s) did the user mean by a path argument?

use std::collections::HashSet;

use tracing::debug;

use crate::error::ScopeError;
use crate::git::GitPort;

/// The tracked file(s) with pending changes that a path argument refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one file.
    Unambiguous(String),
    /// Two or more files (a directory or glob), deduplicated, in git's order.
    Ambiguous(Vec<String>),
}

impl Resolution {
    /// Build a resolution from git's (possibly duplicated) file list.
    ///
    /// Returns `None` when `files` is empty.
    pub fn from_files(files: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut seen = HashSet::new();
        let mut unique: Vec<String> = files
            .into_iter()
            .filter(|f| seen.insert(f.clone()))
            .collect();

        match unique.len() {
            0 => None,
            1 => unique.pop().map(Resolution::Unambiguous),
            _ => Some(Resolution::Ambiguous(unique)),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Ambiguous(_))
    }

    /// Every file this resolution covers.
    pub fn files(&self) -> &[String] {
        match self {
            Resolution::Unambiguous(file) => std::slice::from_ref(file),
            Resolution::Ambiguous(files) => files,
        }
    }
}

/// Resolve `path` to the root-relative file(s) it refers to among pending changes.
///
/// Only files that differ between the working tree/index and HEAD are
/// considered, so newly added paths must be staged before calling this.
pub async fn resolve_full_name<G>(git: &G, path: &str) -> Result<Resolution, ScopeError>
where
    G: GitPort + ?Sized,
{
    let files = git.changed_files(path).await?;
    let resolution = Resolution::from_files(files).ok_or_else(|| ScopeError::NoMatch {
        path: path.to_string(),
    })?;

    debug!("resolve_full_name({}): {:?}", path, resolution);
    Ok(resolution)
}

/// Deepest directory that strictly contains every path, excluding the root.
///
/// Pure string computation over `/`-separated paths; returns `None` when the
/// only shared ancestor is the repository root or `paths` is empty.
pub fn common_ancestor<S: AsRef<str>>(paths: &[S]) -> Option<String> {
    let mut parents = paths.iter().map(|p| {
        let segments: Vec<&str> = p
            .as_ref()
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let parent_len = segments.len().saturating_sub(1);
        segments[..parent_len].to_vec()
    });

    let mut shared = parents.next()?;
    for parent in parents {
        let common = shared
            .iter()
            .zip(parent.iter())
            .take_while(|(a, b)| a == b)
            .count();
        shared.truncate(common);
    }

    let ancestor = (!shared.is_empty()).then(|| shared.join("/"));
    debug!("common_ancestor: {:?}", ancestor);
    ancestor
}
