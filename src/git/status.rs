//! Working tree status model and the "currently staged" projection.

use std::fmt;

/// State of a path on one side of the index (HEAD→index or index→worktree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileState {
    Unmodified,
    Modified,
    Added,
    Deleted,
    Renamed,
    TypeChanged,
    Untracked,
    Ignored,
    Conflicted,
}

impl FileState {
    /// State of the index side of a git2 status entry.
    pub fn from_index(status: git2::Status) -> Self {
        if status.is_conflicted() {
            FileState::Conflicted
        } else if status.is_index_new() {
            FileState::Added
        } else if status.is_index_renamed() {
            FileState::Renamed
        } else if status.is_index_deleted() {
            FileState::Deleted
        } else if status.is_index_typechange() {
            FileState::TypeChanged
        } else if status.is_index_modified() {
            FileState::Modified
        } else if status.is_wt_new() {
            FileState::Untracked
        } else if status.is_ignored() {
            FileState::Ignored
        } else {
            FileState::Unmodified
        }
    }

    /// State of the worktree side of a git2 status entry.
    pub fn from_worktree(status: git2::Status) -> Self {
        if status.is_conflicted() {
            FileState::Conflicted
        } else if status.is_wt_new() {
            FileState::Untracked
        } else if status.is_wt_renamed() {
            FileState::Renamed
        } else if status.is_wt_deleted() {
            FileState::Deleted
        } else if status.is_wt_typechange() {
            FileState::TypeChanged
        } else if status.is_wt_modified() {
            FileState::Modified
        } else if status.is_ignored() {
            FileState::Ignored
        } else {
            FileState::Unmodified
        }
    }

    /// Whether this index-side state means the path has something staged.
    pub fn is_staged(self) -> bool {
        !matches!(
            self,
            FileState::Unmodified | FileState::Untracked | FileState::Ignored
        )
    }

    /// Single-letter porcelain code, as printed by `git status --short`.
    pub fn code(self) -> char {
        match self {
            FileState::Unmodified => ' ',
            FileState::Modified => 'M',
            FileState::Added => 'A',
            FileState::Deleted => 'D',
            FileState::Renamed => 'R',
            FileState::TypeChanged => 'T',
            FileState::Untracked => '?',
            FileState::Ignored => '!',
            FileState::Conflicted => 'U',
        }
    }
}

/// One path reported by the repository status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    /// Source path when the index records a rename.
    pub original_path: Option<String>,
    pub index: FileState,
    pub worktree: FileState,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, index: FileState, worktree: FileState) -> Self {
        Self {
            path: path.into(),
            original_path: None,
            index,
            worktree,
        }
    }

    pub fn renamed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: to.into(),
            original_path: Some(from.into()),
            index: FileState::Renamed,
            worktree: FileState::Unmodified,
        }
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} ", self.index.code(), self.worktree.code())?;
        match &self.original_path {
            Some(from) => write!(f, "{} -> {}", from, self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Every path with staged changes, in status order.
///
/// Renames contribute both their source and destination path.
pub fn staged_paths(entries: &[StatusEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.index.is_staged())
        .flat_map(|e| e.original_path.iter().chain(std::iter::once(&e.path)))
        .cloned()
        .collect()
}
