//! The git operations gac needs, behind a mockable trait.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::GitError;
use crate::git::status::StatusEntry;

/// How commit hooks are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyMode {
    /// Run all hooks.
    #[default]
    Full,
    /// Pass `--no-verify`.
    Skip,
    /// Run hooks with `GAC_VERIFY_SIMPLE=true` so they can opt into a lighter check.
    Simple,
}

impl FromStr for VerifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "true" => Ok(Self::Full),
            "skip" | "false" => Ok(Self::Skip),
            "simple" => Ok(Self::Simple),
            _ => Err(format!(
                "invalid verify mode '{}' (expected full, skip, or simple)",
                s
            )),
        }
    }
}

impl fmt::Display for VerifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyMode::Full => write!(f, "full"),
            VerifyMode::Skip => write!(f, "skip"),
            VerifyMode::Simple => write!(f, "simple"),
        }
    }
}

/// Options for [`GitPort::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitOptions {
    pub verify: VerifyMode,
    /// Discard git's stdout/stderr instead of passing them through.
    pub silent: bool,
}

/// Trait for the repository operations used by the commit pipeline.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitPort: Send + Sync {
    /// Whether the working directory is inside a git repository.
    async fn is_repository(&self) -> Result<bool, GitError>;

    /// Absolute path of the repository's working tree root.
    async fn repository_root(&self) -> Result<PathBuf, GitError>;

    /// Current status of every changed or untracked path.
    async fn status(&self) -> Result<Vec<StatusEntry>, GitError>;

    /// Stage `paths`. Does nothing when `paths` is empty.
    async fn stage(&self, paths: &[String]) -> Result<(), GitError>;

    /// Commit whatever is staged.
    async fn commit(&self, message: &str, options: CommitOptions) -> Result<(), GitError>;

    /// Root-relative names of files under `path` that differ from the index
    /// (first) or whose index state differs from HEAD (second).
    ///
    /// Output is in git's order and may contain duplicates.
    async fn changed_files(&self, path: &str) -> Result<Vec<String>, GitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_mode_parse() {
        assert_eq!("full".parse::<VerifyMode>().unwrap(), VerifyMode::Full);
        assert_eq!("true".parse::<VerifyMode>().unwrap(), VerifyMode::Full);
        assert_eq!("skip".parse::<VerifyMode>().unwrap(), VerifyMode::Skip);
        assert_eq!("FALSE".parse::<VerifyMode>().unwrap(), VerifyMode::Skip);
        assert_eq!("Simple".parse::<VerifyMode>().unwrap(), VerifyMode::Simple);
    }

    #[test]
    fn test_verify_mode_parse_invalid() {
        let err = "sometimes".parse::<VerifyMode>().unwrap_err();
        assert!(err.contains("sometimes"));
    }

    #[test]
    fn test_commit_options_default_runs_hooks() {
        let options = CommitOptions::default();
        assert_eq!(options.verify, VerifyMode::Full);
        assert!(!options.silent);
    }
}
