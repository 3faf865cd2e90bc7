//! Error types for gac modules using thiserror.

use thiserror::Error;

/// Errors from the underlying git layer.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found. Install git and make sure it is on your PATH")]
    NotInstalled,

    #[error("not a git repository (or any of the parent directories): .git")]
    NotARepository,

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to read repository status: {0}")]
    Status(#[source] git2::Error),

    #[error("repository has no working directory (bare repository?)")]
    BareRepository,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: String,
        code: i32,
        stderr: String,
    },

    #[error("commit operation failed")]
    CommitFailed,
}

/// Errors from path resolution and scope derivation.
///
/// Every ambiguity variant renders as "use of `<flag>` ... ambiguous" so the
/// user can tell which scope option could not be satisfied.
#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("path \"{path}\" does not refer to any staged files")]
    NoMatch { path: String },

    #[error("use of --scope-as-is without path argument is ambiguous")]
    AsIsWithoutPath,

    #[error("use of --scope-basename with an ambiguous path")]
    AmbiguousPath,

    #[error("use of --scope-basename with multiple staged files is ambiguous")]
    AmbiguousStaged,

    #[error("use of {flag} is ambiguous without common non-root ancestor path")]
    NoCommonAncestor { flag: &'static str },

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Errors from a full stage-then-commit invocation.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("only one scope option is allowed. See --help for details")]
    MultipleScopeOptions,

    #[error("must pass all required arguments. See --help for details")]
    MissingArguments,

    #[error("not a git repository (or any of the parent directories): .git")]
    NotARepository,

    #[error("must stage a file or pass a path. See --help for details")]
    NothingToStage,

    #[error("assert failed: nothing to commit")]
    NothingToCommit,

    #[error(
        "dangerous operation rejected: \"git add\" could clobber index state of already-staged path(s): {}. \
         Commit or unstage them first, or use --force to proceed",
        paths.join(", ")
    )]
    WouldClobberIndex { paths: Vec<String> },

    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error(transparent)]
    Git(#[from] GitError),
}
