//! Stage-then-commit pipeline.
//!
//! Orchestrates the repository checks, the clobber safety check, staging,
//! scope derivation, message assembly, and the commit itself. Any failure
//! aborts before the commit is made.

use std::collections::HashSet;
use std::path::Path;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::commit::invocation::Invocation;
use crate::commit::message::{BreakingChangeDetector, build_commit_message};
use crate::error::CommitError;
use crate::git::{CommitOptions, GitPort, staged_paths};
use crate::scope::{DerivationMode, ScopeContext, derive_scope, resolve_full_name};

/// Prefix that expands to `<repository root>/packages/`.
pub const PACKAGES_PATHSPEC_PREFIX: &str = "::";

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The commit message that was used.
    pub message: String,
    /// Paths staged at commit time.
    pub staged: Vec<String>,
}

/// Expand a `::` monorepo shorthand against the repository root.
///
/// `::` → `<root>/packages/`, `::pkg-1` → `<root>/packages/pkg-1`. Other
/// paths return `None`.
pub fn expand_packages_pathspec(path: &str, root: &Path) -> Option<String> {
    let rest = path.strip_prefix(PACKAGES_PATHSPEC_PREFIX)?;
    Some(
        root.join("packages")
            .join(rest)
            .to_string_lossy()
            .to_string(),
    )
}

async fn expand_paths<G>(git: &G, paths: &[String]) -> Result<Vec<String>, CommitError>
where
    G: GitPort + ?Sized,
{
    if !paths.iter().any(|p| p.starts_with(PACKAGES_PATHSPEC_PREFIX)) {
        return Ok(paths.to_vec());
    }

    let root = git.repository_root().await?;
    let expanded: Vec<String> = paths
        .iter()
        .map(|p| expand_packages_pathspec(p, &root).unwrap_or_else(|| p.clone()))
        .collect();

    debug!("expanded pathspecs: {:?} -> {:?}", paths, expanded);
    Ok(expanded)
}

/// Refuse to stage `paths` if any of them covers an already-staged file.
///
/// Every path is resolved concurrently; paths that fail to resolve (for
/// example untracked files) are skipped rather than aborting the check.
pub async fn check_clobber<G>(
    git: &G,
    paths: &[String],
    pre_staged: &[String],
) -> Result<(), CommitError>
where
    G: GitPort + ?Sized,
{
    if paths.is_empty() || pre_staged.is_empty() {
        return Ok(());
    }

    let results = join_all(paths.iter().map(|p| resolve_full_name(git, p))).await;
    let already_staged: HashSet<&str> = pre_staged.iter().map(String::as_str).collect();

    let mut clobbered: Vec<String> = Vec::new();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(resolution) => {
                for file in resolution.files() {
                    if already_staged.contains(file.as_str()) && !clobbered.contains(file) {
                        clobbered.push(file.clone());
                    }
                }
            }
            Err(e) => warn!("safety check: skipping '{}': {}", path, e),
        }
    }

    if clobbered.is_empty() {
        Ok(())
    } else {
        Err(CommitError::WouldClobberIndex { paths: clobbered })
    }
}

/// Stage the invocation's paths and commit them with a derived message.
pub async fn run<G>(
    git: &G,
    invocation: &Invocation,
    detector: &BreakingChangeDetector,
) -> Result<CommitOutcome, CommitError>
where
    G: GitPort + ?Sized,
{
    if !git.is_repository().await? {
        return Err(CommitError::NotARepository);
    }

    let pre_staged = staged_paths(&git.status().await?);
    debug!("pre-staged paths: {:?}", pre_staged);

    if invocation.paths.is_empty() && pre_staged.is_empty() {
        return Err(CommitError::NothingToStage);
    }

    let paths = expand_paths(git, &invocation.paths).await?;

    if invocation.force {
        debug!("--force given, skipping clobber check");
    } else {
        check_clobber(git, &paths, &pre_staged).await?;
    }

    git.stage(&paths).await?;

    let staged = staged_paths(&git.status().await?);
    debug!("staged paths: {:?}", staged);
    if staged.is_empty() {
        return Err(CommitError::NothingToCommit);
    }

    // As-is scopes echo what was typed, not the expanded pathspec.
    let scope_paths = match invocation.mode {
        DerivationMode::AsIs => &invocation.paths,
        _ => &paths,
    };

    let scope = derive_scope(
        git,
        &invocation.mode,
        ScopeContext {
            passed_paths: scope_paths,
            staged_paths: &staged,
            commit_type: &invocation.commit_type,
        },
    )
    .await?;

    let message = build_commit_message(
        &invocation.commit_type,
        &scope,
        &invocation.message,
        detector,
    );
    debug!("commit message: {:?}", message);

    git.commit(
        &message,
        CommitOptions {
            verify: invocation.verify,
            silent: invocation.silent,
        },
    )
    .await?;

    Ok(CommitOutcome { message, staged })
}
