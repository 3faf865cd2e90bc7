//! Scope derivation: turn path arguments and staged paths into a commit scope.

use std::fmt;

use tracing::debug;

use crate::error::ScopeError;
use crate::git::GitPort;
use crate::scope::resolve::{Resolution, common_ancestor, resolve_full_name};
use crate::scope::root::{RootTarget, reduce_to_root};

/// How the commit scope is chosen. Exactly one per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationMode {
    /// Scope text given on the command line, used verbatim.
    Explicit(String),
    /// No scope: `type: message`.
    Omit,
    /// The first path argument exactly as typed.
    AsIs,
    /// File name of the first path (or the single staged file).
    Basename,
    /// Root-relative path of the first path (or the staged files' ancestor).
    Full,
    /// [`DerivationMode::Full`] shortened by the root heuristic.
    Root,
}

impl DerivationMode {
    /// The command-line flag that selects this mode.
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            DerivationMode::Explicit(_) => None,
            DerivationMode::Omit => Some("--scope-omit"),
            DerivationMode::AsIs => Some("--scope-as-is"),
            DerivationMode::Basename => Some("--scope-basename"),
            DerivationMode::Full => Some("--scope-full"),
            DerivationMode::Root => Some("--scope-root"),
        }
    }

    /// Whether the scope is computed rather than supplied.
    pub fn is_derived(&self) -> bool {
        !matches!(self, DerivationMode::Explicit(_))
    }
}

impl fmt::Display for DerivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivationMode::Explicit(scope) => write!(f, "explicit({})", scope),
            other => write!(f, "{}", other.flag().unwrap_or_default()),
        }
    }
}

/// Inputs to [`derive_scope`] besides the mode.
#[derive(Debug, Clone, Copy)]
pub struct ScopeContext<'a> {
    /// Path arguments in command-line order.
    pub passed_paths: &'a [String],
    /// Paths staged after staging `passed_paths`.
    pub staged_paths: &'a [String],
    /// Commit type, used by the root heuristic.
    pub commit_type: &'a str,
}

/// Compute the scope for `mode`. An empty string means "no scope".
///
/// Derived scopes are lowercased; explicit scopes are returned untouched.
pub async fn derive_scope<G>(
    git: &G,
    mode: &DerivationMode,
    ctx: ScopeContext<'_>,
) -> Result<String, ScopeError>
where
    G: GitPort + ?Sized,
{
    debug!("derive_scope: mode={} paths={:?}", mode, ctx.passed_paths);
    let first_path = ctx.passed_paths.first();

    let scope = match mode {
        DerivationMode::Explicit(scope) => scope.clone(),
        DerivationMode::Omit => String::new(),
        DerivationMode::AsIs => first_path.cloned().ok_or(ScopeError::AsIsWithoutPath)?,
        DerivationMode::Basename => {
            let file = match first_path {
                Some(path) => match resolve_full_name(git, path).await? {
                    Resolution::Unambiguous(file) => file,
                    Resolution::Ambiguous(_) => return Err(ScopeError::AmbiguousPath),
                },
                None => match ctx.staged_paths {
                    [single] => single.clone(),
                    _ => return Err(ScopeError::AmbiguousStaged),
                },
            };
            basename(&file).to_lowercase()
        }
        DerivationMode::Full => {
            let target = full_target(git, first_path, ctx.staged_paths, mode).await?;
            target.path().to_lowercase()
        }
        DerivationMode::Root => {
            let target = full_target(git, first_path, ctx.staged_paths, mode).await?;
            reduce_to_root(target.as_root_target(), ctx.commit_type)
        }
    };

    debug!("derive_scope: computed {:?}", scope);
    Ok(scope)
}

/// Full-path scope before any lowercasing or root reduction.
enum FullTarget {
    File(String),
    Ancestor(String),
}

impl FullTarget {
    fn path(&self) -> &str {
        match self {
            FullTarget::File(p) | FullTarget::Ancestor(p) => p,
        }
    }

    fn as_root_target(&self) -> RootTarget<'_> {
        match self {
            FullTarget::File(p) => RootTarget::File(p),
            FullTarget::Ancestor(p) => RootTarget::Directory(p),
        }
    }
}

async fn full_target<G>(
    git: &G,
    first_path: Option<&String>,
    staged_paths: &[String],
    mode: &DerivationMode,
) -> Result<FullTarget, ScopeError>
where
    G: GitPort + ?Sized,
{
    let ancestor_of = |files: &[String]| {
        common_ancestor(files)
            .map(FullTarget::Ancestor)
            .ok_or(ScopeError::NoCommonAncestor {
                flag: mode.flag().unwrap_or_default(),
            })
    };

    match first_path {
        Some(path) => match resolve_full_name(git, path).await? {
            Resolution::Unambiguous(file) => Ok(FullTarget::File(file)),
            Resolution::Ambiguous(files) => ancestor_of(&files),
        },
        None => match staged_paths {
            [single] => Ok(FullTarget::File(single.clone())),
            many => ancestor_of(many),
        },
    }
}

fn basename(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}
