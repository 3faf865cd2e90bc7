//! gac - stage paths and commit them with a conventional commit message in one step.
//!
//! # Overview
//!
//! gac stages the given paths, derives the commit scope from them (or takes it
//! verbatim), assembles a `type(scope): message` header, marks breaking
//! changes, and commits. Before staging it refuses to clobber changes that
//! were already staged unless forced.

pub mod commit;
pub mod error;
pub mod git;
pub mod logging;
pub mod scope;

// Re-export commonly used types
pub use commit::{BreakingChangeDetector, CommitOutcome, Invocation, ScopeFlags};
pub use error::{CommitError, GitError, ScopeError};
pub use git::{CommitOptions, GitCli, GitPort, StatusEntry, VerifyMode};
pub use scope::{DerivationMode, Resolution};
