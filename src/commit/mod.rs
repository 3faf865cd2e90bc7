//! Commit invocation, message assembly, and the stage-then-commit pipeline.

pub mod invocation;
pub mod message;
pub mod pipeline;

pub use invocation::{Invocation, ScopeFlags, rewrite_aliases};
pub use message::{
    BreakingChangeDetector, DEFAULT_BREAKING_KEYWORDS, assemble_message, build_commit_message,
    mark_breaking,
};
pub use pipeline::{CommitOutcome, check_clobber, expand_packages_pathspec, run};
