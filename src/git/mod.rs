//! Git access: the port trait, its real implementation, and the status model.

pub mod cli;
pub mod port;
pub mod status;

pub use cli::{GitCli, VERIFY_SIMPLE_ENV_VAR, check_git_installed};
pub use port::{CommitOptions, GitPort, VerifyMode};
pub use status::{FileState, StatusEntry, staged_paths};

#[cfg(test)]
pub use port::MockGitPort;
