//! The real [`GitPort`]: git2 for reads, the `git` executable for the rest.
//!
//! Staging, committing and pathspec resolution shell out to the system `git`
//! binary, so hooks and subdirectory-relative paths behave as on the command line.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use git2::{ErrorCode, Repository, StatusOptions};
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;
use crate::git::port::{CommitOptions, GitPort, VerifyMode};
use crate::git::status::{FileState, StatusEntry};

/// Environment variable exported to hooks when committing with [`VerifyMode::Simple`].
pub const VERIFY_SIMPLE_ENV_VAR: &str = "GAC_VERIFY_SIMPLE";

/// Check that the `git` executable is installed and runs.
pub async fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::NotInstalled);
    }

    let version_check = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(GitError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(GitError::NotInstalled);
    }

    Ok(())
}

/// Git operations rooted at a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Operate on the process's current directory.
    pub fn from_current_dir() -> Result<Self, GitError> {
        let workdir = std::env::current_dir().map_err(GitError::SpawnFailed)?;
        Ok(Self::new(workdir))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open(&self) -> Result<Repository, GitError> {
        Repository::discover(&self.workdir).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::NotARepository
            } else {
                GitError::OpenRepository(e)
            }
        })
    }

    /// Run a git command in the working directory and return its stdout.
    async fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(["-c", "core.quotepath=off"])
            .args(args)
            .current_dir(&self.workdir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(GitError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit {
                operation: operation.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn name_lines(stdout: &str) -> impl Iterator<Item = String> + '_ {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(String::from)
}

#[async_trait]
impl GitPort for GitCli {
    async fn is_repository(&self) -> Result<bool, GitError> {
        match self.open() {
            Ok(_) => Ok(true),
            Err(GitError::NotARepository) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn repository_root(&self) -> Result<PathBuf, GitError> {
        let repo = self.open()?;
        let root = repo.workdir().ok_or(GitError::BareRepository)?;
        Ok(root.to_path_buf())
    }

    async fn status(&self) -> Result<Vec<StatusEntry>, GitError> {
        let repo = self.open()?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = repo.statuses(Some(&mut opts)).map_err(GitError::Status)?;

        let mut entries = Vec::with_capacity(statuses.len());
        for entry in statuses.iter() {
            let status = entry.status();
            let index = FileState::from_index(status);
            let worktree = FileState::from_worktree(status);

            let rename = entry
                .head_to_index()
                .filter(|_| status.is_index_renamed())
                .and_then(|delta| {
                    let from = delta.old_file().path()?.to_string_lossy().to_string();
                    let to = delta.new_file().path()?.to_string_lossy().to_string();
                    Some((from, to))
                });

            let (path, original_path) = match rename {
                Some((from, to)) => (to, Some(from)),
                None => match entry.path() {
                    Some(p) => (p.to_string(), None),
                    None => continue,
                },
            };

            entries.push(StatusEntry {
                path,
                original_path,
                index,
                worktree,
            });
        }

        debug!("status: {} entries", entries.len());
        Ok(entries)
    }

    async fn stage(&self, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            debug!("stage: nothing to add");
            return Ok(());
        }

        debug!("stage: adding paths {:?}", paths);
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run_git(&args, "add").await?;
        Ok(())
    }

    async fn commit(&self, message: &str, options: CommitOptions) -> Result<(), GitError> {
        debug!(
            "commit: verify={} silent={} message={:?}",
            options.verify, options.silent, message
        );

        let mut command = Command::new("git");
        command
            .args(["commit", "-m", message])
            .current_dir(&self.workdir);

        match options.verify {
            VerifyMode::Full => {}
            VerifyMode::Skip => {
                command.arg("--no-verify");
            }
            VerifyMode::Simple => {
                command.env(VERIFY_SIMPLE_ENV_VAR, "true");
            }
        }

        if options.silent {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let status = command.status().await.map_err(GitError::SpawnFailed)?;
        if !status.success() {
            return Err(GitError::CommitFailed);
        }

        Ok(())
    }

    async fn changed_files(&self, path: &str) -> Result<Vec<String>, GitError> {
        let unstaged_args = ["diff", "--name-only", "--", path];
        let staged_args = ["diff", "--staged", "--name-only", "--", path];
        let (unstaged, staged) = tokio::try_join!(
            self.run_git(&unstaged_args, "diff"),
            self.run_git(&staged_args, "diff --staged"),
        )?;

        let files: Vec<String> = name_lines(&unstaged).chain(name_lines(&staged)).collect();
        debug!("changed_files({}): {:?}", path, files);
        Ok(files)
    }
}
