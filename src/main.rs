//! gac - CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use gac::commit::{self, BreakingChangeDetector, Invocation, ScopeFlags, rewrite_aliases};
use gac::error::CommitError;
use gac::git::{GitCli, VerifyMode, check_git_installed};
use gac::logging;

const AFTER_HELP: &str = "\
Arguments are: [path...] commit-type commit-scope commit-message
With a scope option the commit-scope argument is omitted:
               [path...] commit-type commit-message

Shorthands: '-' for --scope-omit, '--' for --scope-basename, '---' for --scope-root.
A path starting with '::' expands to <repository root>/packages/<rest>.

Examples:
  gac path/to/file1 feat file1 \"add new feature\"
  gac -b src/index.ts fix \"handle empty input\"
  gac ::pkg-1 --- chore \"bump dependencies\"";

/// Stage paths and commit them with a conventional commit message.
#[derive(Parser, Debug)]
#[command(name = "gac")]
#[command(about = "Stage paths and commit them with a conventional commit message")]
#[command(override_usage = "gac [OPTIONS] [PATH]... <TYPE> [SCOPE] <MESSAGE>")]
#[command(after_help = AFTER_HELP)]
#[command(version)]
struct Cli {
    /// Paths to stage, then commit-type, commit-scope (unless a scope option is given), and commit-message
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Omit the commit scope
    #[arg(short = 'o', long)]
    scope_omit: bool,

    /// Use the first path exactly as given as the commit scope
    #[arg(short = 'a', long)]
    scope_as_is: bool,

    /// Use the file name of the first path as the commit scope
    #[arg(short = 'b', long)]
    scope_basename: bool,

    /// Use the full repository-relative path of the first path as the commit scope
    #[arg(short = 'f', long)]
    scope_full: bool,

    /// Use the root directory (or package) of the first path as the commit scope
    #[arg(short = 'r', long)]
    scope_root: bool,

    /// Print nothing, including git's own output
    #[arg(short = 's', long)]
    silent: bool,

    /// Stage even if already-staged changes could be clobbered
    #[arg(long)]
    force: bool,

    /// Commit hook mode: full (true), skip (false), or simple
    #[arg(short = 'v', long, value_name = "MODE", value_parser = clap::value_parser!(VerifyMode))]
    verify: Option<VerifyMode>,

    /// Skip commit hooks (same as --verify=skip)
    #[arg(long, conflicts_with = "verify")]
    no_verify: bool,
}

impl Cli {
    fn scope_flags(&self) -> ScopeFlags {
        ScopeFlags {
            omit: self.scope_omit,
            as_is: self.scope_as_is,
            basename: self.scope_basename,
            full: self.scope_full,
            root: self.scope_root,
        }
    }

    fn verify_mode(&self) -> VerifyMode {
        if self.no_verify {
            VerifyMode::Skip
        } else {
            self.verify.unwrap_or_default()
        }
    }

    fn into_invocation(self) -> Result<Invocation, CommitError> {
        let flags = self.scope_flags();
        let verify = self.verify_mode();
        let mut invocation = Invocation::from_positionals(self.args, flags)?;
        invocation.force = self.force;
        invocation.verify = verify;
        invocation.silent = self.silent;
        Ok(invocation)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(rewrite_aliases(std::env::args())) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let silent = cli.silent;
    if !silent {
        logging::init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !silent {
                eprintln!("error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let invocation = cli.into_invocation()?;

    check_git_installed().await?;
    let git = GitCli::from_current_dir()?;

    let outcome = commit::run(&git, &invocation, &BreakingChangeDetector::default()).await?;
    tracing::debug!(
        "committed {} path(s): {:?}",
        outcome.staged.len(),
        outcome.message
    );

    Ok(())
}
