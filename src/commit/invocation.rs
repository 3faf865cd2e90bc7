//! Turning command-line words into a validated [`Invocation`].

use crate::error::CommitError;
use crate::git::VerifyMode;
use crate::scope::DerivationMode;

/// Rewrite the shorthand scope tokens to their flags.
///
/// `-` → `-o` (omit), `--` → `-b` (basename), `---` → `-r` (root).
pub fn rewrite_aliases<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "-" => "-o".to_string(),
            "--" => "-b".to_string(),
            "---" => "-r".to_string(),
            _ => arg,
        })
        .collect()
}

/// The scope option flags as parsed, before exclusivity is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeFlags {
    pub omit: bool,
    pub as_is: bool,
    pub basename: bool,
    pub full: bool,
    pub root: bool,
}

impl ScopeFlags {
    fn count(&self) -> usize {
        [self.omit, self.as_is, self.basename, self.full, self.root]
            .iter()
            .filter(|set| **set)
            .count()
    }

    /// The selected derivation mode, `None` when no flag was given.
    pub fn mode(&self) -> Result<Option<DerivationMode>, CommitError> {
        if self.count() > 1 {
            return Err(CommitError::MultipleScopeOptions);
        }

        let mode = if self.omit {
            Some(DerivationMode::Omit)
        } else if self.as_is {
            Some(DerivationMode::AsIs)
        } else if self.basename {
            Some(DerivationMode::Basename)
        } else if self.full {
            Some(DerivationMode::Full)
        } else if self.root {
            Some(DerivationMode::Root)
        } else {
            None
        };

        Ok(mode)
    }
}

/// Everything one stage-then-commit run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Paths to stage, in command-line order.
    pub paths: Vec<String>,
    pub commit_type: String,
    pub mode: DerivationMode,
    pub message: String,
    /// Skip the clobber safety check.
    pub force: bool,
    pub verify: VerifyMode,
    pub silent: bool,
}

impl Invocation {
    /// Split `[path...] type [scope] message` according to the scope flags.
    ///
    /// The scope positional is only expected when no scope flag is set.
    pub fn from_positionals(
        mut positionals: Vec<String>,
        flags: ScopeFlags,
    ) -> Result<Self, CommitError> {
        let derived = flags.mode()?;
        let required = if derived.is_some() { 2 } else { 3 };

        if positionals.len() < required {
            return Err(CommitError::MissingArguments);
        }

        let mut tail = positionals.split_off(positionals.len() - required).into_iter();
        let (commit_type, mode, message) = match (derived, tail.next(), tail.next(), tail.next()) {
            (Some(mode), Some(commit_type), Some(message), None) => (commit_type, mode, message),
            (None, Some(commit_type), Some(scope), Some(message)) => {
                (commit_type, DerivationMode::Explicit(scope), message)
            }
            _ => return Err(CommitError::MissingArguments),
        };

        Ok(Self {
            paths: positionals,
            commit_type,
            mode,
            message,
            force: false,
            verify: VerifyMode::default(),
            silent: false,
        })
    }
}
