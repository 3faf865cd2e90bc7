//! The root heuristic: shorten a full path into a short, monorepo-aware scope.
//!
//! Rules, in order of precedence:
//!
//! 1. A file at the repository root becomes its name with every extension
//!    stripped (`index.json` -> `index`), even when it looks like a
//!    `packages` or `external*` entry.
//! 2. `packages/<name>/...` becomes `packages/<name>`.
//! 3. `external*/...` becomes `externals`.
//! 4. When the first directory matches the commit type, the scope comes from
//!    the second segment: the directory name if it has children, otherwise
//!    the file name, omitted entirely when that file is an `index`.
//! 5. Anything else uses the first directory.
//!
//! Rules 1, 4 and 5 strip extensions and drop a scope that would just repeat
//! the commit type.

/// What a full scope path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootTarget<'a> {
    /// A single resolved file.
    File(&'a str),
    /// A common ancestor directory of several files.
    Directory(&'a str),
}

/// First non-empty `.`-delimited segment of `name`.
///
/// `index.json` -> `index`, `.index.xedni.2.json` -> `index`, `file1` -> `file1`.
pub fn strip_extensions(name: &str) -> &str {
    name.split('.').find(|s| !s.is_empty()).unwrap_or("")
}

/// Reduce a full scope path to its root-heuristic scope, lowercased.
///
/// An empty return value means the scope should be omitted.
pub fn reduce_to_root(target: RootTarget<'_>, commit_type: &str) -> String {
    let commit_type = commit_type.to_lowercase();
    let (full, is_file) = match target {
        RootTarget::File(path) => (path.to_lowercase(), true),
        RootTarget::Directory(path) => (path.to_lowercase(), false),
    };

    let segments: Vec<&str> = full.split('/').filter(|s| !s.is_empty()).collect();

    let candidate = match segments.as_slice() {
        [] => "",
        [file] if is_file => strip_extensions(file),
        ["packages", package, ..] => return format!("packages/{}", package),
        [first, ..] if first.starts_with("external") => return "externals".to_string(),
        [first, second, rest @ ..] if *first == commit_type => {
            let second = strip_extensions(second);
            if rest.is_empty() && second == "index" {
                ""
            } else {
                second
            }
        }
        [first, ..] => strip_extensions(first),
    };

    if candidate == commit_type {
        String::new()
    } else {
        candidate.to_string()
    }
}
