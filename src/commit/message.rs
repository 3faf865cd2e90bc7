//! Conventional commit message assembly and breaking change marking.

use regex_lite::Regex;
use tracing::debug;

/// Footer keywords that mark a commit as breaking, longest first.
pub const DEFAULT_BREAKING_KEYWORDS: &[&str] = &["BREAKING CHANGES", "BREAKING CHANGE", "BREAKING"];

/// Detects breaking change notes in a commit message body.
///
/// A line matches when, ignoring case and any leading spaces, tabs or `*`, it
/// starts with one of the keywords followed by `:` or blanks and more text on
/// the same line.
#[derive(Debug, Clone)]
pub struct BreakingChangeDetector {
    pattern: Option<Regex>,
}

impl BreakingChangeDetector {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Self { pattern: None };
        }

        // Longer keywords first so "BREAKING CHANGE" is not cut short by "BREAKING".
        keywords.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let alternatives = keywords
            .iter()
            .map(|k| regex_lite::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(r"(?im)^[ \t*]*(?:{})[: \t]+\S.*$", alternatives);
        let pattern = Regex::new(&pattern).expect("escaped keyword pattern is valid");

        Self {
            pattern: Some(pattern),
        }
    }

    pub fn is_breaking(&self, message: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(message))
    }
}

impl Default for BreakingChangeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKING_KEYWORDS)
    }
}

/// Build `type(scope): message`, or `type: message` when `scope` is empty.
///
/// The commit type is always lowercased.
pub fn assemble_message(commit_type: &str, scope: &str, message: &str) -> String {
    let commit_type = commit_type.to_lowercase();
    if scope.is_empty() {
        format!("{}: {}", commit_type, message)
    } else {
        format!("{}({}): {}", commit_type, scope, message)
    }
}

/// Insert `!` immediately before the first `:` of an assembled message.
///
/// Messages already marked (`type!:`) are returned unchanged.
pub fn mark_breaking(assembled: &str) -> String {
    match assembled.find(':') {
        Some(idx) if !assembled[..idx].ends_with('!') => {
            format!("{}!{}", &assembled[..idx], &assembled[idx..])
        }
        _ => assembled.to_string(),
    }
}

/// Assemble the final commit message, marking it breaking when the
/// message text contains a breaking change note.
pub fn build_commit_message(
    commit_type: &str,
    scope: &str,
    message: &str,
    detector: &BreakingChangeDetector,
) -> String {
    let assembled = assemble_message(commit_type, scope, message);

    if detector.is_breaking(message) {
        debug!("breaking change note found, marking commit");
        mark_breaking(&assembled)
    } else {
        assembled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_with_scope() {
        assert_eq!(
            assemble_message("feat", "file1", "new feature"),
            "feat(file1): new feature"
        );
    }

    #[test]
    fn test_assemble_without_scope() {
        assert_eq!(assemble_message("type", "", "message"), "type: message");
    }

    #[test]
    fn test_assemble_lowercases_type_only() {
        assert_eq!(
            assemble_message("TyPe", "SCOPE", "Message"),
            "type(SCOPE): Message"
        );
    }

    #[test]
    fn test_breaking_marker_with_scope() {
        let detector = BreakingChangeDetector::default();
        let message = "add x\n\nBREAKING CHANGE: x";
        assert_eq!(
            build_commit_message("fix", "foo", message, &detector),
            format!("fix(foo)!: {}", message)
        );
    }

    #[test]
    fn test_breaking_marker_without_scope() {
        let detector = BreakingChangeDetector::default();
        assert_eq!(
            build_commit_message("type", "", "message\n\nBREAKING: big change", &detector),
            "type!: message\n\nBREAKING: big change"
        );
    }

    #[test]
    fn test_breaking_marker_goes_before_first_colon_only() {
        let detector = BreakingChangeDetector::default();
        let built = build_commit_message(
            "type",
            "scope",
            "message: detail\n\nBREAKING CHANGES: change",
            &detector,
        );
        assert!(built.starts_with("type(scope)!: message: detail"));
    }

    #[test]
    fn test_breaking_keyword_variants() {
        let detector = BreakingChangeDetector::default();
        assert!(detector.is_breaking("msg\n\nBREAKING: change"));
        assert!(detector.is_breaking("msg\n\nBREAKING CHANGE: change"));
        assert!(detector.is_breaking("msg\n\nBREAKING CHANGES: change"));
        assert!(detector.is_breaking("msg\n\nbreaking change: lowercase"));
        assert!(detector.is_breaking("msg\n\n  * BREAKING CHANGE: bulleted"));
        assert!(detector.is_breaking("msg\n\nBREAKING CHANGE removed the flag"));
    }

    #[test]
    fn test_not_breaking() {
        let detector = BreakingChangeDetector::default();
        assert!(!detector.is_breaking("message"));
        assert!(!detector.is_breaking("message\n\nBREAKING:"));
        assert!(!detector.is_breaking("fixes a non-BREAKING: issue"));
    }

    #[test]
    fn test_keyword_and_text_must_share_a_line() {
        let detector = BreakingChangeDetector::default();
        assert!(!detector.is_breaking("fix flaky suite\n\nthese were\nbreaking\ntests in CI"));
        assert!(!detector.is_breaking("msg\n\nBREAKING CHANGE:\nremoved the flag"));
        assert!(!detector.is_breaking("msg\n\n*\nBREAKING\n"));
        assert!(detector.is_breaking("msg\n\n\tBREAKING CHANGE:\tremoved the flag"));
    }

    #[test]
    fn test_custom_keywords() {
        let detector = BreakingChangeDetector::new(["INCOMPATIBLE"]);
        assert!(detector.is_breaking("msg\n\nINCOMPATIBLE: new wire format"));
        assert!(!detector.is_breaking("msg\n\nBREAKING CHANGE: ignored"));
    }

    #[test]
    fn test_keywords_are_escaped() {
        let detector = BreakingChangeDetector::new(["BREAK(S)"]);
        assert!(detector.is_breaking("msg\n\nBREAK(S): yes"));
        assert!(!detector.is_breaking("msg\n\nBREAKS: no"));
    }

    #[test]
    fn test_empty_keywords_never_breaking() {
        let detector = BreakingChangeDetector::new(Vec::<String>::new());
        assert!(!detector.is_breaking("msg\n\nBREAKING CHANGE: x"));
    }

    #[test]
    fn test_mark_breaking_is_idempotent() {
        assert_eq!(mark_breaking("feat(x)!: y"), "feat(x)!: y");
        assert_eq!(mark_breaking("feat: y"), "feat!: y");
        assert_eq!(mark_breaking("no colon"), "no colon");
    }
}
