use thiserror::Error;

use crate::constraint::Constraint;
use crate::version::VersionString;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no installed version satisfies '{0}'")]
    NoMatch(String),
}

/// Pick the version label that satisfies `constraint`.
///
/// Candidates are sorted ascending and the first match wins. For `>=`-style
/// constraints this selects the oldest compatible runtime, for `<`/`<=` the
/// smallest candidate under the bound, and for `=` the unique exact match.
/// The ascending first-match rule is the tie-break contract; callers and
/// tests rely on it, so the sort must stay ascending.
pub fn resolve(constraint: &Constraint, candidates: &[String]) -> Result<String, ResolveError> {
    let mut ordered: Vec<VersionString> = candidates
        .iter()
        .map(|label| VersionString::new(label.as_str()))
        .collect();
    ordered.sort();

    ordered
        .iter()
        .find(|candidate| constraint.op.matches(candidate, &constraint.target))
        .map(|candidate| candidate.as_str().to_string())
        .ok_or_else(|| ResolveError::NoMatch(constraint.to_string()))
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::constraint::Constraint;

    fn candidates() -> Vec<String> {
        ["5.6", "7.0", "7.2", "8.1"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn lower_bound_picks_smallest_satisfying_version() {
        let got = resolve(&Constraint::parse(">=7.0"), &candidates()).unwrap();
        assert_eq!(got, "7.0");
    }

    #[test]
    fn upper_bound_picks_smallest_candidate_under_it() {
        let got = resolve(&Constraint::parse("<7.2"), &candidates()).unwrap();
        assert_eq!(got, "5.6");
    }

    #[test]
    fn exact_match_finds_the_unique_candidate() {
        let got = resolve(&Constraint::parse("=7.2"), &candidates()).unwrap();
        assert_eq!(got, "7.2");
    }

    #[test]
    fn exact_match_on_absent_version_fails() {
        let err = resolve(&Constraint::parse("=9.9"), &candidates()).unwrap_err();
        assert!(err.to_string().contains("=9.9"));
    }

    #[test]
    fn caret_behaves_as_lower_bound() {
        let got = resolve(&Constraint::parse("^7.2"), &candidates()).unwrap();
        assert_eq!(got, "7.2");
    }

    #[test]
    fn input_order_does_not_matter() {
        let shuffled: Vec<String> = ["8.1", "5.6", "7.2", "7.0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let got = resolve(&Constraint::parse(">=7.0"), &shuffled).unwrap();
        assert_eq!(got, "7.0");
    }

    #[test]
    fn strict_greater_skips_the_bound_itself() {
        let got = resolve(&Constraint::parse(">7.0"), &candidates()).unwrap();
        assert_eq!(got, "7.2");
    }
}
