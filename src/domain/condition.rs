use regex::Regex;
use std::sync::OnceLock;

// Matches a single '$(TargetFramework)' == 'net8.0' style clause. Multiple
// clauses may be OR-combined in one condition string.
fn clause_regex() -> &'static Regex {
    static CLAUSE: OnceLock<Regex> = OnceLock::new();
    CLAUSE.get_or_init(|| {
        Regex::new(r"'\$\(TargetFramework\)'\s*(?<operator>[!=]=)\s*'(?<target>[^']*)'")
            .expect("clause pattern is valid")
    })
}

/// A parsed MSBuild item group condition.
///
/// Only equality comparisons against `$(TargetFramework)` are supported,
/// optionally OR-combined. Anything else never matches, so reference sets
/// guarded by an unsupported condition are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceCondition {
    /// No condition - the reference set always applies.
    Unconditional,
    /// `'$(TargetFramework)' == 'tfm'`
    Equals(String),
    /// `'$(TargetFramework)' != 'tfm'`
    NotEquals(String),
    /// OR-combined clauses; the first clause that evaluates true wins.
    AnyOf(Vec<ReferenceCondition>),
}

impl ReferenceCondition {
    /// Parses a raw condition string into its structured form. The string is
    /// parsed once at solution-read time rather than re-matched per
    /// evaluation.
    pub fn parse(condition: &str) -> Self {
        let condition = condition.trim();

        if condition.is_empty() {
            return ReferenceCondition::Unconditional;
        }

        let mut clauses: Vec<ReferenceCondition> = clause_regex()
            .captures_iter(condition)
            .map(|captures| {
                let target = captures["target"].to_string();

                if &captures["operator"] == "==" {
                    ReferenceCondition::Equals(target)
                } else {
                    ReferenceCondition::NotEquals(target)
                }
            })
            .collect();

        match clauses.len() {
            // A non-empty condition we cannot interpret never matches.
            0 => ReferenceCondition::AnyOf(Vec::new()),
            1 => clauses.remove(0),
            _ => ReferenceCondition::AnyOf(clauses),
        }
    }

    /// Evaluates the condition against the active target framework.
    pub fn matches(&self, target_framework: &str) -> bool {
        match self {
            ReferenceCondition::Unconditional => true,
            ReferenceCondition::Equals(target) => target.eq_ignore_ascii_case(target_framework),
            ReferenceCondition::NotEquals(target) => !target.eq_ignore_ascii_case(target_framework),
            ReferenceCondition::AnyOf(clauses) => {
                clauses.iter().any(|clause| clause.matches(target_framework))
            }
        }
    }
}
