//! Label rules: which glob pattern implies which label.

use indexmap::IndexSet;

use crate::error::Result;
use crate::glob::Glob;

/// A single `pattern -> label` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRule {
    /// Pattern matched against changed file paths.
    pub pattern: Glob,

    /// Label implied by a match.
    pub label: String,
}

impl LabelRule {
    /// Create a rule, compiling the pattern.
    ///
    /// # Errors
    /// Returns error if the pattern is not a valid glob.
    pub fn new(pattern: &str, label: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Glob::new(pattern)?,
            label: label.into(),
        })
    }

    /// Check if the rule applies to a file path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Ordered collection of label rules.
///
/// Several rules may share a label. Order only affects the order in which
/// matches are reported, never the resulting label set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<LabelRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn push(&mut self, rule: LabelRule) {
        self.rules.push(rule);
    }

    /// Build a rule set from `(label, patterns)` entries, where `patterns`
    /// is a newline-separated list. Blank lines are skipped.
    ///
    /// # Errors
    /// Returns error if any pattern is not a valid glob.
    pub fn from_label_patterns<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut rules = Self::new();
        for (label, patterns) in entries {
            for pattern in patterns.lines().map(str::trim).filter(|p| !p.is_empty()) {
                rules.push(LabelRule::new(pattern, label)?);
            }
        }
        Ok(rules)
    }

    /// Iterate over the rules in order.
    pub fn iter(&self) -> std::slice::Iter<'_, LabelRule> {
        self.rules.iter()
    }

    /// Distinct labels governed by this rule set, in first-seen order.
    #[must_use]
    pub fn labels(&self) -> IndexSet<&str> {
        self.rules.iter().map(|r| r.label.as_str()).collect()
    }

    /// Check if a label is governed by any rule.
    #[must_use]
    pub fn governs(&self, label: &str) -> bool {
        self.rules.iter().any(|r| r.label == label)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a LabelRule;
    type IntoIter = std::slice::Iter<'a, LabelRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<LabelRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = LabelRule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_patterns_keeps_order() {
        let rules = RuleSet::from_label_patterns([
            ("frontend", "\n*.js\n*.css"),
            ("docs", "*.md"),
            ("frontend", "web/*"),
        ])
        .unwrap();

        let pairs: Vec<_> = rules
            .iter()
            .map(|r| (r.pattern.as_str(), r.label.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("*.js", "frontend"),
                ("*.css", "frontend"),
                ("*.md", "docs"),
                ("web/*", "frontend"),
            ]
        );

        let labels: Vec<_> = rules.labels().into_iter().collect();
        assert_eq!(labels, vec!["frontend", "docs"]);
    }

    #[test]
    fn test_blank_patterns_skipped() {
        let rules = RuleSet::from_label_patterns([("empty", "\n  \n")]).unwrap();
        assert!(rules.is_empty());
        assert!(!rules.governs("empty"));
    }

    #[test]
    fn test_empty_class_never_matches() {
        let rules = RuleSet::from_label_patterns([("never", "[z-a]")]).unwrap();
        assert!(rules.governs("never"));
        assert!(!rules.iter().any(|r| r.matches("a")));
    }

    #[test]
    fn test_governs() {
        let rules: RuleSet = [LabelRule::new("*.py", "python").unwrap()]
            .into_iter()
            .collect();
        assert_eq!(rules.len(), 1);
        assert!(rules.governs("python"));
        assert!(!rules.governs("bug"));
        assert!(rules.iter().next().unwrap().matches("src/app.py"));
    }
}
