//! Summary of problematic paths for human display.

use std::collections::HashSet;

use crate::rules::RuleTable;

/// Counts and a bounded list of example problematic paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemReport {
    pub total_paths: usize,
    pub problematic_count: usize,
    /// The first problematic paths, in input order.
    pub examples: Vec<String>,
}

impl ProblemReport {
    /// Repeated inputs are counted once, matching what a mapping build does.
    pub fn from_paths<S: AsRef<str>>(rules: &RuleTable, paths: &[S], limit: usize) -> Self {
        let mut seen = HashSet::new();
        let mut problematic_count = 0;
        let mut examples = Vec::new();
        for path in paths.iter().map(AsRef::as_ref) {
            if rules.contains_forbidden(path) && seen.insert(path) {
                problematic_count += 1;
                if examples.len() < limit {
                    examples.push(path.to_string());
                }
            }
        }
        Self {
            total_paths: paths.len(),
            problematic_count,
            examples,
        }
    }

    /// Problematic paths not listed in `examples`.
    pub fn remaining(&self) -> usize {
        self.problematic_count - self.examples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_limits_examples() {
        let paths: Vec<String> = (0..15)
            .map(|i| format!("blog/index.html?p={i}"))
            .chain(["assets/site.css".to_string()])
            .collect();
        let report = ProblemReport::from_paths(&RuleTable::default(), &paths, 10);
        assert_eq!(report.total_paths, 16);
        assert_eq!(report.problematic_count, 15);
        assert_eq!(report.examples.len(), 10);
        assert_eq!(report.examples[0], "blog/index.html?p=0");
        assert_eq!(report.remaining(), 5);
    }

    #[test]
    fn repeated_paths_count_once() {
        let report =
            ProblemReport::from_paths(&RuleTable::default(), &["x?.md", "x?.md", "y*.md"], 10);
        assert_eq!(report.total_paths, 3);
        assert_eq!(report.problematic_count, 2);
        assert_eq!(report.examples, vec!["x?.md", "y*.md"]);
    }

    #[test]
    fn clean_tree() {
        let report = ProblemReport::from_paths(&RuleTable::default(), &["a.txt", "b/c.md"], 10);
        assert_eq!(report.problematic_count, 0);
        assert!(report.examples.is_empty());
        assert_eq!(report.remaining(), 0);
    }
}
