//! Human-readable steps for applying a generated plan.

use super::filter_repo::SCRIPT_FILE;

pub const INSTRUCTIONS_FILE: &str = "INSTRUCTIONS.txt";

pub fn render_instructions(count: usize, digest: &str) -> String {
    format!(
        "INSTRUCTIONS FOR FIXING THE REPOSITORY
======================================

The repository contains {count} path(s) that are invalid on Windows.
Plan digest: {digest}

1. Review rename_mapping.txt (or rename_mapping.json).

2. Install git-filter-repo:
   pip install git-filter-repo

3. Make a fresh clone; filter-repo refuses to rewrite a repository
   with unpushed work unless forced:
   git clone --no-local <source> repo-clean

4. Run the plan against the clone:
   bash {SCRIPT_FILE} repo-clean

5. Check out the rewritten clone on Windows, or push it to a new remote.

History is rewritten: every commit hash changes. Coordinate with anyone
else who has a clone before pushing.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_count_digest_and_script() {
        let text = render_instructions(42, "deadbeef");
        assert!(text.contains("42 path(s)"));
        assert!(text.contains("Plan digest: deadbeef"));
        assert!(text.contains("bash fix_repository.sh repo-clean"));
    }
}
