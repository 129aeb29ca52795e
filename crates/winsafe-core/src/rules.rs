//! Forbidden-character rule table.
//!
//! A rule table maps each forbidden character to its replacement text. The
//! same table decides which paths are problematic and how their segments
//! are rewritten, so the two can never disagree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Characters rejected by Windows in a path component.
pub const WINDOWS_RESERVED: &str = "<>:\"|?*";

/// How `&` is rewritten by the built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmpersandStyle {
    /// `&` → `_and_`
    #[default]
    Word,
    /// `&` → `_`
    Underscore,
}

impl AmpersandStyle {
    fn replacement(self) -> &'static str {
        match self {
            AmpersandStyle::Word => "_and_",
            AmpersandStyle::Underscore => "_",
        }
    }
}

/// One entry of the rule table: every character in `chars` becomes `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub chars: String,
    pub replacement: String,
}

impl Rule {
    pub fn new(chars: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            chars: chars.into(),
            replacement: replacement.into(),
        }
    }
}

/// Result of one substitution pass over a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub text: String,
    /// True when at least one character survived that is not a dot, a space
    /// or replacement text. A segment without substance sanitizes to empty.
    pub substantive: bool,
}

/// Validated, ordered rule table with a per-character lookup.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    lookup: BTreeMap<char, usize>,
}

impl RuleTable {
    /// Builds a table from explicit rules, rejecting overlaps and replacements
    /// that would reintroduce a forbidden character or a path separator.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let mut lookup = BTreeMap::new();
        for (index, rule) in rules.iter().enumerate() {
            if rule.chars.is_empty() {
                return Err(RuleError::EmptyCharacterSet { index });
            }
            for ch in rule.chars.chars() {
                if let Some(first) = lookup.insert(ch, index) {
                    if first != index {
                        return Err(RuleError::DuplicateCharacter {
                            ch,
                            first,
                            second: index,
                        });
                    }
                }
            }
        }
        for (index, rule) in rules.iter().enumerate() {
            if let Some(ch) = rule
                .replacement
                .chars()
                .find(|c| lookup.contains_key(c) || is_separator(*c))
            {
                return Err(RuleError::ForbiddenReplacement {
                    index,
                    replacement: rule.replacement.clone(),
                    ch,
                });
            }
        }
        Ok(Self { rules, lookup })
    }

    /// The canonical table: Windows-reserved characters and `=` become `_`,
    /// `&` follows `ampersand`.
    pub fn windows(ampersand: AmpersandStyle) -> Self {
        let rules = vec![
            Rule::new(format!("{WINDOWS_RESERVED}="), "_"),
            Rule::new("&", ampersand.replacement()),
        ];
        let mut lookup = BTreeMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for ch in rule.chars.chars() {
                lookup.insert(ch, index);
            }
        }
        Self { rules, lookup }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_forbidden(&self, ch: char) -> bool {
        self.lookup.contains_key(&ch)
    }

    pub fn contains_forbidden(&self, s: &str) -> bool {
        s.chars().any(|c| self.is_forbidden(c))
    }

    fn replacement_for(&self, ch: char) -> Option<&str> {
        self.lookup
            .get(&ch)
            .map(|&i| self.rules[i].replacement.as_str())
    }

    /// Replaces every forbidden character in `segment`.
    pub fn substitute(&self, segment: &str) -> Substituted {
        self.substitute_with(segment, |_| false)
    }

    /// Like [`substitute`](Self::substitute), but also turns path separators
    /// and control characters into `_`. Used on percent-decoded text, where
    /// `%2F` or `%00` must not survive as raw bytes.
    pub fn substitute_decoded(&self, segment: &str) -> Substituted {
        self.substitute_with(segment, |c| is_separator(c) || c.is_control())
    }

    fn substitute_with(&self, segment: &str, extra: impl Fn(char) -> bool) -> Substituted {
        let mut text = String::with_capacity(segment.len());
        let mut substantive = false;
        for c in segment.chars() {
            if let Some(rep) = self.replacement_for(c) {
                text.push_str(rep);
            } else if extra(c) {
                text.push('_');
            } else {
                if c != '.' && c != ' ' {
                    substantive = true;
                }
                text.push(c);
            }
        }
        Substituted { text, substantive }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::windows(AmpersandStyle::default())
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_table_forbids_reserved_and_extras() {
        let table = RuleTable::windows(AmpersandStyle::Word);
        for c in "<>:\"|?*=&".chars() {
            assert!(table.is_forbidden(c), "{c:?} should be forbidden");
        }
        assert!(!table.is_forbidden('%'));
        assert!(!table.is_forbidden('_'));
        assert!(table.contains_forbidden("index.html?p=12"));
        assert!(!table.contains_forbidden("assets/site.css"));
    }

    #[test]
    fn ampersand_styles() {
        let word = RuleTable::windows(AmpersandStyle::Word);
        assert_eq!(word.substitute("salt&pepper").text, "salt_and_pepper");
        let underscore = RuleTable::windows(AmpersandStyle::Underscore);
        assert_eq!(underscore.substitute("salt&pepper").text, "salt_pepper");
    }

    #[test]
    fn substance_ignores_dots_spaces_and_replacements() {
        let table = RuleTable::default();
        assert!(!table.substitute("???").substantive);
        assert!(!table.substitute(". &.").substantive);
        assert!(table.substitute("a?").substantive);
        assert!(table.substitute("_").substantive);
    }

    #[test]
    fn decoded_pass_replaces_separators_and_controls() {
        let table = RuleTable::default();
        let out = table.substitute_decoded("a/b\\c\u{0}d");
        assert_eq!(out.text, "a_b_c_d");
        assert_eq!(table.substitute("a\\b").text, "a\\b");
    }

    #[test]
    fn custom_table_validation() {
        assert!(RuleTable::new(vec![Rule::new("?", "-")]).is_ok());
        assert_eq!(
            RuleTable::new(vec![Rule::new("", "_")]).unwrap_err(),
            RuleError::EmptyCharacterSet { index: 0 }
        );
        assert_eq!(
            RuleTable::new(vec![Rule::new("?:", "_"), Rule::new(":", "-")]).unwrap_err(),
            RuleError::DuplicateCharacter {
                ch: ':',
                first: 0,
                second: 1
            }
        );
        assert!(matches!(
            RuleTable::new(vec![Rule::new("?", "q?")]),
            Err(RuleError::ForbiddenReplacement { ch: '?', .. })
        ));
        assert!(matches!(
            RuleTable::new(vec![Rule::new("?", "a/b")]),
            Err(RuleError::ForbiddenReplacement { ch: '/', .. })
        ));
    }
}
