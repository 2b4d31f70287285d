//! Character membership tables.

use ahash::AHashSet;

/// A set of characters given as a plain string, e.g. `"+_#"`.
///
/// Used for both the allowed-sign set (punctuation kept inside words) and
/// the bridge set (punctuation that splices two double-width runs).
#[derive(Clone, Debug, Default)]
pub struct SignTable {
    members: AHashSet<char>,
}

impl SignTable {
    /// Build a table from every character of `chars`.
    pub fn new(chars: &str) -> Self {
        SignTable {
            members: chars.chars().collect(),
        }
    }

    /// A table with no members.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether `c` is a member.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.members.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let table = SignTable::new("()+_");
        assert!(table.contains('('));
        assert!(table.contains(')'));
        assert!(table.contains('+'));
        assert!(table.contains('_'));
        assert!(!table.contains('a'));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_empty_tables() {
        assert!(SignTable::empty().is_empty());
        assert!(SignTable::new("").is_empty());
        assert!(SignTable::default().is_empty());
        assert!(!SignTable::new("#").is_empty());
    }

    #[test]
    fn test_multibyte_members() {
        let table = SignTable::new("・＝=☆★･");
        assert!(table.contains('☆'));
        assert!(table.contains('･'));
        assert!(table.contains('='));
        assert!(!table.contains('【'));
    }
}
