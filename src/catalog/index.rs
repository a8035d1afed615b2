//! Prioritized rule collection.
//!
//! Every rule is stored with a `(class, specificity, order)` key. Lookups walk
//! the rules by ascending class, then descending specificity, then ascending
//! insertion order. `order` is unique within an index, so the ordering is
//! total and two rules never tie.

use std::cmp::{Ordering, Reverse};

/// Rule kinds report their own rank; the index only adds insertion order.
pub(crate) trait Ranked {
    /// Rule class, lower classes are consulted first.
    fn class(&self) -> u8;
    /// Length of the literal the rule has to match, 0 for exact rules.
    fn specificity(&self) -> usize;
}

#[derive(Debug)]
pub(crate) struct Prioritized<R> {
    class: u8,
    specificity: usize,
    order: usize,
    rule: R,
}

impl<R> Prioritized<R> {
    fn key(&self) -> (u8, Reverse<usize>, usize) {
        (self.class, Reverse(self.specificity), self.order)
    }

    pub(crate) fn rule(&self) -> &R {
        &self.rule
    }

    pub(crate) fn rank(&self) -> (u8, usize, usize) {
        (self.class, self.specificity, self.order)
    }
}

impl<R> PartialEq for Prioritized<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<R> Eq for Prioritized<R> {}

impl<R> PartialOrd for Prioritized<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R> Ord for Prioritized<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Debug)]
pub(crate) struct RuleIndex<R> {
    entries: Vec<Prioritized<R>>,
}

impl<R> Default for RuleIndex<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R: Ranked> RuleIndex<R> {
    pub(crate) fn insert(&mut self, rule: R) {
        let order = self.entries.len();
        self.entries.push(Prioritized {
            class: rule.class(),
            specificity: rule.specificity(),
            order,
            rule,
        });
    }
}

impl<R> RuleIndex<R> {
    /// Freeze the index into lookup order.
    pub(crate) fn into_sorted(mut self) -> Vec<Prioritized<R>> {
        self.entries.sort();
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake(u8, usize, &'static str);

    impl Ranked for Fake {
        fn class(&self) -> u8 {
            self.0
        }
        fn specificity(&self) -> usize {
            self.1
        }
    }

    fn names(index: RuleIndex<Fake>) -> Vec<&'static str> {
        index.into_sorted().iter().map(|p| p.rule().2).collect()
    }

    #[test]
    fn class_dominates_specificity_and_order() {
        let mut index = RuleIndex::default();
        index.insert(Fake(3, 40, "suffix"));
        index.insert(Fake(2, 1, "rewrite"));
        index.insert(Fake(1, 0, "exact"));
        assert_eq!(names(index), vec!["exact", "rewrite", "suffix"]);
    }

    #[test]
    fn longer_literal_then_earlier_insertion() {
        let mut index = RuleIndex::default();
        index.insert(Fake(2, 5, "short-first"));
        index.insert(Fake(2, 12, "long"));
        index.insert(Fake(2, 5, "short-second"));
        assert_eq!(names(index), vec!["long", "short-first", "short-second"]);
    }

    #[test]
    fn insertion_order_is_unique() {
        let mut index = RuleIndex::default();
        for _ in 0..4 {
            index.insert(Fake(6, 0, "public"));
        }
        let ranks: Vec<_> = index.into_sorted().iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![(6, 0, 0), (6, 0, 1), (6, 0, 2), (6, 0, 3)]);
    }
}
