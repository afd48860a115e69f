//! The fixed set of benchmark programs reports are filtered by.

use serde::Serialize;
use std::fmt;

/// Declaration order is report order: derived lines are grouped by program
/// in this order, matching the layout the plotting scripts expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Benchmark {
    LinkedList,
    HashMap,
    BsTree,
    SkipList,
    LfQueue,
    LfQueue2,
}

impl Benchmark {
    pub const ALL: [Benchmark; 6] = [
        Benchmark::LinkedList,
        Benchmark::HashMap,
        Benchmark::BsTree,
        Benchmark::SkipList,
        Benchmark::LfQueue,
        Benchmark::LfQueue2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Benchmark::LinkedList => "linkedlist",
            Benchmark::HashMap => "hashmap",
            Benchmark::BsTree => "bstree",
            Benchmark::SkipList => "skiplist",
            Benchmark::LfQueue => "lfqueue",
            Benchmark::LfQueue2 => "lfqueue2",
        }
    }

    /// Exact, case-sensitive match. Anything else is a filter miss.
    pub fn from_name(name: &str) -> Option<Benchmark> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for b in Benchmark::ALL {
            assert_eq!(Benchmark::from_name(b.name()), Some(b));
        }
    }

    #[test]
    fn unknown_and_differently_cased_names_miss() {
        assert_eq!(Benchmark::from_name("HashMap"), None);
        assert_eq!(Benchmark::from_name("rbtree"), None);
        assert_eq!(Benchmark::from_name(""), None);
    }

    #[test]
    fn ordering_follows_declaration() {
        let mut shuffled = vec![Benchmark::LfQueue2, Benchmark::LinkedList, Benchmark::SkipList];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Benchmark::LinkedList, Benchmark::SkipList, Benchmark::LfQueue2]
        );
    }
}
