//! A disjoint-set forest (union-find) over arbitrary hashable items.
//!
//! Items become singleton sets on their first reference.
//! Uses union by rank and full path compression, giving nearly constant amortised time per operation.

use std::collections::HashMap;
use std::hash::Hash;

struct DisjointSetNode<Item> {
    item: Item,
    parent: usize,
    rank: usize,
}

/// A disjoint-set forest.
pub struct DisjointSet<Item> {
    indices: HashMap<Item, usize>,
    nodes: Vec<DisjointSetNode<Item>>,
    set_count: usize,
}

impl<Item: Hash + Eq + Clone> Default for DisjointSet<Item> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Item: Hash + Eq + Clone> DisjointSet<Item> {
    /// Creates an empty disjoint set.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty disjoint set with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            set_count: 0,
        }
    }

    /// Returns the amount of items that have been referenced so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no item has been referenced so far.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the amount of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Returns true if the item has been referenced before.
    pub fn contains(&self, item: &Item) -> bool {
        self.indices.contains_key(item)
    }

    /// Returns the representative of the set containing `item`.
    /// If `item` was not referenced before, it is added as a singleton set.
    pub fn find(&mut self, item: &Item) -> Item {
        let root = self.find_root(item);
        self.nodes[root].item.clone()
    }

    /// Merges the sets containing `a` and `b`.
    /// Returns true if the sets were different before.
    pub fn union(&mut self, a: &Item, b: &Item) -> bool {
        let a = self.find_root(a);
        let b = self.find_root(b);
        if a == b {
            return false;
        }

        match self.nodes[a].rank.cmp(&self.nodes[b].rank) {
            std::cmp::Ordering::Less => self.nodes[a].parent = b,
            std::cmp::Ordering::Greater => self.nodes[b].parent = a,
            std::cmp::Ordering::Equal => {
                self.nodes[b].parent = a;
                self.nodes[a].rank += 1;
            }
        }
        self.set_count -= 1;
        true
    }

    /// Returns true if `a` and `b` are in the same set.
    pub fn same_set(&mut self, a: &Item, b: &Item) -> bool {
        self.find_root(a) == self.find_root(b)
    }

    fn index_of(&mut self, item: &Item) -> usize {
        if let Some(&index) = self.indices.get(item) {
            index
        } else {
            let index = self.nodes.len();
            self.nodes.push(DisjointSetNode {
                item: item.clone(),
                parent: index,
                rank: 0,
            });
            self.indices.insert(item.clone(), index);
            self.set_count += 1;
            index
        }
    }

    fn find_root(&mut self, item: &Item) -> usize {
        let start = self.index_of(item);
        let mut root = start;
        while self.nodes[root].parent != root {
            root = self.nodes[root].parent;
        }

        let mut current = start;
        while current != root {
            let parent = self.nodes[current].parent;
            self.nodes[current].parent = root;
            current = parent;
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::disjoint_set::DisjointSet;

    #[test]
    fn test_union_and_find() {
        let mut set = DisjointSet::new();
        assert_eq!(set.find(&'a'), 'a');
        assert_eq!(set.find(&'b'), 'b');
        assert_eq!(set.set_count(), 2);

        assert!(set.union(&'a', &'b'));
        assert_eq!(set.find(&'a'), set.find(&'b'));
        assert!(!set.same_set(&'a', &'c'));
        assert_eq!(set.len(), 3);
        assert_eq!(set.set_count(), 2);

        assert!(set.union(&'c', &'b'));
        assert!(set.same_set(&'a', &'c'));
        assert!(!set.union(&'a', &'c'));
        assert_eq!(set.set_count(), 1);
    }

    #[test]
    fn test_find_is_stable() {
        let mut set = DisjointSet::new();
        for i in 0..100 {
            set.union(&i, &(i / 2));
        }
        let representative = set.find(&99);
        for i in 0..100 {
            assert_eq!(set.find(&i), representative);
            assert_eq!(set.find(&i), representative);
        }
        assert_eq!(set.set_count(), 1);
    }

    #[test]
    fn test_rank_tie_keeps_first_root() {
        let mut set = DisjointSet::new();
        set.union(&1, &2);
        assert_eq!(set.find(&2), 1);
        // Lower rank root is attached below the higher rank root.
        set.union(&3, &1);
        assert_eq!(set.find(&3), 1);
        assert!(set.contains(&3));
        assert!(!set.contains(&4));
    }
}
