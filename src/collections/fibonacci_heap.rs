//! A Fibonacci heap with implicit decrease-key.
//!
//! The heap nodes live in an arena and refer to each other by their arena index.
//! Each node is part of a circular doubly-linked list of siblings, and points to its parent and one of its children.
//! Extracted nodes are removed from the arena by swapping in the last node, whose links are relocated accordingly.
//!
//! Each item can be contained in the heap at most once.
//! Pushing an item that is already contained with a smaller key decreases its key instead of inserting it again.

use crate::error::{ErrorKind, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// The golden ratio, used to bound the degree of the roots during consolidation.
const PHI: f64 = 1.618_033_988_749_895;

/// A total order on heap keys.
pub trait KeyOrder<Key> {
    /// Compares two keys.
    fn compare(&self, a: &Key, b: &Key) -> Ordering;
}

/// Orders keys by their implementation of `Ord`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalOrder;

impl<Key: Ord> KeyOrder<Key> for NaturalOrder {
    fn compare(&self, a: &Key, b: &Key) -> Ordering {
        a.cmp(b)
    }
}

impl<Key, F: Fn(&Key, &Key) -> Ordering> KeyOrder<Key> for F {
    fn compare(&self, a: &Key, b: &Key) -> Ordering {
        self(a, b)
    }
}

struct FibonacciHeapNode<Item, Key> {
    item: Item,
    key: Key,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
    degree: usize,
    marked: bool,
}

/// A Fibonacci heap.
///
/// `push`, `peek` and key decreases run in amortised constant time, `pop` runs in amortised logarithmic time.
/// The heap is not safe for concurrent access.
pub struct FibonacciHeap<Item, Key, Order = NaturalOrder> {
    nodes: Vec<FibonacciHeapNode<Item, Key>>,
    positions: HashMap<Item, usize>,
    minimum: Option<usize>,
    tree_count: usize,
    marked_count: usize,
    order: Order,
}

impl<Item: Hash + Eq + Clone, Key: Ord> FibonacciHeap<Item, Key, NaturalOrder> {
    /// Creates an empty heap ordered by the natural order of the keys.
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<Item: Hash + Eq + Clone, Key: Ord> Default for FibonacciHeap<Item, Key, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Item: Hash + Eq + Clone, Key, Order: KeyOrder<Key>> FibonacciHeap<Item, Key, Order> {
    /// Creates an empty heap ordered by the given key order.
    pub fn with_order(order: Order) -> Self {
        Self {
            nodes: Vec::new(),
            positions: HashMap::new(),
            minimum: None,
            tree_count: 0,
            marked_count: 0,
            order,
        }
    }

    /// Returns the amount of items in the heap.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap contains no items.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the heap contains the given item.
    pub fn contains(&self, item: &Item) -> bool {
        self.positions.contains_key(item)
    }

    /// Returns the key of the given item, or `None` if the item is not contained in the heap.
    pub fn key_of(&self, item: &Item) -> Option<&Key> {
        self.positions.get(item).map(|&node| &self.nodes[node].key)
    }

    /// Returns the potential of the heap, i.e. the amount of trees plus twice the amount of marked nodes.
    pub fn potential(&self) -> usize {
        self.tree_count + 2 * self.marked_count
    }

    /// Removes all items from the heap.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.positions.clear();
        self.minimum = None;
        self.tree_count = 0;
        self.marked_count = 0;
    }

    /// Inserts the item with the given key.
    /// If the item is already contained, then its key is decreased if the given key is smaller, and left untouched otherwise.
    ///
    /// Returns true if the heap was changed.
    pub fn push(&mut self, item: Item, key: Key) -> bool {
        if let Some(&node) = self.positions.get(&item) {
            if self.order.compare(&key, &self.nodes[node].key) == Ordering::Less {
                self.decrease_node_key(node, key);
                true
            } else {
                false
            }
        } else {
            let node = self.nodes.len();
            self.nodes.push(FibonacciHeapNode {
                item: item.clone(),
                key,
                parent: None,
                child: None,
                left: node,
                right: node,
                degree: 0,
                marked: false,
            });
            self.positions.insert(item, node);
            self.add_root(node);
            true
        }
    }

    /// Decreases the key of the given item.
    ///
    /// Fails with `NoSuchElement` if the item is not contained, and with `InvalidArgument` if the given key is larger than the current key.
    pub fn decrease_key(&mut self, item: &Item, key: Key) -> Result<()> {
        let node = *self
            .positions
            .get(item)
            .ok_or_else(|| ErrorKind::NoSuchElement)?;
        if self.order.compare(&key, &self.nodes[node].key) == Ordering::Greater {
            bail!(ErrorKind::InvalidArgument(
                "the new key is larger than the current key".to_string()
            ));
        }
        self.decrease_node_key(node, key);
        Ok(())
    }

    /// Returns the item with the minimum key, or `None` if the heap is empty.
    pub fn peek(&self) -> Option<(&Item, &Key)> {
        self.minimum.map(|node| {
            let node = &self.nodes[node];
            (&node.item, &node.key)
        })
    }

    /// Removes and returns the item with the minimum key, or `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<(Item, Key)> {
        let minimum = self.minimum?;

        // Move the children of the minimum into the root list.
        let children = self.child_list(minimum);
        for &child in &children {
            self.unlink(child);
            self.nodes[child].parent = None;
            if self.nodes[child].marked {
                self.nodes[child].marked = false;
                self.marked_count -= 1;
            }
            self.insert_right_of(minimum, child);
        }
        self.tree_count += children.len();
        self.nodes[minimum].child = None;
        self.nodes[minimum].degree = 0;

        let next = self.nodes[minimum].right;
        self.unlink(minimum);
        self.tree_count -= 1;
        if next == minimum {
            self.minimum = None;
        } else {
            self.minimum = Some(next);
            self.consolidate();
        }

        let removed = self.swap_remove(minimum);
        Some((removed.item, removed.key))
    }

    /// Removes and returns the item with the minimum key.
    /// Fails with `NoSuchElement` if the heap is empty.
    pub fn remove_min(&mut self) -> Result<(Item, Key)> {
        self.pop().ok_or_else(|| ErrorKind::NoSuchElement.into())
    }

    fn is_less(&self, a: usize, b: usize) -> bool {
        self.order.compare(&self.nodes[a].key, &self.nodes[b].key) == Ordering::Less
    }

    fn decrease_node_key(&mut self, node: usize, key: Key) {
        self.nodes[node].key = key;
        if let Some(parent) = self.nodes[node].parent {
            if self.is_less(node, parent) {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(minimum) = self.minimum {
            if self.is_less(node, minimum) {
                self.minimum = Some(node);
            }
        }
    }

    /// Adds a detached node to the root list.
    fn add_root(&mut self, node: usize) {
        self.tree_count += 1;
        match self.minimum {
            Some(minimum) => {
                self.insert_right_of(minimum, node);
                if self.is_less(node, minimum) {
                    self.minimum = Some(node);
                }
            }
            None => {
                self.nodes[node].left = node;
                self.nodes[node].right = node;
                self.minimum = Some(node);
            }
        }
    }

    /// Inserts a detached node into the sibling list of `anchor`, directly right of `anchor`.
    fn insert_right_of(&mut self, anchor: usize, node: usize) {
        let right = self.nodes[anchor].right;
        self.nodes[node].left = anchor;
        self.nodes[node].right = right;
        self.nodes[anchor].right = node;
        self.nodes[right].left = node;
    }

    /// Removes a node from its sibling list, leaving it as a singleton list.
    fn unlink(&mut self, node: usize) {
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[node].left = node;
        self.nodes[node].right = node;
    }

    fn sibling_list(&self, start: usize) -> Vec<usize> {
        let mut result = vec![start];
        let mut current = self.nodes[start].right;
        while current != start {
            result.push(current);
            current = self.nodes[current].right;
        }
        result
    }

    fn child_list(&self, node: usize) -> Vec<usize> {
        self.nodes[node]
            .child
            .map(|child| self.sibling_list(child))
            .unwrap_or_default()
    }

    /// Merges roots of equal degree until all roots have distinct degrees.
    fn consolidate(&mut self) {
        let start = match self.minimum {
            Some(minimum) => minimum,
            None => return,
        };
        let max_degree = ((self.nodes.len() as f64).ln() / PHI.ln()).floor() as usize + 2;
        let mut roots_by_degree: Vec<Option<usize>> = vec![None; max_degree];

        for root in self.sibling_list(start) {
            let mut root = root;
            let mut degree = self.nodes[root].degree;
            loop {
                if degree >= roots_by_degree.len() {
                    roots_by_degree.resize(degree + 1, None);
                }
                let mut other = match roots_by_degree[degree].take() {
                    Some(other) => other,
                    None => break,
                };
                if self.is_less(other, root) {
                    std::mem::swap(&mut root, &mut other);
                }
                self.link(other, root);
                degree += 1;
            }
            if degree >= roots_by_degree.len() {
                roots_by_degree.resize(degree + 1, None);
            }
            roots_by_degree[degree] = Some(root);
        }

        self.minimum = None;
        for root in roots_by_degree.into_iter().flatten() {
            match self.minimum {
                Some(minimum) if !self.is_less(root, minimum) => {}
                _ => self.minimum = Some(root),
            }
        }
    }

    /// Makes the root `child` a child of the root `parent`.
    fn link(&mut self, child: usize, parent: usize) {
        self.unlink(child);
        match self.nodes[parent].child {
            Some(sibling) => self.insert_right_of(sibling, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].degree += 1;
        if self.nodes[child].marked {
            self.nodes[child].marked = false;
            self.marked_count -= 1;
        }
        self.tree_count -= 1;
    }

    /// Moves `node` from the child list of `parent` to the root list.
    fn cut(&mut self, node: usize, parent: usize) {
        if self.nodes[parent].child == Some(node) {
            let right = self.nodes[node].right;
            self.nodes[parent].child = if right == node { None } else { Some(right) };
        }
        self.unlink(node);
        self.nodes[parent].degree -= 1;
        self.nodes[node].parent = None;
        if self.nodes[node].marked {
            self.nodes[node].marked = false;
            self.marked_count -= 1;
        }
        self.add_root(node);
    }

    fn cascading_cut(&mut self, node: usize) {
        let mut node = node;
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                self.marked_count += 1;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }

    /// Removes a completely detached node from the arena, moving the last node into its slot.
    fn swap_remove(&mut self, node: usize) -> FibonacciHeapNode<Item, Key> {
        debug_assert!(self.nodes[node].parent.is_none() && self.nodes[node].child.is_none());
        debug_assert_eq!(self.nodes[node].left, node);
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(node);
        self.positions.remove(&removed.item);

        if node != last {
            // The node formerly at `last` now lives at `node`.
            let left = self.nodes[node].left;
            let right = self.nodes[node].right;
            if left == last {
                self.nodes[node].left = node;
                self.nodes[node].right = node;
            } else {
                self.nodes[left].right = node;
                self.nodes[right].left = node;
            }
            if let Some(parent) = self.nodes[node].parent {
                if self.nodes[parent].child == Some(last) {
                    self.nodes[parent].child = Some(node);
                }
            }
            for child in self.child_list(node) {
                self.nodes[child].parent = Some(node);
            }
            if self.minimum == Some(last) {
                self.minimum = Some(node);
            }
            let item = self.nodes[node].item.clone();
            self.positions.insert(item, node);
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::fibonacci_heap::FibonacciHeap;
    use crate::error::ErrorKind;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn test_pop_in_key_order() {
        let mut heap = FibonacciHeap::new();
        for (item, key) in [("c", 3), ("a", 1), ("e", 5), ("b", 2), ("d", 4)] {
            assert!(heap.push(item, key));
        }
        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek(), Some((&"a", &1)));

        let popped: Vec<_> = std::iter::from_fn(|| heap.pop()).collect();
        assert_eq!(
            popped,
            vec![("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)]
        );
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_push_existing_item_decreases_key() {
        let mut heap = FibonacciHeap::new();
        heap.push(1, 10);
        heap.push(2, 20);
        heap.push(3, 30);
        assert!(heap.push(3, 5));
        assert!(!heap.push(1, 15));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.key_of(&1), Some(&10));
        assert_eq!(heap.pop(), Some((3, 5)));
        assert_eq!(heap.pop(), Some((1, 10)));
        assert_eq!(heap.pop(), Some((2, 20)));
    }

    #[test]
    fn test_decrease_key_inside_trees() {
        let mut heap = FibonacciHeap::new();
        for item in 0..32 {
            heap.push(item, 100 + item);
        }
        // Consolidate into trees.
        assert_eq!(heap.pop(), Some((0, 100)));
        // Decrease keys of nodes that are now children, triggering cuts and cascading cuts.
        for item in (1..32).rev().step_by(3) {
            heap.decrease_key(&item, item).unwrap();
        }
        let mut previous = None;
        let mut count = 0;
        while let Some((item, key)) = heap.pop() {
            if let Some(previous) = previous {
                assert!(previous <= key, "{} > {} for item {}", previous, key, item);
            }
            previous = Some(key);
            count += 1;
        }
        assert_eq!(count, 31);
    }

    #[test]
    fn test_decrease_key_errors() {
        let mut heap = FibonacciHeap::new();
        heap.push('x', 4);
        assert!(matches!(
            heap.decrease_key(&'y', 1).unwrap_err().kind(),
            ErrorKind::NoSuchElement
        ));
        assert!(matches!(
            heap.decrease_key(&'x', 9).unwrap_err().kind(),
            ErrorKind::InvalidArgument(_)
        ));
        assert_eq!(heap.key_of(&'x'), Some(&4));
    }

    #[test]
    fn test_remove_min_on_empty_heap() {
        let mut heap: FibonacciHeap<u32, u32> = FibonacciHeap::new();
        assert!(matches!(
            heap.remove_min().unwrap_err().kind(),
            ErrorKind::NoSuchElement
        ));
        heap.push(7, 7);
        assert_eq!(heap.remove_min().unwrap(), (7, 7));
    }

    #[test]
    fn test_custom_order() {
        let mut heap = FibonacciHeap::with_order(|a: &f64, b: &f64| b.total_cmp(a));
        heap.push("low", 0.5);
        heap.push("high", 2.5);
        heap.push("middle", 1.0);
        assert_eq!(heap.pop().map(|(item, _)| item), Some("high"));
        assert!(heap.push("low", 3.0));
        assert_eq!(heap.pop().map(|(item, _)| item), Some("low"));
        assert_eq!(heap.pop().map(|(item, _)| item), Some("middle"));
    }

    #[test]
    fn test_potential_counts_trees_and_marks() {
        let mut heap = FibonacciHeap::new();
        for item in 0..8 {
            heap.push(item, item);
        }
        assert_eq!(heap.potential(), 8);
        heap.pop();
        // 7 nodes consolidate into trees of sizes 4, 2 and 1.
        assert_eq!(heap.potential(), 3);
        heap.clear();
        assert_eq!(heap.potential(), 0);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_potential_after_cascading_cut() {
        let mut heap = FibonacciHeap::new();
        for item in 0..16 {
            heap.push(item, item);
        }
        heap.pop();
        // Trees rooted at 8, 4, 2 and 1, where 12 is a child of 8 with children 13 and 14.
        assert_eq!(heap.potential(), 4);

        // Cutting the first child marks its parent.
        heap.decrease_key(&13, 0).unwrap();
        assert_eq!(heap.potential(), 5 + 2);

        // Cutting the second child also cuts the marked parent.
        heap.decrease_key(&14, 0).unwrap();
        assert_eq!(heap.potential(), 7);

        let keys: Vec<_> = std::iter::from_fn(|| heap.pop().map(|(_, key)| key)).collect();
        assert_eq!(keys.len(), 15);
        assert!(keys.windows(2).all(|window| window[0] <= window[1]));
    }

    #[test]
    fn test_random_operations_match_sorted_order() {
        let mut random = rand::rngs::StdRng::seed_from_u64(42);
        let mut items: Vec<u32> = (0..500).collect();
        items.shuffle(&mut random);

        let mut heap = FibonacciHeap::new();
        let mut expected = Vec::new();
        for (index, &item) in items.iter().enumerate() {
            heap.push(item, item * 2);
            if index % 7 == 3 {
                let (popped, key) = heap.pop().unwrap();
                assert_eq!(key, popped * 2);
                expected.push(popped);
            }
        }
        let mut remaining: Vec<_> = std::iter::from_fn(|| heap.pop().map(|(item, _)| item)).collect();
        assert!(remaining.windows(2).all(|window| window[0] < window[1]));
        remaining.extend(expected);
        remaining.sort_unstable();
        assert_eq!(remaining, (0..500).collect::<Vec<_>>());
    }
}
