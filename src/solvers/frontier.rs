use std::{cmp::Reverse, collections::BinaryHeap};

use super::node::NodeId;

/// Sort key for frontier entries. The smallest key is popped first; fields
/// compare in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub primary: usize,
    pub secondary: usize,
    /// Insertion-order tie-break. FIFO policies use the push counter as is,
    /// LIFO policies use its complement.
    pub order: u64,
}

/// Pending nodes, ordered by [`FrontierKey`].
///
/// A node can be pushed more than once for the same cell; stale entries are
/// dropped by the search when popped.
#[derive(Debug, Default)]
pub struct Frontier {
    // Using Reverse to turn the max-heap into a min-heap
    heap: BinaryHeap<Reverse<(FrontierKey, NodeId)>>,
    pushed: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pushes so far, used as the insertion-order tie-break.
    pub fn next_seq(&self) -> u64 {
        self.pushed
    }

    pub fn push(&mut self, key: FrontierKey, id: NodeId) {
        self.pushed += 1;
        self.heap.push(Reverse((key, id)));
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, id))| id)
    }

    /// Pending node ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.heap.iter().map(|Reverse((_, id))| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::node::{Node, NodeArena};

    fn ids(n: usize) -> (NodeArena, Vec<NodeId>) {
        let mut arena = NodeArena::new();
        let ids = (0..n).map(|i| arena.push(Node::root((i as u16, 0), 0))).collect();
        (arena, ids)
    }

    #[test]
    fn test_pops_smallest_key_first() {
        let (_arena, ids) = ids(3);
        let mut frontier = Frontier::new();
        let key = |primary, order| FrontierKey {
            primary,
            secondary: 0,
            order,
        };
        frontier.push(key(5, 0), ids[0]);
        frontier.push(key(1, 1), ids[1]);
        frontier.push(key(1, 2), ids[2]);
        assert_eq!(frontier.pop(), Some(ids[1]));
        assert_eq!(frontier.pop(), Some(ids[2]));
        assert_eq!(frontier.pop(), Some(ids[0]));
        assert_eq!(frontier.pop(), None);
        assert_eq!(frontier.next_seq(), 3);
    }

    #[test]
    fn test_secondary_breaks_primary_ties() {
        let (_arena, ids) = ids(2);
        let mut frontier = Frontier::new();
        frontier.push(
            FrontierKey {
                primary: 4,
                secondary: 3,
                order: 0,
            },
            ids[0],
        );
        frontier.push(
            FrontierKey {
                primary: 4,
                secondary: 1,
                order: 1,
            },
            ids[1],
        );
        assert_eq!(frontier.pop(), Some(ids[1]));
    }
}
