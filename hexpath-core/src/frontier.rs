//! Priority frontier for A*
//!
//! A binary min-heap over [`SearchNode`]s keyed by `priority`. Equal
//! priorities pop in insertion order, so a search is reproducible run to run.
//! There is no decrease-key: a cheaper rediscovery is pushed as a new node and
//! the stale copy is skipped by the engine when it surfaces.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::hex::{Cost, Hex};

/// One frontier entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub hex: Hex,
    /// Accumulated cost from the start (`g`)
    pub cost: Cost,
    /// `g + heuristic`
    pub priority: Cost,
}

impl SearchNode {
    pub const fn new(hex: Hex, cost: Cost, priority: Cost) -> Self {
        Self { hex, cost, priority }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Entry {
    node: SearchNode,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .node
            .priority
            .cmp(&self.node.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of search nodes
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { node, seq });
    }

    /// Remove the lowest-priority node, or `None` when empty
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|e| e.node)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
