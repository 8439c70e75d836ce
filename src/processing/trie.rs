//! Binary prefix trie over address bits.
//!
//! One trie holds ranges of a single address family. A range with prefix
//! length `n` lives at depth `n`, on the path spelled by its first `n` bits,
//! so covering ranges sit on the path above it and covered ranges in the
//! subtree below it.

use crate::models::{AddressFamily, IpRange};
use std::cell::Cell;

#[derive(Debug, Default)]
struct Node {
    children: [Option<usize>; 2],
    /// Ids of ranges ending exactly at this node, in insertion order.
    entries: Vec<usize>,
}

#[derive(Debug)]
pub struct PrefixTrie {
    family: AddressFamily,
    nodes: Vec<Node>,
    len: usize,
    /// Nodes touched by inserts and queries so far.
    visits: Cell<usize>,
}

impl PrefixTrie {
    pub fn new(family: AddressFamily) -> PrefixTrie {
        PrefixTrie {
            family,
            nodes: vec![Node::default()],
            len: 0,
            visits: Cell::new(0),
        }
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Number of inserted ranges.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total nodes walked by [`insert`](Self::insert), [`ancestors`](Self::ancestors)
    /// and [`descendants`](Self::descendants) since creation.
    pub fn visits(&self) -> usize {
        self.visits.get()
    }

    fn visit(&self) {
        self.visits.set(self.visits.get() + 1);
    }

    /// Store `id` under `range`. Returns false (and stores nothing) when the
    /// range belongs to another family.
    pub fn insert(&mut self, range: &IpRange, id: usize) -> bool {
        if range.family() != self.family {
            log::warn!("Not inserting {range} into {} trie", self.family);
            return false;
        }

        let mut node = 0;
        self.visit();
        for depth in 0..range.prefix() {
            self.visit();
            let bit = range.bit(depth) as usize;
            node = match self.nodes[node].children[bit] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children[bit] = Some(child);
                    child
                }
            };
        }
        log::trace!("insert {range} id={id} node={node}");
        self.nodes[node].entries.push(id);
        self.len += 1;
        true
    }

    /// Ids of ranges that contain `range`, including ranges equal to it.
    ///
    /// Widest first; ids sharing a node keep insertion order.
    pub fn ancestors(&self, range: &IpRange) -> Vec<usize> {
        let mut found = Vec::new();
        if range.family() != self.family {
            return found;
        }

        let mut node = 0;
        self.visit();
        found.extend_from_slice(&self.nodes[node].entries);
        for depth in 0..range.prefix() {
            let bit = range.bit(depth) as usize;
            match self.nodes[node].children[bit] {
                Some(child) => node = child,
                None => break,
            }
            self.visit();
            found.extend_from_slice(&self.nodes[node].entries);
        }
        found
    }

    /// Ids of ranges strictly inside `range` (longer prefix, same leading bits).
    ///
    /// Depth-first, entries of a node before its subtree, `0` branch first.
    pub fn descendants(&self, range: &IpRange) -> Vec<usize> {
        let mut found = Vec::new();
        let Some(start) = self.find_node(range) else {
            return found;
        };

        let mut stack: Vec<usize> = Vec::new();
        push_children(&mut stack, &self.nodes[start]);
        while let Some(node) = stack.pop() {
            self.visit();
            found.extend_from_slice(&self.nodes[node].entries);
            push_children(&mut stack, &self.nodes[node]);
        }
        found
    }

    fn find_node(&self, range: &IpRange) -> Option<usize> {
        if range.family() != self.family {
            return None;
        }
        let mut node = 0;
        self.visit();
        for depth in 0..range.prefix() {
            node = self.nodes[node].children[range.bit(depth) as usize]?;
            self.visit();
        }
        Some(node)
    }
}

// Push `1` first so `0` is popped first.
fn push_children(stack: &mut Vec<usize>, node: &Node) {
    for child in node.children.iter().rev().flatten() {
        stack.push(*child);
    }
}
