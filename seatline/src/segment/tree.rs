//! Range-add / range-min tree with lazy propagation and per-node locks.
//!
//! Nodes live in a flat array; the children of node `k` are `2k + 1` and
//! `2k + 2`. Every node stores the minimum over its span and a pending delta
//! still owed to its children, so for an internal node
//! `min == min(left.min, right.min) + pending` whenever no update is in
//! flight below it.
//!
//! Both fields are atomics and may be read at any time. Every write to a
//! node happens under that node's mutex: a fully-contained update, a
//! recompute from the children, or (holding the parent's mutex first) a push
//! of the parent's pending delta. No mutex is held across a recursive call.

use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::Mutex;

use crate::{Error, Result};

/// Identity for `min` over an empty intersection.
const NO_CONSTRAINT: i64 = i64::MAX;

#[derive(Debug, Default)]
struct Node {
    min: AtomicI64,
    pending: AtomicI64,
    guard: Mutex<()>,
}

/// Concurrent interval-minimum tree over a fixed number of slots.
///
/// # Examples
///
/// ```
/// use seatline::segment::IntervalMinTree;
///
/// let tree = IntervalMinTree::new(&[3, 3, 3, 3, 3]).unwrap();
/// assert_eq!(tree.query(0, 4).unwrap(), 3);
///
/// tree.update(0, 2, -1).unwrap();
/// assert_eq!(tree.query(0, 4).unwrap(), 2);
/// assert_eq!(tree.query(3, 4).unwrap(), 3);
/// ```
#[derive(Debug)]
pub struct IntervalMinTree {
    nodes: Box<[Node]>,
    len: usize,
}

impl IntervalMinTree {
    /// Builds a tree whose slot `i` starts at `values[i]`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `values` is empty.
    pub fn new(values: &[i64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::config("segments", "tree needs at least one slot"));
        }
        let tree = Self {
            nodes: (0..4 * values.len()).map(|_| Node::default()).collect(),
            len: values.len(),
        };
        tree.build(0, 0, values.len() - 1, values);
        Ok(tree)
    }

    /// Number of slots covered by the tree.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.len
    }

    /// Minimum over slots `lo..=hi`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSegmentRange`] unless `lo <= hi < slot_count`.
    pub fn query(&self, lo: usize, hi: usize) -> Result<i64> {
        self.check(lo, hi)?;
        Ok(self.query_node(0, 0, self.len - 1, lo, hi))
    }

    /// Adds `delta` to every slot in `lo..=hi`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSegmentRange`] unless `lo <= hi < slot_count`.
    pub fn update(&self, lo: usize, hi: usize, delta: i64) -> Result<()> {
        self.check(lo, hi)?;
        self.update_node(0, 0, self.len - 1, lo, hi, delta);
        Ok(())
    }

    fn check(&self, lo: usize, hi: usize) -> Result<()> {
        if lo > hi || hi >= self.len {
            return Err(Error::InvalidSegmentRange {
                lo,
                hi,
                len: self.len,
            });
        }
        Ok(())
    }

    fn build(&self, node: usize, node_lo: usize, node_hi: usize, values: &[i64]) {
        if node_lo == node_hi {
            self.nodes[node].min.store(values[node_lo], Ordering::Relaxed);
            return;
        }
        let mid = midpoint(node_lo, node_hi);
        self.build(left(node), node_lo, mid, values);
        self.build(right(node), mid + 1, node_hi, values);
        let min = self.child_min(node);
        self.nodes[node].min.store(min, Ordering::Relaxed);
    }

    fn query_node(&self, node: usize, node_lo: usize, node_hi: usize, lo: usize, hi: usize) -> i64 {
        if hi < node_lo || lo > node_hi {
            return NO_CONSTRAINT;
        }
        if lo <= node_lo && node_hi <= hi {
            return self.nodes[node].min.load(Ordering::Acquire);
        }
        self.flush(node);
        let mid = midpoint(node_lo, node_hi);
        let left_min = self.query_node(left(node), node_lo, mid, lo, hi);
        let right_min = self.query_node(right(node), mid + 1, node_hi, lo, hi);
        left_min.min(right_min)
    }

    fn update_node(
        &self,
        node: usize,
        node_lo: usize,
        node_hi: usize,
        lo: usize,
        hi: usize,
        delta: i64,
    ) {
        if hi < node_lo || lo > node_hi {
            return;
        }
        let current = &self.nodes[node];
        if lo <= node_lo && node_hi <= hi {
            let _guard = current.guard.lock();
            current.min.fetch_add(delta, Ordering::AcqRel);
            current.pending.fetch_add(delta, Ordering::AcqRel);
            return;
        }

        self.flush(node);
        let mid = midpoint(node_lo, node_hi);
        self.update_node(left(node), node_lo, mid, lo, hi, delta);
        self.update_node(right(node), mid + 1, node_hi, lo, hi, delta);

        let _guard = current.guard.lock();
        let min = self.child_min(node) + current.pending.load(Ordering::Acquire);
        current.min.store(min, Ordering::Release);
    }

    /// Pushes the pending delta of an internal node into its children.
    fn flush(&self, node: usize) {
        let current = &self.nodes[node];
        if current.pending.load(Ordering::Acquire) == 0 {
            return;
        }

        let _guard = current.guard.lock();
        let pending = current.pending.load(Ordering::Acquire);
        if pending == 0 {
            return;
        }
        for child in [left(node), right(node)] {
            let child = &self.nodes[child];
            let _child_guard = child.guard.lock();
            child.min.fetch_add(pending, Ordering::AcqRel);
            child.pending.fetch_add(pending, Ordering::AcqRel);
        }
        current.pending.store(0, Ordering::Release);
    }

    fn child_min(&self, node: usize) -> i64 {
        let left_min = self.nodes[left(node)].min.load(Ordering::Acquire);
        let right_min = self.nodes[right(node)].min.load(Ordering::Acquire);
        left_min.min(right_min)
    }
}

const fn left(node: usize) -> usize {
    2 * node + 1
}

const fn right(node: usize) -> usize {
    2 * node + 2
}

const fn midpoint(lo: usize, hi: usize) -> usize {
    lo + (hi - lo) / 2
}
