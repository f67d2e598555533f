//! Frontier disciplines: FIFO, LIFO, and priority by a [`Ranking`].
//!
//! Every discipline keeps a state index next to its ordered storage so
//! "is this state already waiting" is a hash lookup, not a scan.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::hash::Hash;

use crate::node::{FrontierKey, Ranking, SearchNode};

/// Container of generated-but-not-yet-expanded nodes.
pub trait Frontier<S, A> {
    /// Add a node.
    fn insert(&mut self, node: SearchNode<S, A>);

    /// Remove and return the node this discipline ranks first.
    fn remove_best(&mut self) -> Option<SearchNode<S, A>>;

    /// Whether a node for `state` is waiting.
    fn contains(&self, state: &S) -> bool;

    /// The waiting node for `state`, if any. When a discipline holds several,
    /// the one it would remove first.
    fn get(&self, state: &S) -> Option<&SearchNode<S, A>>;

    /// Swap the waiting entry for `old_state` with `node`, returning the
    /// displaced node. When nothing waits for `old_state`, `node` is inserted
    /// and `None` returned.
    fn replace(&mut self, old_state: &S, node: SearchNode<S, A>) -> Option<SearchNode<S, A>>;

    /// Number of waiting nodes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest `len()` observed so far.
    fn high_water(&self) -> usize;
}

// ---------------------------------------------------------------------------
// FIFO / LIFO
// ---------------------------------------------------------------------------

/// Insertion-ordered frontier. `LIFO = false` is a queue, `true` a stack.
///
/// The same state may be waiting more than once (depth-first search re-pushes
/// frontier duplicates), so the index maps each state to the sequence numbers
/// of all its entries, oldest first. Sequence numbers are stable: an entry's
/// slot is its number minus the number of the front entry.
#[derive(Debug)]
pub struct SequenceFrontier<S, A, const LIFO: bool> {
    entries: VecDeque<SearchNode<S, A>>,
    positions: HashMap<S, VecDeque<u64>>,
    head: u64,
    high_water: usize,
}

/// Queue discipline (breadth-first search).
pub type FifoFrontier<S, A> = SequenceFrontier<S, A, false>;

/// Stack discipline (depth-first search).
pub type LifoFrontier<S, A> = SequenceFrontier<S, A, true>;

impl<S: Eq + Hash + Clone, A, const LIFO: bool> SequenceFrontier<S, A, LIFO> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            positions: HashMap::new(),
            head: 0,
            high_water: 0,
        }
    }

    fn next_sequence(&self) -> u64 {
        self.head + self.entries.len() as u64
    }

    fn remember(&mut self, state: S, sequence: u64) {
        let numbers = self.positions.entry(state).or_default();
        let at = numbers.partition_point(|&n| n < sequence);
        numbers.insert(at, sequence);
    }

    fn forget(&mut self, state: &S, sequence: u64) {
        if let Some(numbers) = self.positions.get_mut(state) {
            if let Some(at) = numbers.iter().position(|&n| n == sequence) {
                numbers.remove(at);
            }
            if numbers.is_empty() {
                self.positions.remove(state);
            }
        }
    }

    /// Sequence number of the entry for `state` this discipline removes first.
    fn first_out(&self, state: &S) -> Option<u64> {
        let numbers = self.positions.get(state)?;
        if LIFO {
            numbers.back().copied()
        } else {
            numbers.front().copied()
        }
    }

    fn slot(&self, sequence: u64) -> usize {
        usize::try_from(sequence - self.head).unwrap_or(usize::MAX)
    }
}

impl<S: Eq + Hash + Clone, A, const LIFO: bool> Default for SequenceFrontier<S, A, LIFO> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + Clone, A, const LIFO: bool> Frontier<S, A> for SequenceFrontier<S, A, LIFO> {
    fn insert(&mut self, node: SearchNode<S, A>) {
        let sequence = self.next_sequence();
        self.remember(node.state.clone(), sequence);
        self.entries.push_back(node);
        self.high_water = self.high_water.max(self.entries.len());
    }

    fn remove_best(&mut self) -> Option<SearchNode<S, A>> {
        let (node, sequence) = if LIFO {
            let node = self.entries.pop_back()?;
            (node, self.next_sequence())
        } else {
            let node = self.entries.pop_front()?;
            self.head += 1;
            (node, self.head - 1)
        };
        self.forget(&node.state, sequence);
        Some(node)
    }

    fn contains(&self, state: &S) -> bool {
        self.positions.contains_key(state)
    }

    fn get(&self, state: &S) -> Option<&SearchNode<S, A>> {
        let sequence = self.first_out(state)?;
        self.entries.get(self.slot(sequence))
    }

    fn replace(&mut self, old_state: &S, node: SearchNode<S, A>) -> Option<SearchNode<S, A>> {
        let Some(sequence) = self.first_out(old_state) else {
            self.insert(node);
            return None;
        };
        if &node.state != old_state {
            self.forget(old_state, sequence);
            self.remember(node.state.clone(), sequence);
        }
        let slot = self.slot(sequence);
        self.entries
            .get_mut(slot)
            .map(|entry| std::mem::replace(entry, node))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// A heap entry. `BinaryHeap` is a max-heap, so the key is wrapped in
/// `Reverse` to pop the lowest `(priority, generation)` first.
#[derive(Debug)]
struct HeapEntry<S> {
    key: Reverse<FrontierKey>,
    state: S,
}

impl<S> PartialEq for HeapEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for HeapEntry<S> {}

impl<S> PartialOrd for HeapEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for HeapEntry<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier ordered by a [`Ranking`], ties by older generation.
///
/// Holds at most one live node per state. Replacing a node leaves its heap
/// entry behind; such stale entries are recognised by generation and skipped
/// on removal, so a superseded node is never returned.
#[derive(Debug)]
pub struct PriorityFrontier<S, A> {
    ranking: Ranking,
    heap: BinaryHeap<HeapEntry<S>>,
    live: HashMap<S, SearchNode<S, A>>,
    high_water: usize,
}

impl<S: Eq + Hash + Clone, A: Clone> PriorityFrontier<S, A> {
    #[must_use]
    pub fn new(ranking: Ranking) -> Self {
        Self {
            ranking,
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            high_water: 0,
        }
    }

    #[must_use]
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    /// Heap entries still held, live or stale.
    #[must_use]
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    fn push_entry(&mut self, node: SearchNode<S, A>) -> Option<SearchNode<S, A>> {
        self.heap.push(HeapEntry {
            key: Reverse(self.ranking.key(&node)),
            state: node.state.clone(),
        });
        let displaced = self.live.insert(node.state.clone(), node);
        self.high_water = self.high_water.max(self.live.len());
        displaced
    }
}

impl<S: Eq + Hash + Clone, A: Clone> Frontier<S, A> for PriorityFrontier<S, A> {
    /// A state already waiting is superseded by the new node.
    fn insert(&mut self, node: SearchNode<S, A>) {
        let _superseded = self.push_entry(node);
    }

    fn remove_best(&mut self) -> Option<SearchNode<S, A>> {
        while let Some(entry) = self.heap.pop() {
            let is_live = self
                .live
                .get(&entry.state)
                .is_some_and(|n| n.generation == entry.key.0.generation);
            if is_live {
                return self.live.remove(&entry.state);
            }
        }
        None
    }

    fn contains(&self, state: &S) -> bool {
        self.live.contains_key(state)
    }

    fn get(&self, state: &S) -> Option<&SearchNode<S, A>> {
        self.live.get(state)
    }

    fn replace(&mut self, old_state: &S, node: SearchNode<S, A>) -> Option<SearchNode<S, A>> {
        if &node.state == old_state {
            return self.push_entry(node);
        }
        let displaced = self.live.remove(old_state);
        let _superseded = self.push_entry(node);
        displaced
    }

    fn len(&self) -> usize {
        self.live.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}
