//! Reverse trie: target prefix to the sources forwarding onto it
//!
//! The node at path `t` holds, in a [`SortedNumberSet`], every source `s`
//! whose forwarding currently is `t`. The registry keeps this index in
//! lock-step with the [`ForwardTrie`](super::ForwardTrie).

use super::digit_trie::{DigitTrie, NodeId, ROOT, state_id};
use super::traits::{FiniteStateAutomaton, StateInspectable, StatisticsProvider, TrieStats};
use crate::StateId;
use crate::containers::SortedNumberSet;
use crate::error::Result;
use crate::string::{digit_char, digit_code};

/// Trie of source buckets keyed by target prefix
#[derive(Debug, Clone, Default)]
pub struct ReverseTrie {
    trie: DigitTrie<SortedNumberSet>,
    num_entries: usize,
}

impl ReverseTrie {
    /// Create an empty reverse trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty reverse trie with arena room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            trie: DigitTrie::with_capacity(capacity),
            num_entries: 0,
        }
    }

    /// Limit the number of nodes, root included
    pub fn set_max_nodes(&mut self, max_nodes: Option<usize>) {
        self.trie.set_max_nodes(max_nodes);
    }

    /// Total number of source entries across all buckets
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Check if every bucket is empty
    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Number of allocated nodes, root included
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Bucket stored at exactly `target`
    pub fn bucket(&self, target: &str) -> Option<&SortedNumberSet> {
        self.trie.find(target).map(|n| self.trie.value(n))
    }

    /// Walk `number`, yielding `(digits consumed, bucket)` for each node
    /// reached after consuming a digit
    pub fn walk<'a>(&'a self, number: &'a str) -> impl Iterator<Item = (usize, &'a SortedNumberSet)> + 'a {
        self.trie
            .walk(number)
            .map(move |(consumed, node)| (consumed, self.trie.value(node)))
    }

    /// Reserve everything needed to add one source under `target`
    ///
    /// Reserves arena slots for the path and one free slot in the bucket. An
    /// existing bucket gains spare capacity only; a missing one is returned
    /// pre-allocated and must be handed to [`insert`](Self::insert).
    pub fn try_reserve(&mut self, target: &str) -> Result<Option<SortedNumberSet>> {
        self.trie.try_reserve_path(target)?;
        match self.trie.find(target) {
            Some(node) => {
                self.trie.value_mut(node).try_reserve(1)?;
                Ok(None)
            }
            None => {
                let mut bucket = SortedNumberSet::new();
                bucket.try_reserve(1)?;
                Ok(Some(bucket))
            }
        }
    }

    /// Add `source` to the bucket at `target`
    ///
    /// `spare` is the pre-allocated bucket from [`try_reserve`](Self::try_reserve);
    /// it replaces the node's bucket when that bucket is still empty.
    pub fn insert(&mut self, target: &str, source: String, spare: Option<SortedNumberSet>) -> bool {
        let node = self.trie.insert_path(target);
        let bucket = self.trie.value_mut(node);
        if let Some(spare) = spare {
            if bucket.is_empty() {
                *bucket = spare;
            }
        }
        let inserted = bucket.insert_owned(source);
        if inserted {
            self.num_entries += 1;
        }
        inserted
    }

    /// Remove exactly `source` from the bucket at `target`
    pub fn remove(&mut self, target: &str, source: &str) -> bool {
        let Some(node) = self.trie.find(target) else {
            return false;
        };
        let removed = self.trie.value_mut(node).remove(source);
        if removed {
            self.num_entries -= 1;
        }
        removed
    }

    /// Remove every source starting with `prefix` from the bucket at `target`
    pub fn remove_with_prefix(&mut self, target: &str, prefix: &str) -> usize {
        let Some(node) = self.trie.find(target) else {
            return 0;
        };
        let removed = self.trie.value_mut(node).remove_with_prefix(prefix);
        self.num_entries -= removed;
        removed
    }

    /// Every `(target, source)` pair in collation order of target, then source
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::with_capacity(self.num_entries);
        for node in self.trie.subtree(ROOT) {
            let bucket = self.trie.value(node);
            if bucket.is_empty() {
                continue;
            }
            let target = self.trie.key_of(node);
            entries.extend(bucket.iter().map(|source| (target.clone(), source.to_string())));
        }
        entries
    }

    /// Drop every node and bucket
    pub fn clear(&mut self) {
        self.trie.clear();
        self.num_entries = 0;
    }

    fn node(state: StateId) -> NodeId {
        state as NodeId
    }
}

impl FiniteStateAutomaton for ReverseTrie {
    fn root(&self) -> StateId {
        ROOT as StateId
    }

    fn is_final(&self, state: StateId) -> bool {
        let node = Self::node(state);
        node < self.trie.node_count() && !self.trie.value(node).is_empty()
    }

    fn transition(&self, state: StateId, symbol: u8) -> Option<StateId> {
        let code = digit_code(symbol)?;
        self.trie
            .child(Self::node(state), code as usize)
            .and_then(state_id)
    }

    fn transitions(&self, state: StateId) -> Box<dyn Iterator<Item = (u8, StateId)> + '_> {
        Box::new(self.trie.children(Self::node(state)).filter_map(|(code, child)| {
            let symbol = digit_char(code as u8)? as u8;
            state_id(child).map(|child| (symbol, child))
        }))
    }
}

impl StateInspectable for ReverseTrie {
    fn out_degree(&self, state: StateId) -> usize {
        self.trie.children(Self::node(state)).count()
    }

    fn out_symbols(&self, state: StateId) -> Vec<u8> {
        self.transitions(state).map(|(symbol, _)| symbol).collect()
    }
}

impl StatisticsProvider for ReverseTrie {
    fn stats(&self) -> TrieStats {
        let mut stats = TrieStats {
            num_states: self.trie.node_count(),
            num_keys: 0,
            num_transitions: self.trie.transition_count(),
            max_depth: self.trie.max_depth(),
            avg_depth: 0.0,
            memory_usage: self.trie.arena_bytes(),
        };
        let mut total_depth = 0;
        for (node, bucket) in self.trie.values() {
            stats.memory_usage += bucket.memory_usage();
            if !bucket.is_empty() {
                stats.num_keys += 1;
                total_depth += self.trie.depth(node);
            }
        }
        stats.calculate_avg_depth(total_depth);
        stats
    }
}
