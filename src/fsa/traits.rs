//! Core automaton traits shared by the forward and reverse tries
//!
//! Both tries are deterministic automata over the phone number alphabet:
//! states are node ids, symbols are alphabet bytes (`b'0'..=b'9'`, `b'*'`,
//! `b'#'`), and a state is final when the node carries a payload.

use crate::StateId;
use serde::{Deserialize, Serialize};

/// Core trait for finite state automaton operations
pub trait FiniteStateAutomaton {
    /// Get the initial/root state
    fn root(&self) -> StateId;

    /// Check if a state is final (carries a payload)
    fn is_final(&self, state: StateId) -> bool;

    /// Transition from a state given an alphabet byte
    fn transition(&self, state: StateId, symbol: u8) -> Option<StateId>;

    /// Get all transitions from a state, in collation order
    fn transitions(&self, state: StateId) -> Box<dyn Iterator<Item = (u8, StateId)> + '_>;

    /// Check if the automaton accepts a given input sequence
    fn accepts(&self, input: &[u8]) -> bool {
        let mut state = self.root();
        for &symbol in input {
            match self.transition(state, symbol) {
                Some(next_state) => state = next_state,
                None => return false,
            }
        }
        self.is_final(state)
    }

    /// Find the longest prefix of input that leads to a final state
    ///
    /// The walk goes from shorter to longer prefixes, so the last final
    /// state seen is the deepest one.
    fn longest_prefix(&self, input: &[u8]) -> Option<usize> {
        let mut state = self.root();
        let mut last_final = None;

        for (i, &symbol) in input.iter().enumerate() {
            if self.is_final(state) {
                last_final = Some(i);
            }

            match self.transition(state, symbol) {
                Some(next_state) => state = next_state,
                None => return last_final,
            }
        }

        if self.is_final(state) {
            Some(input.len())
        } else {
            last_final
        }
    }
}

/// Trait for automata that support state inspection
pub trait StateInspectable: FiniteStateAutomaton {
    /// Get the outgoing degree (number of transitions) from a state
    fn out_degree(&self, state: StateId) -> usize;

    /// Get all outgoing symbols from a state
    fn out_symbols(&self, state: StateId) -> Vec<u8>;

    /// Check if a state has any outgoing transitions
    fn is_leaf(&self, state: StateId) -> bool {
        self.out_degree(state) == 0
    }
}

/// Statistics about trie structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrieStats {
    /// Number of allocated nodes, root included
    pub num_states: usize,
    /// Number of final states (nodes carrying a payload)
    pub num_keys: usize,
    /// Total number of transitions
    pub num_transitions: usize,
    /// Maximum depth of any node
    pub max_depth: usize,
    /// Average depth of final states
    pub avg_depth: f64,
    /// Approximate memory usage in bytes
    pub memory_usage: usize,
}

impl TrieStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate average depth
    pub fn calculate_avg_depth(&mut self, total_depth: usize) {
        if self.num_keys > 0 {
            self.avg_depth = total_depth as f64 / self.num_keys as f64;
        }
    }
}

/// Trait for automata that provide statistics
pub trait StatisticsProvider {
    /// Get detailed statistics about the trie
    fn stats(&self) -> TrieStats;

    /// Get memory usage in bytes
    fn memory_usage(&self) -> usize {
        self.stats().memory_usage
    }
}
