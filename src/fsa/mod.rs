//! Digit tries backing the forwarding registry
//!
//! This module provides the arena-backed 12-ary [`DigitTrie`], the forward
//! and reverse tries built on it, and the automaton traits they implement.

pub mod digit_trie;
pub mod forward_trie;
pub mod reverse_trie;
pub mod traits;

// Re-export core types
pub use digit_trie::{DigitTrie, NodeId, PathWalk, ROOT, state_id};
pub use forward_trie::ForwardTrie;
pub use reverse_trie::ReverseTrie;
pub use traits::{FiniteStateAutomaton, StateInspectable, StatisticsProvider, TrieStats};
