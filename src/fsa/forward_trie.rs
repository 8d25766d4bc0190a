//! Forward trie: source prefix to replacement prefix
//!
//! Each node may carry one forwarding, the target prefix that replaces the
//! source prefix spelled by the node's path. Lookups use longest-prefix
//! matching: among all forwardings whose source is a prefix of the queried
//! number, the deepest one wins.

use super::digit_trie::{DigitTrie, NodeId, ROOT, state_id};
use super::traits::{FiniteStateAutomaton, StateInspectable, StatisticsProvider, TrieStats};
use crate::StateId;
use crate::error::Result;
use crate::string::{digit_char, digit_code};

/// Trie of forwardings keyed by source prefix
#[derive(Debug, Clone, Default)]
pub struct ForwardTrie {
    trie: DigitTrie<Option<String>>,
    num_forwardings: usize,
}

impl ForwardTrie {
    /// Create an empty forward trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty forward trie with arena room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            trie: DigitTrie::with_capacity(capacity),
            num_forwardings: 0,
        }
    }

    /// Limit the number of nodes, root included
    pub fn set_max_nodes(&mut self, max_nodes: Option<usize>) {
        self.trie.set_max_nodes(max_nodes);
    }

    /// Number of active forwardings
    pub fn len(&self) -> usize {
        self.num_forwardings
    }

    /// Check if no forwarding is stored
    pub fn is_empty(&self) -> bool {
        self.num_forwardings == 0
    }

    /// Number of allocated nodes, root included
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Target stored for exactly `source`, without prefix matching
    pub fn forwarding(&self, source: &str) -> Option<&str> {
        self.trie.find(source).and_then(|n| self.trie.value(n).as_deref())
    }

    /// Longest-prefix match for `number`
    ///
    /// Returns the number of digits matched and the target of the deepest
    /// forwarding on the path.
    pub fn longest_match(&self, number: &str) -> Option<(usize, &str)> {
        let matched = self.longest_prefix(number.as_bytes())?;
        let node = self.trie.find(&number[..matched])?;
        self.trie.value(node).as_deref().map(|target| (matched, target))
    }

    /// Reserve everything needed to store a forwarding for `source`
    pub fn try_reserve(&mut self, source: &str) -> Result<()> {
        self.trie.try_reserve_path(source)
    }

    /// Store `target` for `source`, returning the replaced target if any
    pub fn set(&mut self, source: &str, target: String) -> Option<String> {
        let node = self.trie.insert_path(source);
        let previous = self.trie.value_mut(node).replace(target);
        if previous.is_none() {
            self.num_forwardings += 1;
        }
        previous
    }

    /// Clear every forwarding in the subtree rooted at `prefix`
    ///
    /// Nodes stay allocated. Returns the cleared targets in collation order
    /// of their sources, or an empty list if the path does not exist.
    pub fn clear_subtree(&mut self, prefix: &str) -> Vec<String> {
        let Some(start) = self.trie.find(prefix) else {
            return Vec::new();
        };
        let mut cleared = Vec::new();
        for node in self.trie.subtree(start) {
            if let Some(target) = self.trie.value_mut(node).take() {
                cleared.push(target);
            }
        }
        self.num_forwardings -= cleared.len();
        cleared
    }

    /// Every `(source, target)` pair in collation order of the source
    pub fn entries(&self) -> Vec<(String, String)> {
        self.trie
            .subtree(ROOT)
            .into_iter()
            .filter_map(|node| {
                self.trie
                    .value(node)
                    .as_ref()
                    .map(|target| (self.trie.key_of(node), target.clone()))
            })
            .collect()
    }

    /// Drop every node and forwarding
    pub fn clear(&mut self) {
        self.trie.clear();
        self.num_forwardings = 0;
    }

    fn node(state: StateId) -> NodeId {
        state as NodeId
    }
}

impl FiniteStateAutomaton for ForwardTrie {
    fn root(&self) -> StateId {
        ROOT as StateId
    }

    fn is_final(&self, state: StateId) -> bool {
        let node = Self::node(state);
        node < self.trie.node_count() && self.trie.value(node).is_some()
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

impl StateInspectable for ForwardTrie {
    fn out_degree(&self, state: StateId) -> usize {
        self.trie.children(Self::node(state)).count()
    }

    fn out_symbols(&self, state: StateId) -> Vec<u8> {
        self.transitions(state).map(|(symbol, _)| symbol).collect()
    }
}

impl StatisticsProvider for ForwardTrie {
    fn stats(&self) -> TrieStats {
        let mut stats = TrieStats {
            num_states: self.trie.node_count(),
            num_keys: self.num_forwardings,
            num_transitions: self.trie.transition_count(),
            max_depth: self.trie.max_depth(),
            avg_depth: 0.0,
            memory_usage: self.trie.arena_bytes(),
        };
        let mut total_depth = 0;
        for (node, value) in self.trie.values() {
            if let Some(target) = value {
                total_depth += self.trie.depth(node);
                stats.memory_usage += target.capacity();
            }
        }
        stats.calculate_avg_depth(total_depth);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_exact_lookup() {
        let mut fwd = ForwardTrie::new();
        assert_eq!(fwd.set("123", "9".to_string()), None);
        assert_eq!(fwd.forwarding("123"), Some("9"));
        assert_eq!(fwd.forwarding("12"), None);
        assert_eq!(fwd.forwarding("1234"), None);
        assert_eq!(fwd.set("123", "8".to_string()), Some("9".to_string()));
        assert_eq!(fwd.len(), 1);
    }

    #[test]
    fn test_longest_match_prefers_deepest() {
        let mut fwd = ForwardTrie::new();
        fwd.set("123", "9".to_string());
        fwd.set("1234", "8".to_string());
        assert_eq!(fwd.longest_match("12345"), Some((4, "8")));
        assert_eq!(fwd.longest_match("1239"), Some((3, "9")));
        assert_eq!(fwd.longest_match("12"), None);
        assert_eq!(fwd.longest_match("5"), None);
    }

    #[test]
    fn test_clear_subtree() {
        let mut fwd = ForwardTrie::new();
        fwd.set("22", "1".to_string());
        fwd.set("221", "3".to_string());
        fwd.set("23", "4".to_string());
        let cleared = fwd.clear_subtree("22");
        assert_eq!(cleared, vec!["1".to_string(), "3".to_string()]);
        assert_eq!(fwd.len(), 1);
        assert_eq!(fwd.longest_match("2219"), None);
        assert_eq!(fwd.forwarding("23"), Some("4"));
        assert!(fwd.clear_subtree("22").is_empty());
        assert!(fwd.clear_subtree("7").is_empty());
    }

    #[test]
    fn test_entries_in_collation_order() {
        let mut fwd = ForwardTrie::new();
        fwd.set("#", "1".to_string());
        fwd.set("*", "2".to_string());
        fwd.set("10", "3".to_string());
        fwd.set("1", "4".to_string());
        let sources: Vec<String> = fwd.entries().into_iter().map(|(s, _)| s).collect();
        assert_eq!(sources, vec!["1", "10", "*", "#"]);
    }

    #[test]
    fn test_automaton_view() {
        let mut fwd = ForwardTrie::new();
        fwd.set("1*", "5".to_string());
        assert!(fwd.accepts(b"1*"));
        assert!(!fwd.accepts(b"1"));
        assert!(!fwd.is_final(fwd.root()));
        let one = fwd.transition(fwd.root(), b'1').unwrap();
        assert_eq!(fwd.out_symbols(one), vec![b'*']);
        assert_eq!(fwd.out_degree(fwd.root()), 1);
        assert!(fwd.transition(fwd.root(), b'x').is_none());
    }

    #[test]
    fn test_stats() {
        let mut fwd = ForwardTrie::new();
        fwd.set("12", "3".to_string());
        fwd.set("1", "4".to_string());
        let stats = fwd.stats();
        assert_eq!(stats.num_states, 3);
        assert_eq!(stats.num_keys, 2);
        assert_eq!(stats.max_depth, 2);
        assert!((stats.avg_depth - 1.5).abs() < f64::EPSILON);
        assert!(fwd.memory_usage() > 0);
    }
}
