//! Arena-backed 12-ary trie over the phone number alphabet
//!
//! `DigitTrie<T>` stores every node in a single vector and addresses nodes
//! by index. Each node owns up to twelve children (one per digit code), a
//! non-owning parent link, and a payload `T`. Nodes are created lazily along
//! inserted paths and are only released all at once by [`DigitTrie::clear`]
//! or by dropping the trie.
//!
//! Path creation is split in two phases so callers can make a multi-trie
//! update atomic: [`DigitTrie::try_reserve_path`] performs every fallible
//! step (node limit check and arena reservation) without touching the
//! visible structure, after which [`DigitTrie::insert_path`] cannot fail.

use crate::StateId;
use crate::error::{ForwardError, Result};
use crate::string::{ALPHABET_SIZE, digit_char, digit_code};

/// Index of a node in the trie arena
pub type NodeId = usize;

/// Index of the root node; the root always exists
pub const ROOT: NodeId = 0;

/// Automaton state for `node`, `None` if the id does not fit a [`StateId`]
#[inline]
pub fn state_id(node: NodeId) -> Option<StateId> {
    StateId::try_from(node).ok()
}

#[derive(Debug, Clone)]
struct DigitNode<T> {
    /// Child per digit code
    children: [Option<NodeId>; ALPHABET_SIZE],
    /// Informational back-link, never used for ownership
    parent: Option<NodeId>,
    /// Digit code of the edge leading here (unused for the root)
    code: u8,
    /// Depth of this node; the root has depth 0
    depth: usize,
    value: T,
}

impl<T: Default> DigitNode<T> {
    fn new_root() -> Self {
        Self {
            children: [None; ALPHABET_SIZE],
            parent: None,
            code: 0,
            depth: 0,
            value: T::default(),
        }
    }

    fn new_child(parent: NodeId, code: u8, depth: usize) -> Self {
        Self {
            children: [None; ALPHABET_SIZE],
            parent: Some(parent),
            code,
            depth,
            value: T::default(),
        }
    }
}

/// 12-ary trie keyed by digit codes
#[derive(Debug, Clone)]
pub struct DigitTrie<T> {
    nodes: Vec<DigitNode<T>>,
    max_nodes: Option<usize>,
}

impl<T: Default> DigitTrie<T> {
    /// Create a trie holding only the root
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Create a trie with arena room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(DigitNode::new_root());
        Self { nodes, max_nodes: None }
    }

    /// Limit the number of nodes, root included
    pub fn set_max_nodes(&mut self, max_nodes: Option<usize>) {
        self.max_nodes = max_nodes;
    }

    /// Configured node limit
    pub fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Number of allocated nodes, root included
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Child of `node` along digit `code`
    #[inline]
    pub fn child(&self, node: NodeId, code: usize) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.children.get(code).copied().flatten())
    }

    /// Parent of `node`; `None` for the root
    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Depth of `node`
    #[inline]
    pub fn depth(&self, node: NodeId) -> usize {
        self.nodes.get(node).map_or(0, |n| n.depth)
    }

    /// Children of `node` as `(code, child)` pairs in ascending code order
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.children.iter().enumerate())
            .filter_map(|(code, child)| child.map(|c| (code, c)))
    }

    /// Payload of `node`
    #[inline]
    pub fn value(&self, node: NodeId) -> &T {
        &self.nodes[node].value
    }

    /// Mutable payload of `node`
    #[inline]
    pub fn value_mut(&mut self, node: NodeId) -> &mut T {
        &mut self.nodes[node].value
    }

    /// Node reached by walking all of `number`, if the whole path exists
    pub fn find(&self, number: &str) -> Option<NodeId> {
        let mut node = ROOT;
        for byte in number.bytes() {
            node = self.child(node, digit_code(byte)? as usize)?;
        }
        Some(node)
    }

    /// Walk `number` from the root, yielding each node reached after
    /// consuming a digit together with the number of digits consumed
    ///
    /// The walk stops at the first digit without a child.
    pub fn walk<'a>(&'a self, number: &'a str) -> PathWalk<'a, T> {
        PathWalk {
            trie: self,
            bytes: number.as_bytes(),
            consumed: 0,
            node: Some(ROOT),
        }
    }

    /// Number of nodes `insert_path(number)` would have to create
    pub fn missing_nodes(&self, number: &str) -> usize {
        let existing = self.walk(number).count();
        number.len() - existing
    }

    /// Perform every fallible step of `insert_path(number)` up front
    ///
    /// Checks the node limit and reserves arena slots for the missing nodes.
    /// The visible structure is left untouched.
    pub fn try_reserve_path(&mut self, number: &str) -> Result<()> {
        if number.bytes().any(|b| digit_code(b).is_none()) {
            return Err(ForwardError::invalid_argument(format!(
                "'{}' is not a phone number",
                number
            )));
        }
        let missing = self.missing_nodes(number);
        if missing == 0 {
            return Ok(());
        }
        if let Some(limit) = self.max_nodes {
            if self.nodes.len() + missing > limit {
                return Err(ForwardError::resource_exhausted(missing));
            }
        }
        self.nodes
            .try_reserve(missing)
            .map_err(|_| ForwardError::resource_exhausted(missing))
    }

    /// Walk `number`, creating missing nodes, and return the terminal node
    ///
    /// Does not reallocate the arena after a successful
    /// [`try_reserve_path`](Self::try_reserve_path) for the same number.
    /// Symbols outside the alphabet are skipped.
    pub fn insert_path(&mut self, number: &str) -> NodeId {
        let mut node = ROOT;
        for code in number.bytes().filter_map(digit_code).map(usize::from) {
            node = match self.nodes[node].children[code] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    let depth = self.nodes[node].depth + 1;
                    self.nodes.push(DigitNode::new_child(node, code as u8, depth));
                    self.nodes[node].children[code] = Some(child);
                    child
                }
            };
        }
        node
    }

    /// Nodes of the subtree rooted at `node` in pre-order, children visited
    /// in ascending code order
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if node >= self.nodes.len() {
            return order;
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            order.push(current);
            for child in self.nodes[current].children.iter().rev().flatten() {
                stack.push(*child);
            }
        }
        order
    }

    /// Rebuild the number spelled by the path from the root to `node`
    ///
    /// Follows the parent links upward.
    pub fn key_of(&self, node: NodeId) -> String {
        let mut codes = Vec::with_capacity(self.depth(node));
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            codes.push(self.nodes[current].code);
            current = parent;
        }
        codes.iter().rev().filter_map(|&code| digit_char(code)).collect()
    }

    /// Maximum node depth
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Total number of child links
    pub fn transition_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Approximate arena memory in bytes, payload heap excluded
    pub fn arena_bytes(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<DigitNode<T>>()
    }

    /// Iterate over `(node, payload)` for every node
    pub fn values(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.nodes.iter().enumerate().map(|(id, n)| (id, &n.value))
    }

    /// Drop every node except a fresh root
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(DigitNode::new_root());
    }
}

impl<T: Default> Default for DigitTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`DigitTrie::walk`]
#[derive(Debug)]
pub struct PathWalk<'a, T> {
    trie: &'a DigitTrie<T>,
    bytes: &'a [u8],
    consumed: usize,
    node: Option<NodeId>,
}

impl<T: Default> Iterator for PathWalk<'_, T> {
    /// `(digits consumed, node)`
    type Item = (usize, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.node?;
        let next = self
            .bytes
            .get(self.consumed)
            .and_then(|&b| digit_code(b))
            .and_then(|code| self.trie.child(current, code as usize));
        match next {
            Some(child) => {
                self.consumed += 1;
                self.node = Some(child);
                Some((self.consumed, child))
            }
            None => {
                self.node = None;
                None
            }
        }
    }
}
