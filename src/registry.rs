//! The forwarding registry
//!
//! [`PhoneForward`] owns one [`ForwardTrie`] and one [`ReverseTrie`] and keeps
//! them consistent: a source `s` is in the reverse bucket at `t` if and only
//! if the forward node at `s` carries forwarding `t`. Every public operation
//! preserves that invariant, including failed ones.
//!
//! # Examples
//!
//! ```rust
//! use phone_forward::PhoneForward;
//!
//! let mut pf = PhoneForward::new();
//! pf.add("123", "9").unwrap();
//! pf.add("1234", "8").unwrap();
//!
//! assert_eq!(pf.get("12345").to_vec(), vec!["85"]);
//! assert_eq!(pf.get("1239").to_vec(), vec!["99"]);
//! assert_eq!(pf.get("55").to_vec(), vec!["55"]);
//!
//! assert_eq!(pf.reverse("99").to_vec(), vec!["1239", "99"]);
//! ```

use crate::config::{Config, RegistryConfig};
use crate::containers::PhoneNumbers;
use crate::error::{ForwardError, Result};
use crate::fsa::{ForwardTrie, ReverseTrie, StatisticsProvider, TrieStats};
use crate::string::is_phone_number;
use serde::{Deserialize, Serialize};

/// Registry of phone number prefix forwardings
#[derive(Debug, Clone)]
pub struct PhoneForward {
    forward: ForwardTrie,
    reverse: ReverseTrie,
    config: RegistryConfig,
}

/// Snapshot of registry size and shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Active forwardings
    pub forwardings: usize,
    /// Entries across all reverse buckets; equals `forwardings` when consistent
    pub reverse_entries: usize,
    /// Forward trie statistics
    pub forward: TrieStats,
    /// Reverse trie statistics
    pub reverse: TrieStats,
}

impl PhoneForward {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::build(RegistryConfig::default())
    }

    /// Create an empty registry after validating `config`
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        let mut forward = ForwardTrie::with_capacity(config.initial_capacity);
        let mut reverse = ReverseTrie::with_capacity(config.initial_capacity);
        forward.set_max_nodes(config.max_nodes);
        reverse.set_max_nodes(config.max_nodes);
        Self { forward, reverse, config }
    }

    /// Active configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Check that `number` is a valid number under this registry's limits
    pub fn is_valid_number(&self, number: &str) -> bool {
        is_phone_number(number) && self.config.accepts_len(number)
    }

    fn check_number(&self, number: &str) -> Result<()> {
        if !is_phone_number(number) {
            return Err(ForwardError::invalid_argument(format!(
                "'{}' is not a phone number",
                number
            )));
        }
        if !self.config.accepts_len(number) {
            return Err(ForwardError::invalid_argument(format!(
                "number of length {} exceeds the limit",
                number.len()
            )));
        }
        Ok(())
    }

    /// Forward every number starting with `source` onto `target`
    ///
    /// Replaces any forwarding previously added for exactly `source`.
    ///
    /// # Errors
    ///
    /// - [`ForwardError::InvalidArgument`] if either number is invalid or
    ///   they are equal.
    /// - [`ForwardError::ResourceExhausted`] if memory or the configured node
    ///   limit runs out. Both tries are then left exactly as they were.
    pub fn add(&mut self, source: &str, target: &str) -> Result<()> {
        let result = self.try_add_inner(source, target);
        match &result {
            Ok(()) => {
                if self.config.log_mutations {
                    log::debug!("Added forwarding {} -> {}", source, target);
                }
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("Forwarding {} -> {} not added: {}", source, target, e);
            }
            Err(e) => {
                log::debug!("Rejected forwarding {:?} -> {:?}: {}", source, target, e);
            }
        }
        result
    }

    /// [`add`](Self::add) reporting only success or failure
    pub fn try_add(&mut self, source: &str, target: &str) -> bool {
        self.add(source, target).is_ok()
    }

    fn try_add_inner(&mut self, source: &str, target: &str) -> Result<()> {
        self.check_number(source)?;
        self.check_number(target)?;
        if source == target {
            return Err(ForwardError::invalid_argument("source and target are identical"));
        }

        // Every fallible step happens before the first visible mutation.
        self.forward.try_reserve(source)?;
        let spare_bucket = self.reverse.try_reserve(target)?;
        let target_owned = try_to_owned(target)?;
        let source_owned = try_to_owned(source)?;

        if let Some(previous) = self.forward.set(source, target_owned) {
            self.reverse.remove(&previous, source);
        }
        self.reverse.insert(target, source_owned, spare_bucket);
        Ok(())
    }

    /// Remove every forwarding whose source starts with `prefix`
    ///
    /// Silently does nothing if `prefix` is not a valid number or no such
    /// forwarding exists.
    pub fn remove(&mut self, prefix: &str) {
        if !self.is_valid_number(prefix) {
            log::debug!("Ignoring removal of invalid prefix {:?}", prefix);
            return;
        }
        let cleared = self.forward.clear_subtree(prefix);
        for target in &cleared {
            self.reverse.remove_with_prefix(target, prefix);
        }
        if self.config.log_mutations {
            log::debug!("Removed prefix {}: {} forwardings cleared", prefix, cleared.len());
        }
    }

    /// Forward `number` using the longest matching source prefix
    ///
    /// The result holds exactly one number: the forwarded one, or `number`
    /// itself if no prefix of it is forwarded. Invalid input yields an empty
    /// result.
    pub fn get(&self, number: &str) -> PhoneNumbers {
        if !self.is_valid_number(number) {
            return PhoneNumbers::new();
        }
        log::trace!("get {}", number);
        PhoneNumbers::single(self.forward_number(number))
    }

    /// Longest-prefix forwarding of an already validated number
    ///
    /// Applies no length limit: `max_number_len` restricts arguments only,
    /// and results may be longer than their argument.
    fn forward_number(&self, number: &str) -> String {
        match self.forward.longest_match(number) {
            Some((matched, target)) => {
                let mut forwarded = String::with_capacity(target.len() + number.len() - matched);
                forwarded.push_str(target);
                forwarded.push_str(&number[matched..]);
                forwarded
            }
            None => number.to_owned(),
        }
    }

    /// Candidates that may forward onto `number`
    ///
    /// Contains `number` itself plus, for every forwarding `s -> t` where
    /// `t` is a prefix of `number`, the number `s` followed by the rest of
    /// `number` after `t`. Sorted and duplicate-free. Invalid input yields an
    /// empty result.
    pub fn reverse(&self, number: &str) -> PhoneNumbers {
        if !self.is_valid_number(number) {
            return PhoneNumbers::new();
        }
        log::trace!("reverse {}", number);
        let mut result = PhoneNumbers::single(number.to_owned());
        for (consumed, bucket) in self.reverse.walk(number) {
            let suffix = &number[consumed..];
            for source in bucket {
                let mut candidate = String::with_capacity(source.len() + suffix.len());
                candidate.push_str(source);
                candidate.push_str(suffix);
                result.insert_owned(candidate);
            }
        }
        result
    }

    /// [`reverse`](Self::reverse) keeping only numbers `x` with `get(x) == [number]`
    ///
    /// `number` itself is subject to the same check, so it is dropped when
    /// `number` is forwarded elsewhere. Candidates longer than
    /// `max_number_len` are verified like any other.
    pub fn get_reverse(&self, number: &str) -> PhoneNumbers {
        let mut candidates = self.reverse(number);
        candidates.retain(|candidate| self.forward_number(candidate) == number);
        candidates
    }

    /// Target stored for exactly `source`, without prefix matching
    pub fn forwarding(&self, source: &str) -> Option<&str> {
        self.forward.forwarding(source)
    }

    /// All `(source, target)` forwardings in collation order of the source
    pub fn forwardings(&self) -> Vec<(String, String)> {
        self.forward.entries()
    }

    /// Number of active forwardings
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if no forwarding is active
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Release every node and bucket of both tries
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
        if self.config.log_mutations {
            log::debug!("Registry cleared");
        }
    }

    /// Size and shape statistics
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            forwardings: self.forward.len(),
            reverse_entries: self.reverse.len(),
            forward: self.forward.stats(),
            reverse: self.reverse.stats(),
        }
    }

    /// Check the bidirectional invariant between the two tries
    ///
    /// Walks both tries in full; intended for tests and debugging.
    pub fn is_consistent(&self) -> bool {
        let mut forward: Vec<(String, String)> = self
            .forward
            .entries()
            .into_iter()
            .map(|(source, target)| (target, source))
            .collect();
        forward.sort_by(|a, b| {
            crate::string::compare_numbers(&a.0, &b.0)
                .then_with(|| crate::string::compare_numbers(&a.1, &b.1))
        });
        forward == self.reverse.entries()
    }
}

impl Default for PhoneForward {
    fn default() -> Self {
        Self::new()
    }
}

fn try_to_owned(s: &str) -> Result<String> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(s.len())
        .map_err(|_| ForwardError::resource_exhausted(s.len()))?;
    owned.push_str(s);
    Ok(owned)
}
