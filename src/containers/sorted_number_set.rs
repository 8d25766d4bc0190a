//! Sorted, duplicate-free set of phone numbers
//!
//! `SortedNumberSet` keeps its entries in a contiguous vector ordered by
//! digit-code collation (see [`compare_numbers`]). It is the bucket type of
//! the reverse trie and the backing store of [`PhoneNumbers`].
//!
//! [`PhoneNumbers`]: super::PhoneNumbers

use crate::error::Result;
use crate::string::{compare_numbers, starts_with_prefix};
use std::cmp::Ordering;

/// Sorted string set ordered by digit-code collation
///
/// # Performance Characteristics
///
/// - **Search**: O(log n) binary search
/// - **Insert/Remove**: O(log n) search plus O(n) shift
/// - **Prefix removal**: O(log n + k) since all entries sharing a prefix are
///   adjacent in collation order
///
/// # Example
///
/// ```rust
/// use phone_forward::containers::SortedNumberSet;
///
/// let mut set = SortedNumberSet::new();
/// set.insert("#1");
/// set.insert("12");
/// set.insert("*");
/// set.insert("12");
///
/// let all: Vec<&str> = set.iter().collect();
/// assert_eq!(all, vec!["12", "*", "#1"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedNumberSet {
    entries: Vec<String>,
}

impl SortedNumberSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Create an empty set with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry at `index` in collation order
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Binary search for `needle`
    ///
    /// # Returns
    /// Ok(index) if found, Err(insertion_point) if not found
    pub fn binary_search(&self, needle: &str) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by(|probe| compare_numbers(probe, needle))
    }

    /// Check if the set contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.binary_search(needle).is_ok()
    }

    /// Insert `value`, returning `false` if it was already present
    pub fn insert(&mut self, value: &str) -> bool {
        match self.binary_search(value) {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(pos, value.to_owned());
                true
            }
        }
    }

    /// Insert an owned `value`, returning `false` if it was already present
    ///
    /// Never allocates for the string itself; the vector grows only if no
    /// spare capacity was reserved beforehand.
    pub fn insert_owned(&mut self, value: String) -> bool {
        match self.binary_search(&value) {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(pos, value);
                true
            }
        }
    }

    /// Reserve room for `additional` more entries without changing contents
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.entries.try_reserve(additional)?;
        Ok(())
    }

    /// Remove the entry equal to `value`; no-op if absent
    pub fn remove(&mut self, value: &str) -> bool {
        match self.binary_search(value) {
            Ok(pos) => {
                self.entries.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove every entry that starts with `prefix`, returning how many went
    pub fn remove_with_prefix(&mut self, prefix: &str) -> usize {
        let start = self
            .entries
            .partition_point(|e| compare_numbers(e, prefix) == Ordering::Less);
        let len = self.entries[start..]
            .iter()
            .take_while(|e| starts_with_prefix(e, prefix))
            .count();
        self.entries.drain(start..start + len);
        len
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.entries.retain(|e| keep(e));
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over entries in collation order
    pub fn iter(&self) -> SortedNumberSetIter<'_> {
        SortedNumberSetIter { inner: self.entries.iter() }
    }

    /// Entries as a slice in collation order
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Consume the set, returning the entries in collation order
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }

    /// Approximate heap usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<String>()
            + self.entries.iter().map(String::capacity).sum::<usize>()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SortedNumberSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for SortedNumberSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value.as_ref());
        }
    }
}

impl IntoIterator for SortedNumberSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a SortedNumberSet {
    type Item = &'a str;
    type IntoIter = SortedNumberSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over SortedNumberSet entries
#[derive(Debug, Clone)]
pub struct SortedNumberSetIter<'a> {
    inner: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for SortedNumberSetIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for SortedNumberSetIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for SortedNumberSetIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = SortedNumberSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.get(0), None);
        assert_eq!(set.binary_search("1"), Err(0));
        assert!(!set.contains("1"));
    }

    #[test]
    fn test_insert_is_sorted_and_idempotent() {
        let mut set = SortedNumberSet::new();
        assert!(set.insert("5"));
        assert!(set.insert("#"));
        assert!(set.insert("12"));
        assert!(set.insert("*0"));
        assert!(!set.insert("12"));
        assert!(!set.insert("#"));

        let all: Vec<&str> = set.iter().collect();
        assert_eq!(all, vec!["12", "5", "*0", "#"]);
        assert_eq!(set.binary_search("5"), Ok(1));
        assert_eq!(set.binary_search("6"), Err(2));
    }

    #[test]
    fn test_try_reserve_and_insert_owned() -> Result<()> {
        let mut set = SortedNumberSet::new();
        set.try_reserve(2)?;
        assert!(set.insert_owned("42".to_string()));
        assert!(!set.insert_owned("42".to_string()));
        assert!(set.insert_owned("41".to_string()));
        assert!(!set.insert_owned("41".to_string()));
        assert_eq!(set.as_slice(), &["41".to_string(), "42".to_string()]);
        Ok(())
    }

    #[test]
    fn test_remove_exact() {
        let mut set: SortedNumberSet = ["1", "12", "123"].into_iter().collect();
        assert!(set.remove("12"));
        assert!(!set.remove("12"));
        assert!(!set.remove("9"));
        let all: Vec<&str> = set.iter().collect();
        assert_eq!(all, vec!["1", "123"]);
    }

    #[test]
    fn test_remove_with_prefix() {
        let mut set: SortedNumberSet =
            ["2", "21", "22", "221", "22#", "229", "23", "3"].into_iter().collect();
        assert_eq!(set.remove_with_prefix("22"), 4);
        let all: Vec<&str> = set.iter().collect();
        assert_eq!(all, vec!["2", "21", "23", "3"]);

        assert_eq!(set.remove_with_prefix("22"), 0);
        assert_eq!(set.remove_with_prefix("4"), 0);
        assert_eq!(set.remove_with_prefix("2"), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["3"]);
    }

    #[test]
    fn test_remove_with_prefix_star_and_hash() {
        let mut set: SortedNumberSet = ["*", "*1", "*#", "#", "#*"].into_iter().collect();
        assert_eq!(set.remove_with_prefix("*"), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["#", "#*"]);
    }

    #[test]
    fn test_remove_with_empty_prefix_clears() {
        let mut set: SortedNumberSet = ["1", "2", "#"].into_iter().collect();
        assert_eq!(set.remove_with_prefix(""), 3);
        assert!(set.is_empty());
    }

    #[test]
    fn test_retain_and_iterators() {
        let mut set: SortedNumberSet = ["1", "2", "3", "4"].into_iter().collect();
        set.retain(|e| e != "2");
        let mut iter = set.iter();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.next_back(), Some("4"));
        assert_eq!(iter.next(), Some("1"));
        assert_eq!(set.clone().into_vec(), vec!["1", "3", "4"]);
        assert!(set.memory_usage() > 0);
        set.clear();
        assert!(set.is_empty());
    }
}
