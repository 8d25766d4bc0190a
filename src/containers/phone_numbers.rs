//! Result sequence returned by registry queries

use super::sorted_number_set::{SortedNumberSet, SortedNumberSetIter};
use crate::error::{Result, check_bounds};
use std::fmt;

/// Ordered, duplicate-free sequence of numbers returned by a query
///
/// A `PhoneNumbers` value is a snapshot: it owns its strings and stays valid
/// after the registry that produced it is mutated or dropped. Releasing it
/// is just dropping it.
///
/// ```rust
/// use phone_forward::PhoneForward;
///
/// let mut pf = PhoneForward::new();
/// pf.add("123", "9").unwrap();
///
/// let numbers = pf.get("1234");
/// assert_eq!(numbers.get(0), Some("94"));
/// assert_eq!(numbers.get(1), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumbers {
    numbers: SortedNumberSet,
}

impl PhoneNumbers {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence holding exactly `number`
    pub fn single(number: String) -> Self {
        let mut numbers = SortedNumberSet::with_capacity(1);
        numbers.insert_owned(number);
        Self { numbers }
    }

    /// Get the number at `index`; `None` past the end
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.numbers.get(index)
    }

    /// Get the number at `index`, reporting out-of-range access as an error
    pub fn try_get(&self, index: usize) -> Result<&str> {
        check_bounds(index, self.len())?;
        Ok(&self.numbers.as_slice()[index])
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Check if the sequence is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Check if `number` is in the sequence
    pub fn contains(&self, number: &str) -> bool {
        self.numbers.contains(number)
    }

    /// Iterate in collation order
    pub fn iter(&self) -> SortedNumberSetIter<'_> {
        self.numbers.iter()
    }

    /// Copy the entries out
    pub fn to_vec(&self) -> Vec<String> {
        self.numbers.as_slice().to_vec()
    }

    pub(crate) fn insert_owned(&mut self, number: String) -> bool {
        self.numbers.insert_owned(number)
    }

    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.numbers.retain(keep);
    }
}

impl From<SortedNumberSet> for PhoneNumbers {
    fn from(numbers: SortedNumberSet) -> Self {
        Self { numbers }
    }
}

impl IntoIterator for PhoneNumbers {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.numbers.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhoneNumbers {
    type Item = &'a str;
    type IntoIter = SortedNumberSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PhoneNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for number in self.iter() {
            writeln!(f, "{}", number)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let numbers = PhoneNumbers::single("123".to_string());
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers.get(0), Some("123"));
        assert_eq!(numbers.get(1), None);
        assert!(numbers.contains("123"));
    }

    #[test]
    fn test_try_get_bounds() {
        let numbers = PhoneNumbers::single("7".to_string());
        assert_eq!(numbers.try_get(0).unwrap(), "7");
        assert!(numbers.try_get(1).is_err());
        assert!(PhoneNumbers::new().try_get(0).is_err());
    }

    #[test]
    fn test_insert_and_retain() {
        let mut numbers = PhoneNumbers::new();
        assert!(numbers.insert_owned("5".to_string()));
        assert!(numbers.insert_owned("#".to_string()));
        assert!(numbers.insert_owned("12".to_string()));
        assert!(!numbers.insert_owned("5".to_string()));
        assert_eq!(numbers.to_vec(), vec!["12", "5", "#"]);

        numbers.retain(|n| n != "5");
        assert_eq!(numbers.to_vec(), vec!["12", "#"]);
    }

    #[test]
    fn test_display_one_per_line() {
        let numbers: PhoneNumbers = ["2", "1"].into_iter().collect::<SortedNumberSet>().into();
        assert_eq!(numbers.to_string(), "1\n2\n");
        assert_eq!(PhoneNumbers::new().to_string(), "");
    }

    #[test]
    fn test_into_iter() {
        let numbers: PhoneNumbers = ["3", "1"].into_iter().collect::<SortedNumberSet>().into();
        let borrowed: Vec<&str> = (&numbers).into_iter().collect();
        assert_eq!(borrowed, vec!["1", "3"]);
        let owned: Vec<String> = numbers.into_iter().collect();
        assert_eq!(owned, vec!["1", "3"]);
    }
}
