//! Container types for phone numbers
//!
//! - **`SortedNumberSet`** - Sorted, duplicate-free numbers in digit-code collation,
//!   used as the reverse trie bucket
//! - **`PhoneNumbers`** - Owned result sequence returned from registry queries

mod phone_numbers;
mod sorted_number_set;

pub use phone_numbers::PhoneNumbers;
pub use sorted_number_set::{SortedNumberSet, SortedNumberSetIter};
