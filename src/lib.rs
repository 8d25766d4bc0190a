//! # Phone Forward: Prefix-Based Phone Number Forwarding
//!
//! An in-memory registry of phone number forwardings. A forwarding
//! `source -> target` redirects every number beginning with `source`: the
//! matched prefix is replaced by `target` and the rest of the number is kept.
//!
//! ## Key Features
//!
//! - **Longest-prefix forwarding**: [`PhoneForward::get`] walks a 12-symbol
//!   digit trie (`0`-`9`, `*`, `#`)
//! - **Reverse lookup**: [`PhoneForward::reverse`] and
//!   [`PhoneForward::get_reverse`] use a second trie indexed by target
//! - **Atomic updates**: a failed [`PhoneForward::add`] leaves the registry
//!   unchanged, including on allocation failure
//! - **Configurable limits**: node and number-length caps via [`RegistryConfig`]
//! - **C FFI Support**: `phfwd_*` / `phnum_*` functions behind the `ffi` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use phone_forward::PhoneForward;
//!
//! let mut pf = PhoneForward::new();
//! pf.add("123", "9").unwrap();
//! pf.add("000", "9").unwrap();
//!
//! // Forwarding replaces the longest matching prefix
//! assert_eq!(pf.get("1234").get(0), Some("94"));
//!
//! // Every number that may be forwarded onto "94", sorted
//! let numbers: Vec<String> = pf.reverse("94").to_vec();
//! assert_eq!(numbers, vec!["0004", "1234", "94"]);
//!
//! pf.remove("12");
//! assert_eq!(pf.get("1234").get(0), Some("1234"));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod containers;
pub mod error;
pub mod fsa;
pub mod registry;
pub mod string;

// Re-export core types
pub use config::{Config, RegistryConfig};
pub use containers::{PhoneNumbers, SortedNumberSet};
pub use error::{ForwardError, Result};
pub use fsa::{FiniteStateAutomaton, ForwardTrie, ReverseTrie, StateInspectable, StatisticsProvider, TrieStats};
pub use registry::{PhoneForward, RegistryStats};
pub use string::{compare_numbers, is_phone_number};

/// State identifier type for FSA operations
pub type StateId = u32;

#[cfg(feature = "ffi")]
pub mod ffi;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing phone-forward v{}", VERSION);
}
