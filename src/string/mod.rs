//! Phone number string utilities
//!
//! Numbers are opaque symbol strings over the alphabet `0-9`, `*`, `#`.
//! This module provides validation, digit-code mapping and the collation
//! used for every ordering in the crate.

mod phone_digits;

pub use phone_digits::{
    ALPHABET_SIZE, HASH_CODE, STAR_CODE, compare_numbers, digit_char, digit_code,
    is_phone_number, starts_with_prefix,
};
