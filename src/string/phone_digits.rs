//! Phone number digit alphabet and collation
//!
//! A phone number is a non-empty sequence over a 12 symbol alphabet: the
//! decimal digits `0`-`9`, then `*` and `#`. Each symbol has a digit code in
//! `0..12` and all ordering between numbers is defined over those codes, so
//! the collation order is `0 < 1 < ... < 9 < * < #`. Plain byte comparison
//! would put `#` and `*` before the digits.

use std::cmp::Ordering;

/// Number of symbols in the phone number alphabet
pub const ALPHABET_SIZE: usize = 12;

/// Digit code of `*`
pub const STAR_CODE: u8 = 10;

/// Digit code of `#`
pub const HASH_CODE: u8 = 11;

/// Map an alphabet byte to its digit code
///
/// # Examples
///
/// ```rust
/// use phone_forward::string::digit_code;
///
/// assert_eq!(digit_code(b'7'), Some(7));
/// assert_eq!(digit_code(b'*'), Some(10));
/// assert_eq!(digit_code(b'#'), Some(11));
/// assert_eq!(digit_code(b'a'), None);
/// ```
#[inline]
pub fn digit_code(symbol: u8) -> Option<u8> {
    match symbol {
        b'0'..=b'9' => Some(symbol - b'0'),
        b'*' => Some(STAR_CODE),
        b'#' => Some(HASH_CODE),
        _ => None,
    }
}

/// Map a digit code back to its alphabet character
#[inline]
pub fn digit_char(code: u8) -> Option<char> {
    match code {
        0..=9 => Some((b'0' + code) as char),
        STAR_CODE => Some('*'),
        HASH_CODE => Some('#'),
        _ => None,
    }
}

/// Check that `number` is a non-empty sequence over the alphabet
///
/// ```rust
/// use phone_forward::string::is_phone_number;
///
/// assert!(is_phone_number("12*#0"));
/// assert!(!is_phone_number(""));
/// assert!(!is_phone_number("12a"));
/// ```
pub fn is_phone_number(number: &str) -> bool {
    !number.is_empty() && number.bytes().all(|b| digit_code(b).is_some())
}

/// Compare two numbers under digit-code collation
///
/// Symbols outside the alphabet sort after every alphabet symbol, by byte
/// value, so the function stays a total order on arbitrary strings. A
/// proper prefix sorts before any of its extensions.
pub fn compare_numbers(a: &str, b: &str) -> Ordering {
    let key = |byte: u8| match digit_code(byte) {
        Some(code) => code as u16,
        None => ALPHABET_SIZE as u16 + byte as u16,
    };
    a.bytes().map(key).cmp(b.bytes().map(key))
}

/// Check whether `number` starts with `prefix` under digit-code comparison
///
/// The empty prefix is a prefix of every number.
pub fn starts_with_prefix(number: &str, prefix: &str) -> bool {
    prefix.len() <= number.len()
        && number
            .bytes()
            .zip(prefix.bytes())
            .all(|(n, p)| digit_code(n) == digit_code(p) && digit_code(n).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_code_roundtrip_over_alphabet() {
        for code in 0..ALPHABET_SIZE as u8 {
            let c = digit_char(code).unwrap();
            assert_eq!(digit_code(c as u8), Some(code));
        }
        assert_eq!(digit_char(12), None);
    }

    #[test]
    fn test_invalid_symbols() {
        for b in [b'a', b' ', b';', b':', b'+', b'-', 0u8] {
            assert_eq!(digit_code(b), None);
        }
        assert!(!is_phone_number("0 1"));
        assert!(!is_phone_number("1:2"));
        assert!(!is_phone_number("żółw"));
    }

    #[test]
    fn test_collation_puts_star_and_hash_after_digits() {
        assert_eq!(compare_numbers("9", "*"), Ordering::Less);
        assert_eq!(compare_numbers("*", "#"), Ordering::Less);
        assert_eq!(compare_numbers("#", "0"), Ordering::Greater);
        assert_eq!(compare_numbers("12", "12"), Ordering::Equal);
        assert_eq!(compare_numbers("12", "123"), Ordering::Less);
        assert_eq!(compare_numbers("1#", "10"), Ordering::Greater);

        let mut numbers = vec!["#", "1", "*", "10", "9", "0"];
        numbers.sort_by(|a, b| compare_numbers(a, b));
        assert_eq!(numbers, vec!["0", "1", "10", "9", "*", "#"]);
    }

    #[test]
    fn test_starts_with_prefix() {
        assert!(starts_with_prefix("221", "22"));
        assert!(starts_with_prefix("22", "22"));
        assert!(starts_with_prefix("22", ""));
        assert!(!starts_with_prefix("2", "22"));
        assert!(!starts_with_prefix("231", "22"));
        assert!(starts_with_prefix("*#1", "*#"));
        assert!(!starts_with_prefix("a1", "a"));
    }
}
