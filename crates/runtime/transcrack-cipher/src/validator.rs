//! Key validation
//!
//! Runs on every brute-force candidate, so it returns a `Result` the search
//! loop can match on instead of failing the search.

use crate::{Error, Key, Result};

/// Check `key` against the cipher rules and the text it will be applied to.
///
/// Rules, in order: digits only (`NonNumericKey`), no zero (`ZeroDigitKey`),
/// no repeated digit (`DuplicateDigit`), not longer than the text (`KeyTooLong`).
pub fn validate(text: &[u8], key: &str) -> Result<Key> {
    let parsed = Key::parse(key)?;
    if parsed.len() > text.len() {
        return Err(Error::KeyTooLong {
            key_len: parsed.len(),
            text_len: text.len(),
        });
    }
    Ok(parsed)
}
