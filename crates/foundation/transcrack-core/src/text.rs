//! Latin-1 text helpers
//!
//! Ciphertext is handled as raw 8-bit code units. These helpers map bytes to
//! characters one-to-one (ISO-8859-1) and do ASCII-only case folding, so no
//! input byte is ever rejected.

/// Decode bytes as latin-1: each byte becomes the char with the same code point.
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode a string as latin-1, or `None` if any char is above U+00FF.
pub fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

/// ASCII case-insensitive substring test. An empty needle always matches.
pub fn contains_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_roundtrip_all_bytes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let text = latin1_to_string(&bytes);
        assert_eq!(text.chars().count(), 256);
        assert_eq!(encode_latin1(&text), Some(bytes));
    }

    #[test]
    fn test_encode_latin1_refuses_wide_chars() {
        assert_eq!(encode_latin1("café"), Some(vec![b'c', b'a', b'f', 0xE9]));
        assert_eq!(encode_latin1("a€b"), None);
        assert_eq!(encode_latin1("日本"), None);
        assert_eq!(encode_latin1(""), Some(Vec::new()));
    }

    #[test]
    fn test_contains_ignore_ascii_case() {
        assert!(contains_ignore_ascii_case(b"Attack At Dawn", b"at dawn"));
        assert!(contains_ignore_ascii_case(b"TEST", b"test"));
        assert!(!contains_ignore_ascii_case(b"tes", b"test"));
        assert!(!contains_ignore_ascii_case(b"t e s t", b"test"));
        assert!(contains_ignore_ascii_case(b"", b""));
    }
}
