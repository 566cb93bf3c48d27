//! Byte-level parsing for the plaintext graph formats.
//!
//! The adjacency and group files are plain ASCII; lines are split on
//! single-byte delimiters and the pieces parsed as integers.

use bstr::ByteSlice;

/// Splits a line on a delimiter into trimmed, non-empty fields. Padding,
/// repeated delimiters, and trailing delimiters all produce nothing.
pub(crate) fn fields(bytes: &[u8], delim: u8) -> impl Iterator<Item = &[u8]> {
    bytes
        .split(move |&b| b == delim)
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
}

/// Parses a (whitespace-padded) ASCII unsigned integer.
pub(crate) fn parse_u32(word: &[u8]) -> Option<u32> {
    std::str::from_utf8(word).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_drop_padding_and_empties() {
        let words: Vec<_> = fields(b" 1, 2,,3, ", b',').collect();
        assert_eq!(words, vec![&b"1"[..], &b"2"[..], &b"3"[..]]);
    }

    #[test]
    fn a_blank_line_has_no_fields() {
        assert_eq!(fields(b"", b',').count(), 0);
        assert_eq!(fields(b"  ", b',').count(), 0);
    }

    #[test]
    fn parses_padded_integers() {
        assert_eq!(parse_u32(b" 42 "), Some(42));
        assert_eq!(parse_u32(b"x"), None);
        assert_eq!(parse_u32(b""), None);
    }
}
