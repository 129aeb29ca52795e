//! Percent-escape detection and strict decoding.

use crate::error::SanitizeError;

/// True if `s` contains at least one `%XX` triplet with two hex digits.
pub fn has_percent_triplet(s: &str) -> bool {
    s.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'%' && hex_digit(w[1]).is_some() && hex_digit(w[2]).is_some())
}

/// Decodes every `%XX` escape in `input` once.
///
/// Unlike a lenient URL decoder this rejects a `%` that is not followed by
/// two hex digits, and decoded bytes that are not valid UTF-8.
pub fn percent_decode(input: &str) -> Result<String, SanitizeError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b != b'%' {
            out.push(b);
            i += 1;
            continue;
        }
        let high = bytes.get(i + 1).copied().and_then(hex_digit);
        let low = bytes.get(i + 2).copied().and_then(hex_digit);
        match (high, low) {
            (Some(high), Some(low)) => {
                out.push(high << 4 | low);
                i += 3;
            }
            _ => {
                return Err(SanitizeError::DecodeFailure {
                    input: input.to_string(),
                    offset: i,
                    reason: "malformed percent escape",
                })
            }
        }
    }
    String::from_utf8(out).map_err(|e| SanitizeError::DecodeFailure {
        input: input.to_string(),
        offset: e.utf8_error().valid_up_to(),
        reason: "decoded bytes are not valid UTF-8",
    })
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
