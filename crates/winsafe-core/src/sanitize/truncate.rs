//! Byte-length limits that keep the file extension intact.

/// Splits `segment` at its last `.` into `(stem, extension)`; the extension
/// keeps its dot. A leading dot does not start an extension.
pub(crate) fn split_extension(segment: &str) -> (&str, &str) {
    match segment.rfind('.') {
        Some(idx) if idx > 0 => segment.split_at(idx),
        _ => (segment, ""),
    }
}

/// Limits `segment` to `max_len` bytes, shortening the stem and keeping the
/// extension. When the extension alone does not fit, or no part of the stem
/// would survive next to it, the whole segment is cut instead.
pub fn truncate_preserving_extension(segment: &str, max_len: usize) -> String {
    if segment.len() <= max_len {
        return segment.to_string();
    }
    let (stem, ext) = split_extension(segment);
    if ext.len() < max_len {
        let stem = floor_to_boundary(stem, max_len - ext.len());
        if !stem.is_empty() {
            return format!("{stem}{ext}");
        }
    }
    trim_end(floor_to_boundary(segment, max_len)).to_string()
}

/// Joins `stem`, a `_<counter>` suffix and `ext`, shortening the stem so the
/// result stays within `max_len` bytes.
///
/// The `_` is left out when the (possibly shortened) stem already ends in one.
pub(crate) fn fit_with_suffix(stem: &str, counter: u32, ext: &str, max_len: usize) -> String {
    let digits = counter.to_string();
    let reserve = digits.len() + 1;
    let whole;
    let (head, ext) = if reserve + ext.len() >= max_len {
        // The extension no longer fits next to the suffix; fold it into the stem.
        whole = format!("{stem}{ext}");
        (floor_to_boundary(&whole, max_len.saturating_sub(reserve)), "")
    } else {
        (floor_to_boundary(stem, max_len - reserve - ext.len()), ext)
    };
    let sep = if head.ends_with('_') { "" } else { "_" };
    format!("{head}{sep}{digits}{ext}")
}

/// Longest prefix of `s` no longer than `max` bytes that ends on a char boundary.
fn floor_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}

fn trim_end(s: &str) -> &str {
    s.trim_end_matches(|c| c == '.' || c == ' ')
}
