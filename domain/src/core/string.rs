//! String utilities for the domain layer.

/// Shorten provider text for log lines and failure reasons (UTF-8 safe).
///
/// `max_len` is measured in bytes; the cut is moved back to the nearest
/// character boundary and an ellipsis is appended.
pub fn excerpt(s: &str, max_len: usize) -> String {
    let s = s.trim();
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
