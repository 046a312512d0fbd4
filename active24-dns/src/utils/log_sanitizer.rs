//! Log sanitization utilities
//!
//! Keeps record contents and credentials out of diagnostic output: response
//! bodies are truncated and the API key is masked before anything is logged.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a credential left visible.
const CREDENTIAL_VISIBLE: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for safe logging.
///
/// Bodies within the limit are returned unchanged; longer ones keep the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) plus the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential, keeping only its first few characters.
///
/// `"ak48l3h7-ak5d"` becomes `"ak48****"`; very short values are fully masked.
pub fn mask_credential(s: &str) -> String {
    if s.chars().count() <= CREDENTIAL_VISIBLE * 2 {
        return "****".to_string();
    }
    let visible: String = s.chars().take(CREDENTIAL_VISIBLE).collect();
    format!("{visible}****")
}
