//! Field limits for request payloads.
//!
//! Lengths are counted in characters, not bytes.

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 50;

/// Longest accepted password.
pub const MAX_PASSWORD_LEN: usize = 255;

/// Longest accepted `/readfile` filename.
pub const MAX_FILENAME_LEN: usize = 4096;

/// Password hashed when `/hash` receives no `password` field.
pub const DEFAULT_HASH_PASSWORD: &str = "admin";

/// Expression evaluated when `/compute` receives no `expression` field.
pub const DEFAULT_EXPRESSION: &str = "1+1";

/// True when `value` has between `min` and `max` characters, inclusive.
pub fn within_len(value: &str, min: usize, max: usize) -> bool {
    // Byte length bounds the char count from above; skip the walk when it
    // already fits.
    if value.len() <= max {
        return value.chars().count() >= min;
    }
    let count = value.chars().count();
    count >= min && count <= max
}

/// Present and non-empty.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
