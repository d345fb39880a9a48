//! Centralized validation and helper functions.

/// Length of a catalog identifier such as `A000045`
pub const CATALOG_ID_LEN: usize = 7;

/// Loose identifier check used for corpus lines: starts with `A`, 7 characters.
///
/// # Examples
///
/// ```
/// use oeis_probe::utils::validation::is_catalog_id;
///
/// assert!(is_catalog_id("A000045"));
/// assert!(!is_catalog_id("A45"));
/// assert!(!is_catalog_id("M000045"));
/// ```
#[must_use]
pub fn is_catalog_id(s: &str) -> bool {
    s.starts_with('A') && s.chars().count() == CATALOG_ID_LEN
}

/// Compute the cache key for an HTTP GET of `url`.
///
/// The key is the MD5 hex digest of `GET:{url}`, which is also safe to use
/// as a file name.
#[must_use]
pub fn cache_key(url: &str) -> String {
    let digest = md5::compute(format!("GET:{url}").as_bytes());
    format!("{digest:x}")
}
