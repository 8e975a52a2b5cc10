/// Placeholder used when a URL leaves nothing to build a name from
pub const INVALID_BASE_NAME: &str = "invalid-path";

/// Filler substituted for every character that is unsafe in a file name
pub const FILLER: &str = "__";

/// Characters that cannot appear in a path component on common filesystems
const UNSAFE_CHARS: &[char] = &['/', '"', '<', '>', ':', '*', '?', '|'];

/// Derives the filesystem-safe base name used to store a page
///
/// # Derivation Steps
///
/// 1. Strip the `scheme://` prefix (see [`strip_scheme`])
/// 2. Remove trailing slashes, keeping at least one character, so that
///    `example.com/path/` and `example.com/path` share a base name
/// 3. Replace each of `/ " < > : * ? |` with `__`
///
/// No other canonicalization happens: case, percent-encoding and query strings
/// are kept as given, so URLs differing in those map to different names.
///
/// # Examples
///
/// ```
/// use page_fetch::url::derive_base_name;
///
/// assert_eq!(derive_base_name("https://example.com/a/b/"), "example.com__a__b");
/// assert_eq!(derive_base_name("http://example.com:8080"), "example.com__8080");
/// ```
pub fn derive_base_name(url: &str) -> String {
    let mut name = strip_scheme(url);

    while name.len() > 1 && name.ends_with('/') {
        name = &name[..name.len() - 1];
    }

    if name.is_empty() {
        return INVALID_BASE_NAME.to_string();
    }

    name.replace(UNSAFE_CHARS, FILLER)
}

/// Strips the protocol off a URL
///
/// Everything up to and including the first `://` is dropped. Input without
/// a scheme is returned whole. Surrounding whitespace is trimmed either way.
pub fn strip_scheme(url: &str) -> &str {
    match url.split_once("://") {
        Some((_, rest)) => rest.trim(),
        None => url.trim(),
    }
}
