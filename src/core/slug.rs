//! Company code normalization
//!
//! Turns a free-form company identifier ("Apple Inc!") into the canonical
//! slug used as the `companies.code` primary key ("apple-inc").

/// Characters dropped outright from a raw code
pub const STRIPPED_SYMBOLS: &[char] = &[
    '*', '#', '$', '%', '^', '&', '_', '=', ';', '?', '/', '|', '>', '<', '+', '~', '.', ',', '(',
    ')', '\'', '"', '!', ':', '@',
];

/// Separator placed between words of a slug
pub const SEPARATOR: char = '-';

/// Normalize a raw company code into its slug form
///
/// - symbols from [`STRIPPED_SYMBOLS`] are removed
/// - the separator itself counts as whitespace
/// - leading/trailing whitespace is trimmed, inner runs collapse to one `-`
/// - the result is lowercased
///
/// The function is total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```
/// use biztime::core::slug::normalize;
///
/// assert_eq!(normalize("Apple Inc!"), "apple-inc");
/// assert_eq!(normalize("A*B#C"), "abc");
/// assert_eq!(normalize("  IBM -- Research "), "ibm-research");
/// ```
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !STRIPPED_SYMBOLS.contains(ch))
        .map(|ch| if ch == SEPARATOR { ' ' } else { ch })
        .collect();

    let mut slug = String::with_capacity(cleaned.len());
    for word in cleaned.split_whitespace() {
        if !slug.is_empty() {
            slug.push(SEPARATOR);
        }
        slug.push_str(word);
    }

    slug.to_lowercase()
}
