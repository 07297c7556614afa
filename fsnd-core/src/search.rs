//! Substring search helpers for `ILIKE` queries

/// Build an `ILIKE ... ESCAPE '\'` pattern matching `term` anywhere.
///
/// `%`, `_` and `\` in the term match literally.
///
/// ```
/// use fsnd_core::search::contains_pattern;
///
/// assert_eq!(contains_pattern("title"), "%title%");
/// assert_eq!(contains_pattern("50%"), "%50\\%%");
/// ```
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }
}
