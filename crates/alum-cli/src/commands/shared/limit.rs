/// Page size with precedence: global flag -> configured default.
/// Zero is allowed through; it yields an empty page.
#[must_use]
pub fn effective_limit(global: Option<usize>, fallback: usize) -> usize {
    global.unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn flag_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 20), 5);
    }

    #[test]
    fn fallback_used_when_unset() {
        assert_eq!(effective_limit(None, 20), 20);
    }
}
