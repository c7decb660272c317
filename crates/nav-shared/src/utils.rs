//! Utility functions

/// Trimmed copy of `value`, or `None` when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Placement slots compare case-insensitively.
pub fn normalize_location(location: Option<&str>) -> Option<String> {
    non_blank(location).map(|l| l.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  hi ")), Some("hi".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_normalize_location() {
        assert_eq!(normalize_location(Some(" Primary ")), Some("primary".to_string()));
        assert_eq!(normalize_location(Some("")), None);
    }
}
