//! Canonical public URLs of linkable content

use nav_core::domain::ContentKind;

/// Path prefix of each content type on the public site.
pub fn content_prefix(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Page => "",
        ContentKind::Post => "/blog",
        ContentKind::Category => "/category",
    }
}

pub fn canonical_url(base_url: &str, kind: ContentKind, slug: &str) -> String {
    format!("{}{}/{}", base_url.trim_end_matches('/'), content_prefix(kind), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_urls() {
        assert_eq!(canonical_url("", ContentKind::Page, "about"), "/about");
        assert_eq!(canonical_url("https://shop.example/", ContentKind::Post, "launch"), "https://shop.example/blog/launch");
        assert_eq!(canonical_url("", ContentKind::Category, "shoes"), "/category/shoes");
    }
}
