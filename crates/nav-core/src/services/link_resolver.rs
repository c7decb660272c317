// ============================================================================
// Nav Core - Link Resolver
// File: crates/nav-core/src/services/link_resolver.rs
// ============================================================================
//! Turns a stored or submitted link into a URL plus a validity verdict.
//!
//! Each [`LinkType`] has one [`LinkStrategy`]; [`strategy_for`] is the only
//! place that maps a type to its strategy. Lookup failures never escape: they
//! become [`LinkIssue::Error`] so a broken content table cannot take the read
//! path down with it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{trace, warn};

use nav_shared::RecordId;

use crate::domain::{
    ContentKind, FlatItem, LinkIssue, LinkRequest, LinkState, LinkType, RenderedItem, ResolvedLink,
};
use crate::error::DomainError;
use crate::repositories::LinkLookup;

/// System routes that menu items may point at, with their paths.
pub const SYSTEM_ROUTES: [(&str, &str); 7] = [
    ("home", "/"),
    ("admin", "/admin"),
    ("login", "/login"),
    ("register", "/register"),
    ("logout", "/logout"),
    ("lost-password", "/lost-password"),
    ("search", "/search"),
];

/// Resolution for one link type
#[async_trait]
pub trait LinkStrategy: Send + Sync {
    async fn resolve(&self, request: &LinkRequest, lookup: &dyn LinkLookup) -> ResolvedLink;
}

/// Literal URL typed by the administrator
pub struct CustomLink;

/// Reference to a row of a content table
pub struct ContentLink {
    pub kind: ContentKind,
    pub require_published: bool,
}

/// Key into [`SYSTEM_ROUTES`]
pub struct RouteLink;

static CUSTOM: CustomLink = CustomLink;
static PAGE: ContentLink = ContentLink { kind: ContentKind::Page, require_published: true };
static POST: ContentLink = ContentLink { kind: ContentKind::Post, require_published: true };
static CATEGORY: ContentLink = ContentLink { kind: ContentKind::Category, require_published: false };
static ROUTE: RouteLink = RouteLink;

pub fn strategy_for(link_type: LinkType) -> &'static dyn LinkStrategy {
    match link_type {
        LinkType::Custom => &CUSTOM,
        LinkType::Page => &PAGE,
        LinkType::Post => &POST,
        LinkType::Category => &CATEGORY,
        LinkType::Route => &ROUTE,
    }
}

pub fn route_path(key: &str) -> Option<&'static str> {
    SYSTEM_ROUTES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, path)| *path)
}

#[async_trait]
impl LinkStrategy for CustomLink {
    async fn resolve(&self, request: &LinkRequest, _lookup: &dyn LinkLookup) -> ResolvedLink {
        let url = request.url.trim();
        if url.is_empty() {
            return ResolvedLink::invalid(request, String::new(), LinkIssue::CustomEmpty);
        }
        ResolvedLink::valid(LinkType::Custom, String::new(), url.to_string())
    }
}

#[async_trait]
impl LinkStrategy for ContentLink {
    async fn resolve(&self, request: &LinkRequest, lookup: &dyn LinkLookup) -> ResolvedLink {
        let raw = request.reference.trim();
        let Some(id) = raw.parse::<RecordId>().ok().filter(|id| *id > 0) else {
            return ResolvedLink::invalid(request, raw.to_string(), LinkIssue::InvalidReference);
        };
        let reference = id.to_string();

        match lookup.exists(self.kind, id).await {
            Ok(true) => {}
            Ok(false) => return ResolvedLink::invalid(request, reference, LinkIssue::Missing),
            Err(e) => return lookup_failed(request, reference, self.kind, e),
        }

        if self.require_published {
            match lookup.is_published(self.kind, id).await {
                Ok(true) => {}
                Ok(false) => return ResolvedLink::invalid(request, reference, LinkIssue::Unpublished),
                Err(e) => return lookup_failed(request, reference, self.kind, e),
            }
        }

        match lookup.canonical_url(self.kind, &reference).await {
            Ok(url) => ResolvedLink::valid(request.link_type, reference, url)
                .with_meta("content_type", self.kind.as_str()),
            Err(e) => lookup_failed(request, reference, self.kind, e),
        }
    }
}

#[async_trait]
impl LinkStrategy for RouteLink {
    async fn resolve(&self, request: &LinkRequest, _lookup: &dyn LinkLookup) -> ResolvedLink {
        let key = request.reference.trim().to_ascii_lowercase();
        match route_path(&key) {
            Some(path) => ResolvedLink::valid(LinkType::Route, key.clone(), path.to_string())
                .with_meta("route", key),
            None => ResolvedLink::invalid(request, key, LinkIssue::UnknownRoute),
        }
    }
}

fn lookup_failed(request: &LinkRequest, reference: String, kind: ContentKind, error: DomainError) -> ResolvedLink {
    warn!("Link lookup failed for {} {}: {}", kind.as_str(), reference, error);
    ResolvedLink::invalid(request, reference, LinkIssue::Error)
}

/// Entry point used by both the write path (hard rejection) and the read
/// path (soft, flagged rendering).
#[derive(Clone)]
pub struct LinkResolver {
    lookup: Arc<dyn LinkLookup>,
}

impl LinkResolver {
    pub fn new(lookup: Arc<dyn LinkLookup>) -> Self {
        Self { lookup }
    }

    pub async fn resolve(&self, request: &LinkRequest) -> ResolvedLink {
        let state = LinkState::default().begin();
        trace!(
            state = ?state,
            link_type = %request.link_type,
            reference = %request.reference,
            "resolving link"
        );

        let resolved = strategy_for(request.link_type)
            .resolve(request, self.lookup.as_ref())
            .await;

        let state = state.settle(&resolved);
        trace!(state = ?state, url = %resolved.url, "link resolved");
        resolved
    }

    /// Write-time check: any invalid verdict rejects the mutation.
    pub async fn require_valid(&self, request: &LinkRequest) -> Result<ResolvedLink, DomainError> {
        let resolved = self.resolve(request).await;
        match resolved.reason {
            Some(reason) if !resolved.valid => {
                warn!(
                    "Rejected {} link (reference {:?}): {}",
                    request.link_type, request.reference, reason
                );
                Err(DomainError::InvalidLink { reason })
            }
            _ => Ok(resolved),
        }
    }

    /// Read-time resolution of a flattened listing; invalid links stay in
    /// place, flagged with their reason.
    pub async fn render(&self, flat: Vec<FlatItem>) -> Vec<RenderedItem> {
        let mut rendered = Vec::with_capacity(flat.len());
        for entry in flat {
            let link = self.resolve(&entry.item.link_request()).await;
            rendered.push(RenderedItem::new(entry, link));
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockLinkLookup;

    fn resolver(lookup: MockLinkLookup) -> LinkResolver {
        LinkResolver::new(Arc::new(lookup))
    }

    fn published_page_lookup() -> MockLinkLookup {
        let mut lookup = MockLinkLookup::new();
        lookup.expect_exists().returning(|_, id| Ok(id == 7));
        lookup.expect_is_published().returning(|_, _| Ok(true));
        lookup
            .expect_canonical_url()
            .returning(|kind, id| Ok(format!("/{}/{}", kind.as_str(), id)));
        lookup
    }

    #[tokio::test]
    async fn test_custom_with_url_is_valid() {
        let resolved = resolver(MockLinkLookup::new())
            .resolve(&LinkRequest::new(LinkType::Custom, "ignored", " /x "))
            .await;
        assert!(resolved.valid);
        assert_eq!(resolved.url, "/x");
        assert_eq!(resolved.reference, "");
        assert_eq!(resolved.reason, None);
    }

    #[tokio::test]
    async fn test_custom_without_url_is_invalid() {
        let resolved = resolver(MockLinkLookup::new())
            .resolve(&LinkRequest::custom("   "))
            .await;
        assert!(!resolved.valid);
        assert_eq!(resolved.reason, Some(LinkIssue::CustomEmpty));
    }

    #[tokio::test]
    async fn test_page_resolves_to_canonical_url() {
        let resolved = resolver(published_page_lookup())
            .resolve(&LinkRequest::new(LinkType::Page, " 7 ", ""))
            .await;
        assert!(resolved.valid);
        assert_eq!(resolved.url, "/page/7");
        assert_eq!(resolved.reference, "7");
        assert_eq!(resolved.meta.get("content_type").and_then(|v| v.as_str()), Some("page"));
    }

    #[tokio::test]
    async fn test_deleted_page_is_missing() {
        let resolved = resolver(published_page_lookup())
            .resolve(&LinkRequest::new(LinkType::Page, "8", "/page/8"))
            .await;
        assert!(!resolved.valid);
        assert_eq!(resolved.reason, Some(LinkIssue::Missing));
        assert_eq!(resolved.url, "/page/8");
    }

    #[tokio::test]
    async fn test_unpublished_post() {
        let mut lookup = MockLinkLookup::new();
        lookup.expect_exists().returning(|_, _| Ok(true));
        lookup.expect_is_published().returning(|_, _| Ok(false));
        let resolved = resolver(lookup)
            .resolve(&LinkRequest::new(LinkType::Post, "3", ""))
            .await;
        assert_eq!(resolved.reason, Some(LinkIssue::Unpublished));
    }

    #[tokio::test]
    async fn test_category_ignores_publication() {
        let mut lookup = MockLinkLookup::new();
        lookup.expect_exists().returning(|_, _| Ok(true));
        lookup.expect_is_published().never();
        lookup
            .expect_canonical_url()
            .returning(|_, id| Ok(format!("/category/{id}")));
        let resolved = resolver(lookup)
            .resolve(&LinkRequest::new(LinkType::Category, "12", ""))
            .await;
        assert!(resolved.valid);
        assert_eq!(resolved.url, "/category/12");
    }

    #[tokio::test]
    async fn test_non_numeric_reference() {
        let mut lookup = MockLinkLookup::new();
        lookup.expect_exists().never();
        let resolver = resolver(lookup);
        for reference in ["", "abc", "0", "-4"] {
            let resolved = resolver
                .resolve(&LinkRequest::new(LinkType::Page, reference, ""))
                .await;
            assert_eq!(resolved.reason, Some(LinkIssue::InvalidReference), "{reference:?}");
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_maps_to_error() {
        let mut lookup = MockLinkLookup::new();
        lookup
            .expect_exists()
            .returning(|_, _| Err(DomainError::DatabaseError("connection reset".into())));
        let resolved = resolver(lookup)
            .resolve(&LinkRequest::new(LinkType::Post, "5", "/old-post"))
            .await;
        assert!(!resolved.valid);
        assert_eq!(resolved.reason, Some(LinkIssue::Error));
        assert_eq!(resolved.url, "/old-post");
    }

    #[tokio::test]
    async fn test_routes_whitelist() {
        let resolver = resolver(MockLinkLookup::new());
        let home = resolver.resolve(&LinkRequest::new(LinkType::Route, "Home", "")).await;
        assert!(home.valid);
        assert_eq!(home.url, "/");
        assert_eq!(home.reference, "home");

        let lost = resolver
            .resolve(&LinkRequest::new(LinkType::Route, "lost-password", ""))
            .await;
        assert_eq!(lost.url, "/lost-password");

        let unknown = resolver.resolve(&LinkRequest::new(LinkType::Route, "checkout", "")).await;
        assert_eq!(unknown.reason, Some(LinkIssue::UnknownRoute));
    }

    #[tokio::test]
    async fn test_require_valid_rejects() {
        let err = resolver(published_page_lookup())
            .require_valid(&LinkRequest::new(LinkType::Page, "99", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidLink { reason: LinkIssue::Missing }));
    }
}
