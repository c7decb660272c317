// ============================================================================
// Nav Core - Link Types
// File: crates/nav-core/src/domain/link.rs
// Description: Menu item destinations and their resolution verdicts
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a menu item points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Custom,
    Page,
    Post,
    Category,
    Route,
}

impl LinkType {
    pub const ALL: [LinkType; 5] = [
        LinkType::Custom,
        LinkType::Page,
        LinkType::Post,
        LinkType::Category,
        LinkType::Route,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Custom => "custom",
            LinkType::Page => "page",
            LinkType::Post => "post",
            LinkType::Category => "category",
            LinkType::Route => "route",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "custom" => Some(LinkType::Custom),
            "page" => Some(LinkType::Page),
            "post" => Some(LinkType::Post),
            "category" => Some(LinkType::Category),
            "route" => Some(LinkType::Route),
            _ => None,
        }
    }

    /// Content table behind the link, if any.
    pub fn content_kind(&self) -> Option<ContentKind> {
        match self {
            LinkType::Page => Some(ContentKind::Page),
            LinkType::Post => Some(ContentKind::Post),
            LinkType::Category => Some(ContentKind::Category),
            LinkType::Custom | LinkType::Route => None,
        }
    }
}

impl Default for LinkType {
    fn default() -> Self {
        LinkType::Custom
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content that menu items can reference by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Page,
    Post,
    Category,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Page => "page",
            ContentKind::Post => "post",
            ContentKind::Category => "category",
        }
    }
}

/// Why a link failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkIssue {
    CustomEmpty,
    InvalidReference,
    Missing,
    Unpublished,
    UnknownRoute,
    Error,
}

impl LinkIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkIssue::CustomEmpty => "custom-empty",
            LinkIssue::InvalidReference => "invalid-reference",
            LinkIssue::Missing => "missing",
            LinkIssue::Unpublished => "unpublished",
            LinkIssue::UnknownRoute => "unknown-route",
            LinkIssue::Error => "error",
        }
    }

    /// Human readable message shown next to the form field.
    pub fn message(&self) -> &'static str {
        match self {
            LinkIssue::CustomEmpty => "A custom link needs a URL",
            LinkIssue::InvalidReference => "The selected reference is not valid",
            LinkIssue::Missing => "The linked content no longer exists",
            LinkIssue::Unpublished => "The linked content is not published",
            LinkIssue::UnknownRoute => "Unknown system route",
            LinkIssue::Error => "The link could not be checked",
        }
    }
}

impl fmt::Display for LinkIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination as submitted or as stored on a menu item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkRequest {
    pub link_type: LinkType,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub url: String,
}

impl LinkRequest {
    pub fn new(link_type: LinkType, reference: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            link_type,
            reference: reference.into(),
            url: url.into(),
        }
    }

    pub fn custom(url: impl Into<String>) -> Self {
        Self::new(LinkType::Custom, "", url)
    }
}

/// Outcome of resolving a [`LinkRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLink {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub reference: String,
    pub url: String,
    pub valid: bool,
    pub reason: Option<LinkIssue>,
    pub meta: Map<String, Value>,
}

impl ResolvedLink {
    pub fn valid(link_type: LinkType, reference: String, url: String) -> Self {
        Self {
            link_type,
            reference,
            url,
            valid: true,
            reason: None,
            meta: Map::new(),
        }
    }

    /// Invalid verdict; keeps whatever url the request carried so stale
    /// items still render.
    pub fn invalid(request: &LinkRequest, reference: String, reason: LinkIssue) -> Self {
        Self {
            link_type: request.link_type,
            reference,
            url: request.url.trim().to_string(),
            valid: false,
            reason: Some(reason),
            meta: Map::new(),
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.meta.insert(key.to_string(), value.into());
        self
    }

    pub fn state(&self) -> LinkState {
        match self.reason {
            Some(reason) if !self.valid => LinkState::Invalid(reason),
            _ => LinkState::Valid,
        }
    }
}

/// Per-read resolution state of an item's link; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Unresolved,
    Resolving,
    Valid,
    Invalid(LinkIssue),
}

impl LinkState {
    pub fn is_settled(&self) -> bool {
        matches!(self, LinkState::Valid | LinkState::Invalid(_))
    }

    /// `unresolved -> resolving`; any other state is left as is.
    pub fn begin(self) -> Self {
        match self {
            LinkState::Unresolved => LinkState::Resolving,
            other => other,
        }
    }

    /// `resolving -> valid | invalid(reason)` from the strategy's verdict.
    pub fn settle(self, resolved: &ResolvedLink) -> Self {
        match self {
            LinkState::Resolving => resolved.state(),
            other => other,
        }
    }
}

impl Default for LinkState {
    fn default() -> Self {
        LinkState::Unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_parsing() {
        assert_eq!(LinkType::from_str(" Page "), Some(LinkType::Page));
        assert_eq!(LinkType::from_str("route"), Some(LinkType::Route));
        assert_eq!(LinkType::from_str("product"), None);
        for link_type in LinkType::ALL {
            assert_eq!(LinkType::from_str(link_type.as_str()), Some(link_type));
        }
    }

    #[test]
    fn test_issue_serializes_kebab_case() {
        let json = serde_json::to_string(&LinkIssue::InvalidReference).unwrap();
        assert_eq!(json, "\"invalid-reference\"");
        assert_eq!(LinkIssue::UnknownRoute.to_string(), "unknown-route");
    }

    #[test]
    fn test_state_follows_verdict() {
        let request = LinkRequest::new(LinkType::Page, "9", "/old");
        let invalid = ResolvedLink::invalid(&request, "9".into(), LinkIssue::Missing);
        assert_eq!(invalid.state(), LinkState::Invalid(LinkIssue::Missing));
        assert_eq!(invalid.url, "/old");

        let valid = ResolvedLink::valid(LinkType::Custom, String::new(), "/x".into());
        assert_eq!(valid.state(), LinkState::Valid);
        assert!(valid.state().is_settled());
        assert!(!LinkState::Resolving.is_settled());
    }

    #[test]
    fn test_state_transitions() {
        let request = LinkRequest::new(LinkType::Post, "3", "");
        let unpublished = ResolvedLink::invalid(&request, "3".into(), LinkIssue::Unpublished);

        let state = LinkState::default();
        assert_eq!(state, LinkState::Unresolved);
        let state = state.begin();
        assert_eq!(state, LinkState::Resolving);
        assert_eq!(state.settle(&unpublished), LinkState::Invalid(LinkIssue::Unpublished));

        // only a resolving link settles, and only an unresolved one begins
        assert_eq!(LinkState::Unresolved.settle(&unpublished), LinkState::Unresolved);
        assert_eq!(LinkState::Valid.begin(), LinkState::Valid);
    }
}
