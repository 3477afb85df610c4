//! Page Identity Normalizer.
//!
//! Maps raw page addresses to coarse cache keys: no protocol dependency, one
//! logical prefix for all universes, a closed set of forum sections, and no
//! query parameters for pages whose content does not depend on them.

use serde::{Deserialize, Serialize};

use crate::types::page::{Orientation, PageIdentity};
use crate::types::session::RealmId;

/// Longest scheme accepted in front of `://`.
const MAX_SCHEME_LEN: usize = 5;

pub const GAME_PREFIX: &str = "GAME/";
pub const CHAT_PREFIX: &str = "CHAT/";
pub const FORUM_PREFIX: &str = "FORUM/";
pub const PORTAL_PREFIX: &str = "PORTAL/";

/// Section labels a forum address collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForumSection {
    Index,
    InThread,
    InForum,
    Post,
    SearchResult,
    Search,
}

impl ForumSection {
    pub fn label(&self) -> &'static str {
        match self {
            ForumSection::Index => "INDEX",
            ForumSection::InThread => "IN_THREAD",
            ForumSection::InForum => "IN_FORUM",
            ForumSection::Post => "POST",
            ForumSection::SearchResult => "SEARCH_RESULT",
            ForumSection::Search => "SEARCH",
        }
    }

    /// Classifies a forum address by markers it contains.
    pub fn classify(address: &str) -> Self {
        if address.contains("showtopic=")
            || address.contains("act=ST")
            || address.contains("view=findpost")
        {
            ForumSection::InThread
        } else if address.contains("showforum=") || address.contains("act=SF") {
            ForumSection::InForum
        } else if address.contains("act=Post") {
            ForumSection::Post
        } else if address.contains("searchid=") {
            ForumSection::SearchResult
        } else if address.contains("act=Search") {
            ForumSection::Search
        } else {
            ForumSection::Index
        }
    }
}

/// Host and template catalog driving normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IdentityRules {
    pub game_hosts: Vec<String>,
    pub chat_host: String,
    pub forum_host: String,
    pub portal_host: String,
    /// Game paths (after the `GAME/` prefix) whose query parameters are dropped.
    pub parameter_insensitive_templates: Vec<String>,
    /// Query parameter that marks pagination anywhere.
    pub paging_parameter: String,
    /// Canonical paths whose scroll position is never restored.
    pub no_scroll_paths: Vec<String>,
}

impl Default for IdentityRules {
    fn default() -> Self {
        Self {
            game_hosts: RealmId::ALL.iter().map(|r| r.host().to_string()).collect(),
            chat_host: "chat.pardus.at".to_string(),
            forum_host: "forum.pardus.at".to_string(),
            portal_host: "www.pardus.at".to_string(),
            parameter_insensitive_templates: [
                "main.php",
                "overview",
                "messages_",
                "news.php",
                "ship_equipment.php",
                "bounties.php",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            paging_parameter: "page".to_string(),
            no_scroll_paths: [
                ForumSection::InThread,
                ForumSection::Post,
                ForumSection::SearchResult,
            ]
            .iter()
            .map(|section| format!("{}{}", FORUM_PREFIX, section.label()))
            .collect(),
        }
    }
}

/// Deterministic address normalizer.
#[derive(Debug, Clone, Default)]
pub struct PageIdentityNormalizer {
    rules: IdentityRules,
}

impl PageIdentityNormalizer {
    pub fn new(rules: IdentityRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &IdentityRules {
        &self.rules
    }

    /// Builds the cache key for an address, or `None` if it must not be cached.
    pub fn normalize(&self, raw: &str, orientation: Orientation) -> Option<PageIdentity> {
        self.canonical_path(raw).map(|canonical_path| PageIdentity {
            canonical_path,
            orientation,
        })
    }

    /// Orientation-independent part of the identity.
    pub fn canonical_path(&self, raw: &str) -> Option<String> {
        let (_, rest) = split_scheme(raw)?;
        let (host, path) = split_host(rest);
        let path = path.strip_prefix('/').unwrap_or(path);

        let mut strip_query = false;
        let mut canonical = if self.rules.game_hosts.iter().any(|h| h == host) {
            strip_query = self
                .rules
                .parameter_insensitive_templates
                .iter()
                .any(|template| path.starts_with(template.as_str()));
            format!("{}{}", GAME_PREFIX, path)
        } else if host == self.rules.chat_host {
            strip_query = true;
            format!("{}{}", CHAT_PREFIX, path)
        } else if host == self.rules.forum_host {
            format!("{}{}", FORUM_PREFIX, ForumSection::classify(rest).label())
        } else if host == self.rules.portal_host {
            format!("{}{}", PORTAL_PREFIX, path)
        } else {
            rest.to_string()
        };

        if has_query_parameter(&canonical, &self.rules.paging_parameter) {
            strip_query = true;
        }
        if strip_query {
            if let Some(pos) = canonical.find('?') {
                canonical.truncate(pos);
            }
        }
        Some(canonical)
    }

    /// Whether pages of this identity keep their scroll position to themselves.
    pub fn is_no_scroll(&self, identity: &PageIdentity) -> bool {
        self.rules
            .no_scroll_paths
            .iter()
            .any(|path| *path == identity.canonical_path)
    }
}

/// Splits `scheme://rest`, rejecting missing or overlong schemes.
pub fn split_scheme(address: &str) -> Option<(&str, &str)> {
    let pos = address.find("://")?;
    if pos > MAX_SCHEME_LEN {
        return None;
    }
    Some((&address[..pos], &address[pos + 3..]))
}

/// Host part of an absolute address.
pub fn host_of(address: &str) -> Option<&str> {
    let (_, rest) = split_scheme(address)?;
    Some(split_host(rest).0)
}

/// Universe an address belongs to, if it is served by a universe host.
pub fn realm_of(address: &str) -> Option<RealmId> {
    host_of(address).and_then(RealmId::from_host)
}

fn split_host(rest: &str) -> (&str, &str) {
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    (&rest[..end], &rest[end..])
}

fn has_query_parameter(address: &str, name: &str) -> bool {
    let Some(start) = address.find('?') else {
        return false;
    };
    let query = &address[start + 1..];
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .any(|pair| pair.split('=').next() == Some(name))
}
