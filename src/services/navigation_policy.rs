//! Navigation Policy.
//!
//! Pure predicates deciding whether an address may be shown, whether it is
//! local, and whether it takes part in page-state tracking. The renderer is
//! shared between trusted universe pages and arbitrary linked content, so every
//! navigation start is checked again here, not only clicked links.

use crate::services::page_identity::split_scheme;
use crate::types::address::{
    ACCOUNT_SECTION_MARKER, BLANK, CHAT_HOST, FORUM_HOST, GAME_FRAME, LANDING, LANDING_HTTPS,
    LOCAL_ASSET_SERVER, LOCAL_CONTENT_PREFIX, LOGIN_FORM, LOGIN_FORM_HTTPS, LOGIN_POST,
    LOGIN_POST_HTTPS, LOGIN_SCREEN, LOGOUT, LOGOUT_HTTPS, NEW_SESSION, NEW_SESSION_HTTPS,
    PORTAL_BARE_HOST, PORTAL_HOST, PUBLIC_LANDING, PUBLIC_LANDING_HTTPS, SCRIPT_PREFIX,
    STATIC_HOST,
};
use crate::types::session::RealmId;

/// Hosts of the game family besides the universes.
const FAMILY_HOSTS: &[&str] = &[PORTAL_HOST, PORTAL_BARE_HOST, CHAT_HOST, FORUM_HOST, STATIC_HOST];

/// Markers of addresses that jump to a post inside a thread.
const ANCHOR_MARKERS: &[&str] = &["#", "view=getnewpost", "view=findpost"];

/// Host of a plain web address (http or https only).
fn web_host(address: &str) -> Option<&str> {
    let (scheme, rest) = split_scheme(address)?;
    if scheme != "http" && scheme != "https" {
        return None;
    }
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

pub fn is_managed_realm_address(address: &str) -> bool {
    web_host(address).and_then(RealmId::from_host).is_some()
}

pub fn is_known_family_address(address: &str) -> bool {
    is_managed_realm_address(address)
        || web_host(address).is_some_and(|host| FAMILY_HOSTS.contains(&host))
}

pub fn is_static_asset_address(address: &str) -> bool {
    web_host(address) == Some(STATIC_HOST)
}

pub fn is_portal_address(address: &str) -> bool {
    web_host(address) == Some(PORTAL_HOST)
}

/// Bundled screens, the local asset server and script pseudo-addresses.
pub fn is_local_address(address: &str) -> bool {
    address.starts_with(LOCAL_CONTENT_PREFIX)
        || address.starts_with(LOCAL_ASSET_SERVER)
        || is_script_address(address)
}

pub fn is_script_address(address: &str) -> bool {
    address.starts_with(SCRIPT_PREFIX)
}

/// The game's own login form, always replaced by the local login surface.
pub fn is_online_login_form(address: &str) -> bool {
    address == LOGIN_FORM || address == LOGIN_FORM_HTTPS
}

pub fn is_navigation_allowed(address: &str) -> bool {
    if is_online_login_form(address) {
        return false;
    }
    is_known_family_address(address) || is_local_address(address)
}

pub fn is_navigation_allowed_while_logged_out(address: &str) -> bool {
    if is_online_login_form(address) {
        return false;
    }
    is_local_address(address)
        || address == BLANK
        || is_static_asset_address(address)
        || is_authenticated_landing(address)
        || (is_portal_address(address) && !address.contains(ACCOUNT_SECTION_MARKER))
}

/// Applies the rule set matching the authentication state.
pub fn is_navigation_allowed_for(address: &str, authenticated: bool) -> bool {
    if authenticated {
        is_navigation_allowed(address)
    } else {
        is_navigation_allowed_while_logged_out(address)
    }
}

/// Missing addresses and the bare game canvas take no part in tracking.
pub fn is_tracking_skipped(address: Option<&str>) -> bool {
    match address {
        None => true,
        Some(address) => is_bare_frame(address, GAME_FRAME),
    }
}

/// A universe frame page requested without parameters.
pub fn is_bare_frame(address: &str, frame: &str) -> bool {
    address
        .strip_suffix(frame)
        .is_some_and(|head| head.ends_with(".pardus.at/"))
}

/// Landing reached right after a successful login (or character creation).
pub fn is_authenticated_landing(address: &str) -> bool {
    [LANDING, LANDING_HTTPS, NEW_SESSION, NEW_SESSION_HTTPS]
        .iter()
        .any(|prefix| address.starts_with(prefix))
}

pub fn is_logout_confirmation(address: &str) -> bool {
    address == LOGOUT || address == LOGOUT_HTTPS
}

pub fn is_public_landing(address: &str) -> bool {
    address == PUBLIC_LANDING || address == PUBLIC_LANDING_HTTPS
}

pub fn is_login_post(address: &str) -> bool {
    address == LOGIN_POST || address == LOGIN_POST_HTTPS
}

pub fn is_login_surface(address: &str) -> bool {
    address == LOGIN_SCREEN
}

/// Pages that position themselves through an in-page anchor.
pub fn is_anchor_address(address: &str) -> bool {
    ANCHOR_MARKERS.iter().any(|marker| address.contains(marker))
}
