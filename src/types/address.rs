//! Address catalog of the game and of the shell's bundled screens.

use super::session::RealmId;

// Local pages bundled with the shell
pub const LOCAL_CONTENT_PREFIX: &str = "file:///android_asset/";
pub const LOGIN_SCREEN: &str = "file:///android_asset/login.html";
pub const SETTINGS_SCREEN: &str = "file:///android_asset/settings.html";
pub const ASSET_PACK_SCREEN: &str = "file:///android_asset/img.html";
/// Endpoint the local asset server exposes downloaded image packs under.
pub const LOCAL_ASSET_SERVER: &str = "content://at.pardus.local";
pub const SCRIPT_PREFIX: &str = "javascript:";
pub const BLANK: &str = "about:blank";

// Portal pages
pub const PORTAL_HOST: &str = "www.pardus.at";
pub const PORTAL_BARE_HOST: &str = "pardus.at";
pub const CHAT_HOST: &str = "chat.pardus.at";
pub const FORUM_HOST: &str = "forum.pardus.at";
pub const STATIC_HOST: &str = "static.pardus.at";

pub const LOGIN_FORM: &str = "http://www.pardus.at/index.php?section=login";
pub const LOGIN_FORM_HTTPS: &str = "https://www.pardus.at/index.php?section=login";
/// Target of the login POST; only finishes loading when the login failed.
pub const LOGIN_POST: &str = "http://www.pardus.at/index.php?section=login&mobile";
pub const LOGIN_POST_HTTPS: &str = "https://www.pardus.at/index.php?section=login&mobile";
pub const LANDING: &str = "http://www.pardus.at/index.php?section=account_play";
pub const LANDING_HTTPS: &str = "https://www.pardus.at/index.php?section=account_play";
pub const NEW_SESSION: &str = "http://www.pardus.at/index.php?section=account_newchar";
pub const NEW_SESSION_HTTPS: &str = "https://www.pardus.at/index.php?section=account_newchar";
pub const LOGOUT: &str = "http://www.pardus.at/index.php?section=account_logout";
pub const LOGOUT_HTTPS: &str = "https://www.pardus.at/index.php?section=account_logout";
pub const PUBLIC_LANDING: &str = "http://www.pardus.at/index.php";
pub const PUBLIC_LANDING_HTTPS: &str = "https://www.pardus.at/index.php";
/// Marks portal pages that manage the account and require a login.
pub const ACCOUNT_SECTION_MARKER: &str = "/index.php?section=account_";

// Universe pages (relative)
pub const NAV_PAGE: &str = "main.php";
pub const GAME_FRAME: &str = "game.php";
pub const MSG_FRAME: &str = "msgframe.php";
pub const BULLETIN_BOARD_PAGE: &str = "bulletin_board.php";
pub const BULLETIN_BOARD_ACCEPT_FRAME: &str = "bulletin_board_accept.php";
pub const MESSAGE_LIST_PAGES: &[&str] = &[
    "messages_private.php",
    "messages_alliance.php",
    "overview_tl_res.php",
    "overview_tl_eq.php",
    "overview_missions_log.php",
    "overview_combat_log.php",
    "overview_payment_log.php",
];

/// Absolute address of a page inside a universe.
pub fn universe_url(realm: RealmId, page: &str) -> String {
    format!("https://{}/{}", realm.host(), page)
}

/// Landing address that enters the given universe.
pub fn enter_universe_url(realm: RealmId) -> String {
    format!("{}&universe={}", LANDING_HTTPS, capitalize(realm.as_str()))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
