//! Integration-level unit tests for the navigation policy predicates.

use rstest::rstest;

use pardus_shell::services::navigation_policy::*;
use pardus_shell::types::address::{
    BLANK, LANDING_HTTPS, LOGIN_FORM, LOGIN_FORM_HTTPS, LOGIN_SCREEN, LOGOUT_HTTPS,
    NEW_SESSION_HTTPS,
};

#[rstest]
#[case("https://orion.pardus.at/main.php")]
#[case("http://artemis.pardus.at/overview.php")]
#[case("https://forum.pardus.at/index.php?showtopic=3")]
#[case("https://chat.pardus.at/chat.php")]
#[case("https://static.pardus.at/img/std/foo.png")]
#[case("https://www.pardus.at/index.php?section=news")]
#[case(LOGIN_SCREEN)]
#[case("content://at.pardus.local/img/std/foo.png")]
#[case("javascript:scrollTo(0,0)")]
fn test_allowed_while_logged_in(#[case] address: &str) {
    assert!(is_navigation_allowed(address));
}

#[rstest]
#[case("https://example.com/")]
#[case("ftp://orion.pardus.at/main.php")]
#[case("https://orion.pardus.at.example.com/main.php")]
#[case(LOGIN_FORM)]
#[case(LOGIN_FORM_HTTPS)]
fn test_refused_while_logged_in(#[case] address: &str) {
    assert!(!is_navigation_allowed(address));
}

#[rstest]
#[case(LOGIN_SCREEN, true)]
#[case(BLANK, true)]
#[case("https://static.pardus.at/img/std/foo.png", true)]
#[case(LANDING_HTTPS, true)]
#[case(NEW_SESSION_HTTPS, true)]
#[case("https://www.pardus.at/index.php?section=news", true)]
#[case(LOGOUT_HTTPS, false)]
#[case(LOGIN_FORM, false)]
#[case(LOGIN_FORM_HTTPS, false)]
#[case("https://www.pardus.at/index.php?section=account_settings", false)]
#[case("https://orion.pardus.at/main.php", false)]
#[case("https://forum.pardus.at/", false)]
#[case("https://example.com/", false)]
fn test_logged_out_rules(#[case] address: &str, #[case] allowed: bool) {
    assert_eq!(is_navigation_allowed_while_logged_out(address), allowed);
    assert_eq!(is_navigation_allowed_for(address, false), allowed);
}

/// The game's own login form is never shown, whatever the state.
#[test]
fn test_online_login_form_refused_in_both_states() {
    for address in [LOGIN_FORM, LOGIN_FORM_HTTPS] {
        assert!(!is_navigation_allowed_for(address, true));
        assert!(!is_navigation_allowed_for(address, false));
        assert!(is_online_login_form(address));
    }
}

#[test]
fn test_tracking_skipped() {
    assert!(is_tracking_skipped(None));
    assert!(is_tracking_skipped(Some("https://orion.pardus.at/game.php")));
    assert!(!is_tracking_skipped(Some("https://orion.pardus.at/game.php?x=1")));
    assert!(!is_tracking_skipped(Some("https://orion.pardus.at/main.php")));
}

#[test]
fn test_anchor_addresses() {
    assert!(is_anchor_address("https://forum.pardus.at/index.php?showtopic=3#entry5"));
    assert!(is_anchor_address("https://forum.pardus.at/index.php?showtopic=3&view=getnewpost"));
    assert!(!is_anchor_address("https://forum.pardus.at/index.php?showtopic=3"));
}

#[test]
fn test_session_landmarks() {
    assert!(is_authenticated_landing(&format!("{}&universe=Orion", LANDING_HTTPS)));
    assert!(is_logout_confirmation(LOGOUT_HTTPS));
    assert!(is_public_landing("https://www.pardus.at/index.php"));
    assert!(!is_public_landing("https://www.pardus.at/index.php?section=news"));
    assert!(is_login_post("https://www.pardus.at/index.php?section=login&mobile"));
    assert!(is_login_surface(LOGIN_SCREEN));
}
