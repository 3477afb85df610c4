//! Property-based tests for the PageIdentityNormalizer.
//!
//! These tests verify that normalization is total and deterministic for
//! arbitrary input, and that the universe host never leaks into a key.

use pardus_shell::services::page_identity::{PageIdentityNormalizer, GAME_PREFIX};
use pardus_shell::types::page::Orientation;
use pardus_shell::types::session::RealmId;
use proptest::prelude::*;

fn arb_orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Portrait), Just(Orientation::Landscape)]
}

fn arb_realm() -> impl Strategy<Value = RealmId> {
    prop_oneof![
        Just(RealmId::Artemis),
        Just(RealmId::Orion),
        Just(RealmId::Pegasus),
    ]
}

fn arb_scheme() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("http"), Just("https")]
}

proptest! {
    /// Any string normalizes without panicking, and twice to the same key.
    #[test]
    fn normalize_is_total_and_deterministic(raw in ".*", orientation in arb_orientation()) {
        let n = PageIdentityNormalizer::default();
        let first = n.normalize(&raw, orientation);
        let second = n.normalize(&raw, orientation);
        prop_assert_eq!(first.clone(), second);
        if let Some(identity) = first {
            prop_assert_eq!(identity.orientation, orientation);
        }
    }

    #[test]
    fn universe_pages_share_keys(
        a in arb_realm(),
        b in arb_realm(),
        scheme_a in arb_scheme(),
        scheme_b in arb_scheme(),
        page in "[a-z_]{1,16}\\.php(\\?[a-z]{1,5}=[0-9]{1,3})?",
        orientation in arb_orientation(),
    ) {
        let n = PageIdentityNormalizer::default();
        let left = n.normalize(&format!("{}://{}/{}", scheme_a, a.host(), page), orientation);
        let right = n.normalize(&format!("{}://{}/{}", scheme_b, b.host(), page), orientation);
        prop_assert!(left.is_some());
        prop_assert_eq!(left.clone(), right);
        let key = left.unwrap().canonical_path;
        prop_assert!(key.starts_with(GAME_PREFIX));
        prop_assert!(!key.contains("pardus.at"));
    }

    /// Pagination never survives in a key.
    #[test]
    fn paging_parameter_is_dropped(
        realm in arb_realm(),
        page in "[a-z_]{1,16}\\.php",
        number in 0u32..500,
    ) {
        let n = PageIdentityNormalizer::default();
        let key = n
            .canonical_path(&format!("https://{}/{}?page={}", realm.host(), page, number))
            .unwrap();
        prop_assert!(!key.contains('?'));
    }

    /// Addresses without a `scheme://` part never yield a key.
    #[test]
    fn schemeless_addresses_are_rejected(raw in "[^:]*") {
        prop_assert!(PageIdentityNormalizer::default().canonical_path(&raw).is_none());
    }
}
