//! Property-based tests for saving and restoring page states.
//!
//! These tests verify that whatever the store saves for a page can be read
//! back, through memory and through the persisted file, and that pages which
//! keep their own scroll position only ever yield the no-scroll sentinel.

use pardus_shell::managers::page_state_manager::{PageStateStore, PageStateStoreTrait};
use pardus_shell::services::page_identity::PageIdentityNormalizer;
use pardus_shell::types::navigation::ViewportReadout;
use pardus_shell::types::page::Orientation;
use proptest::prelude::*;
use tempfile::TempDir;

fn arb_orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Portrait), Just(Orientation::Landscape)]
}

fn arb_viewport() -> impl Strategy<Value = ViewportReadout> {
    (1u32..400, 0i32..5000, 0i32..20000, 1i32..5000, 1i32..20000).prop_map(
        |(percent, scroll_x, scroll_y, range_x, range_y)| ViewportReadout {
            scale: percent as f32 / 100.0,
            scroll_x,
            scroll_y,
            range_x,
            range_y,
        },
    )
}

fn arb_game_page() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}\\.php".prop_map(|page| format!("https://orion.pardus.at/{}", page))
}

fn arb_thread() -> impl Strategy<Value = String> {
    (1u32..100000).prop_map(|id| format!("https://forum.pardus.at/index.php?showtopic={}", id))
}

proptest! {
    #[test]
    fn saved_state_reads_back(
        address in arb_game_page(),
        orientation in arb_orientation(),
        viewport in arb_viewport(),
    ) {
        prop_assume!(address != "https://orion.pardus.at/game.php");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page_state.json");
        let mut store = PageStateStore::open(&path, PageIdentityNormalizer::default());

        prop_assert!(store.save(Some(&address), orientation, viewport));
        let state = store.get(&address, orientation).unwrap();
        prop_assert_eq!((state.scroll_x, state.scroll_y), (viewport.scroll_x, viewport.scroll_y));
        prop_assert_eq!((state.total_x, state.total_y), (viewport.range_x, viewport.range_y));

        store.persist().unwrap();
        let reopened = PageStateStore::open(&path, PageIdentityNormalizer::default());
        prop_assert_eq!(reopened.get(&address, orientation), Some(state));
    }

    #[test]
    fn no_scroll_pages_only_store_sentinel(
        address in arb_thread(),
        orientation in arb_orientation(),
        viewport in arb_viewport(),
    ) {
        let dir = TempDir::new().unwrap();
        let mut store = PageStateStore::open(dir.path().join("page_state.json"), PageIdentityNormalizer::default());

        store.save(Some(&address), orientation, viewport);

        let state = store.get(&address, orientation).unwrap();
        prop_assert!(state.is_no_scroll());
        prop_assert_eq!(state.scale, viewport.scale);
    }
}
