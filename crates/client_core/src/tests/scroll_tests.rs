use super::*;

#[test]
fn scroll_sets_flag_only_past_the_threshold() {
    let mut store = Store::default();
    assert!(!handle_scroll(&mut store, 20.0, DEFAULT_SCROLL_THRESHOLD_PX));
    assert!(!store.get().scrolled);

    assert!(handle_scroll(&mut store, 20.5, DEFAULT_SCROLL_THRESHOLD_PX));
    assert!(store.get().scrolled);

    // Further scrolling past the threshold is suppressed as a no-op.
    let revision = store.revision();
    assert!(!handle_scroll(&mut store, 300.0, DEFAULT_SCROLL_THRESHOLD_PX));
    assert_eq!(store.revision(), revision);

    assert!(handle_scroll(&mut store, 0.0, DEFAULT_SCROLL_THRESHOLD_PX));
    assert!(!store.get().scrolled);
}

#[test]
fn restore_clears_flag_once_per_entered() {
    let mut store = Store::default();
    store.dispatch(Action::SetScrolled(true));
    let mut restore = ScrollRestore::new();

    assert!(!restore.observe(Phase::Entering, &mut store));
    assert!(store.get().scrolled);

    assert!(restore.observe(Phase::Entered, &mut store));
    assert!(!store.get().scrolled);

    store.dispatch(Action::SetScrolled(true));
    assert!(!restore.observe(Phase::Entered, &mut store));
    assert!(store.get().scrolled);

    restore.observe(Phase::Exiting, &mut store);
    restore.observe(Phase::Entering, &mut store);
    assert!(restore.observe(Phase::Entered, &mut store));
    assert!(!store.get().scrolled);
}
