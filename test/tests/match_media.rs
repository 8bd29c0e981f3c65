//! Tests for the media query activation source.
//!
//! These tests verify that:
//! - Registration is idempotent and announces queries that already match
//! - Every observer of a query sees the same emissions, in platform order
//! - The stream starts with the universal `all` activation
//! - Headless platforms degrade to static lists without failing

use std::cell::RefCell;
use std::rc::Rc;

use floem_responsive::media::mock::MockMediaPlatform;
use floem_responsive::media::{HeadlessPlatform, MediaObservable, MediaPlatform};
use floem_responsive::stream::Subscription;
use floem_responsive_test::prelude::*;

const MD: &str = "(min-width: 960px) and (max-width: 1279px)";
const GT_SM: &str = "(min-width: 960px)";

fn setup() -> (Rc<MockMediaPlatform>, MatchMedia) {
    floem_responsive_test::init_tracing();
    let registry = Rc::new(BreakPointRegistry::with_defaults());
    let platform = Rc::new(MockMediaPlatform::new(registry));
    let match_media = MatchMedia::new(platform.clone());
    (platform, match_media)
}

fn collect(observable: &MediaObservable) -> (Rc<RefCell<Vec<MediaChange>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sub = observable.subscribe({
        let seen = seen.clone();
        move |change| seen.borrow_mut().push(change.clone())
    });
    (seen, sub)
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_unregistered_query_is_inactive() {
    let (platform, match_media) = setup();
    platform.activate(MD, false);
    assert!(!match_media.is_active(MD));
    assert!(!match_media.is_registered(MD));
}

#[test]
fn test_register_announces_active_query() {
    let (platform, match_media) = setup();
    platform.activate(MD, false);

    let (seen, _sub) = collect(&match_media.observe(None));
    match_media.register_query(MD);
    match_media.register_query(MD);

    assert!(match_media.is_active(MD));
    let seen = seen.borrow();
    // The replayed seed, then exactly one activation.
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], MediaChange::all());
    assert_eq!(seen[1], MediaChange::new(true, MD));
}

#[test]
fn test_observe_registers_and_filters() {
    let (platform, match_media) = setup();
    let (seen, _sub) = collect(&match_media.observe(Some(MD)));
    assert_eq!(match_media.registered_queries(), [MD]);

    platform.activate(MD, true);
    platform.activate("xs", false);

    let seen = seen.borrow();
    assert_eq!(
        *seen,
        [MediaChange::new(true, MD), MediaChange::new(false, MD)]
    );
}

// ============================================================================
// Broadcast
// ============================================================================

#[test]
fn test_observers_share_emissions() {
    let (platform, match_media) = setup();
    let (first, _a) = collect(&match_media.observe(Some(GT_SM)));
    let (second, _b) = collect(&match_media.observe(Some(GT_SM)));
    platform.activate("lg", true);
    assert_eq!(*first.borrow(), *second.borrow());
    assert_eq!(first.borrow().len(), 1);
}

#[test]
fn test_emissions_follow_platform_order() {
    let (platform, match_media) = setup();
    match_media.register_queries([MD, GT_SM, "(min-width: 600px)"]);
    let order = Rc::new(RefCell::new(Vec::new()));
    let _sub = match_media.observe(None).listen({
        let order = order.clone();
        move |change| {
            order
                .borrow_mut()
                .push((change.media_query.clone(), change.matches))
        }
    });

    platform.activate("md", true);
    platform.activate("xs", false);

    assert_eq!(
        *order.borrow(),
        [
            (GT_SM.to_string(), true),
            ("(min-width: 600px)".to_string(), true),
            (MD.to_string(), true),
            (MD.to_string(), false),
            (GT_SM.to_string(), false),
            ("(min-width: 600px)".to_string(), false),
        ]
    );
}

#[test]
fn test_late_subscriber_sees_latest_only() {
    let (platform, match_media) = setup();
    match_media.register_queries([MD, GT_SM]);
    platform.activate("md", true);

    let (seen, _sub) = collect(&match_media.observe(None));
    assert_eq!(*seen.borrow(), [MediaChange::new(true, MD)]);
    assert_eq!(match_media.latest(), Some(MediaChange::new(true, MD)));
}

#[test]
fn test_active_queries() {
    let (platform, match_media) = setup();
    match_media.register_queries([MD, GT_SM]);
    platform.activate("md", true);
    assert_eq!(match_media.active_queries(), [MD, GT_SM]);
    platform.deactivate_all();
    assert!(match_media.active_queries().is_empty());
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn test_headless_fallback() {
    floem_responsive_test::init_tracing();
    let platform: Rc<dyn MediaPlatform> = Rc::new(HeadlessPlatform);
    let match_media = MatchMedia::new(platform);
    let (seen, _sub) = collect(&match_media.observe(Some("all")));

    match_media.register_query(MD);
    assert!(!match_media.is_active(MD));
    assert!(match_media.is_active("all"));
    // Registering `all` emitted before the subscription, so only its replay arrives.
    assert_eq!(*seen.borrow(), [MediaChange::new(true, "all")]);
}
