//! Tests for the alias aware media stream.
//!
//! These tests verify that:
//! - General listeners only see activations of non-overlapping breakpoints
//! - Asking for an overlapping breakpoint by name delivers it
//! - Changes carry alias, priority and suffix from the registry
//! - Activity queries agree with the mock platform

use std::cell::RefCell;
use std::rc::Rc;

use floem_responsive_test::prelude::*;

fn aliases_of(changes: &[MediaChange]) -> Vec<&str> {
    changes.iter().map(|c| c.mq_alias.as_str()).collect()
}

#[test]
fn test_general_stream_reports_winners_only() {
    let harness = Harness::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = harness.root().observer().media_changes().subscribe({
        let seen = seen.clone();
        move |change| seen.borrow_mut().push(change.clone())
    });

    harness.activate_with_overlaps("xl");
    harness.activate_with_overlaps("sm");
    harness.activate("md");

    let seen = seen.borrow();
    // The first entry is the replayed `all` seed.
    assert_eq!(aliases_of(&seen), ["all", "xl", "sm", "md"]);
    assert!(seen.iter().all(|change| change.matches));
}

#[test]
fn test_overlap_filter_follows_config() {
    let harness: Harness<&str> = Harness::with_config(&LayoutConfig {
        filter_overlaps: false,
        ..Default::default()
    });
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = harness.root().observer().media_changes().listen({
        let seen = seen.clone();
        move |change| seen.borrow_mut().push(change.clone())
    });
    harness.activate_with_overlaps("sm");
    assert_eq!(aliases_of(&seen.borrow()), ["gt-xs", "sm"]);
}

#[test]
fn test_observe_by_alias_enriches() {
    let harness = Harness::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = harness.root().observer().observe("gt-md").listen({
        let seen = seen.clone();
        move |change| seen.borrow_mut().push(change.clone())
    });
    harness.activate_with_overlaps("xl");
    harness.activate("xs");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    for change in seen.iter() {
        assert_eq!(change.mq_alias, "gt-md");
        assert_eq!(change.priority, -750);
        assert_eq!(change.suffix, "GtMd");
        assert_eq!(change.media_query, "(min-width: 1280px)");
    }
    assert!(seen[0].matches);
    assert!(!seen[1].matches);
}

#[test]
fn test_all_changes_include_deactivations() {
    let harness = Harness::new();
    harness.activate_with_overlaps("sm");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = harness.root().observer().all_changes().listen({
        let seen = seen.clone();
        move |change| seen.borrow_mut().push((change.mq_alias.clone(), change.matches))
    });
    harness.activate("lg");
    assert_eq!(
        *seen.borrow(),
        [
            ("gt-xs".to_string(), false),
            ("sm".to_string(), false),
            ("lg".to_string(), true),
        ]
    );
}

#[test]
fn test_activity_queries() {
    let harness = Harness::new();
    let observer = harness.root().observer();
    assert!(observer.active().is_none());
    assert!(observer.active_breakpoints().is_empty());

    harness.activate_with_overlaps("md");
    assert_eq!(observer.active().unwrap().alias, "md");
    assert_eq!(observer.active_aliases(), ["md", "gt-sm", "gt-xs"]);
    assert!(observer.is_active("gt-xs"));
    assert!(observer.is_active("(min-width: 960px)"));
    assert!(!observer.is_active("lg"));
    assert!(!observer.is_active("unknown"));
}
