use crate::*;

use vlist::{Align, Direction, ListOptions, LoadBatch, VirtualList};

fn list(options: ListOptions) -> VirtualList {
    VirtualList::new(options).unwrap()
}

#[test]
fn controller_commits_each_scroll_event() {
    let mut c = Controller::new(ListOptions::fixed(1000, 100, 10)).unwrap();
    let out = c.on_scroll(0.0, 0).unwrap();
    assert!(!out.claimed.is_empty());
    assert_eq!(c.range(), c.list().committed_range());

    let out = c.on_scroll(250.0, 16).unwrap();
    assert!(!out.retained.is_empty() || !out.claimed.is_empty());
    assert!(c.range().unwrap().contains(25));
}

#[test]
fn controller_debounces_is_scrolling() {
    let mut c = Controller::new(ListOptions::fixed(1000, 100, 10)).unwrap();
    assert!(!c.is_scrolling());

    c.on_scroll(100.0, 0);
    assert!(c.is_scrolling());
    assert!(c.tick(100)); // within the idle timeout
    assert!(!c.tick(300)); // quiet past the timeout
    assert!(!c.is_scrolling());

    c.on_scroll(120.0, 400);
    assert!(c.is_scrolling());
}

#[test]
fn controller_refresh_after_mutation() {
    let mut c = Controller::new(ListOptions::fixed(50, 100, 10)).unwrap();
    c.jump_to_index(49, Align::End);
    assert_eq!(c.range().unwrap().end, 49);

    c.list_mut().append(50);
    let out = c.refresh().unwrap();
    assert!(out.freed.is_empty(), "nothing scrolled out of range");
    assert_eq!(c.list().count(), 100);
}

#[test]
fn controller_restore_round_trip() {
    let mut c = Controller::new(ListOptions::fixed(200, 100, 10)).unwrap();
    c.on_virtual_scroll(755, 0);
    let snap = c.snapshot().unwrap();
    assert_eq!(snap.index, 75);
    assert_eq!(snap.offset_in_item, 5);

    c.jump_to_index(0, Align::Start);
    c.restore(snap).unwrap();
    assert_eq!(c.list().scroll_offset(), 755);
    assert!(c.range().unwrap().contains(75));
}

#[test]
fn mapped_restore_preserves_anchor_across_prepend() {
    // A bottom-anchored 500-item timeline; 30 older items arrive above.
    let mut v = list(
        ListOptions::fixed(500, 200, 40)
            .with_direction(Direction::Reverse)
            .with_overscan(0),
    );
    v.on_virtual_scroll(990, 0);
    let snap = v.snapshot().unwrap();
    assert_eq!(snap.index, 470);
    assert_eq!(snap.offset_in_item, 10);

    // The host reloads the dataset wholesale instead of calling prepend, so
    // the engine cannot auto-anchor; the mapped restore carries the anchor.
    v.set_count(530);
    let update = restore_mapped(&mut v, snap, |i| Some(i + 30)).unwrap();
    assert!(update.range.unwrap().contains(500));

    let restored = v.snapshot().unwrap();
    assert_eq!(restored.index, 500);
    assert_eq!(restored.offset_in_item, 10);
}

#[test]
fn mapped_restore_reports_a_vanished_anchor() {
    let mut v = list(ListOptions::fixed(100, 50, 10));
    v.on_virtual_scroll(500, 0);
    let snap = v.snapshot().unwrap();
    v.remove(40, 20); // the anchor item is among the removed
    assert!(restore_mapped(&mut v, snap, |_| None).is_none());
}

#[test]
fn planner_extends_the_tail_with_the_current_generation() {
    let mut v = list(ListOptions::fixed(100, 100, 10).with_has_more(true));
    let mut planner = LoadPlanner::new(40);

    let req = planner.next_request(&v, 0).unwrap();
    assert_eq!(req.generation, v.generation());
    assert_eq!(req.start, 100);
    assert_eq!(req.count, 40);
    assert!(planner.in_flight());

    // One request at a time.
    assert!(planner.next_request(&v, 0).is_none());

    assert!(planner.apply(
        &mut v,
        LoadBatch {
            generation: req.generation,
            count: 140,
            loaded_count: 140,
            has_more: false,
        },
    ));
    assert!(!planner.in_flight());
    assert_eq!(v.count(), 140);

    // Fully loaded, nothing more to fetch.
    assert!(planner.next_request(&v, 0).is_none());
}

#[test]
fn planner_fills_placeholders_before_extending() {
    let mut v = list(ListOptions::fixed(0, 100, 10).with_has_more(true));
    let generation = v.generation();
    v.apply_batch(LoadBatch {
        generation,
        count: 80,
        loaded_count: 30,
        has_more: true,
    });

    let mut planner = LoadPlanner::new(25);
    let req = planner.next_request(&v, 0).unwrap();
    assert_eq!(req.start, 30, "placeholder prefix boundary comes first");
}

#[test]
fn planner_respects_the_render_margin() {
    let mut c = Controller::new(ListOptions::fixed(1000, 100, 10).with_has_more(true)).unwrap();
    c.on_virtual_scroll(0, 0);

    let mut planner = LoadPlanner::new(20).with_margin(20);
    // Rendering the head, 1000 items away from the unloaded tail.
    assert!(planner.next_request(c.list(), 1000).is_none());

    c.jump_to_index(999, Align::End);
    let req = planner.next_request(c.list(), 1000).unwrap();
    assert_eq!(req.start, 1000);
}

#[test]
fn gate_defers_loads_while_flinging() {
    let mut v = list(ListOptions::fixed(10_000, 100, 10).with_has_more(true));
    v.on_virtual_scroll(0, 0);
    v.on_virtual_scroll(500, 100); // 5000 units/s

    let gate = LoadGate {
        max_speed: 1000.0,
        idle_timeout_ms: 150,
    };
    assert!(!gate.permits(&v, 100));

    // Quiet for longer than the idle timeout: permitted regardless of the
    // last measured speed.
    assert!(gate.permits(&v, 400));

    let mut planner = LoadPlanner::new(20).with_gate(gate);
    assert!(planner.next_request(&v, 100).is_none());
    assert!(planner.next_request(&v, 400).is_some());
}

#[test]
fn reload_supersedes_the_outstanding_request() {
    let mut v = list(ListOptions::fixed(100, 100, 10).with_has_more(true));
    let mut planner = LoadPlanner::new(40);
    let stale = planner.next_request(&v, 0).unwrap();

    let generation = v.begin_reload();
    assert!(generation > stale.generation);

    // The stale batch arrives anyway: dropped, and the slot frees up.
    assert!(!planner.apply(
        &mut v,
        LoadBatch {
            generation: stale.generation,
            count: 140,
            loaded_count: 140,
            has_more: true,
        },
    ));
    assert_eq!(v.count(), 100);
    assert!(!planner.in_flight());

    let fresh = planner.next_request(&v, 0).unwrap();
    assert_eq!(fresh.generation, generation);
}
