//! Property-based checks over the core virtualization math.
//!
//! Reference models are deliberately naive (linear scans over the raw size
//! vector); the production structures must agree with them on every input.

use proptest::prelude::*;
use vlist::{
    Direction, ListOptions, OffsetIndex, Range, RangeCalculator, ScrollSpaceMapper, SizeStrategy,
    SlotRecycler, VirtualList, MAX_REAL_EXTENT,
};

fn arb_sizes() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..500, 1..200)
}

fn arb_positive_sizes() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..500, 1..200)
}

fn index_over(sizes: &[u32]) -> OffsetIndex {
    let resolver = sizes.to_vec();
    OffsetIndex::new(SizeStrategy::per_index(move |i| resolver[i]), sizes.len())
}

fn naive_offset(sizes: &[u32], index: usize) -> u64 {
    sizes[..index].iter().map(|&s| s as u64).sum()
}

proptest! {
    #[test]
    fn offsets_match_the_naive_prefix_sum(sizes in arb_sizes()) {
        let idx = index_over(&sizes);
        for i in 0..=sizes.len() {
            prop_assert_eq!(idx.offset_of(i), naive_offset(&sizes, i));
        }
        prop_assert_eq!(idx.total_extent(), naive_offset(&sizes, sizes.len()));
    }

    #[test]
    fn offsets_are_monotone_and_consistent_with_sizes(sizes in arb_sizes()) {
        let idx = index_over(&sizes);
        for i in 0..sizes.len() {
            prop_assert!(idx.offset_of(i + 1) >= idx.offset_of(i));
            prop_assert_eq!(idx.offset_of(i + 1) - idx.offset_of(i), sizes[i] as u64);
        }
    }

    #[test]
    fn index_at_returns_the_item_spanning_the_offset(
        sizes in arb_positive_sizes(),
        probe in 0u64..200_000,
    ) {
        let idx = index_over(&sizes);
        let i = idx.index_at(probe).unwrap();
        let start = idx.offset_of(i);
        if probe < idx.total_extent() {
            prop_assert!(start <= probe);
            prop_assert!(probe < start + sizes[i] as u64);
        } else {
            // Past-the-end probes clamp to the last item.
            prop_assert_eq!(i, sizes.len() - 1);
        }
    }

    #[test]
    fn item_starts_round_trip_through_index_at(sizes in arb_positive_sizes()) {
        let idx = index_over(&sizes);
        for i in 0..sizes.len() {
            prop_assert_eq!(idx.index_at(idx.offset_of(i)), Some(i));
        }
    }

    #[test]
    fn resize_agrees_with_a_rebuilt_index(
        sizes in arb_positive_sizes(),
        pick in 0usize..200,
        new_size in 1u32..500,
    ) {
        let pick = pick % sizes.len();
        let mut patched = index_over(&sizes);
        patched.resize(pick, new_size);

        let mut rebuilt_sizes = sizes.clone();
        rebuilt_sizes[pick] = new_size;
        let rebuilt = index_over(&rebuilt_sizes);

        prop_assert_eq!(patched.total_extent(), rebuilt.total_extent());
        for i in 0..sizes.len() {
            prop_assert_eq!(patched.offset_of(i), rebuilt.offset_of(i));
        }
    }

    #[test]
    fn render_range_covers_the_viewport(
        sizes in arb_positive_sizes(),
        scroll in 0u64..200_000,
        viewport in 1u32..2_000,
        overscan in 0usize..4,
    ) {
        let idx = index_over(&sizes);
        let calc = RangeCalculator::new(overscan, Direction::Forward);
        let range = calc.compute(&idx, scroll, viewport).unwrap();
        prop_assert!(range.start <= range.end);
        prop_assert!(range.end < sizes.len());

        let total = idx.total_extent();
        let view = (viewport as u64).min(total.max(1));
        let clamped = scroll.min(total.saturating_sub(view));
        // Every content unit inside the viewport window belongs to an item in
        // the range.
        prop_assert!(idx.offset_of(range.start) <= clamped);
        prop_assert!(idx.offset_of(range.end) + sizes[range.end] as u64 >= clamped + view.min(total));
    }

    #[test]
    fn overscan_only_widens(
        sizes in arb_positive_sizes(),
        scroll in 0u64..200_000,
        viewport in 1u32..2_000,
        overscan in 1usize..4,
    ) {
        let idx = index_over(&sizes);
        let bare = RangeCalculator::new(0, Direction::Forward)
            .compute(&idx, scroll, viewport)
            .unwrap();
        let wide = RangeCalculator::new(overscan, Direction::Forward)
            .compute(&idx, scroll, viewport)
            .unwrap();
        prop_assert!(wide.start <= bare.start);
        prop_assert!(wide.end >= bare.end);
        prop_assert!(bare.start - wide.start <= overscan);
        prop_assert!(wide.end - bare.end <= overscan);
    }

    #[test]
    fn reverse_is_forward_under_coordinate_inversion(
        sizes in arb_positive_sizes(),
        scroll in 0u64..200_000,
        viewport in 1u32..2_000,
        overscan in 0usize..4,
    ) {
        let idx = index_over(&sizes);
        let max_scroll = idx
            .total_extent()
            .saturating_sub((viewport as u64).min(idx.total_extent().max(1)));
        let scroll = scroll.min(max_scroll);
        let fwd = RangeCalculator::new(overscan, Direction::Forward)
            .compute(&idx, scroll, viewport);
        let rev = RangeCalculator::new(overscan, Direction::Reverse)
            .compute(&idx, max_scroll - scroll, viewport);
        prop_assert_eq!(fwd, rev);
    }

    #[test]
    fn mapper_round_trip_error_is_bounded_by_the_ratio(
        extent in 1u64..(1u64 << 40),
        probe in 0u64..(1u64 << 40),
    ) {
        let mapper = ScrollSpaceMapper::new(extent);
        let probe = probe % (extent + 1);
        let real = mapper.to_real(probe);
        prop_assert!(real.is_finite());
        prop_assert!((0.0..=MAX_REAL_EXTENT).contains(&real));

        let back = mapper.to_virtual(real);
        let tolerance = mapper.ratio().ceil() as u64;
        prop_assert!(probe.abs_diff(back) <= tolerance,
            "extent={} probe={} back={}", extent, probe, back);
    }

    #[test]
    fn mapper_is_monotone(
        extent in 1u64..(1u64 << 40),
        a in 0u64..(1u64 << 40),
        b in 0u64..(1u64 << 40),
    ) {
        let mapper = ScrollSpaceMapper::new(extent);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(mapper.to_real(lo) <= mapper.to_real(hi));
        prop_assert!(mapper.to_virtual(mapper.to_real(lo)) <= mapper.to_virtual(mapper.to_real(hi)));
    }

    #[test]
    fn recycler_bindings_stay_unique_and_bounded(
        starts in prop::collection::vec(0usize..500, 1..40),
        len in 1usize..12,
    ) {
        let mut recycler = SlotRecycler::new(16);
        for start in starts {
            let out = recycler.reconcile(Some(Range::new(start, start + len - 1)));

            let mut bound_slots: Vec<usize> = out
                .claimed
                .iter()
                .chain(out.retained.iter())
                .map(|(_, slot)| slot.arena_index())
                .collect();
            prop_assert_eq!(bound_slots.len(), len);
            bound_slots.sort_unstable();
            bound_slots.dedup();
            prop_assert_eq!(bound_slots.len(), len, "a slot fronted two indexes");

            for index in start..start + len {
                prop_assert!(recycler.slot_for(index).is_some());
                let slot = recycler.slot_for(index).unwrap();
                prop_assert!(slot.arena_index() < recycler.capacity());
                prop_assert_eq!(recycler.bound_index(slot), Some(index));
            }
        }
    }

    #[test]
    fn retained_slots_never_move(
        start in 0usize..500,
        shift in 1usize..8,
        len in 8usize..12,
    ) {
        let mut recycler = SlotRecycler::new(len + 8);
        recycler.reconcile(Some(Range::new(start, start + len - 1)));
        let before: Vec<_> = (start..start + len).map(|i| recycler.slot_for(i)).collect();

        let out = recycler.reconcile(Some(Range::new(start + shift, start + shift + len - 1)));
        for (index, slot) in out.retained {
            prop_assert_eq!(before[index - start], Some(slot));
        }
        prop_assert_eq!(out.freed.len(), shift.min(len));
    }

    #[test]
    fn engine_scroll_offset_is_always_in_bounds(
        count in 1usize..5_000,
        item in 1u32..200,
        viewport in 1u32..2_000,
        events in prop::collection::vec(0.0f64..1e9, 1..30),
    ) {
        let mut list = VirtualList::new(ListOptions::fixed(count, viewport, item)).unwrap();
        for (t, real) in events.into_iter().enumerate() {
            let update = list.on_scroll(real, t as u64 * 16);
            prop_assert!(list.scroll_offset() <= list.max_scroll_offset());
            if let Some(range) = update.range {
                prop_assert!(range.end < count);
            }
            list.commit(&update);
        }
    }

    #[test]
    fn snapshot_restore_is_the_identity_without_mutations(
        count in 1usize..5_000,
        item in 1u32..200,
        viewport in 1u32..2_000,
        scroll in 0u64..1_000_000,
    ) {
        let mut list = VirtualList::new(ListOptions::fixed(count, viewport, item)).unwrap();
        list.on_virtual_scroll(scroll, 0);
        let offset = list.scroll_offset();
        let snapshot = list.snapshot().unwrap();
        list.restore(snapshot);
        prop_assert_eq!(list.scroll_offset(), offset);
    }
}
