// Example: minimal usage, scroll events and slot recycling.
use vlist::{Align, ListOptions, VirtualList};

fn main() {
    let mut list = VirtualList::new(ListOptions::fixed(10_000, 600, 24)).unwrap();

    let update = list.on_scroll(4_321.0, 0);
    println!("total_extent={}", list.total_extent());
    println!("render_range={:?}", update.range);

    if let Some(out) = list.commit(&update) {
        println!("claimed {} slots", out.claimed.len());
        for (index, slot) in out.claimed.iter().take(3) {
            println!("  item {index} -> slot {}", slot.arena_index());
        }
    }

    let update = list.jump_to_index(9_999, Align::End);
    println!("after jump: offset={} range={:?}", list.scroll_offset(), update.range);
}
