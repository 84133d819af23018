// Example: a million rows, compressed into the host's representable scroll
// range. The host sees a ~16.7M-unit scrollbar; content space is 48M units.
use vlist::{ListOptions, VirtualList, MAX_REAL_EXTENT};

fn main() {
    let mut list = VirtualList::new(ListOptions::fixed(1_000_000, 960, 48)).unwrap();
    println!(
        "virtual={} real={} ratio={:.3}",
        list.total_extent(),
        list.mapper().real_extent(),
        list.ratio()
    );

    // Drag the host thumb to its maximum: the last row must be reachable.
    let update = list.on_scroll(MAX_REAL_EXTENT, 0);
    println!("at host max: range={:?}", update.range);

    // Halfway in real space lands halfway in content space.
    let update = list.on_scroll(MAX_REAL_EXTENT / 2.0, 16);
    println!("at host midpoint: range={:?}", update.range);
}
