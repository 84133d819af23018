// Example: bottom-anchored chat layout. Offset 0 shows the newest messages;
// prepending older history does not move what is on screen.
use vlist::{Direction, ListOptions, SizeStrategy, VirtualList};

fn main() {
    let sizes = SizeStrategy::per_index(|i| 40 + (i % 5) as u32 * 8);
    let mut list = VirtualList::new(
        ListOptions::new(500, 400, sizes).with_direction(Direction::Reverse),
    )
    .unwrap();

    let update = list.on_scroll(0.0, 0);
    println!("at bottom: range={:?}", update.range);

    // Scroll up a bit, then load 30 older messages above.
    list.on_virtual_scroll(1_200, 16);
    let anchor = list.snapshot().unwrap();
    let added = list.prepend(30);
    println!(
        "prepended extent={added}, anchor {:?} -> {:?}",
        anchor,
        list.snapshot()
    );
}
