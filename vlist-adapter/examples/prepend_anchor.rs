// Example: keeping the viewport anchored when the dataset is reloaded with
// older items added above (the mapped-restore path for wholesale reloads).
use vlist::{Direction, ListOptions, VirtualList};
use vlist_adapter::{capture_first_visible, restore_mapped};

fn main() {
    let mut list = VirtualList::new(
        ListOptions::fixed(500, 200, 40).with_direction(Direction::Reverse),
    )
    .unwrap();
    list.on_virtual_scroll(990, 0);

    let anchor = capture_first_visible(&list).unwrap();
    println!("anchor: {anchor:?}");

    // Wholesale reload with 30 older items at the front.
    list.set_count(530);
    let update = restore_mapped(&mut list, anchor, |i| Some(i + 30)).unwrap();
    println!("restored range: {:?}", update.range);
    println!("anchor after: {:?}", list.snapshot());
}
