// Example: velocity-gated infinite loading. Requests are planned only when
// the user slows down; batches racing a reload are dropped.
use vlist::{ListOptions, LoadBatch};
use vlist_adapter::{Controller, LoadPlanner};

fn main() {
    let mut c =
        Controller::new(ListOptions::fixed(200, 600, 24).with_has_more(true)).unwrap();
    let mut planner = LoadPlanner::new(50);

    // A fast fling toward the tail: the gate defers the fetch.
    for (t, offset) in [(0u64, 0u64), (16, 1_400), (32, 2_800), (48, 4_200)] {
        c.on_virtual_scroll(offset, t);
    }
    println!("mid-fling request: {:?}", planner.next_request(c.list(), 48));

    // The user stops; the planner issues a tail request.
    let req = planner.next_request(c.list(), 500).unwrap();
    println!("after settling: {req:?}");

    let applied = planner.apply(
        c.list_mut(),
        LoadBatch {
            generation: req.generation,
            count: req.start + req.count,
            loaded_count: req.start + req.count,
            has_more: true,
        },
    );
    println!("batch applied={applied}, count={}", c.list().count());
}
