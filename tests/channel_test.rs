//! Work queue ordering and completion tracking across threads.

use std::sync::Arc;
use std::thread;

use tui_isolation::engine::{JoinOutcome, WorkQueue};

#[test]
fn items_arrive_in_put_order_and_join_waits_for_acknowledgement() {
    let queue = Arc::new(WorkQueue::<u32>::new());
    let consumer_queue = Arc::clone(&queue);
    let consumer = thread::spawn(move || {
        let mut seen = Vec::with_capacity(1000);
        loop {
            let item = consumer_queue.get();
            consumer_queue.task_done();
            if item == u32::MAX {
                return seen;
            }
            seen.push(item);
        }
    });

    for i in 0..1000 {
        queue.put(i);
    }
    queue.put(u32::MAX);
    queue.join();

    assert_eq!(queue.unfinished(), 0);
    let seen = consumer.join().unwrap();
    assert_eq!(seen, (0..1000).collect::<Vec<_>>());
}

#[test]
fn join_consumer_returns_when_the_consumer_leaves_early() {
    let queue = Arc::new(WorkQueue::<u32>::new());
    queue.attach_consumer();

    let consumer_queue = Arc::clone(&queue);
    let consumer = thread::spawn(move || {
        let first = consumer_queue.get();
        consumer_queue.task_done();
        consumer_queue.detach_consumer();
        first
    });

    queue.put(1);
    queue.put(2);
    queue.put(3);

    // Either the consumer already left or it leaves with two items pending.
    let outcome = queue.join_consumer();
    assert_eq!(outcome, JoinOutcome::ConsumerGone);
    assert_eq!(consumer.join().unwrap(), 1);

    assert_eq!(queue.drain(), vec![2, 3]);
    assert_eq!(queue.unfinished(), 0);
}

#[test]
fn join_consumer_drains_when_everything_is_handled() {
    let queue = Arc::new(WorkQueue::<&'static str>::new());
    queue.attach_consumer();
    let consumer_queue = Arc::clone(&queue);
    let consumer = thread::spawn(move || {
        for _ in 0..2 {
            consumer_queue.get();
            consumer_queue.task_done();
        }
    });

    queue.put("proceed");
    queue.put("cancel");
    assert_eq!(queue.join_consumer(), JoinOutcome::Drained);
    consumer.join().unwrap();
}
