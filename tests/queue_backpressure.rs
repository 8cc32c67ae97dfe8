use csvshard::BoundedQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn delivers_in_fifo_order() {
    let q = BoundedQueue::new(8);
    for i in 0..5 {
        q.push(i);
    }
    for i in 0..5 {
        assert_eq!(q.pop(), Some(i));
    }
}

#[test]
fn push_blocks_while_full_until_a_pop() {
    let q = Arc::new(BoundedQueue::new(2));
    q.push(1);
    q.push(2);

    let pushed = Arc::new(AtomicBool::new(false));
    let handle = {
        let q = Arc::clone(&q);
        let pushed = Arc::clone(&pushed);
        thread::spawn(move || {
            q.push(3);
            pushed.store(true, Ordering::SeqCst);
        })
    };

    thread::sleep(Duration::from_millis(100));
    assert!(!pushed.load(Ordering::SeqCst), "push should be blocked");

    assert_eq!(q.pop(), Some(1));
    handle.join().unwrap();
    assert!(pushed.load(Ordering::SeqCst));
    assert_eq!(q.pop(), Some(2));
    assert_eq!(q.pop(), Some(3));
}

#[test]
fn pop_blocks_while_empty_until_a_push() {
    let q = Arc::new(BoundedQueue::new(2));

    let popped = Arc::new(AtomicBool::new(false));
    let handle = {
        let q = Arc::clone(&q);
        let popped = Arc::clone(&popped);
        thread::spawn(move || {
            let item = q.pop();
            popped.store(true, Ordering::SeqCst);
            item
        })
    };

    thread::sleep(Duration::from_millis(100));
    assert!(!popped.load(Ordering::SeqCst), "pop should be blocked");

    q.push(42);
    assert_eq!(handle.join().unwrap(), Some(42));
    assert!(popped.load(Ordering::SeqCst));
}

#[test]
fn each_sentinel_is_delivered_exactly_once() {
    let q = BoundedQueue::new(8);
    q.push(7);
    q.finish();
    q.finish();
    assert_eq!(q.pop(), Some(7));
    assert_eq!(q.pop(), None);
    assert_eq!(q.pop(), None);
    assert!(q.is_empty());
}

#[test]
fn one_sentinel_per_consumer_shuts_all_of_them_down() {
    let q = Arc::new(BoundedQueue::<u32>::new(4));
    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                let mut seen = 0u32;
                while q.pop().is_some() {
                    seen += 1;
                }
                seen
            })
        })
        .collect();

    for i in 0..10 {
        q.push(i);
    }
    for _ in 0..3 {
        q.finish();
    }
    let total: u32 = consumers.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 10);
}
