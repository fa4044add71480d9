//! Unbounded FIFO work queues with completion tracking.
//!
//! Every `put` raises an unfinished count and every consumed item must be
//! acknowledged with [`WorkQueue::task_done`]. A producer can then block in
//! [`WorkQueue::join`] until everything it enqueued has been taken *and*
//! handled, which is what makes synchronous session teardown possible.
//!
//! The command queue also tracks whether a consumer is attached. A session
//! thread detaches itself on the way out, so a teardown that races with a
//! session ending on its own does not wait for acknowledgements that will
//! never come.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::message::{Command, Envelope};

/// Simulation-bound queue: moves, proceed tokens, cancellation.
pub type CommandChannel = WorkQueue<Command>;

/// Presentation-bound queue: structured events tagged with their session.
pub type EventChannel = WorkQueue<Envelope>;

#[derive(Debug)]
struct Inner<T> {
    items: VecDeque<T>,
    unfinished: usize,
    consumer_attached: bool,
}

/// How a [`WorkQueue::join_consumer`] wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Every enqueued item was taken and acknowledged.
    Drained,
    /// The consumer went away with work still outstanding.
    ConsumerGone,
}

#[derive(Debug)]
pub struct WorkQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    settled: Condvar,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                unfinished: 0,
                consumer_attached: false,
            }),
            not_empty: Condvar::new(),
            settled: Condvar::new(),
        }
    }

    /// Enqueue at the tail. Never blocks.
    pub fn put(&self, item: T) {
        let mut inner = self.inner.lock();
        inner.items.push_back(item);
        inner.unfinished += 1;
        self.not_empty.notify_one();
    }

    /// Take the head, blocking until one is available.
    pub fn get(&self) -> T {
        let mut inner = self.inner.lock();
        loop {
            if let Some(item) = inner.items.pop_front() {
                return item;
            }
            self.not_empty.wait(&mut inner);
        }
    }

    /// Take the head if there is one.
    pub fn try_get(&self) -> Option<T> {
        self.inner.lock().items.pop_front()
    }

    /// Acknowledge one previously taken item.
    pub fn task_done(&self) {
        let mut inner = self.inner.lock();
        debug_assert!(inner.unfinished > 0, "task_done called more times than put");
        inner.unfinished = inner.unfinished.saturating_sub(1);
        if inner.unfinished == 0 {
            self.settled.notify_all();
        }
    }

    /// Block until every enqueued item has been acknowledged.
    pub fn join(&self) {
        let mut inner = self.inner.lock();
        while inner.unfinished > 0 {
            self.settled.wait(&mut inner);
        }
    }

    /// Like [`join`](Self::join), but also returns once the consumer detaches.
    pub fn join_consumer(&self) -> JoinOutcome {
        let mut inner = self.inner.lock();
        loop {
            if inner.unfinished == 0 {
                return JoinOutcome::Drained;
            }
            if !inner.consumer_attached {
                return JoinOutcome::ConsumerGone;
            }
            self.settled.wait(&mut inner);
        }
    }

    pub fn attach_consumer(&self) {
        self.inner.lock().consumer_attached = true;
    }

    pub fn detach_consumer(&self) {
        let mut inner = self.inner.lock();
        inner.consumer_attached = false;
        self.settled.notify_all();
    }

    /// Take and acknowledge everything queued, returning what was removed.
    ///
    /// Used on behalf of a consumer that has gone away.
    pub fn drain(&self) -> Vec<T> {
        let mut inner = self.inner.lock();
        let drained: Vec<T> = inner.items.drain(..).collect();
        inner.unfinished = inner.unfinished.saturating_sub(drained.len());
        if inner.unfinished == 0 {
            self.settled.notify_all();
        }
        drained
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items enqueued but not yet acknowledged (queued or in flight).
    pub fn unfinished(&self) -> usize {
        self.inner.lock().unfinished
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The two queues connecting the presentation loop and the session thread.
///
/// Built once at startup and shared by reference (`Arc`) with every session.
#[derive(Debug, Default)]
pub struct Channels {
    pub commands: CommandChannel,
    pub events: EventChannel,
}

impl Channels {
    pub fn new() -> Self {
        Self::default()
    }
}
