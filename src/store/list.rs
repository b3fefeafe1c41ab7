use std::{
    collections::VecDeque,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use dashmap::DashMap;
use tokio::{sync::oneshot, time::Instant};

/// A caller suspended in BLPOP, waiting for its single element.
#[derive(Debug)]
struct Waiter {
    id: u64,
    sender: oneshot::Sender<String>,
    deadline: Option<Instant>,
}

#[derive(Debug, Default)]
struct ListEntry {
    elements: VecDeque<String>,
    waiters: VecDeque<Waiter>,
}

impl ListEntry {
    fn is_vacant(&self) -> bool {
        self.elements.is_empty() && self.waiters.is_empty()
    }

    /// Hands head elements to the oldest waiters, one each, until either runs out.
    ///
    /// A waiter whose deadline has passed is dropped without an element; its
    /// own timeout reports it as empty. A waiter whose receiver is gone puts
    /// the element back at the head for the next one.
    fn serve_waiters(&mut self) {
        let now = Instant::now();

        while !self.elements.is_empty() {
            let Some(waiter) = self.waiters.pop_front() else {
                break;
            };

            if waiter.deadline.is_some_and(|deadline| now >= deadline) {
                continue;
            }

            let Some(element) = self.elements.pop_front() else {
                break;
            };

            if let Err(element) = waiter.sender.send(element) {
                self.elements.push_front(element);
            }
        }
    }
}

/// Ordered lists with FIFO blocking pops.
///
/// Every operation on a key runs under that key's shard lock, including the
/// BLPOP registration and the hand-off in pushes, so a push and a blocked pop
/// can never both take the same element. Waiting itself happens outside the
/// lock on the waiter's private channel.
#[derive(Debug, Default)]
pub struct ListStore {
    lists: DashMap<String, ListEntry>,
    next_waiter_id: AtomicU64,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `elements` to the tail and returns the length after the push.
    pub fn rpush(&self, key: &str, elements: Vec<String>) -> usize {
        self.push(key, |list| list.extend(elements))
    }

    /// Prepends `elements` one at a time, so `LPUSH k x y` leaves `[y, x]`.
    pub fn lpush(&self, key: &str, elements: Vec<String>) -> usize {
        self.push(key, |list| {
            for element in elements {
                list.push_front(element);
            }
        })
    }

    fn push<F>(&self, key: &str, add: F) -> usize
    where
        F: FnOnce(&mut VecDeque<String>),
    {
        let length = {
            let mut list = self.lists.entry(key.to_string()).or_default();
            add(&mut list.elements);

            let length = list.elements.len();
            list.serve_waiters();
            length
        };

        self.release_if_vacant(key);
        length
    }

    /// Elements between `start` and `stop` inclusive. Negative indices count
    /// from the tail.
    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Vec<String> {
        let Some(list) = self.lists.get(key) else {
            return Vec::new();
        };

        match normalize_range(list.elements.len(), start, stop) {
            Some((start, stop)) => list.elements.range(start..=stop).cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn llen(&self, key: &str) -> usize {
        self.lists
            .get(key)
            .map(|list| list.elements.len())
            .unwrap_or(0)
    }

    /// Removes up to `count` elements from the head.
    pub fn lpop(&self, key: &str, count: usize) -> Vec<String> {
        let popped = {
            let Some(mut list) = self.lists.get_mut(key) else {
                return Vec::new();
            };

            let count = count.min(list.elements.len());
            list.elements.drain(..count).collect()
        };

        self.release_if_vacant(key);
        popped
    }

    /// Pops the head element, waiting for a push if the list is empty.
    ///
    /// `None` as the timeout waits forever, as does a timeout too large to
    /// represent as a deadline. Returns `None` only when the timeout elapsed
    /// without an element being committed to this caller.
    ///
    /// Dropping the returned future while it waits withdraws the caller. An
    /// element already handed to it goes back to the head of the list.
    pub async fn blpop(&self, key: &str, timeout: Option<Duration>) -> Option<String> {
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));

        let pending = {
            let mut list = self.lists.entry(key.to_string()).or_default();

            if let Some(element) = list.elements.pop_front() {
                drop(list);
                self.release_if_vacant(key);
                return Some(element);
            }

            let id = self.next_waiter_id.fetch_add(1, Ordering::Relaxed);
            let (sender, receiver) = oneshot::channel();
            list.waiters.push_back(Waiter {
                id,
                sender,
                deadline,
            });

            PendingPop {
                store: self,
                key,
                id,
                receiver,
                settled: false,
            }
        };

        pending.wait(deadline).await
    }

    /// Removes waiter `id` from the queue of `key`.
    ///
    /// If the waiter is still queued nothing was committed to it and `None`
    /// is returned. If a push already dequeued it, that push sent under the
    /// same lock, so the element is waiting in the channel. With `restore`
    /// the element goes back to the head of the list and is offered to the
    /// remaining waiters, otherwise it is returned to the caller.
    fn cancel_waiter(
        &self,
        key: &str,
        id: u64,
        receiver: &mut oneshot::Receiver<String>,
        restore: bool,
    ) -> Option<String> {
        let taken = {
            let mut list = self.lists.entry(key.to_string()).or_default();

            let queued = list.waiters.len();
            list.waiters.retain(|waiter| waiter.id != id);

            if list.waiters.len() != queued {
                None
            } else {
                match receiver.try_recv() {
                    Ok(element) if restore => {
                        list.elements.push_front(element);
                        list.serve_waiters();
                        None
                    }
                    Ok(element) => Some(element),
                    Err(_) => None,
                }
            }
        };

        self.release_if_vacant(key);
        taken
    }

    /// True while the list holds at least one element.
    pub fn exists(&self, key: &str) -> bool {
        self.llen(key) > 0
    }

    /// Number of callers currently blocked on `key`.
    pub fn waiting(&self, key: &str) -> usize {
        self.lists
            .get(key)
            .map(|list| list.waiters.len())
            .unwrap_or(0)
    }

    fn release_if_vacant(&self, key: &str) {
        self.lists.remove_if(key, |_, list| list.is_vacant());
    }
}

/// A registered BLPOP waiter, withdrawn if dropped before it settles.
struct PendingPop<'a> {
    store: &'a ListStore,
    key: &'a str,
    id: u64,
    receiver: oneshot::Receiver<String>,
    settled: bool,
}

impl PendingPop<'_> {
    async fn wait(mut self, deadline: Option<Instant>) -> Option<String> {
        let delivered = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, &mut self.receiver)
                .await
                .ok(),
            None => Some((&mut self.receiver).await),
        };

        self.settled = true;

        match delivered {
            Some(delivered) => delivered.ok(),
            None => self
                .store
                .cancel_waiter(self.key, self.id, &mut self.receiver, false),
        }
    }
}

impl Drop for PendingPop<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.store
                .cancel_waiter(self.key, self.id, &mut self.receiver, true);
        }
    }
}

/// Converts possibly negative `start`/`stop` indexes into an inclusive range
/// clamped to `[0, length)`. `None` when the range is empty.
fn normalize_range(length: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let length = length as i64;

    if length == 0 {
        return None;
    }

    let start = if start < 0 { length + start } else { start }.max(0);
    let stop = if stop < 0 { length + stop } else { stop }.min(length - 1);

    if start >= length || start > stop {
        return None;
    }

    Some((start as usize, stop as usize))
}
