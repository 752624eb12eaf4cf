use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::StoreError;

type QueueMap = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Exclusive turn on one key's queue. Dropping it lets the next waiter in.
pub struct QueueGuard {
    turn: Option<OwnedMutexGuard<()>>,
    key: String,
    queues: QueueMap,
}

impl Drop for QueueGuard {
    /// Hands the turn on, and forgets the key once nobody else is queued.
    fn drop(&mut self) {
        drop(self.turn.take());

        let Ok(mut queues) = self.queues.lock() else {
            return;
        };
        // The map holds one reference; every waiter holds another.
        let idle = queues
            .get(&self.key)
            .is_some_and(|queue| Arc::strong_count(queue) == 1);
        if idle {
            queues.remove(&self.key);
        }
    }
}

/// One FIFO queue per key.
///
/// Lazily creates a fair async mutex per unique key and hands out the same
/// `Arc` for repeated lookups. Tokio's mutex grants the lock in the order
/// `lock` was called, which is what makes the queue first-in first-out.
/// A key's entry lives only while someone holds or waits for its turn.
#[derive(Default)]
pub struct KeyQueue {
    queues: QueueMap,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue_for(&self, key: &str) -> Result<Arc<AsyncMutex<()>>, StoreError> {
        let mut queues = self
            .queues
            .lock()
            .map_err(|_| StoreError::QueuePoisoned("queue lookup"))?;
        Ok(queues
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone())
    }

    fn guard(&self, key: &str, turn: OwnedMutexGuard<()>) -> QueueGuard {
        QueueGuard {
            turn: Some(turn),
            key: key.to_string(),
            queues: self.queues.clone(),
        }
    }

    /// Wait for this key's turn.
    pub async fn acquire(&self, key: &str) -> Result<QueueGuard, StoreError> {
        let queue = self.queue_for(key)?;
        let turn = queue.lock_owned().await;
        Ok(self.guard(key, turn))
    }

    /// Take the turn only if nobody holds it.
    #[cfg(test)]
    fn try_acquire(&self, key: &str) -> Result<Option<QueueGuard>, StoreError> {
        let queue = self.queue_for(key)?;
        Ok(queue.try_lock_owned().ok().map(|turn| self.guard(key, turn)))
    }

    /// Number of keys with a live queue.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.queues.lock().map(|queues| queues.len()).unwrap_or_default()
    }
}
