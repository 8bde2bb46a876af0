//! Topic-keyed publish/subscribe fan-out.
//!
//! Every subscriber owns a bounded channel. Publishing never waits: when a
//! subscriber's buffer is full its copy of the message is dropped, and the
//! publisher and the other subscribers carry on. Subscribers are expected to
//! re-read current state on the next message they do receive.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc, PoisonError, RwLock, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Default buffer size of each subscriber channel
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 10;

struct Subscriber<T> {
    id: u64,
    sender: mpsc::Sender<T>,
}

struct Inner<T> {
    capacity: usize,
    next_id: AtomicU64,
    topics: RwLock<HashMap<String, Vec<Subscriber<T>>>>,
}

impl<T> Inner<T> {
    /// Remove subscriber `id` from `topic`. Dropping its sender closes the channel.
    fn remove(&self, topic: &str, id: u64) -> bool {
        let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
        let Some(subscribers) = topics.get_mut(topic) else {
            return false;
        };
        let Some(index) = subscribers.iter().position(|s| s.id == id) else {
            return false;
        };
        subscribers.remove(index);
        let remaining = subscribers.len();
        if remaining == 0 {
            topics.remove(topic);
        }
        tracing::debug!(topic, subscriber_id = id, remaining, "unsubscribed");
        true
    }
}

/// Many-producer, many-consumer broadcaster keyed by topic string.
///
/// Cloning is cheap and yields a handle to the same set of topics.
pub struct Broadcaster<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Broadcaster<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("capacity", &self.inner.capacity)
            .field("topics", &self.topic_count())
            .finish()
    }
}

impl<T: Clone + Send + 'static> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Broadcaster<T> {
    /// Number of live subscribers on `topic`
    pub fn subscriber_count(&self, topic: &str) -> usize {
        let topics = self
            .inner
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        topics.get(topic).map_or(0, Vec::len)
    }

    /// Number of topics with at least one subscriber
    pub fn topic_count(&self) -> usize {
        let topics = self
            .inner
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        topics.len()
    }
}

impl<T: Clone + Send + 'static> Broadcaster<T> {
    /// Broadcaster whose subscribers buffer `DEFAULT_SUBSCRIBER_CAPACITY` messages
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SUBSCRIBER_CAPACITY)
    }

    /// Broadcaster whose subscribers buffer `capacity` messages (at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                capacity: capacity.max(1),
                next_id: AtomicU64::new(1),
                topics: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Register a new subscriber channel under `topic`.
    ///
    /// The returned handle unsubscribes itself when dropped.
    pub fn subscribe(&self, topic: &str) -> Subscription<T> {
        let (sender, receiver) = mpsc::channel(self.inner.capacity);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        let count = {
            let mut topics = self
                .inner
                .topics
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let subscribers = topics.entry(topic.to_string()).or_default();
            subscribers.push(Subscriber { id, sender });
            subscribers.len()
        };
        tracing::debug!(topic, subscriber_id = id, count, "subscribed");

        Subscription {
            topic: topic.to_string(),
            id,
            receiver,
            broadcaster: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `message` to every subscriber of `topic` without waiting.
    ///
    /// Returns how many subscribers accepted the message. Full or closed
    /// subscriber channels miss this message; a topic without subscribers
    /// simply discards it.
    pub fn publish(&self, topic: &str, message: T) -> usize {
        let topics = self
            .inner
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(subscribers) = topics.get(topic) else {
            return 0;
        };

        let mut delivered = 0;
        for subscriber in subscribers {
            match subscriber.sender.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        topic,
                        subscriber_id = subscriber.id,
                        "subscriber channel is full, dropping message"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(
                        topic,
                        subscriber_id = subscriber.id,
                        "subscriber channel is closed, dropping message"
                    );
                }
            }
        }
        delivered
    }

    /// Remove `subscription` from `topic` and close its channel.
    ///
    /// Buffered messages can still be received; after them the reader sees the
    /// end of the stream. Returns `false` (and changes nothing) if the handle is
    /// not registered under `topic`, e.g. when it was already unsubscribed.
    pub fn unsubscribe(&self, topic: &str, subscription: &Subscription<T>) -> bool {
        if !subscription.belongs_to(&self.inner) {
            return false;
        }
        self.inner.remove(topic, subscription.id)
    }
}

/// Receive side of one subscriber's channel
pub struct Subscription<T> {
    topic: String,
    id: u64,
    receiver: mpsc::Receiver<T>,
    broadcaster: Weak<Inner<T>>,
}

impl<T> Subscription<T> {
    /// Topic this subscription was registered under
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next message; `None` once unsubscribed and drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Take a buffered message without waiting.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.receiver.try_recv()
    }

    fn belongs_to(&self, inner: &Arc<Inner<T>>) -> bool {
        std::ptr::eq(self.broadcaster.as_ptr(), Arc::as_ptr(inner))
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.broadcaster.upgrade() {
            inner.remove(&self.topic, self.id);
        }
    }
}
