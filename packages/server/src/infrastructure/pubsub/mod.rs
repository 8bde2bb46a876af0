//! Publish/subscribe fan-out used to push game changes to live viewers.

pub mod broadcaster;

pub use broadcaster::{Broadcaster, DEFAULT_SUBSCRIBER_CAPACITY, Subscription};
