//! Topic endpoints.
//!
//! Nodes publish through the [`Publisher`] trait. The in-process loopback
//! implementation encodes every message to CDR and hands the bytes to a
//! `flume` queue; the matching [`LoopbackSubscriber`] decodes them again.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use custom_interfaces::RosMessage;
use tracing::{debug, trace};

use crate::error::{NodeError, Result};

pub trait Publisher<T>: Send + Sync {
    fn publish(&self, msg: &T) -> Result<()>;
}

impl<T, P: Publisher<T> + ?Sized> Publisher<T> for Arc<P> {
    fn publish(&self, msg: &T) -> Result<()> {
        (**self).publish(msg)
    }
}

/// Create a connected publisher/subscriber pair on `topic`.
pub fn loopback<T: RosMessage>(topic: &str) -> (LoopbackPublisher<T>, LoopbackSubscriber<T>) {
    let (tx, rx) = flume::unbounded();
    debug!("[PUB] Loopback ready: topic={}, type={}", topic, T::TYPE_NAME);
    (
        LoopbackPublisher {
            topic: topic.to_string(),
            sn: Arc::new(AtomicUsize::new(0)),
            tx,
            _phantom_data: PhantomData,
        },
        LoopbackSubscriber {
            topic: topic.to_string(),
            rx,
            _phantom_data: PhantomData,
        },
    )
}

pub struct LoopbackPublisher<T> {
    topic: String,
    sn: Arc<AtomicUsize>,
    tx: flume::Sender<Vec<u8>>,
    _phantom_data: PhantomData<fn(&T)>,
}

impl<T> Clone for LoopbackPublisher<T> {
    fn clone(&self) -> Self {
        Self {
            topic: self.topic.clone(),
            sn: self.sn.clone(),
            tx: self.tx.clone(),
            _phantom_data: PhantomData,
        }
    }
}

impl<T> LoopbackPublisher<T> {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Number of messages published so far.
    pub fn sequence_number(&self) -> usize {
        self.sn.load(Ordering::Relaxed)
    }
}

impl<T: RosMessage> Publisher<T> for LoopbackPublisher<T> {
    fn publish(&self, msg: &T) -> Result<()> {
        let bytes = msg.to_cdr()?;
        let sn = self.sn.fetch_add(1, Ordering::Relaxed);
        trace!("[PUB] {} sn={} len={}", self.topic, sn, bytes.len());
        self.tx
            .send(bytes)
            .map_err(|_| NodeError::ChannelClosed("topic"))
    }
}

pub struct LoopbackSubscriber<T> {
    topic: String,
    rx: flume::Receiver<Vec<u8>>,
    _phantom_data: PhantomData<fn() -> T>,
}

impl<T: RosMessage> LoopbackSubscriber<T> {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Receive and decode the next message, blocking until one arrives.
    pub fn recv(&self) -> Result<T> {
        let bytes = self.rx.recv().map_err(|_| NodeError::ChannelClosed("topic"))?;
        Ok(T::from_cdr(&bytes)?)
    }

    /// Every queued message, in publication order.
    pub fn drain(&self) -> Result<Vec<T>> {
        self.rx
            .drain()
            .map(|bytes| T::from_cdr(&bytes).map_err(NodeError::from))
            .collect()
    }

    /// Raw CDR payloads still queued.
    pub fn drain_serialized(&self) -> Vec<Vec<u8>> {
        self.rx.drain().collect()
    }

    /// Check if there are messages available in the queue
    pub fn is_ready(&self) -> bool {
        !self.rx.is_empty()
    }
}
