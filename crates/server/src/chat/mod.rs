//! Broadcast chat relay.
//!
//! Keeps the registry of open chat connections and fans every inbound
//! message out to all of them, the sender included. Messages are not
//! stored, transformed, or acknowledged.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::Utf8Bytes;
use parking_lot::RwLock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Identifier handed to a connection when it joins.
pub type ConnId = u64;

/// Registry of live chat connections.
///
/// Each entry is a delivery handle only; the socket task owns the
/// connection's lifetime and calls `leave` when it ends. Sends happen
/// outside the lock, so a slow peer never blocks the registry.
pub struct ChatRelay {
    connections: RwLock<HashMap<ConnId, UnboundedSender<Utf8Bytes>>>,
    next_id: AtomicU64,
}

impl ChatRelay {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a connection; returns its id and the mailbox the
    /// socket writer drains.
    pub fn join(&self) -> (ConnId, UnboundedReceiver<Utf8Bytes>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().insert(id, tx);
        info!("[chat] Connection {} joined ({} online)", id, self.online());
        (id, rx)
    }

    /// Drop a connection from the registry.
    pub fn leave(&self, id: ConnId) {
        if self.connections.write().remove(&id).is_some() {
            info!("[chat] Connection {} left ({} online)", id, self.online());
        }
    }

    /// Number of registered connections.
    pub fn online(&self) -> usize {
        self.connections.read().len()
    }

    /// Forward `text` to every connection registered at call time, the
    /// sender included. A connection whose mailbox is gone is pruned;
    /// the rest still receive the message. Returns the number of
    /// successful deliveries.
    pub fn broadcast(&self, text: &str) -> usize {
        let snapshot: Vec<(ConnId, UnboundedSender<Utf8Bytes>)> = self
            .connections
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let payload = Utf8Bytes::from(text);
        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, tx) in snapshot {
            if tx.send(payload.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(id);
            }
        }

        if !dead.is_empty() {
            let mut connections = self.connections.write();
            for id in &dead {
                connections.remove(id);
            }
            debug!("[chat] Pruned {} dead connection(s)", dead.len());
        }

        delivered
    }
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_reaches_everyone_including_sender() {
        let relay = ChatRelay::new();
        let (_a, mut rx_a) = relay.join();
        let (_b, mut rx_b) = relay.join();
        let (_c, mut rx_c) = relay.join();

        let delivered = relay.broadcast("hello room");
        assert_eq!(delivered, 3);

        assert_eq!(rx_a.recv().await.unwrap().as_str(), "hello room");
        assert_eq!(rx_b.recv().await.unwrap().as_str(), "hello room");
        assert_eq!(rx_c.recv().await.unwrap().as_str(), "hello room");
    }

    #[tokio::test]
    async fn test_each_connection_receives_exactly_once() {
        let relay = ChatRelay::new();
        let (_a, mut rx_a) = relay.join();
        let (_b, mut rx_b) = relay.join();

        relay.broadcast("only once");

        assert_eq!(rx_a.recv().await.unwrap().as_str(), "only once");
        assert_eq!(rx_b.recv().await.unwrap().as_str(), "only once");
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dead_connection_is_pruned_and_others_still_receive() {
        let relay = ChatRelay::new();
        let (_a, mut rx_a) = relay.join();
        let (_b, rx_b) = relay.join();
        let (_c, mut rx_c) = relay.join();
        assert_eq!(relay.online(), 3);

        // B drops without saying goodbye.
        drop(rx_b);

        let delivered = relay.broadcast("still here?");
        assert_eq!(delivered, 2);
        assert_eq!(relay.online(), 2);

        assert_eq!(rx_a.recv().await.unwrap().as_str(), "still here?");
        assert_eq!(rx_c.recv().await.unwrap().as_str(), "still here?");

        // B stays pruned from later broadcasts.
        assert_eq!(relay.broadcast("again"), 2);
    }

    #[tokio::test]
    async fn test_leave_removes_connection() {
        let relay = ChatRelay::new();
        let (a, _rx_a) = relay.join();
        let (_b, mut rx_b) = relay.join();

        relay.leave(a);
        assert_eq!(relay.online(), 1);

        // Leaving twice is harmless.
        relay.leave(a);
        assert_eq!(relay.online(), 1);

        assert_eq!(relay.broadcast("bye"), 1);
        assert_eq!(rx_b.recv().await.unwrap().as_str(), "bye");
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_room() {
        let relay = ChatRelay::new();
        assert_eq!(relay.broadcast("anyone?"), 0);
    }
}
