//! In-process publish/subscribe hub for chat room events.
//!
//! Each room has its own `broadcast` channel, created on first subscription. Publishing is
//! fire-and-forget: events for rooms without subscribers are dropped and a failed send never
//! surfaces to the caller.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{broadcast, RwLock};

use crate::server::model::chat::ChatEvent;

/// Events buffered per room before slow subscribers start lagging.
const ROOM_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Default)]
pub struct ChatHub {
    rooms: Arc<RwLock<HashMap<i32, broadcast::Sender<ChatEvent>>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a room's events, creating its channel if needed.
    pub async fn subscribe(&self, room_id: i32) -> broadcast::Receiver<ChatEvent> {
        if let Some(sender) = self.rooms.read().await.get(&room_id) {
            return sender.subscribe();
        }

        self.rooms
            .write()
            .await
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Sends an event to the subscribers of its room.
    ///
    /// # Returns
    /// Number of subscribers that received the event; 0 when the room has none.
    pub async fn publish(&self, event: ChatEvent) -> usize {
        let room_id = event.room_id();

        let delivered = match self.rooms.read().await.get(&room_id) {
            Some(sender) => sender.send(event).ok(),
            None => return 0,
        };

        match delivered {
            Some(count) => count,
            None => {
                self.prune(room_id).await;
                0
            }
        }
    }

    /// Drops a room's channel once its last subscriber has gone.
    pub async fn prune(&self, room_id: i32) {
        let mut rooms = self.rooms.write().await;
        if rooms
            .get(&room_id)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            rooms.remove(&room_id);
        }
    }

    #[cfg(test)]
    pub async fn has_room(&self, room_id: i32) -> bool {
        self.rooms.read().await.contains_key(&room_id)
    }
}
