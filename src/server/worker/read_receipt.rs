//! Applies chat read receipts off the request path.
//!
//! Handlers enqueue a `ReadReceipt` and return immediately. A single worker task drains the
//! queue and moves each member's read marker forward.

use sea_orm::DatabaseConnection;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::server::{data::chat_room::ChatRoomRepository, model::chat::ReadReceipt};

/// Sending half of the read-receipt queue, cloned into `AppState`.
#[derive(Clone)]
pub struct ReadReceiptQueue {
    tx: mpsc::UnboundedSender<ReadReceipt>,
}

impl ReadReceiptQueue {
    /// Creates the queue and its receiving half for `spawn_worker`.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReadReceipt>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueues a receipt. A stopped worker only loses the receipt.
    pub fn enqueue(&self, receipt: ReadReceipt) {
        if self.tx.send(receipt).is_err() {
            tracing::warn!(
                "Read receipt worker stopped, dropping receipt for room {}",
                receipt.room_id
            );
        }
    }
}

/// Spawns the worker; it exits once every queue handle is dropped.
pub fn spawn_worker(
    db: DatabaseConnection,
    mut rx: mpsc::UnboundedReceiver<ReadReceipt>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(receipt) = rx.recv().await {
            if let Err(e) = apply(&db, receipt).await {
                tracing::error!(
                    "Failed to mark room {} read for user {}: {}",
                    receipt.room_id,
                    receipt.user_id,
                    e
                );
            }
        }

        tracing::debug!("Read receipt worker stopped");
    })
}

async fn apply(db: &DatabaseConnection, receipt: ReadReceipt) -> Result<(), sea_orm::DbErr> {
    ChatRoomRepository::new(db)
        .mark_read(receipt.room_id, receipt.user_id, receipt.message_id)
        .await?;

    Ok(())
}
