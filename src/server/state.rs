//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool, the
//! chat hub and read-receipt queue share their internals through `Arc`s and channels.

use sea_orm::DatabaseConnection;

use crate::server::{
    model::attendance::AttendancePolicy, service::chat::hub::ChatHub,
    worker::read_receipt::ReadReceiptQueue,
};

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the SQLite database.
    pub db: DatabaseConnection,

    /// Per-room broadcast channels for live chat events.
    pub chat_hub: ChatHub,

    /// Queue consumed by the read-receipt worker.
    pub read_receipts: ReadReceiptQueue,

    /// Work-day start and standard hours used for attendance.
    pub attendance_policy: AttendancePolicy,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        chat_hub: ChatHub,
        read_receipts: ReadReceiptQueue,
        attendance_policy: AttendancePolicy,
    ) -> Self {
        Self {
            db,
            chat_hub,
            read_receipts,
            attendance_policy,
        }
    }
}
