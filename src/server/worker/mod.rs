//! Background workers fed through in-process queues.

pub mod read_receipt;
