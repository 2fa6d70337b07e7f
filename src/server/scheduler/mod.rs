//! Cron jobs run through `tokio-cron-scheduler`.

pub mod attendance;
