mod model;
mod server;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::server::{
    config::Config,
    error::AppError,
    model::attendance::AttendancePolicy,
    router, scheduler,
    service::chat::hub::ChatHub,
    startup,
    state::AppState,
    worker::read_receipt::{self, ReadReceiptQueue},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let cors = startup::cors_layer(&config)?;

    let policy = AttendancePolicy {
        work_day_start: config.work_day_start,
        standard_work_hours: config.standard_work_hours,
    };

    let (read_receipts, receipt_rx) = ReadReceiptQueue::new();
    read_receipt::spawn_worker(db.clone(), receipt_rx);

    // Kept alive for the lifetime of the server.
    let _scheduler = scheduler::attendance::start_scheduler(db.clone(), policy).await?;

    let state = AppState::new(db, ChatHub::new(), read_receipts, policy);

    let app = router::router()
        .with_state(state)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
