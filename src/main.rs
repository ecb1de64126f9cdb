mod app;
mod config;
mod db;
mod error;
mod payload;
mod registrations;
mod routes;
mod sessions;
mod state;
mod users;

#[cfg(test)]
mod test_support;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mlmarch=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init()?;

    let report = db::bootstrap(&state.db).await?;
    tracing::info!(
        path = %state.config.database_path.display(),
        seeded = report.seeded,
        "database ready"
    );

    let addr = state.config.bind_addr()?;
    app::serve(app::build_app(state), addr).await
}
