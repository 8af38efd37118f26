use std::net::SocketAddr;
use std::sync::Arc;
use stopover_api::{app, AppState};
use stopover_store::{app_config::Config, FixtureOfferSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stopover_api=debug,stopover_evaluator=debug,stopover_store=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting stopover planner on port {}", config.server.port);
    tracing::info!(
        "Ranking: top_k={}, bonus_per_match={}, max_bonus={:?}",
        config.ranking.top_k,
        config.ranking.bonus_per_match,
        config.ranking.max_bonus
    );

    let source = FixtureOfferSource::new(&config.offers.fixture_dir);
    tracing::info!("Serving offers from {}", source.dir().display());

    let app_state = AppState::new(Arc::new(source), config.ranking.clone());
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
