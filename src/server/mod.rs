mod handlers;
mod state;

use axum::Router;
use axum::routing::get;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::location::{Gazetteer, RegionResolver};

pub fn build_router(gazetteer: Arc<Gazetteer>) -> Router {
    let state = Arc::new(AppState {
        resolver: RegionResolver::new(gazetteer),
    });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/resolve", get(handlers::resolve_query).post(handlers::resolve_body))
        .route("/api/route", axum::routing::post(handlers::route_message))
        .route("/api/regions", get(handlers::region_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(gazetteer: Arc<Gazetteer>, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(gazetteer);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Formosa Locator listening on http://{}", addr);
    axum::serve(listener, app).await
}
