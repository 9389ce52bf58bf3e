use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::intent::{self, Intent};
use crate::location::ResolvedLocation;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(rejection.status(), rejection.body_text())
    }
}

// ─── GET /health ─────────────────────────────────────────────────

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ─── /api/resolve ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub q: Option<String>,
}

/// Body of the POST endpoints. `text` is kept untyped so that non-text
/// payloads reach the resolver and come back as an ordinary failure.
#[derive(Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub text: serde_json::Value,
}

pub async fn resolve_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Json<ResolvedLocation> {
    let start = Instant::now();
    let query = params.q.unwrap_or_default();
    let resolved = state.resolver.resolve(&query);
    log_resolution("GET /api/resolve", &query, &resolved, start);
    Json(resolved)
}

pub async fn resolve_body(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TextBody>, JsonRejection>,
) -> Result<Json<ResolvedLocation>, ApiError> {
    let start = Instant::now();
    let Json(body) = body?;
    let resolved = state.resolver.resolve_value(&body.text);
    log_resolution("POST /api/resolve", &body.text.to_string(), &resolved, start);
    Ok(Json(resolved))
}

// ─── POST /api/route ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct RouteResponse {
    /// Absent when the message is not text and cannot be classified.
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ResolvedLocation>,
}

pub async fn route_message(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TextBody>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
    let start = Instant::now();
    let Json(body) = body?;

    let response = match body.text.as_str() {
        Some(text) => match intent::classify(text) {
            Intent::Weather => RouteResponse {
                intent: Some(Intent::Weather),
                location: Some(state.resolver.resolve(text)),
            },
            Intent::Chat => RouteResponse { intent: Some(Intent::Chat), location: None },
        },
        None => RouteResponse {
            intent: None,
            location: Some(state.resolver.resolve_value(&body.text)),
        },
    };

    let label = response.intent.map(|i| i.to_string()).unwrap_or_else(|| "-".into());
    tracing::info!(
        intent = %label,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /api/route"
    );
    Ok(Json(response))
}

// ─── GET /api/regions ────────────────────────────────────────────

#[derive(Serialize)]
pub struct RegionInfo {
    pub name: String,
    pub id: String,
    pub districts: Vec<String>,
}

pub async fn region_list(State(state): State<Arc<AppState>>) -> Json<Vec<RegionInfo>> {
    let regions = state
        .resolver
        .gazetteer()
        .entries()
        .iter()
        .map(|e| RegionInfo {
            name: e.name.clone(),
            id: e.id.clone(),
            districts: e.districts.keys().cloned().collect(),
        })
        .collect();
    Json(regions)
}

// ─── Helpers ─────────────────────────────────────────────────────

fn log_resolution(route: &str, query: &str, resolved: &ResolvedLocation, start: Instant) {
    let outcome = match (resolved.city(), resolved.failure()) {
        (Some(_), _) => resolved.display_line(),
        (None, Some(kind)) => kind.to_string(),
        (None, None) => "-".to_string(),
    };
    tracing::info!(
        query,
        outcome = %outcome,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "{}",
        route
    );
}
