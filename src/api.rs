//! HTTP surface: public read endpoints with language selection and a
//! short-lived response cache, plus the authenticated admin CRUD surface.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::cache::FaqCache;
use crate::errors::AppError;
use crate::i18n::Language;
use crate::model::{FaqPatch, NewFaq};
use crate::security::admin_key_matches;
use crate::service::FaqService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FaqService>,
    /// Short-TTL cache for rendered read responses; independent of the
    /// field-level resolution cache.
    pub response_cache: Arc<dyn FaqCache>,
    pub response_ttl: Duration,
    pub admin_api_key: Option<String>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the key for the auth layer
    let admin_key = state.admin_api_key.clone();

    let admin_routes = Router::new()
        .route("/faqs", get(admin_list_faqs).post(admin_create_faq))
        .route(
            "/faqs/:id",
            get(admin_get_faq).put(admin_update_faq).delete(admin_delete_faq),
        )
        .route("/faqs/:id/retranslate", post(admin_retranslate_faq))
        .layer(middleware::from_fn(move |req, next| {
            admin_auth(admin_key.clone(), req, next)
        }));

    let public_routes = Router::new()
        .route("/faqs", get(list_faqs))
        .route("/faqs/:id", get(get_faq));

    Router::new()
        .nest("/api/admin", admin_routes)
        .nest("/api", public_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// API-key guard for the admin surface.
async fn admin_auth(admin_key: Option<String>, req: Request, next: Next) -> Response {
    let provided = req
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    if admin_key_matches(admin_key.as_deref(), provided) {
        next.run(req).await
    } else {
        AppError::Unauthorized("invalid or missing API key".to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

impl LangQuery {
    /// Requested language, defaulting to the canonical one; unknown codes
    /// are a validation error.
    fn language(&self) -> Result<Language, AppError> {
        match &self.lang {
            None => Ok(Language::canonical()),
            Some(code) => {
                Language::from_code(code).map_err(|e| AppError::Validation(e.to_string()))
            }
        }
    }
}

fn list_cache_key(language: Language) -> String {
    format!("resp_faqs_{}", language.code())
}

fn item_cache_key(id: i64, language: Language) -> String {
    format!("resp_faq_{}_{}", id, language.code())
}

fn json_body(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Serve from the response cache, or build, cache, and serve.
async fn cached_response<F, Fut>(
    state: &AppState,
    key: &str,
    build: F,
) -> Result<Response, AppError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<String, AppError>>,
{
    match state.response_cache.get(key).await {
        Ok(Some(body)) if !body.is_empty() => return Ok(json_body(body)),
        Ok(_) => {}
        Err(e) => warn!("Response cache read failed for {}: {}", key, e),
    }

    let body = build().await?;
    if let Err(e) = state.response_cache.set(key, &body, state.response_ttl).await {
        warn!("Response cache write failed for {}: {}", key, e);
    }
    Ok(json_body(body))
}

/// Drop every cached response that could mention this record.
async fn evict_response_cache(state: &AppState, id: i64) {
    for language in Language::all_enabled() {
        for key in [list_cache_key(language), item_cache_key(id, language)] {
            if let Err(e) = state.response_cache.delete(&key).await {
                warn!("Response cache eviction failed for {}: {}", key, e);
            }
        }
    }
}

// ==================== Public Handlers ====================

/// GET /api/faqs - List active FAQs resolved into the requested language.
async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Response, AppError> {
    let language = query.language()?;
    let key = list_cache_key(language);

    cached_response(&state, &key, || async {
        let faqs = state.service.list_resolved(language).await?;
        serde_json::to_string(&faqs).map_err(|e| AppError::Internal(e.into()))
    })
    .await
}

/// GET /api/faqs/:id - Single active FAQ resolved into the requested language.
async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
) -> Result<Response, AppError> {
    let language = query.language()?;
    let key = item_cache_key(id, language);

    cached_response(&state, &key, || async {
        let faq = state.service.get_resolved(id, language).await?;
        serde_json::to_string(&faq).map_err(|e| AppError::Internal(e.into()))
    })
    .await
}

// ==================== Admin Handlers ====================

/// GET /api/admin/faqs - All records with every language variant.
async fn admin_list_faqs(State(state): State<AppState>) -> Result<Response, AppError> {
    let faqs = state.service.list_all().await?;
    Ok(Json(faqs).into_response())
}

/// POST /api/admin/faqs - Create a record (runs auto-translation).
async fn admin_create_faq(
    State(state): State<AppState>,
    Json(request): Json<NewFaq>,
) -> Result<Response, AppError> {
    let faq = state.service.create(request).await?;
    evict_response_cache(&state, faq.id).await;
    Ok((StatusCode::CREATED, Json(faq)).into_response())
}

/// GET /api/admin/faqs/:id - Full record.
async fn admin_get_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let faq = state.service.get(id).await?;
    Ok(Json(faq).into_response())
}

/// PUT /api/admin/faqs/:id - Partial update (never translates).
async fn admin_update_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<FaqPatch>,
) -> Result<Response, AppError> {
    let faq = state.service.update(id, patch).await?;
    evict_response_cache(&state, id).await;
    Ok(Json(faq).into_response())
}

/// POST /api/admin/faqs/:id/retranslate - Explicit re-translation.
async fn admin_retranslate_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let faq = state.service.retranslate(id).await?;
    evict_response_cache(&state, id).await;
    Ok(Json(faq).into_response())
}

/// DELETE /api/admin/faqs/:id - Remove a record.
async fn admin_delete_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    state.service.delete(id).await?;
    evict_response_cache(&state, id).await;
    Ok(StatusCode::NO_CONTENT.into_response())
}
