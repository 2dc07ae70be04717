//! HTTP handlers for the recipe endpoints.
//!
//! Identity comes from the `X-User-Id` header set by the authentication layer
//! in front of this service; a missing header means an anonymous viewer.

use super::error::DiscoveryError;
use super::service::CatalogService;
use super::types::*;
use crate::catalog::types::{RecipeId, UserId};

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const VIEWER_HEADER: &str = "x-user-id";

pub fn viewer_from_headers(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(VIEWER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(UserId::new)
}

pub async fn handle_filtered(
    Query(params): Query<FilterParams>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Json<Page<RecipeSummary>>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("discover", %request_id);

    let page = span.in_scope(|| service.discover(&params, viewer.as_ref()))?;
    Ok(Json(page))
}

pub async fn handle_latest(
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Json<Vec<RecipeSummary>>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.latest(viewer.as_ref())?))
}

pub async fn handle_get_recipe(
    Path(id): Path<u64>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Json<RecipeDetails>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.view_recipe(RecipeId(id), viewer.as_ref())?))
}

pub async fn handle_create_recipe(
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
    Json(request): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetails>), DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    let details = service.create_recipe(request, viewer.as_ref(), Utc::now())?;
    Ok((StatusCode::CREATED, Json(details)))
}

pub async fn handle_update_recipe(
    Path(id): Path<u64>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
    Json(request): Json<RecipeRequest>,
) -> Result<Json<RecipeDetails>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.update_recipe(RecipeId(id), request, viewer.as_ref())?))
}

pub async fn handle_own_recipes(
    Query(params): Query<FilterParams>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Json<Page<RecipeSummary>>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.own_recipes(&params, viewer.as_ref())?))
}

pub async fn handle_delete_recipe(
    Path(id): Path<u64>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<StatusCode, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    service.delete_recipe(RecipeId(id), viewer.as_ref())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_rate_recipe(
    Path(id): Path<u64>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
    Json(request): Json<RateRequest>,
) -> Result<Json<RatingResponse>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.rate_recipe(
        RecipeId(id),
        request.value,
        viewer.as_ref(),
    )?))
}

pub async fn handle_add_favorite(
    Path(id): Path<u64>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Json<FavoriteResponse>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.set_favorite(RecipeId(id), viewer.as_ref(), true)?))
}

pub async fn handle_remove_favorite(
    Path(id): Path<u64>,
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Json<FavoriteResponse>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.set_favorite(RecipeId(id), viewer.as_ref(), false)?))
}

pub async fn handle_favorites(
    headers: HeaderMap,
    Extension(service): Extension<Arc<CatalogService>>,
) -> Result<Json<Vec<RecipeSummary>>, DiscoveryError> {
    let viewer = viewer_from_headers(&headers);
    Ok(Json(service.favorites(viewer.as_ref())?))
}
