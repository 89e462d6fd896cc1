// Route handlers for the items and stats API.
// Parse and validate request input, then delegate to the store or stats cache.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use crate::error::{CatalogError, INVALID_PAGINATION, INVALID_PAYLOAD, Result};
use crate::model::{DEFAULT_PAGE_SIZE, Item, ItemCount, NewItem, Page, Stats};

use super::AppState;

/// Query string of `GET /api/items`. Numbers stay raw so bad input maps to 400.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> Result<Page> {
        let limit = parse_positive(self.limit.as_deref(), u64::from(DEFAULT_PAGE_SIZE))?;
        let page = parse_positive(self.page.as_deref(), 1)?;
        Page::new(page, limit)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CountParams {
    #[serde(default)]
    pub q: String,
}

/// Body of `POST /api/items`. Fields are optional so missing ones map to 400.
#[derive(Debug, Default, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
}

impl CreateItemRequest {
    pub fn validate(self) -> Result<NewItem> {
        match (self.name, self.category, self.price) {
            (Some(name), Some(category), Some(price)) => NewItem::new(name, category, price),
            _ => Err(CatalogError::invalid(INVALID_PAYLOAD)),
        }
    }
}

/// Parse a pagination value. Integers too large for `u64` saturate.
fn parse_positive(raw: Option<&str>, default: u64) -> Result<u64> {
    let Some(value) = raw.map(str::trim) else {
        return Ok(default);
    };
    match value.parse::<u64>() {
        Ok(n) => Ok(n),
        Err(_) if is_digits(value) => Ok(u64::MAX),
        Err(_) => Err(CatalogError::invalid(INVALID_PAGINATION)),
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a path id. Integers that cannot be a stored id are reported as missing.
fn parse_item_id(raw: &str) -> Result<u64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !is_digits(digits) {
        return Err(CatalogError::invalid("Invalid item ID"));
    }
    raw.parse::<u64>()
        .map_err(|_| CatalogError::not_found("Item not found"))
}

pub async fn list_items(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Item>>> {
    let Query(params) = params.map_err(|_| CatalogError::invalid(INVALID_PAGINATION))?;
    let page = params.page()?;
    let items = state.store.list(&params.q, page).await?;
    Ok(Json(items))
}

pub async fn count_items(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Result<Json<ItemCount>> {
    let total = state.store.count(&params.q).await?;
    Ok(Json(ItemCount {
        total: total as u64,
    }))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id = parse_item_id(&id)?;
    let item = state.store.get(id).await?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let Json(request) = payload.map_err(|_| CatalogError::invalid(INVALID_PAYLOAD))?;
    let new = request.validate()?;
    let item = state.store.create(new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    Json(state.stats.snapshot().await.stats())
}

pub async fn route_not_found() -> CatalogError {
    CatalogError::not_found("Route not found")
}
