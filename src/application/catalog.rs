//! Catalog reads and writes behind the response cache.

use std::sync::Arc;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::application::repos::{CatalogRepo, ProductDraft, ProductPatch, RepoError};
use crate::application::sanitize::{self, FieldError, MAX_NAME_LEN};
use crate::domain::catalog::ProductRecord;
use crate::domain::types::Unit;
use crate::infra::cache::ResponseCache;

/// Cache key prefix shared by every catalog read; writes invalidate it
/// wholesale.
pub const CATALOG_PREFIX: &str = "catalog/";

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] FieldError),
    #[error("product not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Service facade over the catalog store. Read paths memoize their JSON
/// payloads in the response cache; every successful write invalidates the
/// catalog prefix before returning.
pub struct CatalogService {
    repo: Arc<dyn CatalogRepo>,
    cache: ResponseCache,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepo>, cache: ResponseCache) -> Self {
        Self { repo, cache }
    }

    /// Clamp a requested page size into the supported range.
    pub fn clamp_limit(limit: Option<i64>) -> i64 {
        limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn clamp_offset(offset: Option<i64>) -> i64 {
        offset.unwrap_or(0).max(0)
    }

    /// Paginated product listing. `include_inactive` is only reachable from
    /// the admin surface.
    pub async fn list(
        &self,
        include_inactive: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Value, CatalogError> {
        let key = list_key(include_inactive, limit, offset);
        if let Some(payload) = self.cache.get(&key).await {
            return Ok(payload);
        }

        let products = self
            .repo
            .list_products(include_inactive, limit, offset)
            .await?;
        let total = self.repo.count_products(include_inactive).await?;
        let count = products.len();
        let payload = json!({
            "products": products,
            "count": count,
            "total": total,
            "limit": limit,
            "offset": offset,
        });
        self.cache.put(key, payload.clone()).await;
        Ok(payload)
    }

    /// Fetch a single active product by id.
    pub async fn fetch(&self, id: i64) -> Result<Value, CatalogError> {
        let key = product_key(id);
        if let Some(payload) = self.cache.get(&key).await {
            return Ok(payload);
        }

        let product = self
            .repo
            .get_product(id)
            .await?
            .ok_or(CatalogError::NotFound)?;
        let payload = json!({ "product": product });
        self.cache.put(key, payload.clone()).await;
        Ok(payload)
    }

    pub async fn create(&self, body: &Value) -> Result<ProductRecord, CatalogError> {
        let draft = parse_draft(body)?;
        let record = self.repo.create_product(draft).await?;
        self.cache.invalidate_prefix(CATALOG_PREFIX).await;
        debug!(target: "bottega::catalog", id = record.id, "product created");
        Ok(record)
    }

    pub async fn update(&self, id: i64, body: &Value) -> Result<(), CatalogError> {
        let patch = parse_patch(body)?;
        if patch.is_empty() {
            return Err(FieldError::new("body", "no recognized fields to update").into());
        }
        if !self.repo.update_product(id, patch).await? {
            return Err(CatalogError::NotFound);
        }
        self.cache.invalidate_prefix(CATALOG_PREFIX).await;
        debug!(target: "bottega::catalog", id, "product updated");
        Ok(())
    }

    /// Soft delete. Deleting an absent or already-inactive product reports
    /// not-found rather than a second success.
    pub async fn remove(&self, id: i64) -> Result<(), CatalogError> {
        if !self.repo.soft_delete_product(id).await? {
            return Err(CatalogError::NotFound);
        }
        self.cache.invalidate_prefix(CATALOG_PREFIX).await;
        debug!(target: "bottega::catalog", id, "product soft-deleted");
        Ok(())
    }
}

fn list_key(include_inactive: bool, limit: i64, offset: i64) -> String {
    format!("{CATALOG_PREFIX}products?include_inactive={include_inactive}&limit={limit}&offset={offset}")
}

fn product_key(id: i64) -> String {
    format!("{CATALOG_PREFIX}product/{id}")
}

fn parse_draft(body: &Value) -> Result<ProductDraft, FieldError> {
    let name = sanitize::required_text(
        "name",
        body.get("name").and_then(Value::as_str),
        MAX_NAME_LEN,
    )?;
    // Invariant: price > 0 on create.
    let price = sanitize::positive_decimal("price", body.get("price"))?;
    let description = sanitize::optional_text(body.get("description").and_then(Value::as_str))
        .unwrap_or_default();
    let image = sanitize::optional_text(body.get("image").and_then(Value::as_str));
    let unit = sanitize::unit("unit", body.get("unit"))?.unwrap_or(Unit::Piece);
    let stock_quantity = match body.get("stock_quantity") {
        None | Some(Value::Null) => 0,
        Some(value) => match value.as_i64() {
            Some(qty) if qty >= 0 => qty,
            _ => return Err(FieldError::new("stock_quantity", "must not be negative")),
        },
    };
    let sort_order = match body.get("sort_order") {
        None | Some(Value::Null) => 1,
        Some(value) => match value.as_i64() {
            Some(order) if order > 0 && order <= i64::from(i32::MAX) => order as i32,
            _ => return Err(FieldError::new("sort_order", "must be a positive integer")),
        },
    };

    Ok(ProductDraft {
        name,
        price,
        description,
        image,
        unit,
        stock_quantity,
        sort_order,
    })
}

fn parse_patch(body: &Value) -> Result<ProductPatch, FieldError> {
    let mut patch = ProductPatch::default();
    if body.get("name").is_some() {
        patch.name = Some(sanitize::required_text(
            "name",
            body.get("name").and_then(Value::as_str),
            MAX_NAME_LEN,
        )?);
    }
    if body.get("price").is_some() {
        patch.price = Some(sanitize::positive_decimal("price", body.get("price"))?);
    }
    if let Some(value) = body.get("description") {
        patch.description =
            Some(sanitize::optional_text(value.as_str()).unwrap_or_default());
    }
    if let Some(value) = body.get("image") {
        patch.image = sanitize::optional_text(value.as_str());
    }
    if body.get("unit").is_some() {
        patch.unit = sanitize::unit("unit", body.get("unit"))?;
    }
    if let Some(value) = body.get("stock_quantity") {
        patch.stock_quantity = match value.as_i64() {
            Some(qty) if qty >= 0 => Some(qty),
            _ => return Err(FieldError::new("stock_quantity", "must not be negative")),
        };
    }
    if let Some(value) = body.get("sort_order") {
        patch.sort_order = match value.as_i64() {
            Some(order) if order > 0 && order <= i64::from(i32::MAX) => Some(order as i32),
            _ => return Err(FieldError::new("sort_order", "must be a positive integer")),
        };
    }
    Ok(patch)
}
