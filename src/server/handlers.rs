//! Request handlers: parse the HTTP shape, call the repository, map the result.

use super::error::{json_response, ApiError};
use super::ApiContext;
use crate::config::ItemPolicy;
use crate::themes::{invalid_codes, normalize_code, FileType, ThemeError};
use crate::utils::path::percent_decode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

// ── Request Types ───────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    #[serde(rename = "fileType", alias = "slot")]
    pub file_type: Option<String>,
}

impl SlotQuery {
    /// Missing or blank selects the `theme` slot.
    pub fn slot(&self) -> Result<FileType, ThemeError> {
        match self.file_type.as_deref().map(str::trim) {
            None | Some("") => Ok(FileType::default()),
            Some(raw) => raw.parse(),
        }
    }
}

// Fields are untyped so a wrong JSON type becomes a validation error rather
// than a body rejection.

#[derive(Debug, Deserialize)]
pub struct CreateThemeRequest {
    pub theme: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub theme_names: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub new_name: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRequest {
    pub theme_name: Option<Value>,
    pub description: Option<Value>,
}

// ── Helpers ─────────────────────────────────────────────

fn respond<T: Serialize>(
    result: Result<T, ThemeError>,
    status: StatusCode,
    fallback: &'static str,
) -> Result<Response, Infallible> {
    Ok(match result {
        Ok(body) => json_response(&body, status),
        Err(e) => ApiError::new(e, fallback).into_response(),
    })
}

fn string_array(value: Option<Value>, message: &str) -> Result<Vec<String>, ThemeError> {
    match value {
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|v| match v {
                Value::String(s) => Ok(s),
                _ => Err(ThemeError::Validation(message.to_string())),
            })
            .collect(),
        _ => Err(ThemeError::Validation(message.to_string())),
    }
}

fn non_empty_string(value: Option<Value>, message: &str) -> Result<String, ThemeError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(ThemeError::Validation(message.to_string())),
    }
}

/// Apply the configured item policy to raw request items.
pub fn prepare_items(policy: ItemPolicy, items: Vec<String>) -> Result<Vec<String>, ThemeError> {
    match policy {
        ItemPolicy::Strict => {
            let invalid = invalid_codes(&items);
            if !invalid.is_empty() {
                return Err(ThemeError::InvalidCodes(invalid));
            }
            Ok(items.iter().map(|item| normalize_code(item)).collect())
        }
        ItemPolicy::Lenient => Ok(items
            .into_iter()
            .map(|item| item.trim().to_string())
            .collect()),
    }
}

// ── Handlers ────────────────────────────────────────────

pub async fn list_themes(
    query: SlotQuery,
    ctx: Arc<ApiContext>,
) -> Result<Response, Infallible> {
    let result = async move {
        let slot = query.slot()?;
        ctx.repository.list_themes(slot).await
    }
    .await;
    respond(result, StatusCode::OK, "Failed to fetch themes")
}

pub async fn get_document(slot: String, ctx: Arc<ApiContext>) -> Result<Response, Infallible> {
    let result = async move {
        let slot: FileType = percent_decode(&slot).parse()?;
        ctx.repository.get_document(slot).await
    }
    .await;
    respond(result, StatusCode::OK, "Failed to fetch data")
}

pub async fn update_metadata(
    slot: String,
    body: MetadataRequest,
    ctx: Arc<ApiContext>,
) -> Result<Response, Infallible> {
    let result = async move {
        let slot: FileType = percent_decode(&slot).parse()?;
        if !slot.accepts_metadata() {
            return Err(ThemeError::InvalidSlot(slot.to_string()));
        }
        let (theme_name, description) = match (body.theme_name, body.description) {
            (Some(Value::String(name)), Some(Value::String(description))) => (name, description),
            _ => {
                return Err(ThemeError::Validation(
                    "themeName and description are required".to_string(),
                ))
            }
        };
        ctx.repository
            .update_metadata(slot, &theme_name, &description)
            .await
    }
    .await;
    respond(result, StatusCode::OK, "Failed to update metadata")
}

pub async fn create_theme(
    query: SlotQuery,
    body: CreateThemeRequest,
    ctx: Arc<ApiContext>,
) -> Result<Response, Infallible> {
    let result = async move {
        let slot = query.slot()?;
        let name = match body.theme {
            Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
            _ => return Err(ThemeError::Validation("Theme name is required".to_string())),
        };
        ctx.repository.add_theme(slot, &name).await
    }
    .await;
    respond(result, StatusCode::CREATED, "Failed to create theme")
}

pub async fn add_items(
    theme_name: String,
    query: SlotQuery,
    body: AddItemsRequest,
    ctx: Arc<ApiContext>,
) -> Result<Response, Infallible> {
    let result = async move {
        let slot = query.slot()?;
        let items = string_array(body.items, "Items array is required")?;
        let items = prepare_items(ctx.item_policy, items)?;
        ctx.repository
            .add_items(slot, &percent_decode(&theme_name), items)
            .await
    }
    .await;
    respond(result, StatusCode::OK, "Failed to add items")
}

pub async fn delete_item(
    theme_name: String,
    item: String,
    query: SlotQuery,
    ctx: Arc<ApiContext>,
) -> Result<Response, Infallible> {
    let result = async move {
        let slot = query.slot()?;
        ctx.repository
            .delete_item(slot, &percent_decode(&theme_name), &percent_decode(&item))
            .await
    }
    .await;
    respond(result, StatusCode::OK, "Failed to delete item")
}

pub async fn reorder_themes(
    query: SlotQuery,
    body: ReorderRequest,
    ctx: Arc<ApiContext>,
) -> Result<Response, Infallible> {
    let result = async move {
        let slot = query.slot()?;
        let names = string_array(body.theme_names, "Theme names array is required")?;
        ctx.repository.reorder_themes(slot, &names).await
    }
    .await;
    respond(result, StatusCode::OK, "Failed to reorder themes")
}

pub async fn rename_theme(
    theme_name: String,
    query: SlotQuery,
    body: RenameRequest,
    ctx: Arc<ApiContext>,
) -> Result<Response, Infallible> {
    let result = async move {
        let slot = query.slot()?;
        let new_name = non_empty_string(body.new_name, "New theme name is required")?;
        ctx.repository
            .rename_theme(slot, &percent_decode(&theme_name), &new_name)
            .await
    }
    .await;
    respond(result, StatusCode::OK, "Failed to rename theme")
}
