//! Menu endpoints. Same three-stage shape as the canteen handlers, plus the
//! wider partial-update surface (every column is independently patchable).

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Menu, MenuChanges};
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Patch;
use crate::validate::FieldErrors;

const NAME_MAX: usize = 100;
const TYPE_MAX: usize = 100;
const CANTEEN_ID_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 100;
const DELETE_ID_MAX: usize = 100;
const UPDATE_ID_MAX: usize = 256;
const PRICE_MIN: f64 = 1.0;
const PRICE_MAX: f64 = 1_000_000.0;

/// GET /menus
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Menu>> {
    let menus = state.repo.list_menus().await?;
    if menus.is_empty() {
        return Err(ApiError::not_found("menu not found"));
    }
    let count = menus.len();
    Ok(ApiResponse::ok(menus).with_count(count))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenu {
    pub name: String,
    #[serde(rename = "type")]
    pub menu_type: String,
    pub canteen_id: String,
    pub price: f64,
    #[serde(default)]
    pub signature: bool,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl CreateMenu {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.length("name", &self.name, 1, NAME_MAX);
        errors.length("type", &self.menu_type, 1, TYPE_MAX);
        // Existence of the canteen is delegated to the datastore FK
        errors.length("canteenId", &self.canteen_id, 1, CANTEEN_ID_MAX);
        errors.range("price", self.price, PRICE_MIN, PRICE_MAX);
        if let Some(url) = &self.image_url {
            errors.url("imageUrl", url);
        }
        if let Some(description) = &self.description {
            errors.length("description", description, 1, DESCRIPTION_MAX);
        }
        errors.finish("validation failed")
    }
}

/// POST /menus - create with a server-generated id
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenu>,
) -> ApiResult<()> {
    payload.validate()?;

    let menu = Menu {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        menu_type: payload.menu_type,
        canteen_id: payload.canteen_id,
        price: payload.price,
        signature: payload.signature,
        image_url: payload.image_url,
        description: payload.description,
    };
    state.repo.insert_menu(&menu).await?;

    Ok(ApiResponse::created("menu created"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenu {
    pub id: String,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default, rename = "type")]
    pub menu_type: Patch<String>,
    #[serde(default)]
    pub canteen_id: Patch<String>,
    #[serde(default)]
    pub price: Patch<f64>,
    #[serde(default)]
    pub signature: Patch<bool>,
    #[serde(default)]
    pub image_url: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
}

impl UpdateMenu {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.length("id", &self.id, 1, UPDATE_ID_MAX);
        match &self.name {
            Patch::Set(name) => errors.length("name", name, 1, NAME_MAX),
            Patch::Clear => errors.reject("name", "cannot be null"),
            Patch::Keep => {}
        }
        match &self.menu_type {
            Patch::Set(menu_type) => errors.length("type", menu_type, 1, TYPE_MAX),
            Patch::Clear => errors.reject("type", "cannot be null"),
            Patch::Keep => {}
        }
        match &self.canteen_id {
            Patch::Set(canteen_id) => {
                errors.length("canteenId", canteen_id, 1, CANTEEN_ID_MAX)
            }
            Patch::Clear => errors.reject("canteenId", "cannot be null"),
            Patch::Keep => {}
        }
        match &self.price {
            Patch::Set(price) => errors.range("price", *price, PRICE_MIN, PRICE_MAX),
            Patch::Clear => errors.reject("price", "cannot be null"),
            Patch::Keep => {}
        }
        if let Patch::Clear = self.signature {
            errors.reject("signature", "cannot be null");
        }
        // Nullable columns: explicit null clears the stored value
        if let Patch::Set(url) = &self.image_url {
            errors.url("imageUrl", url);
        }
        if let Patch::Set(description) = &self.description {
            errors.length("description", description, 1, DESCRIPTION_MAX);
        }
        errors.finish("validation failed")
    }
}

/// PUT /menus - partial update; omitted fields keep their stored value,
/// an explicit null clears a nullable column
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UpdateMenu>,
) -> ApiResult<Menu> {
    payload.validate()?;

    let changes = MenuChanges {
        name: payload.name,
        menu_type: payload.menu_type,
        canteen_id: payload.canteen_id,
        price: payload.price,
        signature: payload.signature,
        image_url: payload.image_url,
        description: payload.description,
    };

    match state.repo.update_menu(&payload.id, changes).await? {
        Some(menu) => Ok(ApiResponse::ok(menu).with_message("menu updated")),
        None => Err(ApiError::write_failed("update menu")),
    }
}

/// DELETE /menus/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    errors.length("id", &id, 1, DELETE_ID_MAX);
    errors.finish("validation failed")?;

    if state.repo.delete_menu(&id).await? {
        Ok(ApiResponse::ok_message("menu deleted"))
    } else {
        Err(ApiError::not_found("menu not found"))
    }
}
