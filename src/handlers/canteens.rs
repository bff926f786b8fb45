//! Canteen endpoints: each handler validates its input, makes exactly one
//! repository call, and maps the outcome to the response envelope.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Canteen, CanteenChanges, CanteenWithMenus};
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Patch;
use crate::validate::FieldErrors;

// One set of bounds per field, shared by create and update
const NAME_MAX: usize = 255;
const ID_MAX: usize = 100;

/// GET /canteens - all canteens, each annotated with its signature menus
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CanteenWithMenus>> {
    let canteens = state.repo.list_canteens_with_signature_menus().await?;
    if canteens.is_empty() {
        return Err(ApiError::not_found("canteen not found"));
    }
    let count = canteens.len();
    Ok(ApiResponse::ok(canteens).with_count(count))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCanteen {
    pub name: String,
    pub image_url: String,
}

impl CreateCanteen {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.length("name", &self.name, 1, NAME_MAX);
        errors.url("imageUrl", &self.image_url);
        errors.finish("validation failed")
    }
}

/// POST /canteens - create with a server-generated id
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCanteen>,
) -> ApiResult<()> {
    payload.validate()?;

    let canteen = Canteen {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        image_url: payload.image_url,
    };
    state.repo.insert_canteen(&canteen).await?;

    Ok(ApiResponse::created("canteen created"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCanteen {
    pub id: String,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub image_url: Patch<String>,
}

impl UpdateCanteen {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.length("id", &self.id, 1, ID_MAX);
        match &self.name {
            Patch::Set(name) => errors.length("name", name, 1, NAME_MAX),
            Patch::Clear => errors.reject("name", "cannot be null"),
            Patch::Keep => {}
        }
        match &self.image_url {
            Patch::Set(url) => errors.url("imageUrl", url),
            Patch::Clear => errors.reject("imageUrl", "cannot be null"),
            Patch::Keep => {}
        }
        errors.finish("validation failed")
    }
}

/// PUT /canteens - partial update; omitted fields keep their stored value
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCanteen>,
) -> ApiResult<Canteen> {
    payload.validate()?;

    let changes = CanteenChanges {
        name: payload.name,
        image_url: payload.image_url,
    };

    match state.repo.update_canteen(&payload.id, changes).await? {
        Some(canteen) => Ok(ApiResponse::ok(canteen).with_message("canteen updated")),
        // Contract: an update that matched no row is a 500, not a 404
        None => Err(ApiError::write_failed("update canteen")),
    }
}

/// DELETE /canteens/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    errors.length("id", &id, 1, ID_MAX);
    errors.finish("validation failed")?;

    if state.repo.delete_canteen(&id).await? {
        Ok(ApiResponse::ok_message("canteen deleted"))
    } else {
        Err(ApiError::not_found("canteen not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_empty_name_and_bad_url() {
        let payload = CreateCanteen { name: String::new(), image_url: "nope".into() };
        assert!(payload.validate().is_err());

        let payload = CreateCanteen {
            name: "Canteen A".into(),
            image_url: "https://x.test/a.png".into(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_name_bound_is_255_chars() {
        let payload = CreateCanteen {
            name: "a".repeat(255),
            image_url: "https://x.test/a.png".into(),
        };
        assert!(payload.validate().is_ok());

        let payload = CreateCanteen {
            name: "a".repeat(256),
            image_url: "https://x.test/a.png".into(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_rejects_null_on_non_nullable_fields() {
        let payload: UpdateCanteen =
            serde_json::from_str(r#"{"id": "abc", "name": null}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: UpdateCanteen = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn update_id_bound_is_100_chars() {
        let payload: UpdateCanteen =
            serde_json::from_value(serde_json::json!({"id": "a".repeat(100)})).unwrap();
        assert!(payload.validate().is_ok());

        let payload: UpdateCanteen =
            serde_json::from_value(serde_json::json!({"id": "a".repeat(101)})).unwrap();
        assert!(payload.validate().is_err());
    }
}
