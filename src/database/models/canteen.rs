use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::models::Menu;
use crate::types::Patch;

/// A dining facility. `id` is an opaque server-generated string, immutable
/// after create.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Canteen {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

/// Canteen annotated with its signature menus, as returned by the
/// eager-join list query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CanteenWithMenus {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub signature_menus: sqlx::types::Json<Vec<Menu>>,
}

/// Partial-update field set for a canteen. Both columns are non-nullable,
/// so `Patch::Clear` never reaches the repository (validation rejects it).
#[derive(Debug, Clone, Default)]
pub struct CanteenChanges {
    pub name: Patch<String>,
    pub image_url: Patch<String>,
}

impl CanteenChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_keep() && self.image_url.is_keep()
    }
}
