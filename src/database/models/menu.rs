use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::Patch;

/// A dish belonging to exactly one canteen. `signature` marks the canteen's
/// highlighted dishes; `image_url` and `description` are nullable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub name: String,
    // "type" is a reserved word on both sides; the column is selected with
    // an alias and the wire key renamed back.
    #[serde(rename = "type")]
    pub menu_type: String,
    pub canteen_id: String,
    pub price: f64,
    pub signature: bool,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Partial-update field set for a menu. `Clear` is only valid for the
/// nullable columns (`image_url`, `description`).
#[derive(Debug, Clone, Default)]
pub struct MenuChanges {
    pub name: Patch<String>,
    pub menu_type: Patch<String>,
    pub canteen_id: Patch<String>,
    pub price: Patch<f64>,
    pub signature: Patch<bool>,
    pub image_url: Patch<String>,
    pub description: Patch<String>,
}

impl MenuChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_keep()
            && self.menu_type.is_keep()
            && self.canteen_id.is_keep()
            && self.price.is_keep()
            && self.signature.is_keep()
            && self.image_url.is_keep()
            && self.description.is_keep()
    }
}
