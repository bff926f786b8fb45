//! Shared test harness: an in-memory Repository double plus helpers for
//! driving the real router in-process, so the suite runs without Postgres.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use canteen_api_rust::database::models::{
    Canteen, CanteenChanges, CanteenWithMenus, Menu, MenuChanges,
};
use canteen_api_rust::database::repository::{Repository, RepositoryError};
use canteen_api_rust::state::AppState;
use canteen_api_rust::types::Patch;

/// In-memory stand-in for PgRepository with the same observable contract:
/// rows, absences, and errors — never panics.
#[derive(Default)]
pub struct MemoryRepository {
    canteens: Mutex<Vec<Canteen>>,
    menus: Mutex<Vec<Menu>>,
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn list_canteens_with_signature_menus(
        &self,
    ) -> Result<Vec<CanteenWithMenus>, RepositoryError> {
        let canteens = self.canteens.lock().unwrap();
        let menus = self.menus.lock().unwrap();
        Ok(canteens
            .iter()
            .map(|c| CanteenWithMenus {
                id: c.id.clone(),
                name: c.name.clone(),
                image_url: c.image_url.clone(),
                signature_menus: sqlx::types::Json(
                    menus
                        .iter()
                        .filter(|m| m.signature && m.canteen_id == c.id)
                        .cloned()
                        .collect(),
                ),
            })
            .collect())
    }

    async fn insert_canteen(&self, canteen: &Canteen) -> Result<(), RepositoryError> {
        self.canteens.lock().unwrap().push(canteen.clone());
        Ok(())
    }

    async fn update_canteen(
        &self,
        id: &str,
        changes: CanteenChanges,
    ) -> Result<Option<Canteen>, RepositoryError> {
        let mut canteens = self.canteens.lock().unwrap();
        let Some(canteen) = canteens.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Patch::Set(name) = changes.name {
            canteen.name = name;
        }
        if let Patch::Set(image_url) = changes.image_url {
            canteen.image_url = image_url;
        }
        Ok(Some(canteen.clone()))
    }

    async fn delete_canteen(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut canteens = self.canteens.lock().unwrap();
        let before = canteens.len();
        canteens.retain(|c| c.id != id);
        Ok(canteens.len() < before)
    }

    async fn list_menus(&self) -> Result<Vec<Menu>, RepositoryError> {
        Ok(self.menus.lock().unwrap().clone())
    }

    async fn insert_menu(&self, menu: &Menu) -> Result<(), RepositoryError> {
        self.menus.lock().unwrap().push(menu.clone());
        Ok(())
    }

    async fn update_menu(
        &self,
        id: &str,
        changes: MenuChanges,
    ) -> Result<Option<Menu>, RepositoryError> {
        let mut menus = self.menus.lock().unwrap();
        let Some(menu) = menus.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Patch::Set(name) = changes.name {
            menu.name = name;
        }
        if let Patch::Set(menu_type) = changes.menu_type {
            menu.menu_type = menu_type;
        }
        if let Patch::Set(canteen_id) = changes.canteen_id {
            menu.canteen_id = canteen_id;
        }
        if let Patch::Set(price) = changes.price {
            menu.price = price;
        }
        if let Patch::Set(signature) = changes.signature {
            menu.signature = signature;
        }
        match changes.image_url {
            Patch::Set(image_url) => menu.image_url = Some(image_url),
            Patch::Clear => menu.image_url = None,
            Patch::Keep => {}
        }
        match changes.description {
            Patch::Set(description) => menu.description = Some(description),
            Patch::Clear => menu.description = None,
            Patch::Keep => {}
        }
        Ok(Some(menu.clone()))
    }

    async fn delete_menu(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut menus = self.menus.lock().unwrap();
        let before = menus.len();
        menus.retain(|m| m.id != id);
        Ok(menus.len() < before)
    }
}

/// Router wired to a fresh, empty in-memory repository.
pub fn test_app() -> Router {
    canteen_api_rust::app(AppState::new(Arc::new(MemoryRepository::default())))
}

/// Send one request through the router and decode the JSON envelope.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("router error");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
