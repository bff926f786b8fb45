use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Canteen, CanteenChanges, CanteenWithMenus, Menu, MenuChanges};

/// Errors from the repository layer.
///
/// The kind discriminator survives up to the logging boundary; everything
/// here collapses to a generic 500 on the wire.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("database transport error: {0}")]
    Transport(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("{0} affected no rows")]
    NoRowsAffected(&'static str),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // SQLSTATE class 23 = integrity constraint violation
            sqlx::Error::Database(db)
                if db.code().is_some_and(|c| c.starts_with("23")) =>
            {
                RepositoryError::Constraint(db.message().to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Tls(_) => RepositoryError::Transport(err.to_string()),
            _ => RepositoryError::Query(err.to_string()),
        }
    }
}

/// Boundary abstraction over the datastore: every method issues exactly one
/// parameterized statement and reports its outcome as rows, an absence, or
/// an error. Handlers hold this behind `Arc<dyn Repository>` so tests can
/// substitute an in-memory double.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), RepositoryError>;

    async fn list_canteens_with_signature_menus(
        &self,
    ) -> Result<Vec<CanteenWithMenus>, RepositoryError>;

    async fn insert_canteen(&self, canteen: &Canteen) -> Result<(), RepositoryError>;

    /// Applies the supplied changes; `None` means no row matched the id.
    async fn update_canteen(
        &self,
        id: &str,
        changes: CanteenChanges,
    ) -> Result<Option<Canteen>, RepositoryError>;

    /// `false` means no row matched the id.
    async fn delete_canteen(&self, id: &str) -> Result<bool, RepositoryError>;

    async fn list_menus(&self) -> Result<Vec<Menu>, RepositoryError>;

    async fn insert_menu(&self, menu: &Menu) -> Result<(), RepositoryError>;

    async fn update_menu(
        &self,
        id: &str,
        changes: MenuChanges,
    ) -> Result<Option<Menu>, RepositoryError>;

    async fn delete_menu(&self, id: &str) -> Result<bool, RepositoryError>;
}
