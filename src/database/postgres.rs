use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::models::{Canteen, CanteenChanges, CanteenWithMenus, Menu, MenuChanges};
use crate::database::repository::{Repository, RepositoryError};
use crate::types::Patch;

const MENU_COLUMNS: &str =
    r#"id, name, "type" AS menu_type, canteen_id, price, signature, image_url, description"#;

/// Postgres-backed repository. One parameterized statement per call.
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_canteens_with_signature_menus(
        &self,
    ) -> Result<Vec<CanteenWithMenus>, RepositoryError> {
        // json_build_object keys match the wire (serde) names so the Json
        // column deserializes straight into Vec<Menu>.
        let rows = sqlx::query_as::<_, CanteenWithMenus>(
            r#"
            SELECT c.id, c.name, c.image_url,
                   COALESCE(
                       json_agg(json_build_object(
                           'id', m.id,
                           'name', m.name,
                           'type', m."type",
                           'canteenId', m.canteen_id,
                           'price', m.price,
                           'signature', m.signature,
                           'imageUrl', m.image_url,
                           'description', m.description
                       )) FILTER (WHERE m.id IS NOT NULL),
                       '[]'::json
                   ) AS signature_menus
            FROM canteens c
            LEFT JOIN menus m ON m.canteen_id = c.id AND m.signature
            GROUP BY c.id, c.name, c.image_url
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_canteen(&self, canteen: &Canteen) -> Result<(), RepositoryError> {
        let result = sqlx::query("INSERT INTO canteens (id, name, image_url) VALUES ($1, $2, $3)")
            .bind(&canteen.id)
            .bind(&canteen.name)
            .bind(&canteen.image_url)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NoRowsAffected("insert canteen"));
        }
        Ok(())
    }

    async fn update_canteen(
        &self,
        id: &str,
        changes: CanteenChanges,
    ) -> Result<Option<Canteen>, RepositoryError> {
        // Nothing to change: still resolve the id with a single select so
        // the handler can distinguish "no-op" from "no such row".
        if changes.is_empty() {
            let row = sqlx::query_as::<_, Canteen>(
                "SELECT id, name, image_url FROM canteens WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            return Ok(row);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE canteens SET ");
        {
            let mut set = builder.separated(", ");
            if let Patch::Set(name) = changes.name {
                set.push("name = ");
                set.push_bind_unseparated(name);
            }
            if let Patch::Set(image_url) = changes.image_url {
                set.push("image_url = ");
                set.push_bind_unseparated(image_url);
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id, name, image_url");

        let row = builder
            .build_query_as::<Canteen>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_canteen(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM canteens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_menus(&self) -> Result<Vec<Menu>, RepositoryError> {
        let rows = sqlx::query_as::<_, Menu>(&format!("SELECT {} FROM menus", MENU_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_menu(&self, menu: &Menu) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO menus (id, name, "type", canteen_id, price, signature, image_url, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&menu.id)
        .bind(&menu.name)
        .bind(&menu.menu_type)
        .bind(&menu.canteen_id)
        .bind(menu.price)
        .bind(menu.signature)
        .bind(&menu.image_url)
        .bind(&menu.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NoRowsAffected("insert menu"));
        }
        Ok(())
    }

    async fn update_menu(
        &self,
        id: &str,
        changes: MenuChanges,
    ) -> Result<Option<Menu>, RepositoryError> {
        if changes.is_empty() {
            let row = sqlx::query_as::<_, Menu>(&format!(
                "SELECT {} FROM menus WHERE id = $1",
                MENU_COLUMNS
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            return Ok(row);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE menus SET ");
        {
            let mut set = builder.separated(", ");
            if let Patch::Set(name) = changes.name {
                set.push("name = ");
                set.push_bind_unseparated(name);
            }
            if let Patch::Set(menu_type) = changes.menu_type {
                set.push("\"type\" = ");
                set.push_bind_unseparated(menu_type);
            }
            if let Patch::Set(canteen_id) = changes.canteen_id {
                set.push("canteen_id = ");
                set.push_bind_unseparated(canteen_id);
            }
            if let Patch::Set(price) = changes.price {
                set.push("price = ");
                set.push_bind_unseparated(price);
            }
            if let Patch::Set(signature) = changes.signature {
                set.push("signature = ");
                set.push_bind_unseparated(signature);
            }
            match changes.image_url {
                Patch::Set(image_url) => {
                    set.push("image_url = ");
                    set.push_bind_unseparated(image_url);
                }
                Patch::Clear => {
                    set.push("image_url = NULL");
                }
                Patch::Keep => {}
            }
            match changes.description {
                Patch::Set(description) => {
                    set.push("description = ");
                    set.push_bind_unseparated(description);
                }
                Patch::Clear => {
                    set.push("description = NULL");
                }
                Patch::Keep => {}
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(&format!(" RETURNING {}", MENU_COLUMNS));

        let row = builder
            .build_query_as::<Menu>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_menu(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
