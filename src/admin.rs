//! Administrative editing surface for roles: the list/search/filter views
//! and a validated edit form. The description field carries the rich-text
//! payload produced by the editor widget; it is stored opaquely.

use log::info;
use sqlx::SqlitePool;

use crate::err::DataError;
use crate::models::account::Role;
use crate::store::account;

/// the list view: id, name, description
pub async fn list(pool: &SqlitePool) -> Result<Vec<Role>, DataError> {
    let roles: Vec<Role> = sqlx::query_as(r"SELECT * FROM roles ORDER BY role_id;")
        .fetch_all(pool)
        .await?;
    Ok(roles)
}

/// search on id and name: exact id match or case-insensitive name substring
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<Role>, DataError> {
    let pattern = format!("%{}%", term);
    let roles: Vec<Role> = sqlx::query_as(
        r"SELECT * FROM roles
          WHERE CAST(role_id AS TEXT) = ?1 OR name LIKE ?2
          ORDER BY role_id;",
    )
    .bind(term)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;
    Ok(roles)
}

/// the exact-name filter view
pub async fn filter_by_name(pool: &SqlitePool, name: &str) -> Result<Vec<Role>, DataError> {
    let roles: Vec<Role> = sqlx::query_as(r"SELECT * FROM roles WHERE name = ?1 ORDER BY role_id;")
        .bind(name)
        .fetch_all(pool)
        .await?;
    Ok(roles)
}

pub async fn get(pool: &SqlitePool, role_id: i64) -> Result<Option<Role>, DataError> {
    account::get_role(pool, role_id).await
}

/// refused while any user still holds the role
pub async fn remove(pool: &SqlitePool, role_id: i64) -> Result<(), DataError> {
    account::delete_role(pool, role_id).await?;
    info!("deleted role {}", role_id);
    Ok(())
}

/// Edit form for a role. With no id it creates; with an id it updates.
#[derive(Debug, Default)]
pub struct RoleForm {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl RoleForm {
    fn validate(&self) -> Result<(), DataError> {
        if self.name.trim().is_empty() {
            return Err(DataError::InvalidForm("name must not be empty".to_string()));
        }
        if self.name.chars().count() > 20 {
            return Err(DataError::InvalidForm(
                "name must be at most 20 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// validate and persist; returns the role id
    pub async fn save(&self, pool: &SqlitePool) -> Result<i64, DataError> {
        self.validate()?;
        match self.id {
            None => {
                let role_id = account::insert_role(pool, &self.name, &self.description).await?;
                info!("created role {}", role_id);
                Ok(role_id)
            }
            Some(role_id) => {
                let result =
                    sqlx::query(r"UPDATE roles SET name = ?1, description = ?2 WHERE role_id = ?3;")
                        .bind(&self.name)
                        .bind(&self.description)
                        .bind(role_id)
                        .execute(pool)
                        .await?;
                if result.rows_affected() == 0 {
                    return Err(DataError::Sqlx(sqlx::Error::RowNotFound));
                }
                info!("updated role {}", role_id);
                Ok(role_id)
            }
        }
    }
}
