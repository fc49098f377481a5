use sqlx::SqlitePool;

use crate::err::DataError;
use crate::models::account::{Admin, NewUser, Role, User};

/// insert a role and return its id
pub async fn insert_role(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> Result<i64, DataError> {
    let result = sqlx::query(r"INSERT INTO roles (name, description) VALUES (?1, ?2);")
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_role(pool: &SqlitePool, role_id: i64) -> Result<Option<Role>, DataError> {
    let role: Option<Role> = sqlx::query_as(r"SELECT * FROM roles WHERE role_id = ?1;")
        .bind(role_id)
        .fetch_optional(pool)
        .await?;
    Ok(role)
}

/// refused while any user still holds the role
pub async fn delete_role(pool: &SqlitePool, role_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM roles WHERE role_id = ?1;")
        .bind(role_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// insert a user and return its id; base identity values come from the
/// auth subsystem
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<i64, DataError> {
    let result = sqlx::query(
        r"INSERT INTO users (username, password, email, avatar, gender, phone, role_id)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
    )
    .bind(user.username.as_str())
    .bind(user.password.as_str())
    .bind(user.email.as_str())
    .bind(user.avatar.as_deref())
    .bind(user.gender.as_str())
    .bind(user.phone.as_str())
    .bind(user.role_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, DataError> {
    let user: Option<User> = sqlx::query_as(r"SELECT * FROM users WHERE user_id = ?1;")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, DataError> {
    let user: Option<User> = sqlx::query_as(r"SELECT * FROM users WHERE username = ?1;")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// deleting a user takes its admin/lecturer/student records with it
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM users WHERE user_id = ?1;")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// attach an admin record to a user; at most one per user since the user
/// id is the primary key
pub async fn insert_admin(
    pool: &SqlitePool,
    user_id: i64,
    full_name: &str,
) -> Result<(), DataError> {
    sqlx::query(r"INSERT INTO admins (user_id, full_name) VALUES (?1, ?2);")
        .bind(user_id)
        .bind(full_name)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_admin(pool: &SqlitePool, user_id: i64) -> Result<Option<Admin>, DataError> {
    let admin: Option<Admin> = sqlx::query_as(r"SELECT * FROM admins WHERE user_id = ?1;")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(admin)
}
