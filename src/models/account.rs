use serde::Serialize;

/// A named role with a rich-text description. Users point at exactly one
/// role, and a role cannot be deleted while any user still holds it.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: i64,
    pub name: String,
    pub description: String,
}

/// Application user. The base identity columns (username, password hash,
/// email) are owned by the auth subsystem; this layer stores the profile
/// part (avatar, gender, phone) and the role link.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub avatar: Option<String>,
    pub gender: String,
    pub phone: String,
    pub role_id: i64,
}

/// Field set for inserting a user; the id is assigned by the database.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub avatar: Option<String>,
    pub gender: String,
    pub phone: String,
    pub role_id: i64,
}

/// Administrator record, keyed by the user it extends.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub user_id: i64,
    pub full_name: String,
}
