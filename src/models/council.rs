use serde::Serialize;
use time::{Date, PrimitiveDateTime};

/// A grading council. The only entity that carries the created/updated
/// timestamp pair; the store touches `updated_date` on every update.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Council {
    pub council_id: i64,
    pub name: String,
    pub description: String,
    pub is_block: bool,
    pub created_date: PrimitiveDateTime,
    pub updated_date: PrimitiveDateTime,
}

#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub position_id: i64,
    pub name: String,
    pub description: String,
}

/// A lecturer extends a user (shared primary key) and belongs to a faculty.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Lecturer {
    pub user_id: i64,
    pub code: String,
    pub full_name: String,
    pub birthday: Date,
    pub address: String,
    pub faculty_id: i64,
}

#[derive(Debug)]
pub struct NewLecturer {
    pub user_id: i64,
    pub code: String,
    pub full_name: String,
    pub birthday: Date,
    pub address: String,
    pub faculty_id: i64,
}

/// A lecturer's seat on a council, with the position held there.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CouncilDetail {
    pub council_detail_id: i64,
    pub lecturer_id: i64,
    pub council_id: i64,
    pub position_id: i64,
}
