use serde::Serialize;
use time::Date;

#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SchoolYear {
    pub school_year_id: i64,
    pub start_year: Date,
    pub end_year: Date,
}

#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub faculty_id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
}

/// A major belongs to one faculty and goes away with it.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Major {
    pub major_id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub faculty_id: i64,
}
