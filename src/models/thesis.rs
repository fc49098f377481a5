use serde::Serialize;
use time::Date;

#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Thesis {
    pub thesis_id: i64,
    pub code: String,
    pub name: String,
    pub start_date: Date,
    pub complete_date: Date,
    pub thesis_start_date: Date,
    pub thesis_end_date: Date,
    /// rich-text report content, stored opaquely
    pub report_file: String,
    pub total_score: Option<f64>,
    pub result: bool,
    pub major_id: i64,
    pub school_year_id: i64,
    pub council_id: i64,
}

#[derive(Debug)]
pub struct NewThesis {
    pub code: String,
    pub name: String,
    pub start_date: Date,
    pub complete_date: Date,
    pub thesis_start_date: Date,
    pub thesis_end_date: Date,
    pub report_file: String,
    pub major_id: i64,
    pub school_year_id: i64,
    pub council_id: i64,
}

/// A student extends a user (shared primary key), studies one major and
/// works on one thesis.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub user_id: i64,
    pub code: String,
    pub full_name: String,
    pub birthday: Date,
    pub address: String,
    pub gpa: f64,
    pub major_id: i64,
    pub thesis_id: i64,
}

#[derive(Debug)]
pub struct NewStudent {
    pub user_id: i64,
    pub code: String,
    pub full_name: String,
    pub birthday: Date,
    pub address: String,
    pub gpa: f64,
    pub major_id: i64,
    pub thesis_id: i64,
}
