use serde::Serialize;

#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub score_component_id: i64,
    pub name: String,
    pub evaluation_method: Option<String>,
}

/// A weighted column inside a score component.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoreColumn {
    pub score_column_id: i64,
    pub name: String,
    pub weight: f64,
    pub score_component_id: i64,
}

/// One grading event: a council seat scoring a thesis. The per-column
/// values hang off it as score details.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub score_id: i64,
    pub council_detail_id: i64,
    pub thesis_id: i64,
}

#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetail {
    pub score_detail_id: i64,
    pub score_number: f64,
    pub score_id: i64,
    pub score_column_id: i64,
}
