use log::info;
use sqlx::SqlitePool;

use crate::err::DataError;
use crate::models::score::{Score, ScoreColumn, ScoreComponent, ScoreDetail};

pub async fn insert_score_component(
    pool: &SqlitePool,
    name: &str,
    evaluation_method: Option<&str>,
) -> Result<i64, DataError> {
    let result =
        sqlx::query(r"INSERT INTO score_components (name, evaluation_method) VALUES (?1, ?2);")
            .bind(name)
            .bind(evaluation_method)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_score_component(
    pool: &SqlitePool,
    score_component_id: i64,
) -> Result<Option<ScoreComponent>, DataError> {
    let component: Option<ScoreComponent> =
        sqlx::query_as(r"SELECT * FROM score_components WHERE score_component_id = ?1;")
            .bind(score_component_id)
            .fetch_optional(pool)
            .await?;
    Ok(component)
}

/// refused while any column still belongs to the component
pub async fn delete_score_component(
    pool: &SqlitePool,
    score_component_id: i64,
) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM score_components WHERE score_component_id = ?1;")
        .bind(score_component_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_score_column(
    pool: &SqlitePool,
    name: &str,
    weight: f64,
    score_component_id: i64,
) -> Result<i64, DataError> {
    let result = sqlx::query(
        r"INSERT INTO score_columns (name, weight, score_component_id) VALUES (?1, ?2, ?3);",
    )
    .bind(name)
    .bind(weight)
    .bind(score_component_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_score_column(
    pool: &SqlitePool,
    score_column_id: i64,
) -> Result<Option<ScoreColumn>, DataError> {
    let column: Option<ScoreColumn> =
        sqlx::query_as(r"SELECT * FROM score_columns WHERE score_column_id = ?1;")
            .bind(score_column_id)
            .fetch_optional(pool)
            .await?;
    Ok(column)
}

/// takes the column's score details with it
pub async fn delete_score_column(
    pool: &SqlitePool,
    score_column_id: i64,
) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM score_columns WHERE score_column_id = ?1;")
        .bind(score_column_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// record a grading event by a council seat for a thesis, with one score
/// detail per (column id, value) pair, all in one transaction
pub async fn record_score(
    pool: &SqlitePool,
    council_detail_id: i64,
    thesis_id: i64,
    details: &[(i64, f64)],
) -> Result<i64, DataError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(r"INSERT INTO scores (council_detail_id, thesis_id) VALUES (?1, ?2);")
        .bind(council_detail_id)
        .bind(thesis_id)
        .execute(&mut *tx)
        .await?;
    let score_id = result.last_insert_rowid();

    for (score_column_id, score_number) in details {
        sqlx::query(
            r"INSERT INTO score_details (score_number, score_id, score_column_id)
              VALUES (?1, ?2, ?3);",
        )
        .bind(score_number)
        .bind(score_id)
        .bind(score_column_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(
        "recorded score {} for thesis {} with {} details",
        score_id,
        thesis_id,
        details.len()
    );
    Ok(score_id)
}

pub async fn scores_of_thesis(pool: &SqlitePool, thesis_id: i64) -> Result<Vec<Score>, DataError> {
    let scores: Vec<Score> =
        sqlx::query_as(r"SELECT * FROM scores WHERE thesis_id = ?1 ORDER BY score_id;")
            .bind(thesis_id)
            .fetch_all(pool)
            .await?;
    Ok(scores)
}

pub async fn score_details(pool: &SqlitePool, score_id: i64) -> Result<Vec<ScoreDetail>, DataError> {
    let details: Vec<ScoreDetail> =
        sqlx::query_as(r"SELECT * FROM score_details WHERE score_id = ?1 ORDER BY score_detail_id;")
            .bind(score_id)
            .fetch_all(pool)
            .await?;
    Ok(details)
}

/// takes the score's details with it
pub async fn delete_score(pool: &SqlitePool, score_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM scores WHERE score_id = ?1;")
        .bind(score_id)
        .execute(pool)
        .await?;
    Ok(())
}
