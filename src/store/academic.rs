use sqlx::SqlitePool;
use time::Date;

use crate::err::DataError;
use crate::models::academic::{Faculty, Major, SchoolYear};

pub async fn insert_school_year(
    pool: &SqlitePool,
    start_year: Date,
    end_year: Date,
) -> Result<i64, DataError> {
    let result = sqlx::query(r"INSERT INTO school_years (start_year, end_year) VALUES (?1, ?2);")
        .bind(start_year)
        .bind(end_year)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_school_year(
    pool: &SqlitePool,
    school_year_id: i64,
) -> Result<Option<SchoolYear>, DataError> {
    let year: Option<SchoolYear> =
        sqlx::query_as(r"SELECT * FROM school_years WHERE school_year_id = ?1;")
            .bind(school_year_id)
            .fetch_optional(pool)
            .await?;
    Ok(year)
}

/// refused while a thesis still references the year
pub async fn delete_school_year(pool: &SqlitePool, school_year_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM school_years WHERE school_year_id = ?1;")
        .bind(school_year_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_faculty(
    pool: &SqlitePool,
    code: &str,
    name: &str,
    description: &str,
) -> Result<i64, DataError> {
    let result = sqlx::query(r"INSERT INTO faculties (code, name, description) VALUES (?1, ?2, ?3);")
        .bind(code)
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_faculty(pool: &SqlitePool, faculty_id: i64) -> Result<Option<Faculty>, DataError> {
    let faculty: Option<Faculty> = sqlx::query_as(r"SELECT * FROM faculties WHERE faculty_id = ?1;")
        .bind(faculty_id)
        .fetch_optional(pool)
        .await?;
    Ok(faculty)
}

pub async fn list_faculties(pool: &SqlitePool) -> Result<Vec<Faculty>, DataError> {
    let faculties: Vec<Faculty> = sqlx::query_as(r"SELECT * FROM faculties ORDER BY faculty_id;")
        .fetch_all(pool)
        .await?;
    Ok(faculties)
}

/// takes the faculty's majors and lecturers with it
pub async fn delete_faculty(pool: &SqlitePool, faculty_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM faculties WHERE faculty_id = ?1;")
        .bind(faculty_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_major(
    pool: &SqlitePool,
    code: &str,
    name: &str,
    description: &str,
    faculty_id: i64,
) -> Result<i64, DataError> {
    let result = sqlx::query(
        r"INSERT INTO majors (code, name, description, faculty_id) VALUES (?1, ?2, ?3, ?4);",
    )
    .bind(code)
    .bind(name)
    .bind(description)
    .bind(faculty_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_major(pool: &SqlitePool, major_id: i64) -> Result<Option<Major>, DataError> {
    let major: Option<Major> = sqlx::query_as(r"SELECT * FROM majors WHERE major_id = ?1;")
        .bind(major_id)
        .fetch_optional(pool)
        .await?;
    Ok(major)
}

pub async fn majors_of_faculty(
    pool: &SqlitePool,
    faculty_id: i64,
) -> Result<Vec<Major>, DataError> {
    let majors: Vec<Major> =
        sqlx::query_as(r"SELECT * FROM majors WHERE faculty_id = ?1 ORDER BY major_id;")
            .bind(faculty_id)
            .fetch_all(pool)
            .await?;
    Ok(majors)
}

/// refused while a thesis or student still references the major
pub async fn delete_major(pool: &SqlitePool, major_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM majors WHERE major_id = ?1;")
        .bind(major_id)
        .execute(pool)
        .await?;
    Ok(())
}
