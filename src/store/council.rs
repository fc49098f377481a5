use sqlx::SqlitePool;

use crate::err::DataError;
use crate::models::council::{Council, CouncilDetail, Lecturer, NewLecturer, Position};

pub async fn insert_council(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    is_block: bool,
) -> Result<i64, DataError> {
    let result =
        sqlx::query(r"INSERT INTO councils (name, description, is_block) VALUES (?1, ?2, ?3);")
            .bind(name)
            .bind(description)
            .bind(is_block)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_council(pool: &SqlitePool, council_id: i64) -> Result<Option<Council>, DataError> {
    let council: Option<Council> = sqlx::query_as(r"SELECT * FROM councils WHERE council_id = ?1;")
        .bind(council_id)
        .fetch_optional(pool)
        .await?;
    Ok(council)
}

/// touches updated_date; created_date is left alone
pub async fn update_council(
    pool: &SqlitePool,
    council_id: i64,
    name: &str,
    description: &str,
    is_block: bool,
) -> Result<(), DataError> {
    let result = sqlx::query(
        r"UPDATE councils
          SET name = ?1,
              description = ?2,
              is_block = ?3,
              updated_date = strftime('%Y-%m-%d %H:%M:%f', 'now')
          WHERE council_id = ?4;",
    )
    .bind(name)
    .bind(description)
    .bind(is_block)
    .bind(council_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(DataError::Sqlx(sqlx::Error::RowNotFound));
    }
    Ok(())
}

/// refused while a thesis still references the council
pub async fn delete_council(pool: &SqlitePool, council_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM councils WHERE council_id = ?1;")
        .bind(council_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_position(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> Result<i64, DataError> {
    let result = sqlx::query(r"INSERT INTO positions (name, description) VALUES (?1, ?2);")
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_position(
    pool: &SqlitePool,
    position_id: i64,
) -> Result<Option<Position>, DataError> {
    let position: Option<Position> =
        sqlx::query_as(r"SELECT * FROM positions WHERE position_id = ?1;")
            .bind(position_id)
            .fetch_optional(pool)
            .await?;
    Ok(position)
}

/// refused while a council seat still holds the position
pub async fn delete_position(pool: &SqlitePool, position_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM positions WHERE position_id = ?1;")
        .bind(position_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// attach a lecturer record to a user; at most one per user since the user
/// id is the primary key
pub async fn insert_lecturer(pool: &SqlitePool, lecturer: &NewLecturer) -> Result<(), DataError> {
    sqlx::query(
        r"INSERT INTO lecturers (user_id, code, full_name, birthday, address, faculty_id)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
    )
    .bind(lecturer.user_id)
    .bind(lecturer.code.as_str())
    .bind(lecturer.full_name.as_str())
    .bind(lecturer.birthday)
    .bind(lecturer.address.as_str())
    .bind(lecturer.faculty_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_lecturer(pool: &SqlitePool, user_id: i64) -> Result<Option<Lecturer>, DataError> {
    let lecturer: Option<Lecturer> = sqlx::query_as(r"SELECT * FROM lecturers WHERE user_id = ?1;")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(lecturer)
}

pub async fn lecturers_of_faculty(
    pool: &SqlitePool,
    faculty_id: i64,
) -> Result<Vec<Lecturer>, DataError> {
    let lecturers: Vec<Lecturer> =
        sqlx::query_as(r"SELECT * FROM lecturers WHERE faculty_id = ?1 ORDER BY code;")
            .bind(faculty_id)
            .fetch_all(pool)
            .await?;
    Ok(lecturers)
}

pub async fn delete_lecturer(pool: &SqlitePool, user_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM lecturers WHERE user_id = ?1;")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// seat a lecturer on a council with a position and return the seat id
pub async fn insert_council_detail(
    pool: &SqlitePool,
    lecturer_id: i64,
    council_id: i64,
    position_id: i64,
) -> Result<i64, DataError> {
    let result = sqlx::query(
        r"INSERT INTO council_details (lecturer_id, council_id, position_id)
          VALUES (?1, ?2, ?3);",
    )
    .bind(lecturer_id)
    .bind(council_id)
    .bind(position_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_council_detail(
    pool: &SqlitePool,
    council_detail_id: i64,
) -> Result<Option<CouncilDetail>, DataError> {
    let detail: Option<CouncilDetail> =
        sqlx::query_as(r"SELECT * FROM council_details WHERE council_detail_id = ?1;")
            .bind(council_detail_id)
            .fetch_optional(pool)
            .await?;
    Ok(detail)
}

pub async fn council_seats(
    pool: &SqlitePool,
    council_id: i64,
) -> Result<Vec<CouncilDetail>, DataError> {
    let seats: Vec<CouncilDetail> = sqlx::query_as(
        r"SELECT * FROM council_details WHERE council_id = ?1 ORDER BY council_detail_id;",
    )
    .bind(council_id)
    .fetch_all(pool)
    .await?;
    Ok(seats)
}

/// refused while a score still references the seat
pub async fn delete_council_detail(
    pool: &SqlitePool,
    council_detail_id: i64,
) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM council_details WHERE council_detail_id = ?1;")
        .bind(council_detail_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use time::macros::date;

    use crate::models::account::NewUser;
    use crate::store::{academic, account};
    use crate::testing::open_test_db;

    async fn seed_lecturer(database: &crate::db::Database, username: &str) -> i64 {
        let role_id = account::insert_role(&database.db, "lecturer", "<p></p>")
            .await
            .unwrap();
        let user_id = account::insert_user(
            &database.db,
            &NewUser {
                username: username.to_string(),
                password: "hash".to_string(),
                email: format!("{}@example.edu", username),
                avatar: None,
                gender: "male".to_string(),
                phone: "0911111111".to_string(),
                role_id,
            },
        )
        .await
        .unwrap();
        let faculty_id = academic::insert_faculty(&database.db, "IT", "Information Technology", "<p></p>")
            .await
            .unwrap();
        insert_lecturer(
            &database.db,
            &NewLecturer {
                user_id,
                code: "GV010".to_string(),
                full_name: "Tran Van Em".to_string(),
                birthday: date!(1975 - 11 - 02),
                address: "5 Le Loi".to_string(),
                faculty_id,
            },
        )
        .await
        .unwrap();
        user_id
    }

    #[tokio::test]
    async fn council_update_touches_updated_date_only() {
        let (_dir, database) = open_test_db().await;
        let council_id = insert_council(&database.db, "Council A", "<p></p>", true)
            .await
            .unwrap();
        let before = get_council(&database.db, council_id).await.unwrap().unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        update_council(&database.db, council_id, "Council A", "<p>revised</p>", false)
            .await
            .unwrap();

        let after = get_council(&database.db, council_id).await.unwrap().unwrap();
        assert_eq!(after.created_date, before.created_date);
        assert!(after.updated_date > before.updated_date);
        assert!(!after.is_block);
    }

    #[tokio::test]
    async fn updating_missing_council_is_an_error() {
        let (_dir, database) = open_test_db().await;
        let result = update_council(&database.db, 999, "x", "<p></p>", true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn position_is_protected_while_seated() {
        let (_dir, database) = open_test_db().await;
        let lecturer_id = seed_lecturer(&database, "em.tran").await;
        let council_id = insert_council(&database.db, "Council B", "<p></p>", true)
            .await
            .unwrap();
        let position_id = insert_position(&database.db, "chair", "<p></p>").await.unwrap();
        let seat_id = insert_council_detail(&database.db, lecturer_id, council_id, position_id)
            .await
            .unwrap();

        let err = delete_position(&database.db, position_id).await.unwrap_err();
        assert!(err.is_constraint_violation());

        delete_council_detail(&database.db, seat_id).await.unwrap();
        delete_position(&database.db, position_id).await.unwrap();
    }

    #[tokio::test]
    async fn lecturer_record_can_be_dropped_without_the_user() {
        let (_dir, database) = open_test_db().await;
        let user_id = seed_lecturer(&database, "phuc.dinh").await;

        delete_lecturer(&database.db, user_id).await.unwrap();
        assert!(get_lecturer(&database.db, user_id).await.unwrap().is_none());
        assert!(account::get_user(&database.db, user_id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn deleting_council_cascades_seats() {
        let (_dir, database) = open_test_db().await;
        let lecturer_id = seed_lecturer(&database, "giang.vo").await;
        let council_id = insert_council(&database.db, "Council C", "<p></p>", false)
            .await
            .unwrap();
        let position_id = insert_position(&database.db, "member", "<p></p>").await.unwrap();
        insert_council_detail(&database.db, lecturer_id, council_id, position_id)
            .await
            .unwrap();

        delete_council(&database.db, council_id).await.unwrap();
        let seats = council_seats(&database.db, council_id).await.unwrap();
        assert!(seats.is_empty());
        // the position is reference data and stays
        assert!(get_position(&database.db, position_id)
            .await
            .unwrap()
            .is_some());
    }
}
