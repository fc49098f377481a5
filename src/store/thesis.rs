use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::err::DataError;
use crate::models::council::{CouncilDetail, Lecturer};
use crate::models::thesis::{NewStudent, NewThesis, Student, Thesis};

pub async fn insert_thesis(pool: &SqlitePool, thesis: &NewThesis) -> Result<i64, DataError> {
    let mut tx = pool.begin().await?;
    let thesis_id = insert_thesis_tx(&mut tx, thesis).await?;
    tx.commit().await?;
    Ok(thesis_id)
}

/// insert a thesis together with its supervising lecturers in one
/// transaction; nothing is kept if any link fails
pub async fn insert_thesis_with_lecturers(
    pool: &SqlitePool,
    thesis: &NewThesis,
    lecturer_ids: &[i64],
) -> Result<i64, DataError> {
    let mut tx = pool.begin().await?;
    let thesis_id = insert_thesis_tx(&mut tx, thesis).await?;
    for lecturer_id in lecturer_ids {
        sqlx::query(r"INSERT INTO thesis_lecturers (thesis_id, lecturer_id) VALUES (?1, ?2);")
            .bind(thesis_id)
            .bind(lecturer_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(thesis_id)
}

async fn insert_thesis_tx(
    tx: &mut Transaction<'_, Sqlite>,
    thesis: &NewThesis,
) -> Result<i64, DataError> {
    let result = sqlx::query(
        r"INSERT INTO theses
            ( code, name, start_date, complete_date, thesis_start_date, thesis_end_date,
              report_file, major_id, school_year_id, council_id )
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
    )
    .bind(thesis.code.as_str())
    .bind(thesis.name.as_str())
    .bind(thesis.start_date)
    .bind(thesis.complete_date)
    .bind(thesis.thesis_start_date)
    .bind(thesis.thesis_end_date)
    .bind(thesis.report_file.as_str())
    .bind(thesis.major_id)
    .bind(thesis.school_year_id)
    .bind(thesis.council_id)
    .execute(&mut **tx)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_thesis(pool: &SqlitePool, thesis_id: i64) -> Result<Option<Thesis>, DataError> {
    let thesis: Option<Thesis> = sqlx::query_as(r"SELECT * FROM theses WHERE thesis_id = ?1;")
        .bind(thesis_id)
        .fetch_optional(pool)
        .await?;
    Ok(thesis)
}

/// record the aggregated grading outcome for a thesis
pub async fn set_total_score(
    pool: &SqlitePool,
    thesis_id: i64,
    total_score: Option<f64>,
    result: bool,
) -> Result<(), DataError> {
    let query_result =
        sqlx::query(r"UPDATE theses SET total_score = ?1, result = ?2 WHERE thesis_id = ?3;")
            .bind(total_score)
            .bind(result)
            .bind(thesis_id)
            .execute(pool)
            .await?;
    if query_result.rows_affected() == 0 {
        return Err(DataError::Sqlx(sqlx::Error::RowNotFound));
    }
    Ok(())
}

/// refused while a student still references the thesis; scores and join
/// rows go with it
pub async fn delete_thesis(pool: &SqlitePool, thesis_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM theses WHERE thesis_id = ?1;")
        .bind(thesis_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn add_lecturer(
    pool: &SqlitePool,
    thesis_id: i64,
    lecturer_id: i64,
) -> Result<(), DataError> {
    sqlx::query(r"INSERT INTO thesis_lecturers (thesis_id, lecturer_id) VALUES (?1, ?2);")
        .bind(thesis_id)
        .bind(lecturer_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn remove_lecturer(
    pool: &SqlitePool,
    thesis_id: i64,
    lecturer_id: i64,
) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM thesis_lecturers WHERE thesis_id = ?1 AND lecturer_id = ?2;")
        .bind(thesis_id)
        .bind(lecturer_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn thesis_lecturers(
    pool: &SqlitePool,
    thesis_id: i64,
) -> Result<Vec<Lecturer>, DataError> {
    let lecturers: Vec<Lecturer> = sqlx::query_as(
        r"SELECT l.*
          FROM lecturers AS l
          JOIN thesis_lecturers tl ON tl.lecturer_id = l.user_id
          WHERE tl.thesis_id = ?1
          ORDER BY l.code;",
    )
    .bind(thesis_id)
    .fetch_all(pool)
    .await?;
    Ok(lecturers)
}

/// attach a council seat as a grader of the thesis
pub async fn add_grader(
    pool: &SqlitePool,
    thesis_id: i64,
    council_detail_id: i64,
) -> Result<(), DataError> {
    sqlx::query(r"INSERT INTO thesis_graders (thesis_id, council_detail_id) VALUES (?1, ?2);")
        .bind(thesis_id)
        .bind(council_detail_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn thesis_graders(
    pool: &SqlitePool,
    thesis_id: i64,
) -> Result<Vec<CouncilDetail>, DataError> {
    let seats: Vec<CouncilDetail> = sqlx::query_as(
        r"SELECT cd.*
          FROM council_details AS cd
          JOIN thesis_graders tg ON tg.council_detail_id = cd.council_detail_id
          WHERE tg.thesis_id = ?1
          ORDER BY cd.council_detail_id;",
    )
    .bind(thesis_id)
    .fetch_all(pool)
    .await?;
    Ok(seats)
}

/// attach a student record to a user; at most one per user since the user
/// id is the primary key
pub async fn insert_student(pool: &SqlitePool, student: &NewStudent) -> Result<(), DataError> {
    sqlx::query(
        r"INSERT INTO students (user_id, code, full_name, birthday, address, gpa, major_id, thesis_id)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
    )
    .bind(student.user_id)
    .bind(student.code.as_str())
    .bind(student.full_name.as_str())
    .bind(student.birthday)
    .bind(student.address.as_str())
    .bind(student.gpa)
    .bind(student.major_id)
    .bind(student.thesis_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_student(pool: &SqlitePool, user_id: i64) -> Result<Option<Student>, DataError> {
    let student: Option<Student> = sqlx::query_as(r"SELECT * FROM students WHERE user_id = ?1;")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(student)
}

pub async fn students_of_thesis(
    pool: &SqlitePool,
    thesis_id: i64,
) -> Result<Vec<Student>, DataError> {
    let students: Vec<Student> =
        sqlx::query_as(r"SELECT * FROM students WHERE thesis_id = ?1 ORDER BY code;")
            .bind(thesis_id)
            .fetch_all(pool)
            .await?;
    Ok(students)
}

pub async fn delete_student(pool: &SqlitePool, user_id: i64) -> Result<(), DataError> {
    sqlx::query(r"DELETE FROM students WHERE user_id = ?1;")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    use crate::db::Database;
    use crate::models::account::NewUser;
    use crate::models::council::NewLecturer;
    use crate::store::{academic, account, council, score};
    use crate::testing::open_test_db;

    struct Campus {
        role_id: i64,
        faculty_id: i64,
        major_id: i64,
        school_year_id: i64,
        council_id: i64,
    }

    async fn seed_campus(database: &Database) -> Campus {
        let role_id = account::insert_role(&database.db, "member", "<p></p>")
            .await
            .unwrap();
        let faculty_id =
            academic::insert_faculty(&database.db, "IT", "Information Technology", "<p></p>")
                .await
                .unwrap();
        let major_id =
            academic::insert_major(&database.db, "SE", "Software Engineering", "<p></p>", faculty_id)
                .await
                .unwrap();
        let school_year_id =
            academic::insert_school_year(&database.db, date!(2024 - 09 - 01), date!(2025 - 06 - 30))
                .await
                .unwrap();
        let council_id = council::insert_council(&database.db, "Council 1", "<p></p>", true)
            .await
            .unwrap();
        Campus {
            role_id,
            faculty_id,
            major_id,
            school_year_id,
            council_id,
        }
    }

    async fn seed_user(database: &Database, username: &str, role_id: i64) -> i64 {
        account::insert_user(
            &database.db,
            &NewUser {
                username: username.to_string(),
                password: "hash".to_string(),
                email: format!("{}@example.edu", username),
                avatar: None,
                gender: "female".to_string(),
                phone: "0987654321".to_string(),
                role_id,
            },
        )
        .await
        .unwrap()
    }

    fn sample_thesis(campus: &Campus, code: &str) -> NewThesis {
        NewThesis {
            code: code.to_string(),
            name: "Graph-based plagiarism detection".to_string(),
            start_date: date!(2024 - 10 - 01),
            complete_date: date!(2025 - 05 - 15),
            thesis_start_date: date!(2024 - 11 - 01),
            thesis_end_date: date!(2025 - 05 - 01),
            report_file: "<p>report</p>".to_string(),
            major_id: campus.major_id,
            school_year_id: campus.school_year_id,
            council_id: campus.council_id,
        }
    }

    async fn seed_seat(database: &Database, campus: &Campus, username: &str) -> i64 {
        let user_id = seed_user(database, username, campus.role_id).await;
        council::insert_lecturer(
            &database.db,
            &NewLecturer {
                user_id,
                code: format!("GV{}", user_id),
                full_name: "Hoang Thi Hoa".to_string(),
                birthday: date!(1982 - 07 - 20),
                address: "3 Tran Phu".to_string(),
                faculty_id: campus.faculty_id,
            },
        )
        .await
        .unwrap();
        let position_id = council::insert_position(&database.db, "member", "<p></p>")
            .await
            .unwrap();
        council::insert_council_detail(&database.db, user_id, campus.council_id, position_id)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn thesis_roundtrip_and_score_tracking() {
        let (_dir, database) = open_test_db().await;
        let campus = seed_campus(&database).await;
        let thesis_id = insert_thesis(&database.db, &sample_thesis(&campus, "KL001"))
            .await
            .unwrap();

        let thesis = get_thesis(&database.db, thesis_id).await.unwrap().unwrap();
        assert_eq!(thesis.code, "KL001");
        assert_eq!(thesis.total_score, None);
        assert!(!thesis.result);

        set_total_score(&database.db, thesis_id, Some(8.4), true)
            .await
            .unwrap();
        let thesis = get_thesis(&database.db, thesis_id).await.unwrap().unwrap();
        assert_eq!(thesis.total_score, Some(8.4));
        assert!(thesis.result);
    }

    #[tokio::test]
    async fn thesis_lecturer_links_roundtrip() {
        let (_dir, database) = open_test_db().await;
        let campus = seed_campus(&database).await;

        let user_id = seed_user(&database, "hoa.hoang", campus.role_id).await;
        council::insert_lecturer(
            &database.db,
            &NewLecturer {
                user_id,
                code: "GV100".to_string(),
                full_name: "Hoang Thi Hoa".to_string(),
                birthday: date!(1982 - 07 - 20),
                address: "3 Tran Phu".to_string(),
                faculty_id: campus.faculty_id,
            },
        )
        .await
        .unwrap();

        let thesis_id = insert_thesis_with_lecturers(
            &database.db,
            &sample_thesis(&campus, "KL002"),
            &[user_id],
        )
        .await
        .unwrap();

        let lecturers = thesis_lecturers(&database.db, thesis_id).await.unwrap();
        assert_eq!(lecturers.len(), 1);
        assert_eq!(lecturers[0].user_id, user_id);

        remove_lecturer(&database.db, thesis_id, user_id).await.unwrap();
        assert!(thesis_lecturers(&database.db, thesis_id)
            .await
            .unwrap()
            .is_empty());

        add_lecturer(&database.db, thesis_id, user_id).await.unwrap();
        assert_eq!(thesis_lecturers(&database.db, thesis_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn thesis_delete_cascades_scores_but_student_protects() {
        let (_dir, database) = open_test_db().await;
        let campus = seed_campus(&database).await;
        let thesis_id = insert_thesis(&database.db, &sample_thesis(&campus, "KL003"))
            .await
            .unwrap();

        // a grading event against the thesis
        let seat_id = seed_seat(&database, &campus, "khanh.do").await;
        add_grader(&database.db, thesis_id, seat_id).await.unwrap();
        let component_id = score::insert_score_component(&database.db, "defense", None)
            .await
            .unwrap();
        let column_id = score::insert_score_column(&database.db, "presentation", 0.4, component_id)
            .await
            .unwrap();
        let score_id = score::record_score(&database.db, seat_id, thesis_id, &[(column_id, 8.0)])
            .await
            .unwrap();

        // a student holding the thesis blocks deletion
        let student_user = seed_user(&database, "lan.bui", campus.role_id).await;
        insert_student(
            &database.db,
            &NewStudent {
                user_id: student_user,
                code: "SV001".to_string(),
                full_name: "Bui Thi Lan".to_string(),
                birthday: date!(2002 - 01 - 09),
                address: "8 Ly Thuong Kiet".to_string(),
                gpa: 3.2,
                major_id: campus.major_id,
                thesis_id,
            },
        )
        .await
        .unwrap();

        let err = delete_thesis(&database.db, thesis_id).await.unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(
            students_of_thesis(&database.db, thesis_id).await.unwrap().len(),
            1
        );

        delete_student(&database.db, student_user).await.unwrap();
        delete_thesis(&database.db, thesis_id).await.unwrap();

        // scores, their details and the grader links are gone with it
        assert!(score::scores_of_thesis(&database.db, thesis_id)
            .await
            .unwrap()
            .is_empty());
        assert!(score::score_details(&database.db, score_id)
            .await
            .unwrap()
            .is_empty());
        assert!(thesis_graders(&database.db, thesis_id)
            .await
            .unwrap()
            .is_empty());
        // the seat itself is untouched
        assert!(council::get_council_detail(&database.db, seat_id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn deleting_user_cascades_all_specialized_records() {
        let (_dir, database) = open_test_db().await;
        let campus = seed_campus(&database).await;
        let thesis_id = insert_thesis(&database.db, &sample_thesis(&campus, "KL004"))
            .await
            .unwrap();

        let user_id = seed_user(&database, "minh.cao", campus.role_id).await;
        account::insert_admin(&database.db, user_id, "Cao Nhat Minh")
            .await
            .unwrap();
        council::insert_lecturer(
            &database.db,
            &NewLecturer {
                user_id,
                code: "GV200".to_string(),
                full_name: "Cao Nhat Minh".to_string(),
                birthday: date!(1979 - 12 - 30),
                address: "21 Hang Bai".to_string(),
                faculty_id: campus.faculty_id,
            },
        )
        .await
        .unwrap();
        insert_student(
            &database.db,
            &NewStudent {
                user_id,
                code: "SV002".to_string(),
                full_name: "Cao Nhat Minh".to_string(),
                birthday: date!(1979 - 12 - 30),
                address: "21 Hang Bai".to_string(),
                gpa: 3.9,
                major_id: campus.major_id,
                thesis_id,
            },
        )
        .await
        .unwrap();

        account::delete_user(&database.db, user_id).await.unwrap();

        assert!(account::get_admin(&database.db, user_id).await.unwrap().is_none());
        assert!(council::get_lecturer(&database.db, user_id)
            .await
            .unwrap()
            .is_none());
        assert!(get_student(&database.db, user_id).await.unwrap().is_none());
    }
}
