//! Data layer for an academic thesis-management application: the entity
//! schema (roles, users, faculties, majors, councils, lecturers, students,
//! theses, score tracking), the referential-integrity rules between them,
//! and the administrative editing surface for roles.

pub mod admin;
pub mod db;
pub mod err;
pub mod models;
pub mod store;
