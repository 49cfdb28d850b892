use crate::{
    data::student::{Student, StudentForm, StudentId, StudentRecord},
    error::{IdOnCreateSnafu, MissingStudentSnafu, RosterResult},
    routes::{IdPath, JsonBody},
    state::RosterState,
};
use axum::{Json, extract::State, http::StatusCode};
use snafu::OptionExt;

pub async fn get_students(State(state): State<RosterState>) -> RosterResult<Json<Vec<Student>>> {
    let students = state.find_all().await?;
    debug!(count = students.len(), "Listing students");
    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<RosterState>,
    IdPath(id): IdPath<StudentId>,
) -> RosterResult<Json<Student>> {
    let student = state
        .find_by_id(id)
        .await?
        .context(MissingStudentSnafu { id })?;
    Ok(Json(student))
}

pub async fn post_student(
    State(state): State<RosterState>,
    JsonBody(StudentForm { id, name }): JsonBody<StudentForm>,
) -> RosterResult<(StatusCode, Json<Student>)> {
    if let Some(id) = id {
        return IdOnCreateSnafu { id }.fail();
    }

    let student = state.save(StudentRecord::new(name)).await?;
    info!(id = student.id, "Created student");
    Ok((StatusCode::CREATED, Json(student)))
}

/// Only `name` is taken from the body; the path decides which student changes.
pub async fn put_student(
    State(state): State<RosterState>,
    IdPath(id): IdPath<StudentId>,
    JsonBody(StudentForm { name, .. }): JsonBody<StudentForm>,
) -> RosterResult<Json<Student>> {
    let existing = state
        .find_by_id(id)
        .await?
        .context(MissingStudentSnafu { id })?;

    let student = state.save(existing.renamed(name)).await?;
    info!(id, "Updated student");
    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<RosterState>,
    IdPath(id): IdPath<StudentId>,
) -> RosterResult<StatusCode> {
    let existing = state
        .find_by_id(id)
        .await?
        .context(MissingStudentSnafu { id })?;

    state.delete(&existing).await?;
    info!(id, "Deleted student");
    Ok(StatusCode::NO_CONTENT)
}
