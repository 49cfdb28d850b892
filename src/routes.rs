use crate::{
    error::RosterError,
    routes::students::{delete_student, get_student, get_students, post_student, put_student},
    state::RosterState,
};
use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    routing::get,
};

pub mod students;

/// `axum::Json`, but rejections come back as a [`RosterError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(RosterError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path`, but rejections come back as a [`RosterError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RosterError))]
pub struct IdPath<T>(pub T);

pub fn router(state: RosterState) -> Router {
    Router::new()
        .route("/students", get(get_students).post(post_student))
        .route(
            "/students/{id}",
            get(get_student).put(put_student).delete(delete_student),
        )
        .with_state(state)
}
