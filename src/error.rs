use crate::data::student::StudentId;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse `DB_MAX_CONNECTIONS`"))]
    ParseMaxConnections { source: ParseIntError },
    #[snafu(display("Unknown store kind {:?}, expected `postgres` or `memory`", found))]
    UnknownStoreKind { found: String },
    #[snafu(display("No student IDs left to assign"))]
    IdsExhausted,
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: StudentId },
    #[snafu(display("Students are assigned IDs on creation, but ID {} was supplied", id))]
    IdOnCreate { id: StudentId },
    #[snafu(display("Invalid JSON body: {}", source.body_text()))]
    JsonBody { source: JsonRejection },
    #[snafu(display("Invalid path parameter: {}", source.body_text()))]
    PathParam { source: PathRejection },
}

impl From<JsonRejection> for RosterError {
    fn from(source: JsonRejection) -> Self {
        Self::JsonBody { source }
    }
}

impl From<PathRejection> for RosterError {
    fn from(source: PathRejection) -> Self {
        Self::PathParam { source }
    }
}

impl RosterError {
    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::MakeQuery { .. } | Self::MigrateError { .. } => ISE,
            Self::IdsExhausted => ISE,
            Self::BadEnvVar { .. }
            | Self::ParsePort { .. }
            | Self::ParseMaxConnections { .. }
            | Self::UnknownStoreKind { .. } => ISE,
            Self::MissingStudent { .. } => NF,
            Self::IdOnCreate { .. } => BI,
            Self::JsonBody { .. } | Self::PathParam { .. } => BI,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(%self, "Rejected request");
        }

        let body = json!({
            "status": status_code.as_u16(),
            "detail": self.to_string(),
        });
        (status_code, Json(body)).into_response()
    }
}
