use crate::{
    data::student::{Student, StudentId, StudentRecord},
    error::RosterResult,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod memory_store;
pub mod postgres_store;
pub mod student;

/// Canonical owner of every [`Student`]. Handlers only ever see copies.
///
/// Writes against an id are conditional: if the row has gone by the time
/// `save` or `delete` runs, they fail with `MissingStudent` instead of
/// recreating or ignoring it.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// All students, ordered by id.
    async fn find_all(&self) -> RosterResult<Vec<Student>>;
    async fn find_by_id(&self, id: StudentId) -> RosterResult<Option<Student>>;
    /// Inserts when `record.id` is `None`, otherwise overwrites the name of the existing row.
    async fn save(&self, record: StudentRecord) -> RosterResult<Student>;
    async fn delete(&self, student: &Student) -> RosterResult<()>;

    async fn close(&self) {}
}
