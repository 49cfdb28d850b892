use crate::{
    data::{
        StudentStore,
        student::{Student, StudentId, StudentRecord},
    },
    error::{IdsExhaustedSnafu, MissingStudentSnafu, RosterResult},
};
use async_trait::async_trait;
use snafu::OptionExt;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local store, mostly for tests and running without Postgres.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    students: BTreeMap<StudentId, String>,
    last_id: StudentId,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        let inner = self.inner.read().await;
        debug!(count = inner.students.len(), "Listing students from memory");
        Ok(inner
            .students
            .iter()
            .map(|(&id, name)| Student {
                id,
                name: name.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: StudentId) -> RosterResult<Option<Student>> {
        let inner = self.inner.read().await;
        debug!(id, "Looking up student in memory");
        Ok(inner.students.get(&id).map(|name| Student {
            id,
            name: name.clone(),
        }))
    }

    async fn save(&self, record: StudentRecord) -> RosterResult<Student> {
        let StudentRecord { id, name } = record;
        debug!(?id, "Saving student in memory");
        let mut inner = self.inner.write().await;

        let id = match id {
            None => {
                //ids only ever go up, so deleted ones are never handed out again
                let id = inner.last_id.checked_add(1).context(IdsExhaustedSnafu)?;
                inner.last_id = id;
                inner.students.insert(id, name.clone());
                id
            }
            Some(id) => {
                let existing = inner
                    .students
                    .get_mut(&id)
                    .context(MissingStudentSnafu { id })?;
                existing.clone_from(&name);
                id
            }
        };

        Ok(Student { id, name })
    }

    async fn delete(&self, student: &Student) -> RosterResult<()> {
        debug!(id = student.id, "Deleting student from memory");
        let mut inner = self.inner.write().await;
        inner
            .students
            .remove(&student.id)
            .context(MissingStudentSnafu { id: student.id })?;
        Ok(())
    }
}
