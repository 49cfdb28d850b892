use crate::{
    config::DbConfig,
    data::{
        StudentStore,
        student::{Student, StudentId, StudentRecord, StudentRow},
    },
    error::{MakeQuerySnafu, MigrateSnafu, MissingStudentSnafu, OpenDatabaseSnafu, RosterResult},
};
use async_trait::async_trait;
use snafu::{OptionExt, ResultExt};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn connect(config: &DbConfig) -> RosterResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .connect(&config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self::from_pool(pool))
    }

    /// Expects `migrations/` to have been applied already.
    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        debug!("Listing students from postgres");
        let rows = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name FROM public.students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, id: StudentId) -> RosterResult<Option<Student>> {
        debug!(id, "Looking up student in postgres");
        let row = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name FROM public.students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        Ok(row.map(Student::from))
    }

    async fn save(&self, record: StudentRecord) -> RosterResult<Student> {
        let StudentRecord { id, name } = record;
        debug!(?id, "Saving student in postgres");

        let row = match id {
            None => sqlx::query_as::<_, StudentRow>(
                "INSERT INTO public.students (name) VALUES ($1) RETURNING id, name",
            )
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .context(MakeQuerySnafu)?,
            //a single conditional statement, so a row deleted since lookup is reported rather than recreated
            Some(id) => sqlx::query_as::<_, StudentRow>(
                "UPDATE public.students SET name = $1 WHERE id = $2 RETURNING id, name",
            )
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context(MakeQuerySnafu)?
            .context(MissingStudentSnafu { id })?,
        };

        Ok(row.into())
    }

    async fn delete(&self, student: &Student) -> RosterResult<()> {
        debug!(id = student.id, "Deleting student from postgres");
        let affected = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(student.id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?
            .rows_affected();

        if affected == 0 {
            return MissingStudentSnafu { id: student.id }.fail();
        }
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use sqlx::PgPool;

    #[sqlx::test]
    #[ignore = "needs a postgres server in DATABASE_URL"]
    async fn insert_assigns_fresh_ids(pool: PgPool) {
        let store = PostgresStudentStore::from_pool(pool);
        let ana = store.save(StudentRecord::new("Ana".into())).await.unwrap();
        let bea = store.save(StudentRecord::new("Bea".into())).await.unwrap();

        assert_ne!(ana.id, bea.id);
        assert_eq!(store.find_all().await.unwrap(), vec![ana.clone(), bea]);
        assert_eq!(store.find_by_id(ana.id).await.unwrap(), Some(ana));
    }

    #[sqlx::test]
    #[ignore = "needs a postgres server in DATABASE_URL"]
    async fn ids_are_not_reused_after_delete(pool: PgPool) {
        let store = PostgresStudentStore::from_pool(pool);
        let ana = store.save(StudentRecord::new("Ana".into())).await.unwrap();
        store.delete(&ana).await.unwrap();

        let bea = store.save(StudentRecord::new("Bea".into())).await.unwrap();
        assert!(bea.id > ana.id);
        assert_eq!(store.find_by_id(ana.id).await.unwrap(), None);
    }

    #[sqlx::test]
    #[ignore = "needs a postgres server in DATABASE_URL"]
    async fn save_with_id_overwrites_name(pool: PgPool) {
        let store = PostgresStudentStore::from_pool(pool);
        let ana = store.save(StudentRecord::new("Ana".into())).await.unwrap();
        let id = ana.id;

        let bea = store.save(ana.renamed("Bea".into())).await.unwrap();
        assert_eq!(bea.id, id);
        assert_eq!(store.find_by_id(id).await.unwrap().unwrap().name, "Bea");
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[sqlx::test]
    #[ignore = "needs a postgres server in DATABASE_URL"]
    async fn writes_to_vanished_rows_fail(pool: PgPool) {
        let store = PostgresStudentStore::from_pool(pool);
        let ana = store.save(StudentRecord::new("Ana".into())).await.unwrap();
        store.delete(&ana).await.unwrap();

        assert!(matches!(
            store.delete(&ana).await,
            Err(RosterError::MissingStudent { id }) if id == ana.id
        ));
        assert!(matches!(
            store.save(ana.clone().renamed("Bea".into())).await,
            Err(RosterError::MissingStudent { id }) if id == ana.id
        ));
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
