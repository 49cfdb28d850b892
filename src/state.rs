use crate::{
    config::{RuntimeConfiguration, StoreConfig},
    data::{StudentStore, memory_store::MemoryStudentStore, postgres_store::PostgresStudentStore},
    error::RosterResult,
};
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct RosterState {
    students: Arc<dyn StudentStore>,
}

impl RosterState {
    pub async fn new(config: &RuntimeConfiguration) -> RosterResult<Self> {
        let students: Arc<dyn StudentStore> = match config.store() {
            StoreConfig::Postgres(db_config) => {
                info!("Connecting to postgres");
                Arc::new(PostgresStudentStore::connect(db_config).await?)
            }
            StoreConfig::Memory => {
                warn!("Using in-memory store, students will not outlive this process");
                Arc::new(MemoryStudentStore::new())
            }
        };

        Ok(Self::with_store(students))
    }

    pub fn with_store(students: Arc<dyn StudentStore>) -> Self {
        Self { students }
    }

    pub async fn sensible_shutdown(&self) {
        self.students.close().await;
    }
}

impl Deref for RosterState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        &*self.students
    }
}
