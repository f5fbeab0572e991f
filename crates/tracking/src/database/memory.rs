use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use model::{location::Location, WithId};
use tokio::sync::Mutex;
use utility::id::Id;

use super::{Database, DatabaseError, DatabaseTransaction, LocationRepo, Result};

#[derive(Debug, Default)]
struct Tables {
    locations: Vec<WithId<Location>>,
    next_id: i64,
}

impl Tables {
    fn append(&mut self, location: Location) -> WithId<Location> {
        self.next_id += 1;
        let row = WithId::new(Id::new(self.next_id), location);
        self.locations.push(row.clone());
        row
    }
}

/// A process-local database, used for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    reject_writes: Arc<AtomicBool>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every write fails like an unreachable database would.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            Err(DatabaseError::other(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "database rejected the write",
            )))
        } else {
            Ok(())
        }
    }

    async fn between(&self, from: i64, to: i64) -> Vec<WithId<Location>> {
        let tables = self.tables.lock().await;
        let mut rows = tables
            .locations
            .iter()
            .filter(|row| row.content.timestamp >= from && row.content.timestamp < to)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by_key(|row| (row.content.timestamp, row.id.raw()));
        rows
    }
}

pub struct MemoryAutocommit {
    database: MemoryDatabase,
}

#[async_trait]
impl LocationRepo for MemoryAutocommit {
    async fn insert_location(&mut self, location: Location) -> Result<WithId<Location>> {
        self.database.check_writable()?;
        Ok(self.database.tables.lock().await.append(location))
    }

    async fn insert_locations(&mut self, locations: Vec<Location>) -> Result<u64> {
        self.database.check_writable()?;
        let mut tables = self.database.tables.lock().await;
        let count = locations.len() as u64;
        for location in locations {
            tables.append(location);
        }
        Ok(count)
    }

    async fn locations_between(&mut self, from: i64, to: i64) -> Result<Vec<WithId<Location>>> {
        Ok(self.database.between(from, to).await)
    }

    async fn count_locations(&mut self) -> Result<i64> {
        Ok(self.database.tables.lock().await.locations.len() as i64)
    }
}

/// Buffers writes until `commit`; dropping it discards them.
pub struct MemoryTransaction {
    database: MemoryDatabase,
    pending: Vec<Location>,
}

#[async_trait]
impl LocationRepo for MemoryTransaction {
    async fn insert_location(&mut self, location: Location) -> Result<WithId<Location>> {
        self.database.check_writable()?;
        self.pending.push(location.clone());
        // ids are only assigned on commit
        Ok(WithId::new(Id::new(0), location))
    }

    async fn insert_locations(&mut self, locations: Vec<Location>) -> Result<u64> {
        self.database.check_writable()?;
        let count = locations.len() as u64;
        self.pending.extend(locations);
        Ok(count)
    }

    async fn locations_between(&mut self, from: i64, to: i64) -> Result<Vec<WithId<Location>>> {
        let mut rows = self.database.between(from, to).await;
        rows.extend(
            self.pending
                .iter()
                .filter(|location| location.timestamp >= from && location.timestamp < to)
                .map(|location| WithId::new(Id::new(0), location.clone())),
        );
        rows.sort_by_key(|row| row.content.timestamp);
        Ok(rows)
    }

    async fn count_locations(&mut self) -> Result<i64> {
        let committed = self.database.tables.lock().await.locations.len();
        Ok((committed + self.pending.len()) as i64)
    }
}

#[async_trait]
impl DatabaseTransaction for MemoryTransaction {
    async fn commit(self) -> Result<()> {
        self.database.check_writable()?;
        let mut tables = self.database.tables.lock().await;
        for location in self.pending {
            tables.append(location);
        }
        Ok(())
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Transaction = MemoryTransaction;
    type Autocommit = MemoryAutocommit;

    fn auto(&self) -> Self::Autocommit {
        MemoryAutocommit {
            database: self.clone(),
        }
    }

    async fn transaction(&self) -> Result<Self::Transaction> {
        Ok(MemoryTransaction {
            database: self.clone(),
            pending: Vec::new(),
        })
    }
}
