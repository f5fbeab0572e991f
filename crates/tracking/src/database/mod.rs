use std::{error, fmt, result};

use async_trait::async_trait;
use model::{location::Location, WithId};

pub mod memory;

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl DatabaseError {
    pub fn other<E: error::Error + Send + Sync + 'static>(why: E) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl error::Error for DatabaseError {}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Append-only storage of timeline locations.
#[async_trait]
pub trait LocationRepo {
    async fn insert_location(&mut self, location: Location) -> Result<WithId<Location>>;

    /// Inserts many locations at once, returns the number of rows written.
    async fn insert_locations(&mut self, locations: Vec<Location>) -> Result<u64>;

    /// All locations with `from <= timestamp < to`, ordered by ascending
    /// timestamp.
    async fn locations_between(&mut self, from: i64, to: i64) -> Result<Vec<WithId<Location>>>;

    async fn count_locations(&mut self) -> Result<i64>;
}

pub trait DatabaseOperations: LocationRepo + Send {}

impl<T> DatabaseOperations for T where T: LocationRepo + Send {}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

#[async_trait]
pub trait Database: Clone + Send + Sync + 'static {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseOperations + Send;

    /// Operations that are committed one by one.
    fn auto(&self) -> Self::Autocommit;

    async fn transaction(&self) -> Result<Self::Transaction>;
}
