use std::{env, error::Error};

use async_trait::async_trait;
use model::{location::Location, WithId};
use sqlx::Transaction;
use tracking::database::{Database, DatabaseTransaction, LocationRepo, Result};

use queries::convert_error;

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    pub(self) fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

impl PgDatabase {
    /// Connects and brings the schema up to date.
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> std::result::Result<Self, Box<dyn Error + Send + Sync>> {
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("connected to database, migrations are up to date");

        Ok(Self { connection: pool })
    }
}

pub struct PgDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

#[async_trait]
impl<'a> DatabaseTransaction for PgDatabaseTransaction<'a> {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

#[async_trait]
impl Database for PgDatabase {
    type Transaction = PgDatabaseTransaction<'static>;
    type Autocommit = PgDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(&self) -> Result<Self::Transaction> {
        let tx: Transaction<'_, sqlx::Postgres> =
            self.connection.begin().await.map_err(convert_error)?;

        Ok(PgDatabaseTransaction { tx })
    }
}

#[async_trait]
impl LocationRepo for PgDatabaseAutocommit {
    async fn insert_location(&mut self, location: Location) -> Result<WithId<Location>> {
        queries::location::insert(&self.pool, location).await
    }

    async fn insert_locations(&mut self, locations: Vec<Location>) -> Result<u64> {
        // all chunks or none
        let mut tx = self.pool.begin().await.map_err(convert_error)?;
        let count = queries::location::insert_all(&mut tx, &locations).await?;
        tx.commit().await.map_err(convert_error)?;
        Ok(count)
    }

    async fn locations_between(&mut self, from: i64, to: i64) -> Result<Vec<WithId<Location>>> {
        queries::location::between(&self.pool, from, to).await
    }

    async fn count_locations(&mut self) -> Result<i64> {
        queries::location::count(&self.pool).await
    }
}

#[async_trait]
impl<'a> LocationRepo for PgDatabaseTransaction<'a> {
    async fn insert_location(&mut self, location: Location) -> Result<WithId<Location>> {
        queries::location::insert(&mut *self.tx, location).await
    }

    async fn insert_locations(&mut self, locations: Vec<Location>) -> Result<u64> {
        queries::location::insert_all(&mut self.tx, &locations).await
    }

    async fn locations_between(&mut self, from: i64, to: i64) -> Result<Vec<WithId<Location>>> {
        queries::location::between(&mut *self.tx, from, to).await
    }

    async fn count_locations(&mut self) -> Result<i64> {
        queries::location::count(&mut *self.tx).await
    }
}
