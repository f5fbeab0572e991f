use std::{error, fmt};

use actors::actor::ActorError;

pub mod client;
pub mod config;
pub mod database;
pub mod filter;
pub mod segment;
pub mod server;
pub mod session;
pub mod summary;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    /// The storage layer failed or is unreachable.
    Storage(database::DatabaseError),
    /// The filter session of a device could not be reached.
    Session(ActorError),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Storage(why) => write!(f, "storage failure: {}", why),
            Self::Session(why) => write!(f, "filter session failure: {}", why),
        }
    }
}

impl error::Error for RequestError {}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl From<ActorError> for RequestError {
    fn from(why: ActorError) -> Self {
        Self::Session(why)
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
