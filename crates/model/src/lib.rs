use std::fmt::Debug;

use chrono::{DateTime, TimeZone};
use schemars::JsonSchema;
use serde::Serialize;
pub use serde_with;
use utility::id::{HasId, Id};

pub mod device;
pub mod fix;
pub mod location;
pub mod message;
pub mod trip;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// A half-open range `[first, last)` of points in time.
#[derive(Debug, Clone)]
pub struct DateTimeRange<Tz>
where
    Tz: TimeZone,
{
    pub first: DateTime<Tz>,
    pub last: DateTime<Tz>,
}

impl<Tz: TimeZone> DateTimeRange<Tz> {
    pub fn new(first: DateTime<Tz>, last: DateTime<Tz>) -> Self {
        Self { first, last }
    }

    /// The range as unix seconds, `[first, last)`.
    pub fn timestamps(&self) -> (i64, i64) {
        (self.first.timestamp(), self.last.timestamp())
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
