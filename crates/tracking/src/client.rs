use std::sync::Arc;

use actors::registry::Registry;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use model::{
    device::Device, fix::Fix, location::Location, trip::DaySummary, DateTimeRange, WithId,
};
use utility::{id::Id, let_also::LetAlso};

use crate::{
    config::TrackingConfig,
    database::{Database, LocationRepo},
    filter::Decision,
    session::{ConfirmSaved, FilterSession, ProcessFix},
    summary::summarize_day,
    RequestError, RequestResult,
};

#[derive(Debug, Clone)]
pub struct Ingested {
    pub decision: Decision,
    /// The stored row, present only for accepted fixes.
    pub location: Option<WithId<Location>>,
}

/// Entry point for everything that reads or writes the timeline.
#[derive(Clone)]
pub struct Client<D>
where
    D: Database,
{
    id: String,
    database: D,
    config: Arc<TrackingConfig>,
    sessions: Registry<Id<Device>, FilterSession>,
}

impl<D> Client<D>
where
    D: Database,
{
    pub(crate) fn new<S>(
        id: S,
        database: D,
        config: Arc<TrackingConfig>,
        sessions: Registry<Id<Device>, FilterSession>,
    ) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            database,
            config,
            sessions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.config.timezone).date_naive()
    }

    /// Runs `fix` through the filter of its device and stores the smoothed
    /// point if the filter accepts it. A point that can not be stored is lost,
    /// but the filter keeps judging new fixes against the last point that was
    /// stored, so the device can simply send again.
    pub async fn ingest(&self, fix: Fix) -> RequestResult<Ingested> {
        let device = fix.device_id();
        let filter_config = self.config.filter.clone();
        let session = self
            .sessions
            .get_or_spawn(device.clone(), move || {
                FilterSession::new(filter_config.clone())
            })
            .await;

        let (decision, smoothed) = session.ask(ProcessFix(fix.clone())).await?;
        let Some(smoothed) = smoothed else {
            log::debug!("[{}] fix from `{}` {}", self.id, device, decision);
            return Ok(Ingested {
                decision,
                location: None,
            });
        };

        let location = Location::from_fix(
            fix,
            smoothed.latitude,
            smoothed.longitude,
            &self.config.timezone,
        );
        let stored = self
            .database
            .auto()
            .insert_location(location)
            .await
            .map_err(|why| {
                log::error!("[{}] could not store location from `{}`: {}", self.id, device, why);
                RequestError::from(why)
            })?;

        if let Err(why) = session.tell(ConfirmSaved(smoothed)).await {
            log::warn!("[{}] session of `{}` is gone: {}", self.id, device, why);
        }

        log::info!(
            "[{}] stored lat={:.6}, lon={:.6}, acc={}m, time={}",
            self.id,
            stored.content.latitude,
            stored.content.longitude,
            stored.content.accuracy,
            stored.content.readable_time
        );

        Ok(Ingested {
            decision,
            location: Some(stored),
        })
    }

    /// The time range covered by `day` in the configured timezone.
    pub fn day_range(&self, day: NaiveDate) -> DateTimeRange<Tz> {
        let timezone = self.config.timezone;
        let next_day = day.succ_opt().unwrap_or(day);
        DateTimeRange::new(
            local_midnight(day, &timezone),
            local_midnight(next_day, &timezone),
        )
    }

    pub async fn get_locations_in_range(
        &self,
        range: DateTimeRange<Tz>,
    ) -> RequestResult<Vec<WithId<Location>>> {
        let (from, to) = range.timestamps();
        Ok(self.database.auto().locations_between(from, to).await?)
    }

    pub async fn get_locations_on_day(
        &self,
        day: NaiveDate,
    ) -> RequestResult<Vec<WithId<Location>>> {
        self.get_locations_in_range(self.day_range(day)).await
    }

    /// Segments the locations of `day` into trips and summarises them.
    pub async fn get_trips_on_day(&self, day: NaiveDate) -> RequestResult<DaySummary> {
        self.get_locations_on_day(day)
            .await?
            .into_iter()
            .map(|row| row.content)
            .collect::<Vec<_>>()
            .let_owned(|locations| summarize_day(day, locations, &self.config.trips))
            .let_owned(Ok)
    }
}

/// Start of `day` in `timezone`. Should midnight not exist there (a DST gap),
/// midnight UTC of that date is used instead.
fn local_midnight(day: NaiveDate, timezone: &Tz) -> DateTime<Tz> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    timezone
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| timezone.from_utc_datetime(&midnight))
}
