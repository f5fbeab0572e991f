use actors::{
    actor::Actor,
    handler::{Handler, Message},
};
use async_trait::async_trait;
use model::fix::Fix;

use crate::{
    config::FilterConfig,
    filter::{Decision, PointFilter, SmoothedPoint},
};

/// Owns the filter state of one device. Running it as an actor serialises all
/// fixes of that device, while different devices are filtered independently.
pub struct FilterSession {
    filter: PointFilter,
}

impl FilterSession {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            filter: PointFilter::new(config),
        }
    }
}

impl Actor for FilterSession {}

#[derive(Debug, Clone)]
pub struct ProcessFix(pub Fix);

impl Message for ProcessFix {
    type Response = (Decision, Option<SmoothedPoint>);
}

#[async_trait]
impl Handler<ProcessFix> for FilterSession {
    async fn handle(&mut self, message: ProcessFix) -> (Decision, Option<SmoothedPoint>) {
        self.filter.process(&message.0)
    }
}

/// Sent after an accepted point has been stored.
#[derive(Debug, Clone)]
pub struct ConfirmSaved(pub SmoothedPoint);

impl Message for ConfirmSaved {
    type Response = ();
}

#[async_trait]
impl Handler<ConfirmSaved> for FilterSession {
    async fn handle(&mut self, message: ConfirmSaved) {
        self.filter.confirm_saved(message.0);
    }
}
