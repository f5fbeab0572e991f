use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::Actor;

pub trait Message: Send + 'static {
    type Response: Send + 'static;
}

#[async_trait]
pub trait Handler<M>: Actor
where
    M: Message,
{
    async fn handle(&mut self, message: M) -> M::Response;
}

/// A type erased message waiting in a mailbox.
#[async_trait]
pub trait Envelope<A: Actor>: Send {
    async fn deliver(&mut self, actor: &mut A);
}

pub(crate) struct Request<M>
where
    M: Message,
{
    message: Option<M>,
    respond_to: Option<oneshot::Sender<M::Response>>,
}

impl<M> Request<M>
where
    M: Message,
{
    pub(crate) fn new(message: M, respond_to: Option<oneshot::Sender<M::Response>>) -> Self {
        Self {
            message: Some(message),
            respond_to,
        }
    }
}

#[async_trait]
impl<M, A> Envelope<A> for Request<M>
where
    M: Message,
    A: Handler<M>,
{
    async fn deliver(&mut self, actor: &mut A) {
        let Some(message) = self.message.take() else {
            return;
        };
        let response = actor.handle(message).await;

        if let Some(respond_to) = self.respond_to.take() {
            if respond_to.send(response).is_err() {
                log::debug!("requester went away before the actor answered");
            }
        }
    }
}
