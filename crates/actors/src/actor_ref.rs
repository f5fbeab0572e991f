use tokio::sync::oneshot;

use crate::{
    actor::{Actor, ActorError},
    handler::{Handler, Message, Request},
    mailbox::Mailbox,
};

/// A cloneable handle to a running actor.
pub struct ActorRef<A: Actor> {
    mailbox: Mailbox<A>,
}

impl<A: Actor> Clone for ActorRef<A> {
    fn clone(&self) -> Self {
        Self {
            mailbox: self.mailbox.clone(),
        }
    }
}

impl<A: Actor> ActorRef<A> {
    pub(crate) fn new(mailbox: Mailbox<A>) -> Self {
        Self { mailbox }
    }

    /// Sends a message without waiting for it to be handled.
    pub async fn tell<M>(&self, msg: M) -> Result<(), ActorError>
    where
        M: Message,
        A: Handler<M>,
    {
        self.mailbox.post(Request::new(msg, None)).await
    }

    /// Sends a message and waits for the actor's answer. Messages are handled
    /// one at a time in the order they arrive.
    pub async fn ask<M>(&self, msg: M) -> Result<M::Response, ActorError>
    where
        M: Message,
        A: Handler<M>,
    {
        let (response_tx, response_rx) = oneshot::channel();
        self.mailbox.post(Request::new(msg, Some(response_tx))).await?;
        response_rx.await.map_err(|_| ActorError::NoResponse)
    }

    pub fn is_alive(&self) -> bool {
        !self.mailbox.is_closed()
    }
}
