use tokio::sync::mpsc;

use crate::{actor::ActorError, handler::Envelope, Actor};

pub(crate) type BoxedEnvelope<A> = Box<dyn Envelope<A>>;

pub struct Mailbox<A: Actor>(mpsc::Sender<BoxedEnvelope<A>>);

impl<A: Actor> Clone for Mailbox<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Actor> Mailbox<A> {
    pub(crate) async fn post<E>(&self, envelope: E) -> Result<(), ActorError>
    where
        E: Envelope<A> + 'static,
    {
        self.0
            .send(Box::new(envelope))
            .await
            .map_err(|_| ActorError::MailboxClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

pub(crate) struct MailboxReceiver<A: Actor>(mpsc::Receiver<BoxedEnvelope<A>>);

impl<A: Actor> MailboxReceiver<A> {
    pub(crate) async fn recv(&mut self) -> Option<BoxedEnvelope<A>> {
        self.0.recv().await
    }
}

pub(crate) fn bounded_mailbox<A: Actor>(capacity: usize) -> (Mailbox<A>, MailboxReceiver<A>) {
    let (tx, rx) = mpsc::channel(capacity);
    (Mailbox(tx), MailboxReceiver(rx))
}
