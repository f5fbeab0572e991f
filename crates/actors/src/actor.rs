use std::{any::Any, error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisionStrategy {
    /// Replace the actor with a fresh instance from its factory.
    Restart,
    /// Keep the actor and its state as they were before the panic.
    Resume,
    /// Stop processing messages. Pending and future requests fail.
    Stop,
}

pub trait Actor: Send + 'static {
    /// Called when a handler on the actor panics. The return value decides how
    /// the actor continues.
    /// NOTE: If this method panics, the actor can not recover from the panic.
    #[allow(unused_variables)]
    fn on_fail(&mut self, error: Box<dyn Any + Send>) -> SupervisionStrategy {
        SupervisionStrategy::Restart
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorError {
    /// The actor stopped, its mailbox no longer accepts messages.
    MailboxClosed,
    /// The actor dropped the request without answering, e.g. because the
    /// handler panicked.
    NoResponse,
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MailboxClosed => write!(f, "actor mailbox is closed"),
            Self::NoResponse => write!(f, "actor did not respond"),
        }
    }
}

impl error::Error for ActorError {}
