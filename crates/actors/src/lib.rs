use std::panic::AssertUnwindSafe;

use actor::{Actor, SupervisionStrategy};
use actor_ref::ActorRef;
use futures::FutureExt;
use mailbox::bounded_mailbox;

pub mod actor;
pub mod actor_ref;
pub mod handler;
pub mod mailbox;
pub mod registry;

const MAILBOX_CAPACITY: usize = 32;

/// Creates and runs an actor on the tokio runtime. If a handler panics, the
/// actor is restarted, resumed or stopped according to `Actor::on_fail()`.
pub fn run<A, F>(actor_factory: F) -> ActorRef<A>
where
    A: Actor,
    F: 'static + Send + Fn() -> A,
{
    let (tx, mut rx) = bounded_mailbox(MAILBOX_CAPACITY);
    let mut actor = actor_factory();

    tokio::spawn(async move {
        while let Some(mut envelope) = rx.recv().await {
            let result = AssertUnwindSafe(envelope.deliver(&mut actor))
                .catch_unwind()
                .await;
            if let Err(why) = result {
                log::error!("actor panicked: {:?}", why);
                match actor.on_fail(why) {
                    SupervisionStrategy::Restart => actor = actor_factory(),
                    SupervisionStrategy::Resume => {}
                    SupervisionStrategy::Stop => break,
                }
            }
        }
    });

    ActorRef::new(tx)
}
