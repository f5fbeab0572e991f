use std::{collections::HashMap, hash::Hash, sync::Arc};

use tokio::sync::Mutex;

use crate::{actor::Actor, actor_ref::ActorRef};

struct Entry<A: Actor> {
    actor: ActorRef<A>,
    last_used: u64,
}

struct Actors<K, A: Actor> {
    entries: HashMap<K, Entry<A>>,
    clock: u64,
}

/// Lazily spawns one actor per key and hands out references to it, so that
/// all messages for the same key are processed by the same actor.
///
/// A registry created with [`Registry::bounded`] keeps at most `capacity`
/// actors. Spawning one more drops the least recently used actor, whose task
/// ends once no outstanding reference to it is left.
pub struct Registry<K, A>
where
    A: Actor,
{
    actors: Arc<Mutex<Actors<K, A>>>,
    capacity: Option<usize>,
}

impl<K, A: Actor> Clone for Registry<K, A> {
    fn clone(&self) -> Self {
        Self {
            actors: self.actors.clone(),
            capacity: self.capacity,
        }
    }
}

impl<K, A> Default for Registry<K, A>
where
    K: Eq + Hash + Clone,
    A: Actor,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, A> Registry<K, A>
where
    K: Eq + Hash + Clone,
    A: Actor,
{
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    pub fn bounded(capacity: usize) -> Self {
        Self::with_capacity(Some(capacity.max(1)))
    }

    fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            actors: Arc::new(Mutex::new(Actors {
                entries: HashMap::new(),
                clock: 0,
            })),
            capacity,
        }
    }

    /// Returns the actor for `key`, spawning it with `actor_factory` if there
    /// is none yet or the previous one has stopped.
    pub async fn get_or_spawn<F>(&self, key: K, actor_factory: F) -> ActorRef<A>
    where
        F: 'static + Send + Fn() -> A,
    {
        let mut actors = self.actors.lock().await;
        actors.clock += 1;
        let now = actors.clock;

        if let Some(entry) = actors.entries.get_mut(&key) {
            if entry.actor.is_alive() {
                entry.last_used = now;
                return entry.actor.clone();
            }
        }

        if let Some(capacity) = self.capacity {
            actors.entries.retain(|_, entry| entry.actor.is_alive());
            while actors.entries.len() >= capacity && !actors.entries.contains_key(&key) {
                let Some(oldest) = actors
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_used)
                    .map(|(key, _)| key.clone())
                else {
                    break;
                };
                actors.entries.remove(&oldest);
                log::debug!("evicted least recently used actor");
            }
        }

        let actor = crate::run(actor_factory);
        actors.entries.insert(
            key,
            Entry {
                actor: actor.clone(),
                last_used: now,
            },
        );
        actor
    }

    pub async fn len(&self) -> usize {
        self.actors.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.actors.lock().await.entries.is_empty()
    }
}
