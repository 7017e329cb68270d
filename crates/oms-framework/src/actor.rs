use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{FilterBox, ResourceRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type IdFn<T> =
    Box<dyn Fn(&<T as ActorEntity>::Create) -> <T as ActorEntity>::Id + Send + Sync>;

/// The generic actor that stores a collection of entities.
///
/// # Architecture Note
/// This struct is the "server" half of a store. It owns the records and the
/// receiving end of the mailbox. Requests are processed one at a time, so the
/// records need no `Mutex`: the task has exclusive ownership of its state.
///
/// The actor serialises access to its *storage*, the way a database latches a
/// page. It is not the critical section of the business operation; callers that
/// need read-check-write atomicity across several requests take an
/// [`EntityLocks`](crate::EntityLocks) guard for the entity first.
///
/// # Storage layout
/// Records live in an arena (`entries`) in insertion order, with an `index` from id
/// to arena slot. Point lookups go through the index; `List` walks the arena, which
/// yields records in the order they were created.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the `actor` (server) and `client`.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use oms_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, value: i64 }
/// #[derive(Debug)] struct CounterCreate { id: u32 }
/// #[derive(Debug)] enum CounterAction { Add(i64) }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = std::convert::Infallible;
///     type Action = CounterAction;
///     type ActionResult = i64;
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, value: 0 })
///     }
///     async fn on_update(&mut self, update: Self::Update, _: &()) -> Result<(), Self::Error> {
///         match update {}
///     }
///     async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<i64, Self::Error> {
///         match action {
///             CounterAction::Add(n) => { self.value += n; Ok(self.value) }
///         }
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10, |params: &CounterCreate| params.id);
///     tokio::spawn(actor.run(()));
///
///     let cancel = CancellationToken::new();
///     client.create(CounterCreate { id: 7 }, &cancel).await.unwrap();
///     let value = client.perform_action(7, CounterAction::Add(3), &cancel).await.unwrap();
///     assert_eq!(value, 3);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    entries: Vec<T>,
    index: HashMap<T::Id, usize>,
    next_id: IdFn<T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the mailbox. When it is full, client calls
    ///   wait until there is space.
    /// * `next_id` - Derives the id of a new record from its create payload. Stores
    ///   with generated ids ignore the payload; keyed stores read the key from it.
    pub fn new(
        buffer_size: usize,
        next_id: impl Fn(&T::Create) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entries: Vec::new(),
            index: HashMap::new(),
            next_id: Box::new(next_id),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "oms_engine::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    params,
                    cancel,
                    respond_to,
                } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &cancel, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, size = self.entries.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.index.get(&id).map(|&slot| self.entries[slot].clone());
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    cancel,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &cancel, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self.list(&filter);
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    cancel,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.perform_action(&id, action, &cancel, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.entries.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        cancel: &CancellationToken,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let id = (self.next_id)(&params);
        if self.index.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }

        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;

        if cancel.is_cancelled() {
            return Err(FrameworkError::Cancelled);
        }
        self.index.insert(id, self.entries.len());
        self.entries.push(item.clone());
        Ok(item)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        cancel: &CancellationToken,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        let mut next = self.entries[slot].clone();
        next.on_update(update, context).await.map_err(entity_error)?;

        if cancel.is_cancelled() {
            return Err(FrameworkError::Cancelled);
        }
        self.entries[slot] = next.clone();
        Ok(next)
    }

    fn list(&self, filter: &FilterBox<T>) -> Vec<T> {
        self.entries
            .iter()
            .filter(|item| (filter.0)(item))
            .cloned()
            .collect()
    }

    async fn perform_action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        cancel: &CancellationToken,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (slot, mut next) = match self.index.get(id).copied() {
            Some(slot) => (Some(slot), self.entries[slot].clone()),
            None => {
                let fresh = T::materialize(id)
                    .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
                (None, fresh)
            }
        };

        let result = next
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;

        if cancel.is_cancelled() {
            return Err(FrameworkError::Cancelled);
        }
        match slot {
            Some(slot) => self.entries[slot] = next,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push(next);
            }
        }
        Ok(result)
    }
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}
