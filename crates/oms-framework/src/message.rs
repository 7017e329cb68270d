use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate used by `List` requests to select entities.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Each actor manages one type of record (the [`ActorEntity`]). Instead of ad-hoc
/// messages per operation, every store speaks the same small vocabulary:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize and insert a new record.
/// - **Get**: Point lookup by id.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing record.
/// - **List**: Every record matching a [`Filter`], in insertion order.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
///
/// There is no Delete: records served by these actors are never physically removed.
///
/// # Cancellation
/// Mutating requests carry the caller's [`CancellationToken`]. The actor checks it
/// immediately before applying the mutation and answers
/// [`FrameworkError::Cancelled`] instead if it has fired.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        cancel: CancellationToken,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        cancel: CancellationToken,
        respond_to: Response<T>,
    },
    List {
        filter: FilterBox<T>,
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        cancel: CancellationToken,
        respond_to: Response<T::ActionResult>,
    },
}

/// Wrapper giving [`Filter`] a `Debug` impl so requests can be logged.
pub struct FilterBox<T>(pub Filter<T>);

impl<T> std::fmt::Debug for FilterBox<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Filter(..)")
    }
}
