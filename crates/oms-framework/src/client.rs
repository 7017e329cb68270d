use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{FilterBox, ResourceRequest};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

/// A type-safe client for interacting with a `ResourceActor`.
///
/// The client only holds the mailbox sender, so cloning it is cheap and clones can
/// be shared freely across tasks.
///
/// Every call takes the caller's [`CancellationToken`]:
/// * a call made with an already-cancelled token fails with
///   [`FrameworkError::Cancelled`] without sending anything;
/// * reads stop waiting for the reply as soon as the token fires;
/// * mutations forward the token to the actor, which refuses to apply the
///   mutation if the token fired while the request was queued. Once a mutation
///   has been applied the reply is always awaited, so the caller never loses track
///   of a change that did happen.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(
        &self,
        params: T::Create,
        cancel: &CancellationToken,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(
            ResourceRequest::Create {
                params,
                cancel: cancel.clone(),
                respond_to,
            },
            cancel,
        )
        .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(
        &self,
        id: T::Id,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ResourceRequest::Get { id, respond_to }, cancel)
            .await?;
        Self::read_reply(response, cancel).await
    }

    pub async fn update(
        &self,
        id: T::Id,
        update: T::Update,
        cancel: &CancellationToken,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(
            ResourceRequest::Update {
                id,
                update,
                cancel: cancel.clone(),
                respond_to,
            },
            cancel,
        )
        .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns every record accepted by `filter`, oldest first.
    pub async fn list(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(
            ResourceRequest::List {
                filter: FilterBox(Box::new(filter)),
                respond_to,
            },
            cancel,
        )
        .await?;
        Self::read_reply(response, cancel).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
        cancel: &CancellationToken,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(
            ResourceRequest::Action {
                id,
                action,
                cancel: cancel.clone(),
                respond_to,
            },
            cancel,
        )
        .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    async fn send(
        &self,
        request: ResourceRequest<T>,
        cancel: &CancellationToken,
    ) -> Result<(), FrameworkError> {
        if cancel.is_cancelled() {
            return Err(FrameworkError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FrameworkError::Cancelled),
            sent = self.sender.send(request) => sent.map_err(|_| FrameworkError::ActorClosed),
        }
    }

    async fn read_reply<R>(
        response: oneshot::Receiver<Result<R, FrameworkError>>,
        cancel: &CancellationToken,
    ) -> Result<R, FrameworkError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FrameworkError::Cancelled),
            reply = response => reply.map_err(|_| FrameworkError::ActorDropped)?,
        }
    }
}
