use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Trait for entity-specific clients to inherit standard read operations.
///
/// Domain clients wrap a [`ResourceClient`] and translate [`FrameworkError`] into
/// their own error type; this trait provides `fetch` and `fetch_all_where` on top
/// of those two pieces so wrappers only write the domain-specific calls.
///
/// # Example
///
/// ```rust
/// use oms_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct NoteError(String);
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = std::convert::Infallible;
///     type Action = std::convert::Infallible;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: p.text })
///     }
///     async fn on_update(&mut self, u: Self::Update, _: &()) -> Result<(), Self::Error> { match u {} }
///     async fn handle_action(&mut self, a: Self::Action, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct NoteClient { inner: ResourceClient<Note> }
///
/// #[async_trait]
/// impl ActorClient<Note> for NoteClient {
///     type Error = NoteError;
///
///     fn inner(&self) -> &ResourceClient<Note> { &self.inner }
///
///     fn map_error(e: FrameworkError) -> Self::Error { NoteError(e.to_string()) }
/// }
///
/// async fn usage(client: NoteClient) {
///     // fetch() and fetch_all_where() are provided automatically
///     let cancel = CancellationToken::new();
///     let _ = client.fetch(1, &cancel).await;
///     let _ = client.fetch_all_where(|n: &Note| n.text.is_empty(), &cancel).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The entity-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by id.
    #[tracing::instrument(skip(self, cancel))]
    async fn fetch(
        &self,
        id: T::Id,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id, cancel).await.map_err(Self::map_error)
    }

    /// Fetch every entity accepted by `filter`, oldest first.
    #[tracing::instrument(skip_all)]
    async fn fetch_all_where<F>(
        &self,
        filter: F,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, Self::Error>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        tracing::debug!("Sending request");
        self.inner().list(filter, cancel).await.map_err(Self::map_error)
    }
}
