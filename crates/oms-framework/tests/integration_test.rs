use async_trait::async_trait;
use oms_framework::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use tokio_util::sync::CancellationToken;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Bin {
    id: u32,
    label: String,
    level: i64,
}

#[derive(Debug)]
struct BinCreate {
    id: u32,
    label: String,
}

#[derive(Debug)]
struct BinUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum BinAction {
    Adjust(i64),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum BinError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("level would drop below zero")]
    Underflow,
}

#[async_trait]
impl ActorEntity for Bin {
    type Id = u32;
    type Create = BinCreate;
    type Update = BinUpdate;
    type Action = BinAction;
    type ActionResult = i64;
    type Context = ();
    type Error = BinError;

    fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(BinError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            level: 0,
        })
    }

    fn materialize(id: &u32) -> Option<Self> {
        (*id >= 100).then(|| Self {
            id: *id,
            label: "auto".into(),
            level: 0,
        })
    }

    async fn on_update(&mut self, update: BinUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<i64, Self::Error> {
        match action {
            BinAction::Adjust(delta) => {
                // Mutate first so a rejection proves the clone is thrown away.
                self.level += delta;
                if self.level < 0 {
                    return Err(BinError::Underflow);
                }
                Ok(self.level)
            }
        }
    }
}

fn spawn_bins() -> ResourceClient<Bin> {
    let (actor, client) = ResourceActor::new(10, |params: &BinCreate| params.id);
    tokio::spawn(actor.run(()));
    client
}

fn create(id: u32, label: &str) -> BinCreate {
    BinCreate {
        id,
        label: label.into(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = spawn_bins();
    let cancel = CancellationToken::new();

    // 1. Create
    let bin = client.create(create(1, "north"), &cancel).await.unwrap();
    assert_eq!(bin.level, 0);

    // 2. Perform Action
    let level = client
        .perform_action(1, BinAction::Adjust(5), &cancel)
        .await
        .unwrap();
    assert_eq!(level, 5);

    // 3. Update
    let updated = client
        .update(
            1,
            BinUpdate {
                label: Some("south".into()),
            },
            &cancel,
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "south");
    assert_eq!(updated.level, 5);

    // 4. Get
    let stored = client.get(1, &cancel).await.unwrap().unwrap();
    assert_eq!(stored, updated);
    assert!(client.get(2, &cancel).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    let client = spawn_bins();
    let cancel = CancellationToken::new();

    client.create(create(1, "a"), &cancel).await.unwrap();
    let err = client.create(create(1, "b"), &cancel).await.unwrap_err();
    assert!(matches!(err, FrameworkError::AlreadyExists(ref id) if id == "1"));

    let stored = client.get(1, &cancel).await.unwrap().unwrap();
    assert_eq!(stored.label, "a");
}

#[tokio::test]
async fn test_invalid_create_surfaces_entity_error() {
    let client = spawn_bins();
    let err = client
        .create(create(1, ""), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.entity_error::<BinError>(), Some(&BinError::EmptyLabel));
}

#[tokio::test]
async fn test_list_returns_matches_in_insertion_order() {
    let client = spawn_bins();
    let cancel = CancellationToken::new();

    for (id, label) in [(3, "x"), (1, "y"), (2, "x")] {
        client.create(create(id, label), &cancel).await.unwrap();
    }

    let xs = client.list(|b: &Bin| b.label == "x", &cancel).await.unwrap();
    let ids: Vec<u32> = xs.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![3, 2]);

    let all = client.list(|_| true, &cancel).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_rejected_action_leaves_entity_unchanged() {
    let client = spawn_bins();
    let cancel = CancellationToken::new();
    client.create(create(1, "a"), &cancel).await.unwrap();
    client
        .perform_action(1, BinAction::Adjust(2), &cancel)
        .await
        .unwrap();

    let err = client
        .perform_action(1, BinAction::Adjust(-3), &cancel)
        .await
        .unwrap_err();
    assert_eq!(err.entity_error::<BinError>(), Some(&BinError::Underflow));

    let stored = client.get(1, &cancel).await.unwrap().unwrap();
    assert_eq!(stored.level, 2);
}

#[tokio::test]
async fn test_action_materializes_unknown_entity() {
    let client = spawn_bins();
    let cancel = CancellationToken::new();

    // Below 100 nothing is materialized.
    let err = client
        .perform_action(7, BinAction::Adjust(1), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(_)));

    // Get never materializes.
    assert!(client.get(100, &cancel).await.unwrap().is_none());

    let level = client
        .perform_action(100, BinAction::Adjust(4), &cancel)
        .await
        .unwrap();
    assert_eq!(level, 4);
    let stored = client.get(100, &cancel).await.unwrap().unwrap();
    assert_eq!(stored.label, "auto");

    // A failed first action stores nothing.
    assert!(client
        .perform_action(101, BinAction::Adjust(-1), &cancel)
        .await
        .is_err());
    assert!(client.get(101, &cancel).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_of_unknown_id_is_not_found() {
    let client = spawn_bins();
    let err = client
        .update(9, BinUpdate { label: None }, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(ref id) if id == "9"));
}

#[tokio::test]
async fn test_cancelled_request_is_not_applied() {
    let client = spawn_bins();
    let cancel = CancellationToken::new();
    client.create(create(1, "a"), &cancel).await.unwrap();

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    let err = client
        .perform_action(1, BinAction::Adjust(10), &cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::Cancelled));
    assert!(matches!(
        client.create(create(2, "b"), &cancelled).await,
        Err(FrameworkError::Cancelled)
    ));

    assert_eq!(client.get(1, &cancel).await.unwrap().unwrap().level, 0);
    assert!(client.get(2, &cancel).await.unwrap().is_none());
}

#[tokio::test]
async fn test_dropped_actor_reports_closed_mailbox() {
    let (actor, client) = ResourceActor::<Bin>::new(1, |params: &BinCreate| params.id);
    drop(actor);
    let err = client
        .get(1, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
