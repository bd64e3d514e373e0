//! # Mocks & Fault Injection
//!
//! Two test doubles live here:
//!
//! - [`MockClient`] answers requests from a queue of expectations instead of running
//!   an actor. Use it to test an actor whose hooks call *another* actor (a purchase
//!   request calling the product actor) without standing up the dependency.
//! - [`FlakyStore`] is an [`EntityStore`] whose writes can be made to fail on demand.
//!   Use it to drive the compensation paths (`on_discard`, delete restore) from
//!   integration tests.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Testing logic *around* the client | Testing the actor itself or full system |
//! | **Error Injection** | `return_err` | `FlakyStore` |
//!
//! ## Client logic against a mock
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Shelf { id: u32, stock: u32 }
//! #[derive(Debug)] struct ShelfCreate;
//! #[derive(Debug)] struct ShelfUpdate;
//! #[derive(Debug)] enum ShelfAction { Count }
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = ShelfUpdate;
//!     type Action = ShelfAction; type ActionResult = u32; type Context = (); type Error = ShelfError;
//!     fn from_create_params(id: u32, _: ShelfCreate) -> Result<Self, Self::Error> { Ok(Self { id, stock: 0 }) }
//!     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<u32, Self::Error> { Ok(self.stock) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     mock.expect_action(1).return_ok(4);
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.perform_action(1, ShelfAction::Count).await.unwrap(), 4);
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Failing writes
//!
//! ```rust,ignore
//! let (store, faults) = FlakyStore::new();
//! let (actor, client) = ResourceActor::with_store(10, store);
//! tokio::spawn(actor.run(ctx));
//!
//! faults.fail_saves(true);
//! assert!(client.create(params).await.unwrap_err().is_store_error());
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::store::{EntityStore, MemoryStore, StoreError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the canned response for it.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::Create(_) => "create",
            Expectation::List(_) => "list",
            Expectation::Update(_) => "update",
            Expectation::Delete(_) => "delete",
            Expectation::Action(_) => "action",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<(Option<<T as ActorEntity>::Id>, Expectation<T>)>>>;

fn lock<Q>(queue: &Mutex<Q>) -> MutexGuard<'_, Q> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered. A request that
/// does not match the next expectation (wrong kind or wrong ID) panics the mock
/// task, which the caller observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&queue).pop_front();
                let Some((expected_id, expectation)) = next else {
                    panic!("Unexpected {} request: no expectations left", request.kind());
                };
                let id_matches = |id: &T::Id| expected_id.as_ref().map_or(true, |e| e == id);

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get(response))
                        if id_matches(&id) =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. }
                        | ResourceRequest::CreateWithId { respond_to, .. },
                        Expectation::Create(response),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Expectation::List(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Expectation::Update(response),
                    ) if id_matches(&id) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Expectation::Delete(response))
                        if id_matches(&id) =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Expectation::Action(response),
                    ) if id_matches(&id) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        panic!(
                            "Expectation mismatch: expected {} for {:?}, got {}",
                            expectation.name(),
                            expected_id,
                            request.kind()
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), Expectation::Get)
    }

    /// Matches both `create` and `create_with_id`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), None, Expectation::Create)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), None, Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), Expectation::Update)
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), Expectation::Delete)
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), Expectation::Action)
    }

    /// Number of registered expectations not consumed yet.
    pub fn remaining(&self) -> usize {
        lock(&self.expectations).len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation with its canned response.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Queue<T>,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> Self {
        Self {
            expectations,
            id,
            wrap,
        }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        lock(&self.expectations).push_back((self.id, (self.wrap)(response)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test drives by hand.
///
/// Useful when a test needs to hold a request open, for example to observe what
/// a caller does while the actor has not answered yet.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, crate::message::Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, crate::message::Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

// =============================================================================
// FAULT-INJECTING STORE
// =============================================================================

const UNLIMITED: usize = usize::MAX;

#[derive(Debug)]
struct FaultState {
    saves_left: AtomicUsize,
    fail_removes: AtomicBool,
}

/// Remote control for a [`FlakyStore`]. Cloneable, so a test can keep it after the
/// store has moved into its actor.
#[derive(Debug, Clone)]
pub struct StoreFaults {
    state: Arc<FaultState>,
}

impl StoreFaults {
    /// Lets the next `n` saves through and rejects every save after that.
    pub fn fail_saves_after(&self, n: usize) {
        self.state.saves_left.store(n, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        let left = if fail { 0 } else { UNLIMITED };
        self.state.saves_left.store(left, Ordering::SeqCst);
    }

    pub fn fail_removes(&self, fail: bool) {
        self.state.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// Clears every injected fault.
    pub fn heal(&self) {
        self.fail_saves(false);
        self.fail_removes(false);
    }

    fn take_save(&self) -> bool {
        self.state
            .saves_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                UNLIMITED => Some(UNLIMITED),
                n => Some(n - 1),
            })
            .is_ok()
    }
}

/// A [`MemoryStore`] whose writes fail when told to.
#[derive(Debug)]
pub struct FlakyStore<T: ActorEntity> {
    inner: MemoryStore<T>,
    faults: StoreFaults,
}

impl<T: ActorEntity> FlakyStore<T> {
    pub fn new() -> (Self, StoreFaults) {
        let faults = StoreFaults {
            state: Arc::new(FaultState {
                saves_left: AtomicUsize::new(UNLIMITED),
                fail_removes: AtomicBool::new(false),
            }),
        };
        let store = Self {
            inner: MemoryStore::new(),
            faults: faults.clone(),
        };
        (store, faults)
    }
}

impl<T: ActorEntity> EntityStore<T> for FlakyStore<T> {
    fn load(&self, id: &T::Id) -> Option<T> {
        self.inner.load(id)
    }

    fn contains(&self, id: &T::Id) -> bool {
        self.inner.contains(id)
    }

    fn save(&mut self, id: T::Id, entity: T) -> Result<(), StoreError> {
        if !self.faults.take_save() {
            return Err(StoreError::SaveRejected(id.to_string()));
        }
        self.inner.save(id, entity)
    }

    fn remove(&mut self, id: &T::Id) -> Result<(), StoreError> {
        if self.faults.state.fail_removes.load(Ordering::SeqCst) {
            return Err(StoreError::RemoveRejected(id.to_string()));
        }
        self.inner.remove(id)
    }

    fn all(&self) -> Vec<T> {
        self.inner.all()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
