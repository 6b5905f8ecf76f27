//! In-memory planner store synchronised with the backend.
//!
//! # Design
//! The store is the only component that talks to a [`Transport`]. It caches
//! the last applied list and the last fetched detail record. Every mutation is
//! followed by a full `fetch_all`: the created or updated record returned by
//! the backend is never merged into the cache.
//!
//! Concurrent calls are not queued. Each fetch draws a sequence number when
//! it is issued and a response older than the one already applied is
//! discarded, so overlapping refreshes settle on the most recently issued
//! request rather than the one that finished last.
//!
//! Loading is tracked per [`Operation`] with counters released by a guard, so
//! the flags drop back after success, failure, or a dropped future.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use log::debug;
use tokio::sync::RwLock;

use crate::client::PlannerClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::form::Submission;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{DraftForm, PlannerId, PlannerRecord};

/// Store operations that can be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchAll,
    FetchOne,
    Create,
    Update,
    Delete,
}

impl Operation {
    const ALL: [Operation; 5] = [
        Operation::FetchAll,
        Operation::FetchOne,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Whether a completed fetch replaced the cached state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Applied,
    /// A later-issued fetch had already been applied; this response was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Pending {
    counts: [AtomicUsize; 5],
}

impl Pending {
    fn begin(&self, op: Operation) -> PendingGuard<'_> {
        self.counts[op.slot()].fetch_add(1, Ordering::SeqCst);
        PendingGuard { pending: self, op }
    }

    fn get(&self, op: Operation) -> bool {
        self.counts[op.slot()].load(Ordering::SeqCst) > 0
    }
}

struct PendingGuard<'a> {
    pending: &'a Pending,
    op: Operation,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.counts[self.op.slot()].fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
struct StoreState {
    planners: Vec<PlannerRecord>,
    current: Option<PlannerRecord>,
    list_seq: u64,
    detail_seq: u64,
}

/// Holds the planner list and drives fetch/create/update/delete against the
/// backend.
///
/// Construct one per application and pass it by reference to whatever needs
/// it; dropping it releases the transport.
pub struct PlannerStore<T> {
    client: PlannerClient,
    transport: T,
    state: RwLock<StoreState>,
    pending: Pending,
    sequence: AtomicU64,
}

impl PlannerStore<UreqTransport> {
    /// Store backed by a real HTTP agent configured from `config`.
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(
            PlannerClient::new(config.base_url()),
            UreqTransport::new(config.timeout()),
        )
    }
}

impl<T: Transport> PlannerStore<T> {
    pub fn new(client: PlannerClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: RwLock::new(StoreState::default()),
            pending: Pending::default(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &PlannerClient {
        &self.client
    }

    /// Snapshot of the list from the last applied `fetch_all`.
    pub async fn planners(&self) -> Vec<PlannerRecord> {
        self.state.read().await.planners.clone()
    }

    /// Record stored by the last applied `fetch_one`.
    pub async fn current(&self) -> Option<PlannerRecord> {
        self.state.read().await.current.clone()
    }

    /// True while any operation is in flight.
    pub fn is_loading(&self) -> bool {
        Operation::ALL.iter().any(|op| self.pending.get(*op))
    }

    pub fn is_pending(&self, op: Operation) -> bool {
        self.pending.get(op)
    }

    /// Replace the held list with the backend collection, in server order.
    ///
    /// On failure the previous list is left untouched.
    pub async fn fetch_all(&self) -> Result<Refresh> {
        let _guard = self.pending.begin(Operation::FetchAll);
        self.refresh().await
    }

    /// Fetch one record and keep it as the current detail record.
    pub async fn fetch_one(&self, id: &PlannerId) -> Result<PlannerRecord> {
        let _guard = self.pending.begin(Operation::FetchOne);
        let seq = self.next_sequence();
        let response = self.round_trip(self.client.build_get_planner(id)).await?;
        let record = self.client.parse_get_planner(response)?;

        let mut state = self.state.write().await;
        if seq > state.detail_seq {
            state.detail_seq = seq;
            state.current = Some(record.clone());
        } else {
            debug!("dropping superseded detail response for {id}");
        }
        Ok(record)
    }

    /// Submit a new record, then resync the list.
    pub async fn create(&self, draft: &DraftForm) -> Result<Refresh> {
        let _guard = self.pending.begin(Operation::Create);
        let request = self.client.build_create_planner(draft)?;
        let response = self.round_trip(request).await?;
        self.client.parse_create_planner(response)?;
        self.refresh().await
    }

    /// Replace the record at `id` with `draft`, then resync the list.
    pub async fn update(&self, id: &PlannerId, draft: &DraftForm) -> Result<Refresh> {
        let _guard = self.pending.begin(Operation::Update);
        let request = self.client.build_update_planner(id, draft)?;
        let response = self.round_trip(request).await?;
        self.client.parse_update_planner(response)?;
        self.refresh().await
    }

    /// Remove the record at `id`, then resync the list.
    ///
    /// The request is sent whether or not `id` is in the held list.
    pub async fn delete(&self, id: &PlannerId) -> Result<Refresh> {
        let _guard = self.pending.begin(Operation::Delete);
        let response = self.round_trip(self.client.build_delete_planner(id)).await?;
        self.client.parse_delete_planner(response)?;
        self.refresh().await
    }

    /// Route a form submission to `create` or `update`.
    pub async fn submit(&self, submission: &Submission) -> Result<Refresh> {
        match submission {
            Submission::Create(draft) => self.create(draft).await,
            Submission::Update { id, draft } => self.update(id, draft).await,
        }
    }

    async fn refresh(&self) -> Result<Refresh> {
        let seq = self.next_sequence();
        let response = self.round_trip(self.client.build_list_planners()).await?;
        let planners = self.client.parse_list_planners(response)?;

        let mut state = self.state.write().await;
        if seq < state.list_seq {
            debug!("dropping superseded list response (seq {seq} < {})", state.list_seq);
            return Ok(Refresh::Superseded);
        }
        debug!("applied list of {} planners (seq {seq})", planners.len());
        state.list_seq = seq;
        state.planners = planners;
        Ok(Refresh::Applied)
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let path = request.path.clone();
        self.transport.execute(request).await.inspect_err(|e| {
            debug!("{} {path} failed: {e}", method.as_str());
        })
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl<T> std::fmt::Debug for PlannerStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerStore")
            .field("client", &self.client)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}
