//! Offloaded transaction broadcast
//!
//! Submission happens on the caller's context and returns at once. A single
//! worker task drains the job queue in FIFO order and runs each wallet call on
//! the blocking pool of the background runtime. Each submission produces
//! exactly one [`BroadcastOutcome`] on the outcome channel, which the caller
//! drains on whatever context should run its handlers.
//!
//! There is no retry, timeout or cancellation. A caller that loses interest
//! simply ignores the outcome when it arrives.

use bitcoin::Transaction;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

pub mod wallet;

pub use wallet::{OfflineWallet, SendError, SendRequest};

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastState {
    /// Queued, not yet picked up
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl BroadcastState {
    pub fn is_terminal(self) -> bool {
        matches!(self, BroadcastState::Succeeded | BroadcastState::Failed)
    }
}

/// Terminal result of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastOutcome {
    Succeeded { id: u64, transaction: Transaction },
    Failed { id: u64 },
}

impl BroadcastOutcome {
    pub fn id(&self) -> u64 {
        match self {
            BroadcastOutcome::Succeeded { id, .. } | BroadcastOutcome::Failed { id } => *id,
        }
    }

    /// Invoke exactly one listener method for this outcome
    pub fn dispatch<L: BroadcastListener + ?Sized>(self, listener: &mut L) {
        match self {
            BroadcastOutcome::Succeeded { transaction, .. } => {
                listener.on_broadcast_success(transaction)
            }
            BroadcastOutcome::Failed { .. } => listener.on_broadcast_failure(),
        }
    }
}

/// Callback-style consumer of broadcast outcomes
pub trait BroadcastListener {
    fn on_broadcast_success(&mut self, transaction: Transaction);

    fn on_broadcast_failure(&mut self);
}

/// Caller's view of one submission
#[derive(Debug, Clone)]
pub struct BroadcastTicket {
    id: u64,
    state: watch::Receiver<BroadcastState>,
}

impl BroadcastTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> BroadcastState {
        *self.state.borrow()
    }

    /// Wait for the terminal state
    pub async fn finished(&mut self) -> BroadcastState {
        match self.state.wait_for(|state| state.is_terminal()).await {
            Ok(state) => *state,
            // Worker dropped the job without finishing it
            Err(_) => BroadcastState::Failed,
        }
    }
}

struct BroadcastJob {
    id: u64,
    request: SendRequest,
    state: watch::Sender<BroadcastState>,
}

/// Handle for submitting send requests to the background worker
pub struct OffloadedBroadcastTask {
    jobs: mpsc::UnboundedSender<BroadcastJob>,
    outcomes: mpsc::UnboundedSender<BroadcastOutcome>,
    next_id: AtomicU64,
}

impl OffloadedBroadcastTask {
    /// Spawn the worker on `background` and return the submission handle
    /// together with the outcome receiver
    pub fn spawn<W: OfflineWallet>(
        wallet: Arc<W>,
        background: &Handle,
    ) -> (Self, mpsc::UnboundedReceiver<BroadcastOutcome>) {
        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel();
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        let worker = BroadcastWorker {
            wallet,
            background: background.clone(),
            outcomes: outcomes_tx.clone(),
        };
        background.spawn(worker.run(jobs_rx));

        (
            Self {
                jobs: jobs_tx,
                outcomes: outcomes_tx,
                next_id: AtomicU64::new(1),
            },
            outcomes_rx,
        )
    }

    /// Queue a send request; never runs the wallet or any handler inline
    pub fn submit(&self, request: SendRequest) -> BroadcastTicket {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (state_tx, state_rx) = watch::channel(BroadcastState::Idle);

        debug!(
            "Queueing broadcast {}: {} to {}",
            id, request.amount, request.recipient
        );

        let job = BroadcastJob {
            id,
            request,
            state: state_tx,
        };

        if let Err(mpsc::error::SendError(job)) = self.jobs.send(job) {
            // Worker is gone; still owe the caller exactly one outcome
            error!("Broadcast worker unavailable, failing submission {}", id);
            job.state.send_replace(BroadcastState::Failed);
            let _ = self.outcomes.send(BroadcastOutcome::Failed { id });
        }

        BroadcastTicket {
            id,
            state: state_rx,
        }
    }
}

/// Worker that owns the wallet and runs every send in submission order
struct BroadcastWorker<W: OfflineWallet> {
    wallet: Arc<W>,
    background: Handle,
    outcomes: mpsc::UnboundedSender<BroadcastOutcome>,
}

impl<W: OfflineWallet> BroadcastWorker<W> {
    async fn run(self, mut jobs: mpsc::UnboundedReceiver<BroadcastJob>) {
        while let Some(job) = jobs.recv().await {
            let outcome = self.execute(job).await;
            if self.outcomes.send(outcome).is_err() {
                debug!("Outcome receiver dropped, discarding broadcast result");
            }
        }
        debug!("Broadcast worker stopped");
    }

    async fn execute(&self, job: BroadcastJob) -> BroadcastOutcome {
        let BroadcastJob { id, request, state } = job;
        state.send_replace(BroadcastState::Running);
        info!("Broadcast {} running", id);

        let wallet = Arc::clone(&self.wallet);
        // Can take long
        let result = self
            .background
            .spawn_blocking(move || wallet.send_coins_offline(request))
            .await;

        match result {
            Ok(Ok(transaction)) => {
                info!("Broadcast {} succeeded: {}", id, transaction.compute_txid());
                state.send_replace(BroadcastState::Succeeded);
                BroadcastOutcome::Succeeded { id, transaction }
            }
            Ok(Err(SendError::InsufficientFunds { missing })) => {
                warn!("Broadcast {} failed: insufficient funds, missing {}", id, missing);
                state.send_replace(BroadcastState::Failed);
                BroadcastOutcome::Failed { id }
            }
            Ok(Err(e)) => {
                error!("Broadcast {} failed: {}", id, e);
                state.send_replace(BroadcastState::Failed);
                BroadcastOutcome::Failed { id }
            }
            Err(join_error) => {
                error!("Broadcast {} aborted: {}", id, join_error);
                state.send_replace(BroadcastState::Failed);
                BroadcastOutcome::Failed { id }
            }
        }
    }
}
