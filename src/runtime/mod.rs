//! Tokio driver for the dock
//!
//! Host adapters push [`HostEvent`]s into an unbounded channel; the runtime
//! feeds them to the orchestrator one at a time until shutdown is signalled.
//! Timers are tokio tasks that report expiry through the same channel.

use crate::config::DockConfig;
use crate::host::{HostEvent, HostServices, TimerId, Timers};
use crate::services::DockOrchestrator;
use crate::{DockError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Channel end host adapters use to deliver notifications
pub type EventSender = mpsc::UnboundedSender<HostEvent>;

/// One-shot timers backed by tokio tasks
pub struct TokioTimers {
    handle: Handle,
    events: EventSender,
    next_id: AtomicU64,
    tasks: Arc<Mutex<HashMap<TimerId, JoinHandle<()>>>>,
}

impl TokioTimers {
    pub fn new(handle: Handle, events: EventSender) -> Self {
        Self {
            handle,
            events,
            next_id: AtomicU64::new(1),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Timers for TokioTimers {
    fn schedule(&self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let events = self.events.clone();
        let tasks = self.tasks.clone();

        // Held across spawn so the task cannot look itself up before it is registered
        let mut registry = self.tasks.lock().expect("poisoned lock");
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // Only the task that still owns its entry may fire; cancel removes it first
            let owned = tasks.lock().expect("poisoned lock").remove(&id).is_some();
            if owned && events.send(HostEvent::TimerFired(id)).is_err() {
                debug!(timer = %id, "Timer fired after the event loop stopped");
            }
        });
        registry.insert(id, task);
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        match self.tasks.lock().expect("poisoned lock").remove(&id) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    fn pending(&self) -> usize {
        self.tasks.lock().expect("poisoned lock").len()
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for (_, task) in tasks.drain() {
                task.abort();
            }
        }
    }
}

/// Owns the orchestrator and the event loop that drives it
pub struct DockRuntime {
    orchestrator: DockOrchestrator,
    timers: Arc<TokioTimers>,
    sender: EventSender,
    events: mpsc::UnboundedReceiver<HostEvent>,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl DockRuntime {
    /// Build a runtime on the current tokio runtime; host timers are replaced by tokio timers
    pub fn new(config: DockConfig, host: HostServices) -> Result<Self> {
        let handle = Handle::try_current()
            .map_err(|e| DockError::HostError(format!("No tokio runtime available: {}", e)))?;

        let (sender, events) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let timers = Arc::new(TokioTimers::new(handle, sender.clone()));
        let orchestrator = DockOrchestrator::new(config, host.with_timers(timers.clone()));

        Ok(Self {
            orchestrator,
            timers,
            sender,
            events,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Sender for host notifications
    pub fn event_sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Sending on this stops [`DockRuntime::run`]
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    pub fn orchestrator(&self) -> &DockOrchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut DockOrchestrator {
        &mut self.orchestrator
    }

    pub fn timers(&self) -> &TokioTimers {
        &self.timers
    }

    /// Enable the dock and process events until shutdown; the dock is disabled on return
    #[instrument(skip_all)]
    pub async fn run(mut self) -> Result<DockOrchestrator> {
        self.orchestrator.enable()?;
        info!("Dock event loop started");

        loop {
            tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown signal received");
                    break;
                }

                event = self.events.recv() => match event {
                    Some(event) => self.orchestrator.handle_event(event),
                    None => {
                        warn!("Event channel closed");
                        break;
                    }
                },
            }
        }

        self.orchestrator.disable();
        info!("Dock event loop stopped");
        Ok(self.orchestrator)
    }
}
