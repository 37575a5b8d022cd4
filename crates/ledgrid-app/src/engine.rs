//! Engine - orchestration state shared by frontends
//!
//! The Engine owns the TEA state, the message channel, the shutdown signal,
//! the status poller and the device gateway. Frontends feed it input
//! messages and read `state` to render.

use std::sync::Arc;
use std::time::Duration;

use ledgrid_core::prelude::*;
use ledgrid_device::DeviceGateway;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::actions::spawn_status_polling;
use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// How long shutdown waits for the poller to stop
const POLLER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Orchestration engine for the grid controller.
pub struct Engine<G> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    gateway: Arc<G>,

    poller: Option<JoinHandle<()>>,

    /// Loaded settings
    pub settings: Settings,
}

impl<G> Engine<G>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    /// Create an engine around `gateway`.
    ///
    /// Must be called inside a tokio runtime: the signal handler is spawned
    /// here. Polling does not start until [`Engine::start_polling`].
    pub fn new(settings: Settings, gateway: G) -> Self {
        let state = AppState::with_settings(settings.clone());
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            gateway: Arc::new(gateway),
            poller: None,
            settings,
        }
    }

    /// Start the periodic status poller. Calling it twice is a no-op.
    pub fn start_polling(&mut self) {
        if self.poller.is_some() {
            return;
        }
        let interval = self.settings.sync.poll_interval();
        info!("Starting status polling every {:?}", interval);
        self.poller = Some(spawn_status_polling(
            self.msg_tx.clone(),
            interval,
            self.shutdown_rx.clone(),
        ));
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.gateway);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. The TUI runner calls this
    /// before every frame.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait up to `timeout` for the next message and process it.
    ///
    /// Returns false if nothing arrived in time.
    pub async fn process_next(&mut self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.msg_rx.recv()).await {
            Ok(Some(msg)) => {
                self.process_message(msg);
                true
            }
            _ => false,
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Signal background tasks to stop and wait for the poller.
    ///
    /// Requests already in flight are not cancelled; their results are
    /// discarded by the update function once the phase is `Quitting`.
    pub async fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.poller.take() {
            match tokio::time::timeout(POLLER_SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => debug!("Poller stopped"),
                Ok(Err(e)) => warn!("Poller panicked: {}", e),
                Err(_) => warn!("Poller shutdown timed out"),
            }
        }
    }
}
