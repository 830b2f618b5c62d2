//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI thread owns all application state and never awaits. User actions
//! become [`RuntimeCommand`]s; the worker answers with [`RuntimeEvent`]s that
//! the run loop drains once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use alloy::primitives::U256;
use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::domain::{AppMeta, Basics, GasSnapshot, NetworkConfig, Session, WalletConnector};
use crate::infrastructure::runtime::worker::{run_async_worker, ReaderFactory};

/// User-triggered operations, used to label errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Connect,
    Pulse,
    Balance,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Connect => "Connect",
            Operation::Pulse => "Pulse",
            Operation::Balance => "Balance",
        }
    }
}

/// Commands sent from the TUI to the async worker.
///
/// `epoch` is echoed back so results from before a network toggle can be
/// told apart from current ones.
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Open a wallet session, then read block number and balance
    Connect { epoch: u64, network: NetworkConfig },
    /// Latest block header plus fee estimate
    Pulse { epoch: u64, network: NetworkConfig },
    /// Balance of a caller-supplied address
    CheckBalance {
        epoch: u64,
        network: NetworkConfig,
        address: String,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Connected {
        epoch: u64,
        network: NetworkConfig,
        session: Session,
        basics: Basics,
    },
    PulseReady {
        epoch: u64,
        network: NetworkConfig,
        snapshot: GasSnapshot,
    },
    BalanceReady {
        epoch: u64,
        network: NetworkConfig,
        /// Echoed as the user supplied it
        address: String,
        balance: U256,
    },
    /// Operation failed; `message` is already human-readable
    Failed {
        epoch: u64,
        op: Operation,
        message: String,
    },
    /// Worker-level failure outside any operation
    Error { message: String },
}

impl RuntimeEvent {
    pub fn epoch(&self) -> Option<u64> {
        match self {
            RuntimeEvent::Connected { epoch, .. }
            | RuntimeEvent::PulseReady { epoch, .. }
            | RuntimeEvent::BalanceReady { epoch, .. }
            | RuntimeEvent::Failed { epoch, .. } => Some(*epoch),
            RuntimeEvent::Error { .. } => None,
        }
    }
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread with its own Tokio runtime
    pub fn new(
        app: AppMeta,
        connector: Arc<dyn WalletConnector>,
        readers: ReaderFactory,
    ) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = Runtime::new().context("Failed to create Tokio runtime")?;
        thread::Builder::new()
            .name("pulse-worker".into())
            .spawn(move || {
                rt.block_on(run_async_worker(app, connector, readers, cmd_rx, evt_tx));
            })
            .context("Failed to spawn worker thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}

pub(crate) type EventSender = Sender<RuntimeEvent>;
