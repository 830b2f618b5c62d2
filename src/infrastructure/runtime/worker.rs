//! Async worker - runs in Tokio runtime and handles RPC operations

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::domain::{
    connect, parse_address, read_address_balance, read_basics, read_gas_snapshot, AppMeta,
    ChainReader, NetworkConfig, PulseError, WalletConnector,
};
use crate::infrastructure::ethereum::AlloyReader;
use crate::infrastructure::runtime::bridge::{EventSender, Operation, RuntimeCommand, RuntimeEvent};

/// Builds a read client for a network
pub type ReaderFactory =
    Box<dyn Fn(&NetworkConfig) -> anyhow::Result<Arc<dyn ChainReader>> + Send>;

pub fn alloy_readers() -> ReaderFactory {
    Box::new(|network: &NetworkConfig| -> anyhow::Result<Arc<dyn ChainReader>> {
        let reader: Arc<dyn ChainReader> = Arc::new(AlloyReader::for_network(network)?);
        Ok(reader)
    })
}

/// Command handler state; one read client is kept per RPC URL
pub struct Worker {
    app: AppMeta,
    connector: Arc<dyn WalletConnector>,
    readers: ReaderFactory,
    cache: HashMap<String, Arc<dyn ChainReader>>,
}

impl Worker {
    pub fn new(app: AppMeta, connector: Arc<dyn WalletConnector>, readers: ReaderFactory) -> Self {
        Self {
            app,
            connector,
            readers,
            cache: HashMap::new(),
        }
    }

    fn reader(&mut self, network: &NetworkConfig) -> Result<Arc<dyn ChainReader>, PulseError> {
        if let Some(reader) = self.cache.get(&network.rpc_url) {
            return Ok(Arc::clone(reader));
        }
        let reader = (self.readers)(network).map_err(PulseError::query)?;
        tracing::info!(endpoint = %reader.endpoint_name(), "read client created");
        self.cache
            .insert(network.rpc_url.clone(), Arc::clone(&reader));
        Ok(reader)
    }

    /// Run one command to completion. Returns `None` for `Shutdown`.
    pub async fn handle(&mut self, cmd: RuntimeCommand) -> Option<RuntimeEvent> {
        let event = match cmd {
            RuntimeCommand::Shutdown => return None,

            RuntimeCommand::Connect { epoch, network } => {
                match self.connect(&network).await {
                    Ok((session, basics)) => RuntimeEvent::Connected {
                        epoch,
                        network,
                        session,
                        basics,
                    },
                    Err(err) => failed(epoch, Operation::Connect, err),
                }
            }

            RuntimeCommand::Pulse { epoch, network } => {
                let result = match self.reader(&network) {
                    Ok(reader) => read_gas_snapshot(reader.as_ref()).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(snapshot) => RuntimeEvent::PulseReady {
                        epoch,
                        network,
                        snapshot,
                    },
                    Err(err) => failed(epoch, Operation::Pulse, err),
                }
            }

            RuntimeCommand::CheckBalance {
                epoch,
                network,
                address,
            } => {
                let result = match self.reader(&network) {
                    Ok(reader) => read_address_balance(reader.as_ref(), &address).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok((_, balance)) => RuntimeEvent::BalanceReady {
                        epoch,
                        network,
                        address,
                        balance,
                    },
                    Err(err) => failed(epoch, Operation::Balance, err),
                }
            }
        };
        Some(event)
    }

    async fn connect(
        &mut self,
        network: &NetworkConfig,
    ) -> Result<(crate::domain::Session, crate::domain::Basics), PulseError> {
        let session = connect(self.connector.as_ref(), &self.app, network).await?;
        let address = parse_address(&session.address)?;
        let reader = self.reader(network)?;
        let basics = read_basics(reader.as_ref(), address).await?;
        Ok((session, basics))
    }
}

fn failed(epoch: u64, op: Operation, err: PulseError) -> RuntimeEvent {
    tracing::warn!(op = op.label(), error = %err, "operation failed");
    RuntimeEvent::Failed {
        epoch,
        op,
        message: err.to_string(),
    }
}

/// Run the async worker loop until shutdown or until the TUI goes away
pub async fn run_async_worker(
    app: AppMeta,
    connector: Arc<dyn WalletConnector>,
    readers: ReaderFactory,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: EventSender,
) {
    let mut worker = Worker::new(app, connector, readers);
    while let Some(cmd) = cmd_rx.recv().await {
        tracing::debug!(?cmd, "worker command");
        let Some(event) = worker.handle(cmd).await else {
            break;
        };
        if evt_tx.send(event).is_err() {
            break;
        }
    }
    tracing::debug!("worker stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use alloy::primitives::U256;

    use super::*;
    use crate::domain::query::stub::StubReader;
    use crate::domain::session::stub::{StubConnector, StubWallet};

    const ADDR: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";

    fn worker_with(wallet: Arc<StubWallet>, reader: StubReader) -> (Worker, Arc<AtomicUsize>) {
        let reader: Arc<dyn ChainReader> = Arc::new(reader);
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let factory: ReaderFactory = Box::new(
            move |_: &NetworkConfig| -> anyhow::Result<Arc<dyn ChainReader>> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::clone(&reader))
            },
        );
        let worker = Worker::new(AppMeta::default(), Arc::new(StubConnector(wallet)), factory);
        (worker, built)
    }

    #[tokio::test]
    async fn test_connect_reports_session_and_basics() {
        let (mut worker, _) = worker_with(StubWallet::new(&[ADDR], "0x14a34"), StubReader::healthy());
        let event = worker
            .handle(RuntimeCommand::Connect {
                epoch: 3,
                network: NetworkConfig::base_sepolia(),
            })
            .await
            .unwrap();
        match event {
            RuntimeEvent::Connected {
                epoch,
                session,
                basics,
                ..
            } => {
                assert_eq!(epoch, 3);
                assert_eq!(session.address, ADDR);
                assert_eq!(basics.block_number, 100);
                assert_eq!(basics.balance, U256::from(1_000_000_000_000_000_000u64));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connect_without_accounts_is_labelled() {
        let (mut worker, _) = worker_with(StubWallet::new(&[], "0x14a34"), StubReader::healthy());
        let event = worker
            .handle(RuntimeCommand::Connect {
                epoch: 0,
                network: NetworkConfig::base_sepolia(),
            })
            .await
            .unwrap();
        match event {
            RuntimeEvent::Failed { op, message, .. } => {
                assert_eq!(op, Operation::Connect);
                assert_eq!(message, "No address returned from eth_requestAccounts.");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pulse_failure_has_no_partial_result() {
        let reader = StubReader {
            fees: None,
            ..StubReader::healthy()
        };
        let (mut worker, _) = worker_with(StubWallet::new(&[ADDR], "0x14a34"), reader);
        let event = worker
            .handle(RuntimeCommand::Pulse {
                epoch: 0,
                network: NetworkConfig::base_sepolia(),
            })
            .await
            .unwrap();
        assert!(matches!(
            event,
            RuntimeEvent::Failed {
                op: Operation::Pulse,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_reader_is_reused_per_rpc_url() {
        let (mut worker, built) =
            worker_with(StubWallet::new(&[ADDR], "0x14a34"), StubReader::healthy());
        for _ in 0..3 {
            worker
                .handle(RuntimeCommand::CheckBalance {
                    epoch: 0,
                    network: NetworkConfig::base_sepolia(),
                    address: ADDR.to_string(),
                })
                .await;
        }
        assert_eq!(built.load(Ordering::SeqCst), 1);

        worker
            .handle(RuntimeCommand::Pulse {
                epoch: 1,
                network: NetworkConfig::base_mainnet(),
            })
            .await;
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_balance_address_is_labelled() {
        let (mut worker, _) = worker_with(StubWallet::new(&[ADDR], "0x14a34"), StubReader::healthy());
        let event = worker
            .handle(RuntimeCommand::CheckBalance {
                epoch: 0,
                network: NetworkConfig::base_sepolia(),
                address: "not-an-address".into(),
            })
            .await
            .unwrap();
        assert!(matches!(
            event,
            RuntimeEvent::Failed {
                op: Operation::Balance,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_shutdown_yields_nothing() {
        let (mut worker, _) = worker_with(StubWallet::new(&[ADDR], "0x14a34"), StubReader::healthy());
        assert!(worker.handle(RuntimeCommand::Shutdown).await.is_none());
    }
}
