use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use devnews_logging::{news_debug, news_warn};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, ProxyClient, RequestId, SearchRequest};

enum EngineCommand {
    Search {
        request_id: RequestId,
        request: SearchRequest,
    },
    Cancel {
        request_id: RequestId,
    },
}

type Pending = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs searches on a background tokio runtime and reports completions as events.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(client: ProxyClient) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("devnews-engine".to_string())
            .spawn(move || {
                let pending: Pending = Arc::default();
                while let Ok(command) = cmd_rx.recv() {
                    handle_command(&runtime, &client, &pending, &event_tx, command);
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn search(&self, request_id: RequestId, request: SearchRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            request_id,
            request,
        });
    }

    /// Abort the transfer of `request_id`. No event is emitted for it afterwards.
    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv_timeout(timeout)
            .ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: &ProxyClient,
    pending: &Pending,
    event_tx: &mpsc::Sender<EngineEvent>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Search {
            request_id,
            request,
        } => {
            let token = CancellationToken::new();
            pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(request_id, token.clone());

            let client = client.clone();
            let pending = pending.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        news_debug!("search {} cancelled", request_id);
                    }
                    result = client.search(&request) => {
                        if let Err(err) = &result {
                            news_warn!("search {} failed: {} ({})", request_id, err, err.kind);
                        }
                        let _ = event_tx.send(EngineEvent::SearchCompleted { request_id, result });
                    }
                }
                pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&request_id);
            });
        }
        EngineCommand::Cancel { request_id } => {
            let token = pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&request_id);
            if let Some(token) = token {
                token.cancel();
            }
        }
    }
}
