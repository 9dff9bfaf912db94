use super::core::{DispatchResponse, Endpoint, RawRequest};
use crate::runtime_config::RuntimeConfig;
use may::coroutine;
use may::sync::mpsc;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Work item sent to an endpoint coroutine.
pub struct DispatchJob {
    /// Unvalidated request data
    pub request: RawRequest,
    /// Channel for sending the single response back to the caller
    pub reply_tx: mpsc::Sender<DispatchResponse>,
}

/// Type alias for a channel sender that feeds an endpoint coroutine
pub type EndpointSender = mpsc::Sender<DispatchJob>;

/// Registry of named endpoints, each served by its own coroutine.
///
/// Cloning is cheap: clones share the same endpoint coroutines.
#[derive(Clone, Default)]
pub struct Dispatcher {
    /// Map of endpoint names to their channel senders
    pub endpoints: HashMap<String, EndpointSender>,
    config: RuntimeConfig,
}

impl Dispatcher {
    /// Create a new empty dispatcher. `config.stack_size` sizes the
    /// coroutines spawned by [`register`](Self::register).
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Dispatcher {
            endpoints: HashMap::new(),
            config,
        }
    }

    /// Add a sender for `name`, replacing any existing one.
    ///
    /// Dropping the old sender closes its channel, so the old coroutine exits
    /// once it has drained its queue.
    pub fn add_endpoint(&mut self, name: &str, sender: EndpointSender) {
        if self.endpoints.remove(name).is_some() {
            warn!(
                endpoint = %name,
                total_endpoints = self.endpoints.len(),
                "Replaced existing endpoint - old coroutine will exit"
            );
        }

        info!(
            endpoint = %name,
            total_endpoints = self.endpoints.len() + 1,
            "Endpoint registered"
        );

        self.endpoints.insert(name.to_string(), sender);
    }

    /// Spawn a coroutine serving `endpoint` and register it under `name`.
    ///
    /// # Safety
    ///
    /// Calls `may::coroutine::Builder::spawn()`, which is unsafe in the `may`
    /// runtime. The caller must ensure the runtime is configured before
    /// registering endpoints.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the coroutine could not be created; the
    /// endpoint is not registered in that case.
    pub unsafe fn register(&mut self, name: &str, endpoint: Endpoint) -> std::io::Result<()> {
        let (tx, rx) = mpsc::channel::<DispatchJob>();
        let stack_size = self.config.stack_size;
        let endpoint_name = name.to_string();

        // SAFETY: the closure owns everything it touches (endpoint, receiver)
        // and only communicates through channels.
        let spawn_result = unsafe {
            coroutine::Builder::new()
                .stack_size(stack_size)
                .spawn(move || {
                    debug!(endpoint = %endpoint_name, stack_size, "Endpoint coroutine start");

                    for job in rx.iter() {
                        let response = endpoint.handle(job.request);
                        if job.reply_tx.send(response).is_err() {
                            warn!(
                                endpoint = %endpoint_name,
                                "Caller dropped before the response was delivered"
                            );
                        }
                    }

                    debug!(endpoint = %endpoint_name, "Endpoint coroutine exit");
                })
        };

        if let Err(e) = spawn_result {
            error!(
                endpoint = %name,
                error = %e,
                stack_size,
                "Failed to spawn endpoint coroutine"
            );
            return Err(e);
        }

        self.add_endpoint(name, tx);
        Ok(())
    }

    /// Send `request` to the endpoint registered as `name` and wait for its
    /// response.
    ///
    /// Returns `None` if no endpoint has that name. A 503 response means the
    /// endpoint coroutine is gone.
    #[must_use]
    pub fn dispatch(&self, name: &str, request: RawRequest) -> Option<DispatchResponse> {
        let Some(tx) = self.endpoints.get(name) else {
            let available: Vec<&String> = self.endpoints.keys().collect();
            error!(endpoint = %name, available = ?available, "Endpoint not found");
            return None;
        };

        let (reply_tx, reply_rx) = mpsc::channel();
        let start = Instant::now();

        if let Err(e) = tx.send(DispatchJob { request, reply_tx }) {
            error!(endpoint = %name, error = %e, "Failed to send request to endpoint");
            return Some(DispatchResponse::empty(503));
        }

        match reply_rx.recv() {
            Ok(response) => {
                debug!(
                    endpoint = %name,
                    status = response.status,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Endpoint response received"
                );
                Some(response)
            }
            Err(e) => {
                error!(
                    endpoint = %name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Endpoint channel closed - coroutine may have crashed"
                );
                Some(DispatchResponse::empty(503))
            }
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.endpoints.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
