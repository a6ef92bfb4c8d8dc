//! API actor - executes client commands on the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::api::client::ApiClient;
use crate::messages::{ApiCommand, ApiEvent};
use crate::models::CreateShareCode;

/// Network-side actor: turns [`ApiCommand`]s into HTTP calls and pushes
/// each outcome back as an [`ApiEvent`]. Requests run concurrently;
/// ordering is restored by the store's generation checks.
pub struct ApiActor {
    client: ApiClient,
    event_tx: mpsc::UnboundedSender<ApiEvent>,
    in_flight: JoinSet<()>,
}

impl ApiActor {
    pub fn new(client: ApiClient, event_tx: mpsc::UnboundedSender<ApiEvent>) -> Self {
        ApiActor {
            client,
            event_tx,
            in_flight: JoinSet::new(),
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<ApiCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(ApiCommand::FetchPage { id, query }) => {
                            let client = self.client.clone();
                            let tx = self.event_tx.clone();
                            self.in_flight.spawn(async move {
                                tracing::info!(id, page = ?query.page, page_size = ?query.page_size, "fetching page");
                                let result = client.fetch_page(query).await;
                                let _ = tx.send(ApiEvent::Page { id, result });
                            });
                        }

                        Some(ApiCommand::FetchAll { id, query }) => {
                            let client = self.client.clone();
                            let tx = self.event_tx.clone();
                            self.in_flight.spawn(async move {
                                tracing::info!(id, limit = ?query.limit, "fetching full list");
                                let result = client.fetch_all(query).await;
                                let _ = tx.send(ApiEvent::List { id, result });
                            });
                        }

                        Some(ApiCommand::UseCode { id, code }) => {
                            let client = self.client.clone();
                            let tx = self.event_tx.clone();
                            self.in_flight.spawn(async move {
                                tracing::info!(id, code = %code, "redeeming code");
                                let result = client.use_code(&code).await;
                                let _ = tx.send(ApiEvent::Used { id, result });
                            });
                        }

                        Some(ApiCommand::CreateCode { id, code, price }) => {
                            let client = self.client.clone();
                            let tx = self.event_tx.clone();
                            self.in_flight.spawn(async move {
                                tracing::info!(id, code = %code, price, "submitting code");
                                let body = CreateShareCode { code, price };
                                let result = client.create_code(&body).await;
                                let _ = tx.send(ApiEvent::Created { id, result });
                            });
                        }

                        Some(ApiCommand::Shutdown) | None => break,
                    }
                }

                // Reap completed request tasks
                Some(_result) = self.in_flight.join_next() => {}
            }
        }
    }
}
