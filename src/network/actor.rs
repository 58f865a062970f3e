//! Network actor - runs API calls and the CV download in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;
use crate::network::cv::{CvDownloader, CvOutcome};

/// Network actor that processes API and download commands
pub struct NetworkActor {
    client: ApiClient,
    downloader: CvDownloader,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        client: ApiClient,
        downloader: CvDownloader,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            client,
            downloader,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::CheckHealth { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %client.base_url(), "Checking backend health");
                                let response = match client.check_health().await {
                                    Ok(health) => NetworkResponse::Health { id, status: health.status },
                                    Err(e) => NetworkResponse::HealthFailed { id, error: e.to_string() },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::SubmitContact { id, form }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, email = %form.email, subject = %form.subject, "Submitting contact form");
                                let response = match client.submit_contact(&form).await {
                                    Ok(body) => {
                                        tracing::info!(id, "Contact form delivered");
                                        NetworkResponse::ContactSent { id, message: body.message }
                                    }
                                    Err(e) => NetworkResponse::ContactFailed { id, error: e.to_string() },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::DownloadCv { id }) => {
                            let response_tx = self.response_tx.clone();
                            let downloader = self.downloader.clone();

                            self.active_requests.spawn(async move {
                                let response = match downloader.download().await {
                                    Ok(CvOutcome::Saved(path)) => {
                                        tracing::info!(id, path = %path.display(), "Resume saved");
                                        NetworkResponse::CvSaved { id, path }
                                    }
                                    Ok(CvOutcome::Opened(path)) => NetworkResponse::CvOpened { id, path },
                                    Err(e) => {
                                        tracing::error!(id, error = %e, "Resume download failed");
                                        NetworkResponse::CvFailed { id, error: e.to_string() }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            // In-flight calls are dropped; their results would land on a dead controller
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
        tracing::info!("Network actor stopped");
    }
}
