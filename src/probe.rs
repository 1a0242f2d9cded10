use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::error::Error;
use crate::status::Status;

/// Upper bound for a single reachability check.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Performs one reachability check against a target.
///
/// Implementations never fail: anything that is not a clean "up" is reported
/// as [`Status::Down`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &str) -> Status;
}

/// Probes targets with a plain `GET`, treating only `200 OK` as up.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Builds a prober with the standard [`PROBE_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self::with_client(client))
    }

    /// Uses a preconfigured client; its timeout bounds each probe.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &str) -> Status {
        match self.client.get(target).send().await {
            Ok(resp) => {
                debug!("{target} answered {}", resp.status());
                // Other 2xx and 3xx codes count as down too
                Status::from(resp.status() == StatusCode::OK)
            }
            Err(e) => {
                // No way to tell a network error from a real outage, both are down
                warn!("Error checking {target}: {e}");
                Status::Down
            }
        }
    }
}
