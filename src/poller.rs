use crate::error::{Error, Result};
use crate::relayer_client::RelayerClient;
use crate::types::{EmailAuthMsg, RelayerJobId};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Waits for a relayer job to reach the `Finished` status.
///
/// Any other status, including failure statuses, is treated as still
/// pending. Request errors are logged and retried until the deadline.
#[derive(Debug)]
pub struct StatusPoller<'a, R: ?Sized> {
    relayer: &'a R,
    interval: Duration,
}

impl<'a, R> StatusPoller<'a, R>
where
    R: RelayerClient + ?Sized,
{
    pub fn new(relayer: &'a R, interval: Duration) -> Self {
        Self { relayer, interval }
    }

    pub async fn poll(&self, id: &RelayerJobId, timeout: Duration) -> Result<EmailAuthMsg> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            match self.relayer.status(id.clone()).await {
                Ok(res) if res.is_finished() => return Ok(res.response),
                Ok(res) => debug!(%id, status = %res.request.status, "relayer job not finished"),
                Err(err) => warn!(%id, %err, "failed to fetch relayer job status"),
            }
            sleep(self.interval).await;
        }
        Err(Error::PollTimeout {
            id: id.to_string(),
            timeout_ms: timeout.as_millis(),
        })
    }
}
