use std::future::Future;

use tokio::time::sleep;
use tracing::warn;

use crate::{errors::Error, Result};

/// Run `op`, retrying only on a rate-limit signal.
///
/// After a [`Error::RateLimited`] the task sleeps for exactly the requested
/// duration and runs `op` again, up to `max_attempts` runs in total. Any other
/// error, or the error of the final attempt, is returned unchanged.
pub async fn retry_on_rate_limit<T, F, Fut>(max_attempts: usize, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1usize;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(Error::RateLimited(wait)) if attempt < max_attempts => {
                warn!(
                    attempt,
                    wait_secs = wait.as_secs_f64(),
                    "rate limited, waiting before retry"
                );
                sleep(wait).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
