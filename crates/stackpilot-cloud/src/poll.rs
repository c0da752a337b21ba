//! Bounded wait-until-condition primitive.
//!
//! Every stack transition blocks on this loop: probe at a fixed interval,
//! give up after a fixed number of attempts. The outcome keeps "the
//! resource failed" distinct from "we ran out of patience" so callers can
//! report which one happened.

use std::future::Future;
use std::time::Duration;

/// One observation of the polled resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Ready,
    Pending,
    /// The resource entered a terminal state it cannot leave on its own.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready,
    TerminalFailure(String),
    Timeout { attempts: u32 },
}

/// Poll `probe` every `delay` until it reports [`Probe::Ready`], a terminal
/// failure, or `max_attempts` observations have been made.
///
/// Probe transport errors propagate immediately. There is no cancellation;
/// a caller waits out the full budget.
pub async fn wait<F, Fut, E>(
    mut probe: F,
    delay: Duration,
    max_attempts: u32,
) -> Result<PollOutcome, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe, E>>,
{
    for attempt in 1..=max_attempts {
        match probe().await? {
            Probe::Ready => return Ok(PollOutcome::Ready),
            Probe::Failed(reason) => return Ok(PollOutcome::TerminalFailure(reason)),
            Probe::Pending => {
                tracing::debug!(attempt, max_attempts, "still pending");
                if attempt < max_attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Ok(PollOutcome::Timeout {
        attempts: max_attempts,
    })
}
