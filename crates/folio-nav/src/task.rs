//! Async poll driver
//!
//! For hosts running an executor: calls a probe on a fixed schedule until it
//! yields a value, the timeout passes, or the token is cancelled. The probe
//! never runs after cancellation has been observed.

use std::time::{Duration, Instant};

use smol::Timer;

use crate::cancel::CancelToken;

/// How a poll loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Found { value: T, attempts: u32 },
    TimedOut { attempts: u32 },
    Cancelled { attempts: u32 },
}

impl<T> PollOutcome<T> {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Found { attempts, .. } | Self::TimedOut { attempts } | Self::Cancelled { attempts } => *attempts,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Found { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Probe immediately, then every `interval`, for at most `timeout`.
///
/// Slots are anchored to the start time, so a slow probe does not push the
/// schedule back.
pub async fn run_poll<T, F>(interval: Duration, timeout: Duration, token: CancelToken, mut probe: F) -> PollOutcome<T>
where
    F: FnMut(u32) -> Option<T>,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        if token.is_cancelled() {
            tracing::debug!("Poll cancelled after {} attempts", attempts);
            return PollOutcome::Cancelled { attempts };
        }
        if start.elapsed() >= timeout {
            return PollOutcome::TimedOut { attempts };
        }

        attempts += 1;
        if let Some(value) = probe(attempts) {
            return PollOutcome::Found { value, attempts };
        }

        Timer::at(start + interval * attempts).await;
    }
}
