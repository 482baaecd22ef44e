//! Bounded waits on outbound AI calls.
//!
//! Each attempt is raced against `timeout`; losing the race drops the
//! in-flight request. Only a connection reset is worth another attempt,
//! everything else is reported straight back.

use std::error::Error as StdError;
use std::future::Future;
use std::io;
use std::time::Duration;

use tracing::warn;

use crate::error::AiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_RETRIES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    /// Extra attempts allowed after a transient failure.
    pub retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }
}

/// Why a guarded operation gave up.
#[derive(Debug)]
pub enum Attempt<E> {
    TimedOut,
    Failed(E),
}

impl RetryPolicy {
    /// Run `op` under the policy. `is_transient` decides which failures get
    /// another attempt.
    pub async fn execute<T, E, F, Fut>(
        &self,
        mut op: F,
        is_transient: impl Fn(&E) -> bool,
    ) -> Result<T, Attempt<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut retries_left = self.retries;
        loop {
            match tokio::time::timeout(self.timeout, op()).await {
                Err(_) => return Err(Attempt::TimedOut),
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) if retries_left > 0 && is_transient(&err) => {
                    retries_left -= 1;
                    warn!(retries_left, "transient failure, retrying");
                }
                Ok(Err(err)) => return Err(Attempt::Failed(err)),
            }
        }
    }

    /// `execute` specialised to HTTP calls, mapping failures to `AiError`.
    pub async fn send<T, F, Fut>(&self, provider: &'static str, op: F) -> Result<T, AiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, reqwest::Error>>,
    {
        self.execute(op, |e: &reqwest::Error| is_connection_reset(e))
            .await
            .map_err(|attempt| match attempt {
                Attempt::Failed(e) if !e.is_timeout() => AiError::Transport {
                    provider,
                    message: e.to_string(),
                },
                _ => AiError::Timeout {
                    provider,
                    timeout: self.timeout,
                },
            })
    }

    /// Read a response body under the same bounded wait as the request that
    /// produced it. Never retried: the request has already been answered.
    pub async fn read_text(
        &self,
        provider: &'static str,
        resp: reqwest::Response,
    ) -> Result<String, AiError> {
        match tokio::time::timeout(self.timeout, resp.text()).await {
            Err(_) => Err(AiError::Timeout {
                provider,
                timeout: self.timeout,
            }),
            Ok(Err(e)) => Err(AiError::Transport {
                provider,
                message: e.to_string(),
            }),
            Ok(Ok(text)) => Ok(text),
        }
    }
}

/// Walk the error chain looking for a peer reset.
pub fn is_connection_reset(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>()
            && io_err.kind() == io::ErrorKind::ConnectionReset
        {
            return true;
        }
        if e.to_string().to_ascii_lowercase().contains("connection reset") {
            return true;
        }
        current = e.source();
    }
    false
}
