// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Readiness gate for the transport.
//!
//! The transport performs an asynchronous, possibly retried handshake before
//! it can serve requests. Operations issued before then wait on this gate
//! instead of failing outright, but never longer than a bounded timeout.

use std::time::Duration;

use tokio::sync::watch;

use crate::error::Error;

/// One-shot-then-persistent readiness signal.
///
/// The gate starts unready. Any number of failed attempts may be reported
/// with [`signal_attempt_failed`](Self::signal_attempt_failed); they are
/// visible to observers but release no waiter. The first
/// [`signal_ready`](Self::signal_ready) is terminal: the gate stays ready
/// and later signals are ignored.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use alexa_fan_lib::protocol::ReadinessGate;
///
/// # async fn example() -> alexa_fan_lib::Result<()> {
/// let gate = ReadinessGate::new(Duration::from_secs(30));
/// gate.signal_ready();
/// gate.wait().await?;
/// assert!(gate.is_ready());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReadinessGate {
    sender: watch::Sender<bool>,
    timeout: Duration,
}

impl ReadinessGate {
    /// Default wait applied by [`wait`](Self::wait).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates an unready gate with the given default wait.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender, timeout }
    }

    /// Returns the default wait.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `true` once the transport is initialized.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.sender.borrow()
    }

    /// Subscribes to readiness events.
    ///
    /// The receiver sees `false` for every failed attempt and a single final
    /// `true`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    /// Reports a failed initialization attempt.
    ///
    /// Has no effect once the gate is ready.
    pub fn signal_attempt_failed(&self) {
        self.sender.send_if_modified(|ready| !*ready);
    }

    /// Marks the transport as initialized and releases all waiters.
    pub fn signal_ready(&self) {
        let released = self.sender.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        });
        if released {
            tracing::info!("Transport ready");
        }
    }

    /// Waits until the gate is ready, for at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationTimeout` if the gate is still unready
    /// when the timeout elapses.
    pub async fn await_ready(&self, timeout: Duration) -> Result<(), Error> {
        let mut receiver = self.sender.subscribe();
        let ready = tokio::time::timeout(timeout, receiver.wait_for(|ready| *ready))
            .await
            .is_ok_and(|result| result.is_ok());

        if ready {
            Ok(())
        } else {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(timeout_ms, "Timed out waiting for transport readiness");
            Err(Error::InitializationTimeout { timeout_ms })
        }
    }

    /// Waits until the gate is ready, for at most the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationTimeout` on expiry.
    pub async fn wait(&self) -> Result<(), Error> {
        self.await_ready(self.timeout).await
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn ready_gate_returns_immediately() {
        let gate = ReadinessGate::default();
        gate.signal_ready();
        gate.await_ready(Duration::from_millis(1)).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn unready_gate_times_out() {
        let gate = ReadinessGate::default();
        let err = gate.await_ready(Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, Error::InitializationTimeout { timeout_ms: 5000 }));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_attempts_do_not_release_waiters() {
        let gate = Arc::new(ReadinessGate::new(Duration::from_secs(10)));
        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.wait().await })
        };

        tokio::time::sleep(Duration::from_secs(1)).await;
        gate.signal_attempt_failed();
        tokio::time::sleep(Duration::from_secs(1)).await;
        gate.signal_attempt_failed();
        assert!(!waiter.is_finished());

        gate.signal_ready();
        waiter.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn ready_is_terminal() {
        let gate = ReadinessGate::default();
        gate.signal_ready();
        gate.signal_attempt_failed();
        assert!(gate.is_ready());
        gate.await_ready(Duration::from_millis(1)).await.unwrap();
    }

    #[tokio::test]
    async fn subscribers_observe_attempts_and_readiness() {
        let gate = ReadinessGate::default();
        let mut events = gate.subscribe();

        gate.signal_attempt_failed();
        assert!(events.has_changed().unwrap());
        assert!(!*events.borrow_and_update());

        gate.signal_ready();
        assert!(events.has_changed().unwrap());
        assert!(*events.borrow_and_update());

        gate.signal_ready();
        assert!(!events.has_changed().unwrap());
    }
}
